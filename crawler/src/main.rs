use anyhow::{bail, Context, Result};
use clap::Parser;
use common::pagedir::{CrawlMeta, PageDirectory, WebPage};
use common::DocId;
use reqwest::{header, Client};
use scraper::{Html, Selector};
use std::collections::{HashSet, VecDeque};
use std::time::Duration;
use tokio::time::sleep;
use url::Url;
use tracing_subscriber::{fmt, EnvFilter};

/// Pages larger than this are skipped.
const MAX_PAGE_BYTES: usize = 2 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Crawl a site breadth-first from a seed URL into a page directory")]
struct Cli {
    /// URL to start from; only links on the same host are followed
    seed_url: String,
    /// Directory that receives the numbered page files
    page_directory: String,
    /// Maximum link distance from the seed page
    #[arg(value_parser = clap::value_parser!(u32).range(0..=10))]
    max_depth: u32,
    /// Pause between page fetches, in milliseconds
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent string sent with every request
    #[arg(long, default_value = "tse-crawler/0.1")]
    user_agent: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    let seed = Url::parse(&args.seed_url).with_context(|| format!("cannot parse seed URL {}", args.seed_url))?;
    let seed = normalize(seed);
    if !is_web(&seed) || seed.host_str().is_none() {
        bail!("seed URL {seed} is not an http(s) URL with a host");
    }

    let pages = PageDirectory::new(&args.page_directory);
    pages.init(&CrawlMeta::new(seed.as_str(), args.max_depth))?;

    let client = Client::builder()
        .user_agent(args.user_agent.clone())
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(Duration::from_secs(args.timeout_secs))
        .build()?;

    let saved = crawl(&client, &seed, &pages, args.max_depth, Duration::from_millis(args.delay_ms)).await?;
    tracing::info!(saved, dir = %args.page_directory, "crawl complete");
    Ok(())
}

/// Fetch pages breadth-first from `seed`, saving each one under the next
/// document ID. Returns the number of pages saved.
async fn crawl(client: &Client, seed: &Url, pages: &PageDirectory, max_depth: u32, delay: Duration) -> Result<DocId> {
    let mut seen: HashSet<String> = HashSet::from([seed.to_string()]);
    let mut frontier: VecDeque<(Url, u32)> = VecDeque::from([(seed.clone(), 0)]);
    let mut next_doc_id: DocId = 1;
    let mut first = true;

    while let Some((url, depth)) = frontier.pop_front() {
        if !first {
            sleep(delay).await;
        }
        first = false;

        let Some(html) = fetch(client, &url).await else { continue };
        tracing::debug!(depth, %url, "fetched");
        let page = WebPage { url: url.to_string(), depth, html };
        pages.save(&page, next_doc_id)?;
        next_doc_id += 1;

        if depth >= max_depth {
            continue;
        }
        tracing::debug!(depth, %url, "scanning");
        for link in extract_links(&url, &page.html) {
            if !is_internal(&link, seed) {
                tracing::debug!(depth, %link, "ignoring external");
            } else if seen.insert(link.to_string()) {
                tracing::debug!(depth, %link, "added");
                frontier.push_back((link, depth + 1));
            } else {
                tracing::debug!(depth, %link, "ignoring duplicate");
            }
        }
    }
    Ok(next_doc_id - 1)
}

async fn fetch(client: &Client, url: &Url) -> Option<String> {
    let resp = match client.get(url.clone()).send().await {
        Ok(resp) => resp,
        Err(e) => {
            tracing::warn!(%url, error = %e, "fetch failed");
            return None;
        }
    };
    if !resp.status().is_success() {
        tracing::warn!(%url, status = %resp.status(), "fetch failed");
        return None;
    }
    if let Some(ct) = resp.headers().get(header::CONTENT_TYPE) {
        if let Ok(v) = ct.to_str() {
            if !v.starts_with("text/html") {
                tracing::debug!(%url, content_type = v, "not html");
                return None;
            }
        }
    }
    let bytes = resp.bytes().await.ok()?;
    if bytes.len() > MAX_PAGE_BYTES {
        tracing::warn!(%url, bytes = bytes.len(), "page too large");
        return None;
    }
    Some(String::from_utf8_lossy(&bytes).to_string())
}

/// Absolute, fragment-free http(s) targets of every `<a href>` on the page.
fn extract_links(base: &Url, html: &str) -> Vec<Url> {
    let anchors = Selector::parse("a[href]").expect("valid selector");
    let doc = Html::parse_document(html);
    doc.select(&anchors)
        .filter_map(|a| a.value().attr("href"))
        .filter_map(|href| base.join(href.trim()).ok())
        .filter(is_web)
        .map(normalize)
        .collect()
}

fn normalize(mut url: Url) -> Url {
    url.set_fragment(None);
    url
}

fn is_web(url: &Url) -> bool { matches!(url.scheme(), "http" | "https") }

/// Internal links stay on the seed's host.
fn is_internal(url: &Url, seed: &Url) -> bool {
    is_web(url) && url.host_str().is_some() && url.host_str() == seed.host_str()
}
