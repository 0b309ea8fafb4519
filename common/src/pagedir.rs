//! Crawler output directory: a `.crawler` marker plus one file per fetched
//! page, named by document ID (`1`, `2`, ...). Each page file holds the URL
//! on line one, the crawl depth on line two, and the raw HTML after that.

use crate::DocId;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

const MARKER: &str = ".crawler";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebPage {
    pub url: String,
    pub depth: u32,
    pub html: String,
}

/// Contents of the `.crawler` marker. Only the marker's presence matters to
/// readers; the fields record how the directory was produced.
#[derive(Debug, Serialize, Deserialize)]
pub struct CrawlMeta {
    pub seed_url: String,
    pub max_depth: u32,
    pub created_at: String,
}

impl CrawlMeta {
    pub fn new(seed_url: impl Into<String>, max_depth: u32) -> Self {
        Self {
            seed_url: seed_url.into(),
            max_depth,
            created_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default(),
        }
    }
}

/// Resolves a document ID to the URL it was fetched from.
pub trait DocumentLookup {
    fn find_url(&self, doc_id: DocId) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct PageDirectory {
    pub root: PathBuf,
}

impl PageDirectory {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }

    fn marker(&self) -> PathBuf { self.root.join(MARKER) }
    fn page(&self, doc_id: DocId) -> PathBuf { self.root.join(doc_id.to_string()) }

    /// Prepare the directory for a crawl by writing the marker file.
    pub fn init(&self, meta: &CrawlMeta) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("cannot create page directory {}", self.root.display()))?;
        let json = serde_json::to_string_pretty(meta)?;
        fs::write(self.marker(), json)
            .with_context(|| format!("cannot write {}", self.marker().display()))?;
        Ok(())
    }

    /// True if the directory was produced by the crawler and holds at least page 1.
    pub fn validate(&self) -> bool {
        if File::open(self.marker()).is_err() {
            tracing::warn!(dir = %self.root.display(), "no .crawler file found in page directory");
            return false;
        }
        if File::open(self.page(1)).is_err() {
            tracing::warn!(dir = %self.root.display(), "no readable page 1 in page directory");
            return false;
        }
        true
    }

    pub fn save(&self, page: &WebPage, doc_id: DocId) -> Result<()> {
        let path = self.page(doc_id);
        let contents = format!("{}\n{}\n{}", page.url, page.depth, page.html);
        fs::write(&path, contents).with_context(|| format!("cannot write page {}", path.display()))?;
        Ok(())
    }

    /// Read page `doc_id`. `Ok(None)` means there is no such page, which marks
    /// the end of the crawl when IDs are read in sequence.
    pub fn load(&self, doc_id: DocId) -> Result<Option<WebPage>> {
        if doc_id == 0 {
            return Ok(None);
        }
        let path = self.page(doc_id);
        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e).with_context(|| format!("cannot open page {}", path.display())),
        };
        let mut reader = BufReader::new(file);

        let url = read_line(&mut reader)?;
        let depth_line = read_line(&mut reader)?;
        let depth = match depth_line.trim().parse() {
            Ok(d) => d,
            Err(_) => bail!("page {} has invalid depth '{}'", path.display(), depth_line),
        };
        let mut html = String::new();
        reader.read_to_string(&mut html)?;

        Ok(Some(WebPage { url, depth, html }))
    }
}

impl DocumentLookup for PageDirectory {
    /// Only the first line of the page file is read.
    fn find_url(&self, doc_id: DocId) -> Option<String> {
        let file = File::open(self.page(doc_id)).ok()?;
        read_line(&mut BufReader::new(file)).ok()
    }
}

impl DocumentLookup for HashMap<DocId, String> {
    fn find_url(&self, doc_id: DocId) -> Option<String> { self.get(&doc_id).cloned() }
}

fn read_line<R: BufRead>(reader: &mut R) -> io::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn page(url: &str, depth: u32, html: &str) -> WebPage {
        WebPage { url: url.into(), depth, html: html.into() }
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let pages = PageDirectory::new(dir.path());
        let p = page("http://example.com/", 0, "<html>\n<body>hi</body>\n</html>\n");
        pages.save(&p, 1).unwrap();
        assert_eq!(pages.load(1).unwrap(), Some(p));
    }

    #[test]
    fn missing_page_is_none() {
        let dir = tempdir().unwrap();
        let pages = PageDirectory::new(dir.path());
        assert_eq!(pages.load(3).unwrap(), None);
        assert_eq!(pages.load(0).unwrap(), None);
    }

    #[test]
    fn bad_depth_is_an_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1"), "http://example.com/\ndeep\n<html></html>").unwrap();
        assert!(PageDirectory::new(dir.path()).load(1).is_err());
    }

    #[test]
    fn validate_needs_marker_and_first_page() {
        let dir = tempdir().unwrap();
        let pages = PageDirectory::new(dir.path().join("crawl"));
        assert!(!pages.validate());

        pages.init(&CrawlMeta::new("http://example.com/", 1)).unwrap();
        assert!(!pages.validate());

        pages.save(&page("http://example.com/", 0, ""), 1).unwrap();
        assert!(pages.validate());
    }

    #[test]
    fn marker_records_crawl() {
        let dir = tempdir().unwrap();
        let pages = PageDirectory::new(dir.path());
        pages.init(&CrawlMeta::new("http://example.com/", 2)).unwrap();
        let meta: CrawlMeta = serde_json::from_str(&fs::read_to_string(dir.path().join(".crawler")).unwrap()).unwrap();
        assert_eq!(meta.seed_url, "http://example.com/");
        assert_eq!(meta.max_depth, 2);
    }

    #[test]
    fn find_url_reads_first_line() {
        let dir = tempdir().unwrap();
        let pages = PageDirectory::new(dir.path());
        pages.save(&page("http://example.com/a.html", 1, "<p>a</p>"), 2).unwrap();
        assert_eq!(pages.find_url(2).as_deref(), Some("http://example.com/a.html"));
        assert_eq!(pages.find_url(9), None);
    }
}
