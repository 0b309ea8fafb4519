use anyhow::{bail, Result};
use clap::Parser;
use common::pagedir::PageDirectory;
use common::persist::{check_readable, load_index};
use querier::{OutputFormat, Querier};
use std::io::{self, IsTerminal};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "querier")]
#[command(about = "Answer boolean word queries from stdin against a crawl and its index")]
struct Args {
    /// Page directory written by the crawler
    page_directory: String,
    /// Index file written by the indexer for that directory
    index_file: String,
    /// Print one JSON object per query instead of the text report
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let args = Args::parse();

    let pages = PageDirectory::new(&args.page_directory);
    if !pages.validate() {
        bail!("{} is not a crawler page directory", args.page_directory);
    }
    check_readable(&args.index_file)?;
    let index = load_index(&args.index_file)?;
    tracing::info!(words = index.len(), index_file = %args.index_file, "index loaded");

    let format = if args.json { OutputFormat::Json } else { OutputFormat::Text };
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    Querier::new(&index, &pages)
        .with_format(format)
        .run(stdin.lock(), io::stdout().lock(), interactive)?;
    Ok(())
}
