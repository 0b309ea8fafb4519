use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use common::pagedir::PageDirectory;
use common::persist::{check_readable, check_writable, load_index, save_index};
use indexer::build_index;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build and check the word index of a crawled page directory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index every page of a crawler-produced directory
    Build {
        /// Page directory written by the crawler
        page_directory: String,
        /// Index file to write
        index_file: String,
    },
    /// Load an index file and write it back out, to check the file format round-trips
    Test {
        /// Existing index file
        old_index_file: String,
        /// Where to write the reloaded index
        new_index_file: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { page_directory, index_file } => {
            let pages = PageDirectory::new(&page_directory);
            if !pages.validate() {
                bail!("{page_directory} is not a crawler page directory");
            }
            check_writable(&index_file)?;
            let index = build_index(&pages)?;
            save_index(&index_file, &index)?;
            tracing::info!(index_file = %index_file, "index build complete");
        }
        Commands::Test { old_index_file, new_index_file } => {
            check_readable(&old_index_file)?;
            let index = load_index(&old_index_file)?;
            save_index(&new_index_file, &index)?;
            tracing::info!(old = %old_index_file, new = %new_index_file, words = index.len(), "index rewritten");
        }
    }
    Ok(())
}
