//! Tululu-Harvest command-line entry point

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tululu_harvest::config::DEFAULT_MANIFEST_NAME;
use tululu_harvest::{harvest, HarvestConfig, Site};

/// Tululu-Harvest: download books from the tululu.org catalog
///
/// Walks the listing pages of the science fiction section, downloads each
/// book's text and cover image, and writes a JSON manifest of everything
/// that was harvested.
#[derive(Parser, Debug)]
#[command(name = "tululu-harvest")]
#[command(version)]
#[command(about = "Download books from the tululu.org catalog", long_about = None)]
struct Cli {
    /// Number of the first listing page to harvest
    #[arg(long, default_value_t = 1)]
    start_page: u32,

    /// Number of the last listing page to harvest (default: the section's
    /// last page)
    #[arg(long)]
    end_page: Option<u32>,

    /// Directory for downloaded books, images and the manifest
    #[arg(long, default_value = ".")]
    dest_folder: PathBuf,

    /// Do not download book texts
    #[arg(long)]
    skip_txt: bool,

    /// Do not download cover images
    #[arg(long)]
    skip_imgs: bool,

    /// Manifest filename, relative to the destination folder
    #[arg(long, default_value = DEFAULT_MANIFEST_NAME)]
    json_path: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = HarvestConfig {
        start_page: cli.start_page,
        end_page: cli.end_page,
        dest_folder: cli.dest_folder,
        skip_txt: cli.skip_txt,
        skip_imgs: cli.skip_imgs,
        json_path: cli.json_path,
    };

    let records = harvest::run(&Site::tululu(), &config).await?;
    println!("Harvested {} books", records.len());

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("tululu_harvest=info,warn"),
            1 => EnvFilter::new("tululu_harvest=debug,info"),
            2 => EnvFilter::new("tululu_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
