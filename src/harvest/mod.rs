//! Harvest orchestration
//!
//! Ties the pipeline together: configuration validation, page-bound
//! resolution, the catalog walk, and the manifest write.

mod fetcher;
mod harvester;
mod walker;

pub use fetcher::{build_http_client, check_for_redirect, fetch_bytes, fetch_text};
pub use harvester::{harvest_book, BookOutcome, HarvestOptions};
pub use walker::{resolve_last_page, walk_catalog};

use crate::config::{self, HarvestConfig};
use crate::manifest::{self, BookRecord};
use crate::site::Site;
use crate::{ConfigError, Result};

/// Runs one complete harvest against the given site.
///
/// 1. Validates the configuration (fatal before any request).
/// 2. Resolves the catalog's page bound (fatal on failure).
/// 3. Defaults or clamps the requested end page to the bound.
/// 4. Walks the range and writes the manifest.
///
/// Returns the harvested records, in manifest order.
pub async fn run(site: &Site, config: &HarvestConfig) -> Result<Vec<BookRecord>> {
    config::validate(config)?;

    let client = build_http_client()?;

    let last_page = resolve_last_page(&client, site).await?;
    tracing::info!("catalog section has {} pages", last_page);

    let start = config.start_page;
    let end = match config.end_page {
        Some(end) if end > last_page => {
            tracing::warn!("end page {} is past the last page, clamping to {}", end, last_page);
            last_page
        }
        Some(end) => end,
        None => last_page,
    };
    if start > end {
        return Err(ConfigError::InvalidPageRange { start, end }.into());
    }

    tracing::info!("harvesting pages {}..={}", start, end);
    let options = HarvestOptions {
        dest_root: config.dest_folder.clone(),
        skip_txt: config.skip_txt,
        skip_imgs: config.skip_imgs,
    };
    let records = walk_catalog(&client, site, start..=end, &options).await;

    let manifest_path = config.manifest_path();
    manifest::write_manifest(&records, &manifest_path)?;
    tracing::info!(
        "harvested {} books, manifest written to {}",
        records.len(),
        manifest_path.display()
    );

    Ok(records)
}
