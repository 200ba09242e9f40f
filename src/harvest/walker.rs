//! Catalog walking
//!
//! Iterates the requested page range in ascending order, one page at a time,
//! and harvests every card found. This module is the per-page failure
//! boundary: a listing page that fails to load is logged and skipped, and
//! the walk continues with the next page number.

use std::ops::RangeInclusive;

use reqwest::Client;

use crate::harvest::fetcher::fetch_text;
use crate::harvest::harvester::{harvest_book, BookOutcome, HarvestOptions};
use crate::manifest::BookRecord;
use crate::parse;
use crate::site::{book_id_from_link, Site};
use crate::Result;

/// Resolves the section's highest valid page number.
///
/// Fetches the section's first listing page and reads the last pagination
/// control. Failure here is fatal to the run: without the bound there is
/// nothing to default or clamp the requested range against.
pub async fn resolve_last_page(client: &Client, site: &Site) -> Result<u32> {
    let url = site.section_url()?;
    let html = fetch_text(client, &url).await?;
    parse::last_page_number(&html, &url)
}

/// Walks the inclusive page range and returns every harvested record, in
/// the order the books were encountered.
pub async fn walk_catalog(
    client: &Client,
    site: &Site,
    pages: RangeInclusive<u32>,
    opts: &HarvestOptions,
) -> Vec<BookRecord> {
    let mut records = Vec::new();

    for page in pages {
        let page_url = match site.catalog_page_url(page) {
            Ok(url) => url,
            Err(err) => {
                tracing::warn!("page {}: bad listing URL: {}", page, err);
                continue;
            }
        };

        let html = match fetch_text(client, &page_url).await {
            Ok(html) => html,
            Err(err) => {
                tracing::info!("page {} skipped: {}", page, err);
                continue;
            }
        };

        let links = parse::card_links(&html);
        tracing::debug!("page {}: {} cards", page, links.len());

        for href in links {
            let Some(book_id) = book_id_from_link(&href) else {
                tracing::warn!("page {}: card link {:?} carries no book id", page, href);
                continue;
            };

            match harvest_book(client, site, book_id, opts).await {
                BookOutcome::Found(record) => records.push(record),
                BookOutcome::NotFound | BookOutcome::Malformed => {}
            }
        }
    }

    records
}
