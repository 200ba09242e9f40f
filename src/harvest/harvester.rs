//! Per-book harvesting
//!
//! One book is harvested end-to-end here: detail page fetch, metadata parse,
//! text download, cover download. This module is also the per-book failure
//! boundary: nothing that goes wrong with a single book propagates past it.

use std::path::PathBuf;

use reqwest::Client;
use url::Url;

use crate::assets;
use crate::harvest::fetcher::{fetch_bytes, fetch_text};
use crate::manifest::{BookRecord, NOT_DOWNLOADED};
use crate::parse::parse_book_page;
use crate::site::Site;
use crate::{HarvestError, Result};

/// Per-run harvesting options, shared by every book
#[derive(Debug, Clone)]
pub struct HarvestOptions {
    /// Directory under which `books/` and `images/` are created
    pub dest_root: PathBuf,

    /// Leave `book_path` at the sentinel instead of downloading the text
    pub skip_txt: bool,

    /// Leave `img_src` at the sentinel instead of downloading the cover
    pub skip_imgs: bool,
}

/// Outcome of harvesting one book.
///
/// Missing books and malformed pages are ordinary branches for callers, not
/// exceptional conditions, so they are modeled as variants rather than
/// errors.
#[derive(Debug)]
pub enum BookOutcome {
    /// Book parsed and its assets saved; the record is ready for the manifest
    Found(BookRecord),

    /// The site signaled the book does not exist, or a fetch failed
    NotFound,

    /// The detail page lacked a required structural element
    Malformed,
}

/// Harvests one book end-to-end.
///
/// Every transport, parse, and IO failure is absorbed here and logged as a
/// skip; the caller only ever sees one of the three [`BookOutcome`] cases.
pub async fn harvest_book(
    client: &Client,
    site: &Site,
    book_id: u32,
    opts: &HarvestOptions,
) -> BookOutcome {
    match try_harvest(client, site, book_id, opts).await {
        Ok(record) => {
            tracing::info!("book {}: {} :: {}", book_id, record.title, record.author);
            BookOutcome::Found(record)
        }
        Err(HarvestError::RedirectedAway { url }) => {
            tracing::info!("book {} not found ({})", book_id, url);
            BookOutcome::NotFound
        }
        Err(HarvestError::MalformedPage { url, message }) => {
            tracing::warn!("book {}: malformed page {}: {}", book_id, url, message);
            BookOutcome::Malformed
        }
        Err(err) => {
            tracing::warn!("book {} skipped: {}", book_id, err);
            BookOutcome::NotFound
        }
    }
}

async fn try_harvest(
    client: &Client,
    site: &Site,
    book_id: u32,
    opts: &HarvestOptions,
) -> Result<BookRecord> {
    let page_url = site.book_page_url(book_id)?;
    let html = fetch_text(client, &page_url).await?;
    let mut record = parse_book_page(&html, &page_url)?;

    // The text body lives behind a separate endpoint and is an independent
    // failure point: a book may have metadata but no downloadable text.
    if !opts.skip_txt {
        let text_url = site.book_text_url(book_id)?;
        let text = fetch_text(client, &text_url).await?;
        let path = assets::save_text(&opts.dest_root, book_id, &record.title, &text)?;
        record.book_path = path.to_string_lossy().into_owned();
    }

    if opts.skip_imgs {
        record.img_src = NOT_DOWNLOADED.to_string();
    } else {
        let cover_url = Url::parse(&record.img_src)?;
        let filename = assets::image_filename(&cover_url).ok_or_else(|| {
            HarvestError::MalformedPage {
                url: cover_url.to_string(),
                message: "cover URL has no file name".to_string(),
            }
        })?;
        let bytes = fetch_bytes(client, &cover_url).await?;
        let path = assets::save_cover(&opts.dest_root, &filename, &bytes)?;
        record.img_src = path.to_string_lossy().into_owned();
    }

    Ok(record)
}
