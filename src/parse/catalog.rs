//! Listing-page extraction
//!
//! A listing page carries a sequence of book "cards", each linking to one
//! book's detail page, plus a pagination widget whose last numbered control
//! is the section's page bound.

use scraper::{Html, Selector};
use url::Url;

use crate::HarvestError;

/// Card layout of the catalog's listing pages
const CARD_LINK_PATTERN: &str = ".ow_px_td .d_book .bookimage a";

/// Numbered controls of the pagination widget
const PAGE_CONTROL_PATTERN: &str = ".npage";

/// Extracts the raw detail-page link of every book card, in document order.
///
/// A page without cards yields an empty vector; an out-of-range listing page
/// is legitimately empty, so that is not an error. Re-parsing the same
/// markup always yields the same sequence.
pub fn card_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse(CARD_LINK_PATTERN) {
        for card in document.select(&selector) {
            if let Some(href) = card.value().attr("href") {
                links.push(href.to_string());
            }
        }
    }

    links
}

/// Reads the highest page number from a listing page's pagination widget.
///
/// The widget's last numbered control names the section's final page. A page
/// without the widget, or with a non-numeric control, is malformed: there is
/// nothing to bound a harvest run against.
pub fn last_page_number(html: &str, page_url: &Url) -> Result<u32, HarvestError> {
    let document = Html::parse_document(html);

    let selector = Selector::parse(PAGE_CONTROL_PATTERN).map_err(|e| {
        HarvestError::MalformedPage {
            url: page_url.to_string(),
            message: format!("bad page control pattern: {}", e),
        }
    })?;

    let last_control =
        document
            .select(&selector)
            .last()
            .ok_or_else(|| HarvestError::MalformedPage {
                url: page_url.to_string(),
                message: "no pagination controls found".to_string(),
            })?;

    let text = last_control.text().collect::<String>();
    text.trim()
        .parse()
        .map_err(|_| HarvestError::MalformedPage {
            url: page_url.to_string(),
            message: format!("pagination control {:?} is not a page number", text),
        })
}
