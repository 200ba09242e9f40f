//! HTML extraction for listing and detail pages
//!
//! Both extractors are pure transforms over already-fetched markup; no
//! network or disk access happens here.

mod catalog;
mod detail;

pub use catalog::{card_links, last_page_number};
pub use detail::parse_book_page;
