//! Detail-page extraction
//!
//! Parses one book's detail page into a [`BookRecord`]. The CSS patterns for
//! every semantic field live in the table below so the parsing contract is
//! auditable in one place.

use scraper::{Html, Selector};
use url::Url;

use crate::manifest::BookRecord;
use crate::HarvestError;

// Selector table for the detail page, one entry per semantic field.
const TITLE_PATTERN: &str = "tr .ow_px_td h1";
const COVER_PATTERN: &str = "tr .ow_px_td .d_book .bookimage img";
const COMMENT_PATTERN: &str = "tr .ow_px_td .texts .black";
const GENRE_PATTERN: &str = "tr .ow_px_td span.d_book a";

/// The site renders the heading as `Title :: Author`
const TITLE_AUTHOR_SEPARATOR: &str = "::";

/// Parses a book detail page into a [`BookRecord`].
///
/// `page_url` is the detail page's own URL, needed to resolve the cover
/// image's page-relative `src` into an absolute URL. The returned record's
/// `book_path` carries the "not downloaded" sentinel and `img_src` the
/// absolute cover URL; the harvester fills in local paths after saving.
///
/// Fails with `MalformedPage` when the heading, the title/author separator,
/// or the cover image is absent. Comments and genres may legitimately be
/// empty.
pub fn parse_book_page(html: &str, page_url: &Url) -> Result<BookRecord, HarvestError> {
    let document = Html::parse_document(html);

    let heading = select_first_text(&document, TITLE_PATTERN, page_url, "title heading")?;
    let (title, author) = heading
        .split_once(TITLE_AUTHOR_SEPARATOR)
        .ok_or_else(|| malformed(page_url, "heading does not split into title :: author"))?;

    let cover_src = select_first_attr(&document, COVER_PATTERN, "src", page_url, "cover image")?;
    let img_src = page_url.join(cover_src.trim())?;

    let comments = select_all_text(&document, COMMENT_PATTERN, page_url)?;
    let genres = select_all_text(&document, GENRE_PATTERN, page_url)?;

    Ok(BookRecord::parsed(
        title.trim(),
        author.trim(),
        img_src.as_str(),
        comments,
        genres,
    ))
}

fn malformed(page_url: &Url, message: &str) -> HarvestError {
    HarvestError::MalformedPage {
        url: page_url.to_string(),
        message: message.to_string(),
    }
}

fn field_selector(pattern: &str, page_url: &Url) -> Result<Selector, HarvestError> {
    Selector::parse(pattern)
        .map_err(|e| malformed(page_url, &format!("bad field pattern {:?}: {}", pattern, e)))
}

/// Text of the first node matching `pattern`; absence is a malformed page
fn select_first_text(
    document: &Html,
    pattern: &str,
    page_url: &Url,
    field: &str,
) -> Result<String, HarvestError> {
    let selector = field_selector(pattern, page_url)?;
    document
        .select(&selector)
        .next()
        .map(|node| node.text().collect::<String>())
        .ok_or_else(|| malformed(page_url, &format!("no {} found", field)))
}

/// Attribute of the first node matching `pattern`; absence is a malformed page
fn select_first_attr(
    document: &Html,
    pattern: &str,
    attr: &str,
    page_url: &Url,
    field: &str,
) -> Result<String, HarvestError> {
    let selector = field_selector(pattern, page_url)?;
    document
        .select(&selector)
        .next()
        .and_then(|node| node.value().attr(attr))
        .map(str::to_string)
        .ok_or_else(|| malformed(page_url, &format!("no {} found", field)))
}

/// Text of every node matching `pattern`, in document order; may be empty
fn select_all_text(
    document: &Html,
    pattern: &str,
    page_url: &Url,
) -> Result<Vec<String>, HarvestError> {
    let selector = field_selector(pattern, page_url)?;
    Ok(document
        .select(&selector)
        .map(|node| node.text().collect::<String>())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::NOT_DOWNLOADED;

    fn page_url() -> Url {
        Url::parse("https://example.org/b42/").unwrap()
    }

    fn detail_page(heading: &str, img: &str, extra: &str) -> String {
        format!(
            r#"<html><body><table><tr><td class="ow_px_td">
                 <h1>{}</h1>
                 <table class="d_book"><tr><td class="bookimage">
                   <a href="/b42/"><img src="{}"/></a>
                 </td></tr></table>
                 {}
               </td></tr></table></body></html>"#,
            heading, img, extra
        )
    }

    #[test]
    fn test_title_and_author_split_and_trimmed() {
        let html = detail_page("Dune :: Frank Herbert", "/shots/42.jpg", "");
        let record = parse_book_page(&html, &page_url()).unwrap();
        assert_eq!(record.title, "Dune");
        assert_eq!(record.author, "Frank Herbert");
    }

    #[test]
    fn test_heading_without_separator_is_malformed() {
        let html = detail_page("Dune by Frank Herbert", "/shots/42.jpg", "");
        let err = parse_book_page(&html, &page_url()).unwrap_err();
        assert!(matches!(err, HarvestError::MalformedPage { .. }));
    }

    #[test]
    fn test_missing_heading_is_malformed() {
        let html = r#"<html><body><table><tr><td class="ow_px_td"></td></tr></table></body></html>"#;
        assert!(parse_book_page(html, &page_url()).is_err());
    }

    #[test]
    fn test_cover_resolved_against_page_url() {
        let html = detail_page("A :: B", "/shots/42.jpg", "");
        let record = parse_book_page(&html, &page_url()).unwrap();
        assert_eq!(record.img_src, "https://example.org/shots/42.jpg");
    }

    #[test]
    fn test_missing_cover_is_malformed() {
        let html = r#"<html><body><table><tr><td class="ow_px_td"><h1>A :: B</h1></td></tr></table></body></html>"#;
        assert!(parse_book_page(html, &page_url()).is_err());
    }

    #[test]
    fn test_comments_in_document_order() {
        let comments = r#"
            <div class="texts"><span class="black">First comment</span></div>
            <div class="texts"><span class="black">Second comment</span></div>
        "#;
        let html = detail_page("A :: B", "/i.jpg", comments);
        let record = parse_book_page(&html, &page_url()).unwrap();
        assert_eq!(record.comments, vec!["First comment", "Second comment"]);
    }

    #[test]
    fn test_genres_in_document_order() {
        let genres = r#"<span class="d_book">
            <a href="/l55/">Science fiction</a>
            <a href="/l21/">Space opera</a>
        </span>"#;
        let html = detail_page("A :: B", "/i.jpg", genres);
        let record = parse_book_page(&html, &page_url()).unwrap();
        assert_eq!(record.genres, vec!["Science fiction", "Space opera"]);
    }

    #[test]
    fn test_no_comments_or_genres_is_fine() {
        let html = detail_page("A :: B", "/i.jpg", "");
        let record = parse_book_page(&html, &page_url()).unwrap();
        assert!(record.comments.is_empty());
        assert!(record.genres.is_empty());
    }

    #[test]
    fn test_paths_default_to_sentinel() {
        let html = detail_page("A :: B", "/i.jpg", "");
        let record = parse_book_page(&html, &page_url()).unwrap();
        assert_eq!(record.book_path, NOT_DOWNLOADED);
    }
}
