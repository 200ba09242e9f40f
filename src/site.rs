//! URL construction for the catalog site
//!
//! All URL shapes the harvester touches live here: the per-book detail page,
//! the plain-text download endpoint, and the numbered listing pages of one
//! catalog section.

use url::Url;

/// Address of the production catalog
pub const TULULU_ROOT: &str = "https://tululu.org/";

/// Science fiction section, the catalog this harvester walks by default
pub const DEFAULT_SECTION: &str = "l55";

/// One catalog site: a root URL plus the section whose listing pages are walked
#[derive(Debug, Clone)]
pub struct Site {
    root: Url,
    section: String,
}

impl Site {
    /// Creates a site rooted at the given URL, walking the default section.
    ///
    /// Tests point this at a mock server; production uses [`Site::tululu`].
    pub fn new(root: Url) -> Self {
        Self {
            root,
            section: DEFAULT_SECTION.to_string(),
        }
    }

    /// The production tululu.org site
    pub fn tululu() -> Self {
        // The literal is a valid absolute URL.
        Self::new(Url::parse(TULULU_ROOT).expect("site root URL is valid"))
    }

    /// URL of a book's detail page, e.g. `https://tululu.org/b239/`
    pub fn book_page_url(&self, book_id: u32) -> Result<Url, url::ParseError> {
        self.root.join(&format!("b{}/", book_id))
    }

    /// URL of a book's plain-text body, e.g. `https://tululu.org/txt.php?id=239`
    pub fn book_text_url(&self, book_id: u32) -> Result<Url, url::ParseError> {
        let mut url = self.root.join("txt.php")?;
        url.query_pairs_mut().append_pair("id", &book_id.to_string());
        Ok(url)
    }

    /// URL of one numbered listing page, e.g. `https://tululu.org/l55/4`
    pub fn catalog_page_url(&self, page: u32) -> Result<Url, url::ParseError> {
        self.root.join(&format!("{}/{}", self.section, page))
    }

    /// URL of the section's first listing page, used to probe the page bound
    pub fn section_url(&self) -> Result<Url, url::ParseError> {
        self.root.join(&format!("{}/", self.section))
    }

    /// Resolves a card's relative link against the site root
    pub fn resolve_card_link(&self, href: &str) -> Result<Url, url::ParseError> {
        self.root.join(href)
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::tululu()
    }
}

/// Extracts the numeric book identifier from a card link.
///
/// Card links look like `/b239/`; everything that is not a digit is
/// decoration. Returns `None` when the link carries no digits at all.
pub fn book_id_from_link(href: &str) -> Option<u32> {
    let digits: String = href.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_page_url() {
        let site = Site::tululu();
        let url = site.book_page_url(239).unwrap();
        assert_eq!(url.as_str(), "https://tululu.org/b239/");
    }

    #[test]
    fn test_book_text_url() {
        let site = Site::tululu();
        let url = site.book_text_url(42).unwrap();
        assert_eq!(url.as_str(), "https://tululu.org/txt.php?id=42");
    }

    #[test]
    fn test_catalog_page_url() {
        let site = Site::tululu();
        let url = site.catalog_page_url(7).unwrap();
        assert_eq!(url.as_str(), "https://tululu.org/l55/7");
    }

    #[test]
    fn test_section_url() {
        let site = Site::tululu();
        let url = site.section_url().unwrap();
        assert_eq!(url.as_str(), "https://tululu.org/l55/");
    }

    #[test]
    fn test_custom_root() {
        let site = Site::new(Url::parse("http://127.0.0.1:8080/").unwrap());
        let url = site.book_page_url(1).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/b1/");
    }

    #[test]
    fn test_book_id_from_link() {
        assert_eq!(book_id_from_link("/b239/"), Some(239));
        assert_eq!(book_id_from_link("b1/"), Some(1));
        assert_eq!(book_id_from_link("/authors/"), None);
        assert_eq!(book_id_from_link(""), None);
    }
}
