//! Tululu-Harvest: a sequential book catalog harvester
//!
//! This crate walks the paginated listing pages of one tululu.org catalog
//! section, parses each book's detail page into structured metadata, downloads
//! the book text and cover image, and writes a single JSON manifest of every
//! book that was harvested successfully.

pub mod assets;
pub mod config;
pub mod harvest;
pub mod manifest;
pub mod parse;
pub mod site;

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("{url} redirected away; the resource does not exist")]
    RedirectedAway { url: String },

    #[error("Malformed page at {url}: {message}")]
    MalformedPage { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors, all reported before any network activity
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid page range: start page {start} is greater than end page {end}")]
    InvalidPageRange { start: u32, end: u32 },

    #[error("Manifest path {path:?} must end in .json")]
    ManifestExtension { path: PathBuf },
}

/// Result type alias for harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

// Re-export commonly used types
pub use config::HarvestConfig;
pub use harvest::{harvest_book, run, walk_catalog, BookOutcome};
pub use manifest::{BookRecord, NOT_DOWNLOADED};
pub use site::Site;
