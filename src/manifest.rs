//! Book record data model and manifest output
//!
//! The manifest is the pipeline's sole durable artifact: an ordered JSON
//! array of book records, re-read downstream by the site renderer. Field
//! order and literal non-ASCII text are part of the contract.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::validate_manifest_path;
use crate::Result;

/// Sentinel value for an asset the operator opted out of downloading
pub const NOT_DOWNLOADED: &str = "Not downloaded";

/// One harvested book.
///
/// `img_src` is the cover's "display source": the absolute source URL right
/// after parsing, overwritten with the local file path once the cover has
/// been saved (or the [`NOT_DOWNLOADED`] sentinel when images are skipped).
/// `book_path` follows the same dual contract for the text body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub title: String,
    pub author: String,
    pub img_src: String,
    pub book_path: String,
    pub comments: Vec<String>,
    pub genres: Vec<String>,
}

impl BookRecord {
    /// A freshly parsed record: cover URL in place, text path not yet known
    pub(crate) fn parsed(
        title: &str,
        author: &str,
        img_src: &str,
        comments: Vec<String>,
        genres: Vec<String>,
    ) -> Self {
        Self {
            title: title.to_string(),
            author: author.to_string(),
            img_src: img_src.to_string(),
            book_path: NOT_DOWNLOADED.to_string(),
            comments,
            genres,
        }
    }
}

/// Writes the accumulated records as an ordered, human-readable JSON array.
///
/// Re-checks the `.json` extension (the same check runs up front in config
/// validation), creates missing parent directories, and serializes with a
/// 4-space indent. Non-ASCII text is written literally, not escaped. Output
/// is byte-identical across runs for identical input.
pub fn write_manifest(records: &[BookRecord], path: &Path) -> Result<()> {
    validate_manifest_path(path)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    records.serialize(&mut serializer)?;

    fs::write(path, buf)?;
    Ok(())
}
