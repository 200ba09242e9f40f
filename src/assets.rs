//! Local asset storage
//!
//! Derives filesystem-safe filenames for book texts and cover images and
//! writes them under `books/` and `images/` below the destination root.
//! Directories are created on demand; files are written verbatim, and the
//! returned path is only recorded in a book record after the write succeeded.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use url::Url;

/// Subdirectory for downloaded book texts
pub const BOOKS_SUBDIR: &str = "books";

/// Subdirectory for downloaded cover images
pub const IMAGES_SUBDIR: &str = "images";

/// Derives the text filename: identifier prefix plus the title with path
/// separators stripped, e.g. `42. Some Title.txt`.
pub fn text_filename(book_id: u32, title: &str) -> String {
    let clean: String = title.chars().filter(|c| *c != '/' && *c != '\\').collect();
    format!("{}. {}.txt", book_id, clean)
}

/// Derives the cover filename from the URL's path: last segment,
/// percent-decoded. `None` when the URL path carries no file name.
pub fn image_filename(url: &Url) -> Option<String> {
    let decoded = percent_decode_str(url.path()).decode_utf8_lossy();
    let name = Path::new(decoded.as_ref()).file_name()?.to_str()?;
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

/// Writes a book's text body under `{dest_root}/books/`
pub fn save_text(dest_root: &Path, book_id: u32, title: &str, text: &str) -> io::Result<PathBuf> {
    let folder = dest_root.join(BOOKS_SUBDIR);
    fs::create_dir_all(&folder)?;

    let path = folder.join(text_filename(book_id, title));
    fs::write(&path, text)?;
    Ok(path)
}

/// Writes a cover image's bytes under `{dest_root}/images/`
pub fn save_cover(dest_root: &Path, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    let folder = dest_root.join(IMAGES_SUBDIR);
    fs::create_dir_all(&folder)?;

    let path = folder.join(filename);
    fs::write(&path, bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_filename_strips_separators() {
        assert_eq!(
            text_filename(42, "Some/Weird\\Title"),
            "42. SomeWeirdTitle.txt"
        );
    }

    #[test]
    fn test_text_filename_plain_title() {
        assert_eq!(text_filename(7, "Dune"), "7. Dune.txt");
    }

    #[test]
    fn test_image_filename_percent_decoded_basename() {
        let url = Url::parse("https://example.org/files/my%20book.jpg").unwrap();
        assert_eq!(image_filename(&url).unwrap(), "my book.jpg");
    }

    #[test]
    fn test_image_filename_plain() {
        let url = Url::parse("https://example.org/shots/42.jpg").unwrap();
        assert_eq!(image_filename(&url).unwrap(), "42.jpg");
    }

    #[test]
    fn test_image_filename_none_for_bare_root() {
        let url = Url::parse("https://example.org/").unwrap();
        assert_eq!(image_filename(&url), None);
    }

    #[test]
    fn test_save_text_creates_directory_and_writes() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_text(dir.path(), 42, "Dune", "It was a dry planet.").unwrap();

        assert_eq!(path, dir.path().join("books/42. Dune.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "It was a dry planet.");
    }

    #[test]
    fn test_save_cover_writes_bytes_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0];
        let path = save_cover(dir.path(), "42.jpg", &bytes).unwrap();

        assert_eq!(path, dir.path().join("images/42.jpg"));
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }
}
