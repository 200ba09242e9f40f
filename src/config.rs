//! Run configuration and pre-flight validation
//!
//! The configuration is assembled from CLI arguments by the binary. Every
//! check here runs before the first network request so that a bad run aborts
//! immediately rather than after a long harvest.

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Default manifest filename when the operator does not supply one
pub const DEFAULT_MANIFEST_NAME: &str = "book_descriptions.json";

/// Configuration for one harvest run
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// First listing page to visit (inclusive)
    pub start_page: u32,

    /// Last listing page to visit (inclusive); `None` means "up to the
    /// section's resolved last page"
    pub end_page: Option<u32>,

    /// Directory under which `books/`, `images/` and the manifest are written
    pub dest_folder: PathBuf,

    /// Do not download book texts; manifest carries the sentinel instead
    pub skip_txt: bool,

    /// Do not download cover images; manifest carries the sentinel instead
    pub skip_imgs: bool,

    /// Manifest filename, relative to `dest_folder`; must end in `.json`
    pub json_path: PathBuf,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            start_page: 1,
            end_page: None,
            dest_folder: PathBuf::from("."),
            skip_txt: false,
            skip_imgs: false,
            json_path: PathBuf::from(DEFAULT_MANIFEST_NAME),
        }
    }
}

impl HarvestConfig {
    /// Full path of the manifest file
    pub fn manifest_path(&self) -> PathBuf {
        self.dest_folder.join(&self.json_path)
    }
}

/// Validates a configuration before any network activity.
///
/// Rejects an explicitly inverted page range and a manifest path with the
/// wrong extension. The end page's relation to the catalog's true page bound
/// can only be checked after the bound has been resolved; see
/// [`crate::harvest::run`].
pub fn validate(config: &HarvestConfig) -> Result<(), ConfigError> {
    if let Some(end) = config.end_page {
        if config.start_page > end {
            return Err(ConfigError::InvalidPageRange {
                start: config.start_page,
                end,
            });
        }
    }

    validate_manifest_path(&config.json_path)?;

    Ok(())
}

/// Checks that the manifest path carries the `.json` extension
pub fn validate_manifest_path(path: &Path) -> Result<(), ConfigError> {
    match path.extension() {
        Some(ext) if ext == "json" => Ok(()),
        _ => Err(ConfigError::ManifestExtension {
            path: path.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = HarvestConfig::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = HarvestConfig {
            start_page: 5,
            end_page: Some(3),
            ..Default::default()
        };
        let err = validate(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidPageRange { start: 5, end: 3 }
        ));
    }

    #[test]
    fn test_equal_range_accepted() {
        let config = HarvestConfig {
            start_page: 3,
            end_page: Some(3),
            ..Default::default()
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_open_ended_range_accepted() {
        let config = HarvestConfig {
            start_page: 700,
            end_page: None,
            ..Default::default()
        };
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_wrong_manifest_extension_rejected() {
        let config = HarvestConfig {
            json_path: PathBuf::from("books.txt"),
            ..Default::default()
        };
        assert!(matches!(
            validate(&config),
            Err(ConfigError::ManifestExtension { .. })
        ));
    }

    #[test]
    fn test_extensionless_manifest_rejected() {
        assert!(validate_manifest_path(Path::new("books")).is_err());
    }

    #[test]
    fn test_manifest_path_joins_dest_folder() {
        let config = HarvestConfig {
            dest_folder: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(
            config.manifest_path(),
            PathBuf::from("out/book_descriptions.json")
        );
    }
}
