//! Where surveys live when no directory is given.
//!
//! Snapshots are stored in the platform-specific data folder:
//! - macOS: ~/Library/Application Support/dev.survey-builder.survey-builder/
//! - Windows: %APPDATA%/survey-builder/survey-builder/data/
//! - Linux: ~/.local/share/survey-builder/

use std::path::PathBuf;

use directories::ProjectDirs;

const APP_QUALIFIER: &str = "dev";
const APP_ORG: &str = "survey-builder";
const APP_NAME: &str = "survey-builder";

/// Used when the platform data folder cannot be determined.
pub const FALLBACK_STORE_DIR: &str = ".survey-builder";

/// Environment variable overriding the store directory.
pub const STORE_DIR_ENV: &str = "SURVEY_BUILDER_DIR";

/// Environment variable overriding the submission delay in milliseconds.
pub const SUBMIT_DELAY_ENV: &str = "SURVEY_BUILDER_SUBMIT_DELAY_MS";

/// The directory surveys are stored in by default.
pub fn default_store_dir() -> PathBuf {
    match ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME) {
        Some(dirs) => dirs.data_dir().join("surveys"),
        None => {
            tracing::warn!("Could not determine data directory, using {FALLBACK_STORE_DIR}");
            PathBuf::from(FALLBACK_STORE_DIR)
        }
    }
}

/// `explicit` if given, otherwise [`default_store_dir`].
pub fn resolve_store_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(default_store_dir)
}
