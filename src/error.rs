//! Error types for the icon picker
//!
//! None of these are fatal to the host: every failure degrades to an inert
//! picker with an explanatory message.

use thiserror::Error;

/// Errors that can occur while configuring, fetching or extracting icons
#[derive(Debug, Error)]
pub enum PickerError {
    /// No icon font CSS URL has been configured
    #[error("Icon Font CSS URL is required")]
    ConfigurationMissing,

    /// Network or HTTP error reaching the CSS URL (message shown verbatim)
    #[error("{0}")]
    FetchFailed(String),

    /// CSS was fetched but no icon classes matched any extraction pattern
    #[error("No icon classes found in {url}")]
    EmptyExtraction { url: String },

    /// A fetch for an older URL finished after a newer one was requested
    #[error("Discarded stale result for {requested} (current: {current})")]
    StaleResult { requested: String, current: String },

    /// No registered library matched and the fallback policy is strict
    #[error("Unrecognized icon library: {0}")]
    UnknownLibrary(String),

    /// The library table violates a registry invariant
    #[error("Invalid icon library registry: {0}")]
    InvalidRegistry(String),

    /// The dialog has already returned a result
    #[error("Dialog is already closed")]
    DialogClosed,

    /// Offline icon manifest could not be used
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("Config parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for picker operations
pub type PickerResult<T> = Result<T, PickerError>;
