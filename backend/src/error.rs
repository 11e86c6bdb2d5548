//! Error types for the timeline engine.
//!
//! Missing duration data, zero doses and empty inputs are *not* errors; they
//! have defined fallbacks inside the services. The variants below cover the
//! fallible edges of the crate: validated model construction, configuration
//! files and substance catalogs.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for timeline operations
pub type Result<T> = std::result::Result<T, TimelineError>;

/// Errors that can occur when building inputs for the timeline engine
#[derive(Error, Debug)]
pub enum TimelineError {
    /// A duration range with `min > max`, a negative bound or a non-finite bound
    #[error("Invalid duration range: min={min}s max={max}s")]
    InvalidDurationRange { min: f64, max: f64 },

    /// A tuning parameter outside its accepted range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unknown administration route name
    #[error("Unknown administration route: {0}")]
    UnknownRoute(String),

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Substance catalog could not be read
    #[error("Failed to read catalog {path}: {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Substance catalog is not valid JSON for the expected layout
    #[error("Invalid catalog at `{path}`: {message}")]
    CatalogFormat { path: String, message: String },
}

impl TimelineError {
    /// Build a catalog format error from a path-aware deserialization failure.
    pub(crate) fn from_path_error(err: serde_path_to_error::Error<serde_json::Error>) -> Self {
        let path = err.path().to_string();
        TimelineError::CatalogFormat {
            path,
            message: err.into_inner().to_string(),
        }
    }
}
