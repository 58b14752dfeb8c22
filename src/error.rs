//! Error types for geo-classify operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while classifying attribute values.
///
/// Degenerate input (no features, no values) is not an error: classifiers
/// return an empty class list instead.
#[derive(Error, Debug)]
pub enum Error {
    /// Method tag outside the supported registry.
    #[error("unsupported classification method: {0}")]
    UnsupportedMethod(String),

    /// The statistics library could not be loaded.
    #[error("failed to load statistics library: {0}")]
    LibraryLoad(String),

    /// The statistics library was accessed synchronously before loading.
    #[error("statistics library is not loaded")]
    LibraryNotLoaded,

    /// A ramp name that neither the built-in ramps nor the palette catalog resolve.
    #[error("unknown color ramp: {0}")]
    UnknownRamp(String),

    /// Color parsing error.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Classification parameters that cannot be honored.
    #[error("invalid classification parameters: {0}")]
    InvalidParams(String),

    /// Configuration parsing error with line number.
    #[error("configuration error at line {line}: {message}")]
    ConfigParse {
        /// Line number where the error occurred (1-indexed, 0 if unknown).
        line: usize,
        /// Error message describing the issue.
        message: String,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {0}")]
    ConfigNotFound(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
