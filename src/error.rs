//! Error types for the composer

use thiserror::Error;

/// Result type alias for composer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort an operation.
///
/// Content that cannot fit a page is not an error: pagination still completes
/// and reports it through [`crate::layout::FitWarning`].
#[derive(Error, Debug)]
pub enum Error {
    /// The import service could not turn the input into block nodes.
    #[error("document conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    /// Budget width or height is not a positive, finite number.
    #[error("invalid budget {width}x{height}: width and height must be positive")]
    InvalidBudget { width: f32, height: f32 },

    /// The measurement collaborator is not ready or refused a query.
    #[error("measurement oracle unavailable: {0}")]
    OracleUnavailable(String),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON (de)serialization failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Reading input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The export collaborator failed.
    #[error("export failed: {0}")]
    Export(String),
}

/// Errors reported by a [`crate::document::DocumentImporter`].
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Input was empty.
    #[error("input is empty")]
    Empty,

    /// Input is not valid UTF-8 where text was expected.
    #[error("input is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Input could not be parsed as serialized block nodes.
    #[error("malformed block list: {0}")]
    Json(#[from] serde_json::Error),

    /// Input parsed but describes an invalid document.
    #[error("malformed document: {0}")]
    Malformed(String),
}
