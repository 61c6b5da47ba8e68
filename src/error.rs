//! Error types for psdskin operations.

use std::path::PathBuf;

use thiserror::Error;

/// Document-level errors that abort a conversion.
///
/// Failures confined to a single layer (a broken style dictionary, a
/// composite that cannot be written) are not reported through this type
/// by the converter; they become [`LeafIssue`](crate::convert::LeafIssue)s.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid layer dump: {0}")]
    InvalidDump(String),

    #[error("layer tree cannot be traversed: {0}")]
    Structural(String),

    #[error("layer '{0}' has an empty composite")]
    EmptyComposite(String),

    #[error("output already exists: {}", .0.display())]
    OutputExists(PathBuf),
}

pub type Result<T> = std::result::Result<T, Error>;
