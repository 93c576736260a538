//! Error types for the nine-patch crate.

use thiserror::Error;

/// Result type alias for nine-patch operations.
pub type Result<T> = std::result::Result<T, NinePatchError>;

/// Errors that can occur while building a nine-patch image.
#[derive(Debug, Error)]
pub enum NinePatchError {
    /// The SVG could not be parsed
    #[error("Invalid SVG: {0}")]
    InvalidSvg(String),

    /// The root element lacks a usable dimension
    #[error("SVG root has no usable {0} attribute")]
    MissingDimension(&'static str),

    /// One of the four guide paths is absent
    #[error("SVG has no <path id=\"{0}\"> guide")]
    MissingGuide(&'static str),

    /// Requested output size is zero or the source canvas is empty
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// SVG export failed
    #[error("Export failed: {0}")]
    Export(#[from] droidtools_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    ProcessingError(#[from] image::ImageError),
}
