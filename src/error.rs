//! Error types for qrcraft operations

use thiserror::Error;

/// Result type alias using qrcraft's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for qrcraft operations
#[derive(Error, Debug)]
pub enum Error {
    /// The QR encoder rejected the payload (e.g. too long for the requested level)
    #[error("{0}")]
    Generation(String),

    /// A color string could not be parsed
    #[error("Invalid color '{0}', expected #RRGGBB or #RGB")]
    InvalidColor(String),

    /// A rendering setting was out of range or unrecognised
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image processing error
    #[error("Image processing error: {0}")]
    Image(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(e: image::ImageError) -> Self {
        Error::Image(e.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::Generation(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Other(format!("JSON error: {}", e))
    }
}
