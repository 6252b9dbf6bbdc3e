//! Error types for fb2tex operations.

use thiserror::Error;

/// Errors that can occur while reading a FictionBook document or writing TeX.
///
/// Only [`Error::MissingRoot`] and [`Error::MissingBody`] are raised by the
/// converter itself; every other structural problem in a document is logged
/// and skipped.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("The file does not seem to contain 'FictionBook' root element")]
    MissingRoot,

    #[error("The file does not seem to contain 'FictionBook/body' element")]
    MissingBody,

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("PNG encoding error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[cfg(feature = "cli")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
