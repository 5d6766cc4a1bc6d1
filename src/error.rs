//! Error types for mdmaker operations.

use thiserror::Error;

use crate::ir::{NodeId, NodeKind};

/// Errors that can occur while converting a document.
///
/// [`Error::UnsupportedNodeKind`] and [`Error::UnsupportedImageType`] abort
/// the whole conversion; there is no partial result.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported node kind: {0:?}")]
    UnsupportedNodeKind(NodeKind),

    #[error("Unsupported image type: {0}")]
    UnsupportedImageType(String),

    #[error("No equation encloses the given node")]
    NoEquation,

    #[error("Node {0:?} does not belong to this tree")]
    InvalidNode(NodeId),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "json")]
    #[error("Invalid base64 image data: {0}")]
    Base64(#[from] base64::DecodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
