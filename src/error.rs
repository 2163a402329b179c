//! Error types for the paint pipeline

use thiserror::Error;

/// Result type alias for paint operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building, rendering or encoding a page
#[derive(Error, Debug)]
pub enum Error {
    /// The layout tree still has nodes without resolved geometry
    #[error("Layout incomplete: node {node} has no resolved geometry")]
    LayoutIncomplete { node: usize },

    /// The layout tree violates a construction invariant (upstream layout bug)
    #[error("Invalid layout tree: {0}")]
    InvalidTree(String),

    /// Failed to allocate the target canvas
    #[error("Canvas allocation failed: {0}")]
    CanvasError(String),

    /// Failed to encode the finished image
    #[error("Image encoding failed: {0}")]
    EncodeError(String),

    /// A font file could not be parsed
    #[error("Font error: {0}")]
    FontError(String),

    /// Malformed layout document, color or config
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_incomplete_names_node() {
        let err = Error::LayoutIncomplete { node: 7 };
        assert_eq!(err.to_string(), "Layout incomplete: node 7 has no resolved geometry");
    }

    #[test]
    fn json_errors_become_parse_errors() {
        let err: Error = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, Error::ParseError(_)));
    }
}
