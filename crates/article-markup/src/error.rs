//! Error types for article-markup

/// Result type for article-markup operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in article-markup operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The parsed tree nests deeper than the engine is willing to walk.
    ///
    /// A conforming parser cannot produce a cyclic tree, so a depth guard
    /// is the only structural failure the transducer can hit.
    #[error("Markup tree exceeds maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },

    #[error("Failed to parse markup: {message}")]
    ParseError { message: String },
}

impl Error {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }
}
