//! Error types for article-core

/// Result type for article-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in article-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The content source could not deliver the batch; batch-fatal
    #[error("Content source error: {message}")]
    Source { message: String },

    /// A publish call failed; recovered per item at the batch level
    #[error("Publish failed for '{title}': {message}")]
    Publish { title: String, message: String },

    /// Configuration could not be loaded or parsed; batch-fatal
    #[error("Configuration error: {message}")]
    Config { message: String },

    // Transparent wrappers for underlying crate errors
    /// Markup error from article-markup
    #[error(transparent)]
    Markup(#[from] article_markup::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}

impl Error {
    pub fn source_error(message: impl Into<String>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }

    pub fn publish(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Publish {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
