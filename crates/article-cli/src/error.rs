//! Error types for the CLI

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the terminal
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A user-facing message with no underlying cause
    #[error("{0}")]
    User(String),

    /// Core error from article-core
    #[error(transparent)]
    Core(#[from] article_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User(message.into())
    }
}
