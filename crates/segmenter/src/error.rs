use thiserror::Error;

/// Result type for segmenter operations
pub type Result<T> = std::result::Result<T, SegmenterError>;

/// Errors that can occur while segmenting content
#[derive(Error, Debug)]
pub enum SegmenterError {
    /// The token counter could not be constructed or failed to encode text
    #[error("Tokenizer unavailable: {0}")]
    TokenizerUnavailable(String),

    /// Configuration source could not be parsed at all
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SegmenterError {
    /// Create a tokenizer-unavailable error
    pub fn tokenizer(msg: impl Into<String>) -> Self {
        Self::TokenizerUnavailable(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Whether the failure came from the token counter
    #[must_use]
    pub const fn is_tokenizer_unavailable(&self) -> bool {
        matches!(self, Self::TokenizerUnavailable(_))
    }
}
