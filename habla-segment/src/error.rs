use thiserror::Error;

/// Errors raised while loading segmentation rules
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Configuration loading or parsing error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Unsupported language requested
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}

/// Result type for segmentation operations
pub type Result<T> = std::result::Result<T, SegmentError>;
