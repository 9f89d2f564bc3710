//! Error types for pipeline construction
//!
//! Processing itself never fails: ambiguous words abstain and malformed
//! spans degrade to literal tokens. Only building a pipeline from a bad
//! configuration can produce an [`Error`].

use thiserror::Error;

/// Error type for configuration and construction
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Unknown language code
    #[error("Invalid language: {0}")]
    InvalidLanguage(String),

    /// Segmentation rules could not be loaded
    #[error("Segmentation error: {0}")]
    Segmentation(#[from] habla_segment::SegmentError),

    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration or lexicon file is not valid TOML
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for habla operations
pub type Result<T> = std::result::Result<T, Error>;
