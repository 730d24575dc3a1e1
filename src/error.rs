//! Error types for the pinyin engine.

use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
///
/// Lookups never fail; these errors only surface while parsing records,
/// reading resources, or handling snapshots and config files.
#[derive(Debug, Error)]
pub enum PinyinError {
    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A dictionary line did not have the `key=[R1,R2,...]` shape.
    #[error("Malformed record: {reason}")]
    MalformedRecord { reason: String },

    /// A key token could not be turned into a Unicode scalar value.
    #[error("Invalid code point: {0:?}")]
    InvalidCodePoint(String),

    /// A phrase record whose reading count differs from its character count.
    #[error("Phrase has {code_points} characters but {readings} readings")]
    LengthMismatch { code_points: usize, readings: usize },

    /// Phrase overrides need at least two characters.
    #[error("Phrase key must contain at least 2 characters, found {0}")]
    PhraseTooShort(usize),

    /// The named resource could not be located by the provider.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Snapshot (de)serialization failed.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// A config file could not be parsed.
    #[error("Config error: {0}")]
    Config(String),
}

impl PinyinError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedRecord { reason: reason.into() }
    }
}

impl From<bincode::Error> for PinyinError {
    fn from(e: bincode::Error) -> Self {
        Self::Snapshot(e.to_string())
    }
}

impl From<serde_json::Error> for PinyinError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// A convenience `Result` type alias using the crate's `PinyinError` type.
pub type Result<T> = std::result::Result<T, PinyinError>;
