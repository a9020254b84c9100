//! Error types for the toolkit.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropLogicError {
    /// Malformed formula source. The position is a byte offset into the input.
    #[error("parse error at byte {position}: {message}")]
    Parse { position: usize, message: String },

    /// A sub-expression was not in the expected shape after normalization.
    #[error("CNF conversion failed: {0}")]
    CnfConversion(String),

    /// A rule failed validation while loading from the wire format.
    #[error("invalid rule '{id}': {reason}")]
    InvalidRule { id: String, reason: String },

    /// The wire format version is not one this crate understands.
    #[error("unsupported rule format version {found} (current version is {current})")]
    UnsupportedRuleVersion { found: u32, current: u32 },
}

pub type Result<T> = std::result::Result<T, PropLogicError>;
