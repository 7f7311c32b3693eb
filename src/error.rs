//! Error types for the chord estimation engine

use std::fmt;

/// Errors that can occur during chord estimation
#[derive(Debug, Clone, PartialEq)]
pub enum ChordError {
    /// Invalid input: empty or malformed chroma matrix, or invalid configuration
    InvalidInput(String),

    /// Invariant violation inside the decoder (bad transition matrix, shape mismatch)
    DecodeError(String),

    /// Failure reported by an external chroma source (audio load, feature extraction)
    UpstreamError(String),
}

impl fmt::Display for ChordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ChordError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            ChordError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
        }
    }
}

impl std::error::Error for ChordError {}
