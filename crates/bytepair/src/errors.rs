//! # Error Types

use crate::regex::ErrorWrapper;

/// Errors from bytepair operations.
#[derive(Debug, thiserror::Error)]
pub enum BPError {
    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// Vocab size leaves no room for merges.
    #[error("vocab size ({size}) must be > base vocab size ({base})")]
    VocabSizeTooSmall {
        /// The vocab size that was too small.
        size: usize,

        /// The base vocab size (special tokens + byte symbols).
        base: usize,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// Segmentation pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] ErrorWrapper),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON artifact error.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Parse error (integer, artifact record, etc.)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for bytepair operations.
pub type BPResult<T> = core::result::Result<T, BPError>;
