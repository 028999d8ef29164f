//! # Text Segmentation Configuration

use crate::regex::RegexPattern;
use crate::segmentation::patterns::DEFAULT_CHUNK_PATTERN;

/// Chunk Segmentor Configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentationConfig {
    /// Regex pattern for chunk splitting.
    pub pattern: RegexPattern,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self::from_pattern(DEFAULT_CHUNK_PATTERN)
    }
}

impl From<RegexPattern> for SegmentationConfig {
    fn from(pattern: RegexPattern) -> Self {
        Self { pattern }
    }
}

impl SegmentationConfig {
    /// Create a new segmentation configuration with the given chunk pattern.
    ///
    /// ## Arguments
    /// * `pattern` - The chunk split pattern.
    ///
    /// ## Returns
    /// A new `SegmentationConfig` instance.
    pub fn from_pattern<P>(pattern: P) -> Self
    where
        P: Into<RegexPattern>,
    {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Set the split pattern.
    ///
    /// ## Arguments
    /// * `pattern` - The new chunk split pattern.
    ///
    /// ## Returns
    /// The updated `SegmentationConfig` instance.
    pub fn with_pattern<P>(
        self,
        pattern: P,
    ) -> Self
    where
        P: Into<RegexPattern>,
    {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Get the chunk pattern.
    pub fn pattern(&self) -> &RegexPattern {
        &self.pattern
    }

    /// Is this the default chunk pattern?
    pub fn is_default_pattern(&self) -> bool {
        self.pattern.as_str() == DEFAULT_CHUNK_PATTERN
    }
}
