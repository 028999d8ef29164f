//! # Text Segmentor

use core::ops::Range;

use crate::{
    errors::BPResult,
    regex::{ErrorWrapper, RegexWrapper},
    segmentation::{patterns::DEFAULT_FALLBACK_PATTERN, segmentation_config::SegmentationConfig},
};

/// Chunk Reference for [`TextSegmentor`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpanRef {
    /// A span matched by the chunk pattern.
    Word(Range<usize>),

    /// Text the chunk pattern skipped over.
    ///
    /// Gaps are still chunks; they keep segmentation lossless
    /// for patterns that are not total.
    Gap(Range<usize>),
}

impl SpanRef {
    /// The byte range of this span.
    pub fn range(&self) -> &Range<usize> {
        match self {
            SpanRef::Word(range) => range,
            SpanRef::Gap(range) => range,
        }
    }
}

impl From<SpanRef> for Range<usize> {
    fn from(span: SpanRef) -> Self {
        match span {
            SpanRef::Word(range) => range,
            SpanRef::Gap(range) => range,
        }
    }
}

/// Chunk Segmentor
#[derive(Debug, Clone)]
pub struct TextSegmentor {
    /// Regex for splitting chunks.
    chunk_re: RegexWrapper,

    /// Matches chunks where `chunk_re` aborts.
    fallback_re: Option<regex::Regex>,
}

impl TextSegmentor {
    /// Create a new text segmentor from the given configuration.
    ///
    /// ## Arguments
    /// * `config` - The segmentation configuration.
    ///
    /// ## Returns
    /// A new `TextSegmentor`, or a pattern error.
    pub fn from_config(config: &SegmentationConfig) -> BPResult<Self> {
        let segmentor = Self::init(config.pattern().compile()?);
        if config.is_default_pattern() && segmentor.chunk_re.is_fancy() {
            let fallback =
                regex::Regex::new(DEFAULT_FALLBACK_PATTERN).map_err(ErrorWrapper::from)?;
            return Ok(segmentor.with_fallback(fallback));
        }
        Ok(segmentor)
    }

    /// Create a new text segmentor with a compiled regex.
    pub fn init(chunk_re: RegexWrapper) -> Self {
        Self {
            chunk_re,
            fallback_re: None,
        }
    }

    /// Set the regex used where the chunk regex aborts.
    ///
    /// Without one, the text after an aborted match becomes a single gap.
    pub fn with_fallback(
        self,
        fallback: regex::Regex,
    ) -> Self {
        Self {
            fallback_re: Some(fallback),
            ..self
        }
    }

    /// Get the chunk split regex.
    pub fn chunk_regex(&self) -> &RegexWrapper {
        &self.chunk_re
    }

    /// Visit every [`SpanRef`] of the text, in order.
    ///
    /// The visited ranges are non-overlapping and cover the text exactly.
    ///
    /// ## Arguments
    /// * `text` - the text to split.
    /// * `f` - the function to apply to each span.
    pub fn for_each_span<F>(
        &self,
        text: &str,
        mut f: F,
    ) where
        F: FnMut(SpanRef),
    {
        let mut last = 0;
        let ranges = self
            .chunk_re
            .find_ranges_with_fallback(text, self.fallback_re.as_ref());
        for range in ranges {
            if range.is_empty() {
                continue;
            }
            if range.start > last {
                f(SpanRef::Gap(last..range.start));
            }
            last = range.end;
            f(SpanRef::Word(range));
        }
        if last < text.len() {
            f(SpanRef::Gap(last..text.len()));
        }
    }

    /// Visit every chunk of the text, in order.
    pub fn for_each_chunk<'a, F>(
        &self,
        text: &'a str,
        mut f: F,
    ) where
        F: FnMut(&'a str),
    {
        self.for_each_span(text, |span| f(&text[Range::from(span)]));
    }

    /// Split text into [`SpanRef`]s.
    pub fn split_spans(
        &self,
        text: &str,
    ) -> Vec<SpanRef> {
        let mut spans = Vec::new();
        self.for_each_span(text, |span| spans.push(span));
        spans
    }

    /// Split text into chunk slices.
    ///
    /// ## Arguments
    /// * `text` - the text to split.
    ///
    /// ## Returns
    /// The ordered chunks; their concatenation is `text`.
    pub fn split_chunks<'a>(
        &self,
        text: &'a str,
    ) -> Vec<&'a str> {
        let mut chunks = Vec::new();
        self.for_each_chunk(text, |chunk| chunks.push(chunk));
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{regex::RegexPattern, support::traits::static_is_send_sync_check};

    fn default_segmentor() -> TextSegmentor {
        TextSegmentor::from_config(&SegmentationConfig::default()).unwrap()
    }

    #[test]
    fn test_default_chunks() {
        let segmentor = default_segmentor();
        static_is_send_sync_check(&segmentor);
        assert!(segmentor.chunk_regex().is_fancy());

        assert_eq!(
            segmentor.split_chunks("Hello world"),
            vec!["Hello", " world"]
        );
        assert_eq!(
            segmentor.split_chunks("it's we'LL"),
            vec!["it", "'s", " we", "'LL"]
        );
        assert_eq!(segmentor.split_chunks(""), Vec::<&str>::new());
    }

    #[test]
    fn test_single_digits() {
        let segmentor = default_segmentor();
        assert_eq!(
            segmentor.split_chunks("in 2024"),
            vec!["in", " 2", "0", "2", "4"]
        );
    }

    #[test]
    fn test_punctuation_and_newlines() {
        let segmentor = default_segmentor();
        assert_eq!(
            segmentor.split_chunks("end.\nNext"),
            vec!["end", ".\n", "Next"]
        );
        assert_eq!(
            segmentor.split_chunks("a  \n\nb"),
            vec!["a", "  \n\n", "b"]
        );
    }

    #[test]
    fn test_trailing_whitespace() {
        let segmentor = default_segmentor();
        assert_eq!(
            segmentor.split_chunks("a   b  "),
            vec!["a", "  ", " b", "  "]
        );
    }

    #[test]
    fn test_gaps() {
        let config: SegmentationConfig = RegexPattern::Basic(r"\w+".to_string()).into();
        let segmentor = TextSegmentor::from_config(&config).unwrap();

        assert_eq!(
            segmentor.split_spans("ab, cd!"),
            vec![
                SpanRef::Word(0..2),
                SpanRef::Gap(2..4),
                SpanRef::Word(4..6),
                SpanRef::Gap(6..7),
            ]
        );
        assert_eq!(segmentor.split_chunks("ab, cd!").concat(), "ab, cd!");
    }

    #[test]
    fn test_long_letter_run() {
        let segmentor = default_segmentor();

        let n = 1_000_000;
        let text = format!("hi {} next word", "a".repeat(n));
        assert_eq!(
            segmentor.split_spans(&text),
            vec![
                SpanRef::Word(0..2),
                SpanRef::Word(2..n + 3),
                SpanRef::Word(n + 3..n + 8),
                SpanRef::Word(n + 8..n + 13),
            ]
        );
    }

    #[test]
    fn test_fallback_pattern_agrees() {
        let segmentor = default_segmentor();
        let fallback = regex::Regex::new(DEFAULT_FALLBACK_PATTERN).unwrap();

        let text = "It's 42 o'clock!\n\tnew-line done.";
        let ranges: Vec<Range<usize>> = fallback.find_iter(text).map(|m| m.range()).collect();
        let spans: Vec<Range<usize>> = segmentor
            .split_spans(text)
            .into_iter()
            .map(Range::from)
            .collect();
        assert_eq!(ranges, spans);
    }

    #[test]
    fn test_bad_pattern() {
        let config = SegmentationConfig::from_pattern("(");
        assert!(TextSegmentor::from_config(&config).is_err());
    }
}
