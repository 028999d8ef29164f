//! # Chunk Counter

use crate::{
    segmentation::TextSegmentor,
    training::{CountType, StringChunkType, utility::token_span_buffer::TokenSpanBuf},
    types::{BPHashMap, TokenType},
    vocab::ByteMapVocab,
};

/// Counts distinct chunks across samples.
///
/// Each distinct chunk is trained on once, weighted by its count.
pub struct TextSpanCounter<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// The chunk segmentor.
    pub segmentor: TextSegmentor,

    /// The chunk counts.
    pub chunk_counts: BPHashMap<K, C>,
}

impl<K, C> TextSpanCounter<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Create a new chunk counter.
    pub fn new(segmentor: TextSegmentor) -> Self {
        Self {
            segmentor,
            chunk_counts: BPHashMap::with_capacity(100_000),
        }
    }

    /// Release the chunk counts and return them.
    pub fn release(self) -> BPHashMap<K, C> {
        self.chunk_counts
    }

    /// The number of distinct chunks seen.
    pub fn len(&self) -> usize {
        self.chunk_counts.len()
    }

    /// Have no chunks been seen?
    pub fn is_empty(&self) -> bool {
        self.chunk_counts.is_empty()
    }

    /// Update chunk counts inplace from text.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) {
        let chunk_counts = &mut self.chunk_counts;
        self.segmentor.for_each_chunk(text.as_ref(), |chunk| {
            *chunk_counts.entry(K::from(chunk)).or_default() += C::one();
        });
    }

    /// Update chunk counts inplace from a sample iterator.
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for sample in samples {
            self.update_from_text(sample);
        }
    }

    /// Convert the counts to a [`TokenSpanBuf<T>`] count iterator.
    ///
    /// # Arguments
    /// * `byte_vocab` - the byte table to use for byte translation.
    pub fn to_text_span_counts_iter<'a, T: TokenType>(
        &'a self,
        byte_vocab: &'a ByteMapVocab<T>,
    ) -> impl Iterator<Item = (TokenSpanBuf<T>, C)> + 'a {
        self.chunk_counts
            .iter()
            .map(|(k, v)| (TokenSpanBuf::from_string(k, byte_vocab), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{regex::RegexPattern, segmentation::SegmentationConfig};

    fn word_segmentor() -> TextSegmentor {
        let config: SegmentationConfig = RegexPattern::Basic(r"\w+".to_string()).into();
        TextSegmentor::from_config(&config).unwrap()
    }

    #[test]
    fn test_chunk_counter() {
        let mut counter: TextSpanCounter<String, u64> = TextSpanCounter::new(word_segmentor());
        assert!(counter.is_empty());

        counter.update_from_samples(["Hello world", "Foo world bar world"]);
        assert_eq!(counter.len(), 5);

        let mut counts: Vec<(String, u64)> = counter.release().into_iter().collect();
        counts.sort();

        // Gaps between words are chunks too.
        assert_eq!(
            counts,
            vec![
                (" ".to_string(), 4),
                ("Foo".to_string(), 1),
                ("Hello".to_string(), 1),
                ("bar".to_string(), 1),
                ("world".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_span_counts() {
        type T = u32;
        let byte_vocab = ByteMapVocab::<T>::with_offset(4).unwrap();

        let mut counter: TextSpanCounter<String, u32> = TextSpanCounter::new(word_segmentor());
        counter.update_from_text("hi hi");

        let mut counts: Vec<(TokenSpanBuf<T>, u32)> =
            counter.to_text_span_counts_iter(&byte_vocab).collect();
        counts.sort();

        assert_eq!(
            counts,
            vec![
                (TokenSpanBuf::from_tokens([36]), 1),
                (TokenSpanBuf::from_tokens([108, 109]), 2),
            ]
        );
    }
}
