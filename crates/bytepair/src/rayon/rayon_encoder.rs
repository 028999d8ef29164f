//! # Parallel Encoder

use core::marker::PhantomData;

use crate::{
    encoders::TokenEncoder,
    segmentation::TextSegmentor,
    types::TokenType,
    vocab::UnifiedVocab,
};

/// Batch-Level Parallel Encoder Wrapper.
///
/// Enables ``rayon`` encoding of batches.
#[derive(Clone)]
pub struct ParallelRayonEncoder<T: TokenType, D: TokenEncoder<T>> {
    /// Inner encoder.
    pub inner: D,

    _marker: PhantomData<T>,
}

impl<T, D> ParallelRayonEncoder<T, D>
where
    T: TokenType,
    D: TokenEncoder<T>,
{
    /// Create a new parallel encoder.
    ///
    /// ## Arguments
    /// * `inner` - The token encoder to wrap.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T, D> TokenEncoder<T> for ParallelRayonEncoder<T, D>
where
    T: TokenType,
    D: TokenEncoder<T>,
{
    fn vocab(&self) -> &UnifiedVocab<T> {
        self.inner.vocab()
    }

    fn segmentor(&self) -> &TextSegmentor {
        self.inner.segmentor()
    }

    fn encode_append_chunk(
        &self,
        chunk: &[u8],
        tokens: &mut Vec<T>,
    ) {
        self.inner.encode_append_chunk(chunk, tokens)
    }

    fn encode_batch<S: AsRef<str> + Sync>(
        &self,
        batch: &[S],
        add_special_tokens: bool,
    ) -> Vec<Vec<T>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|text| self.inner.encode(text, add_special_tokens))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::{
        DefaultTokenEncoder,
        testing::{common_encoder_test_vocab, common_encoder_tests},
    };

    fn test_encoder<T: TokenType>() {
        let vocab = common_encoder_test_vocab::<T>();

        let encoder = DefaultTokenEncoder::<T>::init(vocab.clone()).unwrap();
        let encoder = ParallelRayonEncoder::new(encoder);

        assert_eq!(
            encoder.segmentor().chunk_regex().as_str(),
            vocab.segmentation().pattern().as_str()
        );
        assert_eq!(encoder.specials(), encoder.inner.specials());

        common_encoder_tests(vocab, &encoder)
    }

    #[test]
    fn test_encoder_u16() {
        test_encoder::<u16>();
    }

    #[test]
    fn test_encoder_u32() {
        test_encoder::<u32>();
    }
}
