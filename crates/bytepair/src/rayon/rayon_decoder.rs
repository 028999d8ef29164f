//! # Parallel Decoder

use core::marker::PhantomData;

use crate::{decoders::TokenDecoder, types::TokenType};

/// Batch-Level Parallel Decoder Wrapper.
///
/// Enables ``rayon`` decoding of batches.
#[derive(Clone)]
pub struct ParallelRayonDecoder<T: TokenType, D: TokenDecoder<T>> {
    /// Wrapped decoder.
    pub inner: D,

    _marker: PhantomData<T>,
}

impl<T, D> ParallelRayonDecoder<T, D>
where
    T: TokenType,
    D: TokenDecoder<T>,
{
    /// Create a new parallel decoder.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            _marker: PhantomData,
        }
    }
}

impl<T, D> TokenDecoder<T> for ParallelRayonDecoder<T, D>
where
    T: TokenType,
    D: TokenDecoder<T>,
{
    fn decode_append_bytes(
        &self,
        tokens: &[T],
        skip_special_tokens: bool,
        buf: &mut Vec<u8>,
    ) {
        self.inner
            .decode_append_bytes(tokens, skip_special_tokens, buf)
    }

    fn decode_batch_to_strings<S: AsRef<[T]> + Sync>(
        &self,
        batch: &[S],
        skip_special_tokens: bool,
    ) -> Vec<String> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|tokens| self.inner.decode_to_string(tokens, skip_special_tokens))
            .collect()
    }
}
