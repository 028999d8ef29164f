//! # Token Encoder Trait

use crate::{
    segmentation::TextSegmentor,
    types::TokenType,
    vocab::{SpecialTokens, UnifiedVocab},
};

/// A trait for token encoders.
///
/// Encoding is infallible: every byte has a token.
pub trait TokenEncoder<T: TokenType>: Send + Sync {
    /// Return the attached vocab.
    fn vocab(&self) -> &UnifiedVocab<T>;

    /// Return the attached text segmentor.
    fn segmentor(&self) -> &TextSegmentor;

    /// Return the special tokens.
    fn specials(&self) -> &SpecialTokens<T> {
        self.vocab().specials()
    }

    /// Encode one chunk, appending to a target buffer.
    ///
    /// ## Arguments
    /// * `chunk` - The chunk bytes.
    /// * `tokens` - The target token buffer to append to.
    fn encode_append_chunk(
        &self,
        chunk: &[u8],
        tokens: &mut Vec<T>,
    );

    /// Encode text, appending to a target buffer.
    ///
    /// ## Arguments
    /// * `text` - The string slice to encode.
    /// * `tokens` - The target token buffer to append to.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text, tokens)))]
    fn encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) {
        self.segmentor()
            .for_each_chunk(text, |chunk| self.encode_append_chunk(chunk.as_bytes(), tokens));
    }

    /// Encode text into tokens.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `add_special_tokens` - Wrap the tokens in `BOS` / `EOS`.
    ///
    /// ## Returns
    /// A vector of tokens.
    fn encode<S: AsRef<str>>(
        &self,
        text: S,
        add_special_tokens: bool,
    ) -> Vec<T> {
        let text = text.as_ref();
        let mut tokens = Vec::with_capacity(text.len() / 2 + 2);

        if add_special_tokens {
            tokens.push(self.specials().bos());
        }
        self.encode_append(text, &mut tokens);
        if add_special_tokens {
            tokens.push(self.specials().eos());
        }

        tokens
    }

    /// Encode a batch of text into tokens.
    ///
    /// ## Arguments
    /// * `batch` - A slice of strings to encode.
    /// * `add_special_tokens` - Wrap each result in `BOS` / `EOS`.
    ///
    /// ## Returns
    /// A vector of token vectors.
    fn encode_batch<S: AsRef<str> + Sync>(
        &self,
        batch: &[S],
        add_special_tokens: bool,
    ) -> Vec<Vec<T>> {
        batch
            .iter()
            .map(|s| self.encode(s, add_special_tokens))
            .collect()
    }
}
