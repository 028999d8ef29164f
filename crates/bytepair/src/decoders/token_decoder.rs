//! # Token Decoder Trait

use crate::{support::strings::string_from_utf8_lossy, types::TokenType};

/// A trait for token decoders.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// Decode tokens, appending their bytes to a buffer.
    ///
    /// ## Arguments
    /// * `tokens` - The tokens to decode.
    /// * `skip_special_tokens` - Drop special tokens instead of rendering their names.
    /// * `buf` - The target byte buffer.
    fn decode_append_bytes(
        &self,
        tokens: &[T],
        skip_special_tokens: bool,
        buf: &mut Vec<u8>,
    );

    /// Decode tokens to bytes.
    fn decode_to_bytes<S: AsRef<[T]>>(
        &self,
        tokens: S,
        skip_special_tokens: bool,
    ) -> Vec<u8> {
        let tokens = tokens.as_ref();
        let mut buf = Vec::with_capacity(tokens.len() * 4);
        self.decode_append_bytes(tokens, skip_special_tokens, &mut buf);
        buf
    }

    /// Decode tokens to a string.
    ///
    /// Invalid UTF-8 sequences are replaced with `U+FFFD`.
    ///
    /// ## Arguments
    /// * `tokens` - The tokens to decode.
    /// * `skip_special_tokens` - Drop special tokens instead of rendering their names.
    ///
    /// ## Returns
    /// The decoded string.
    fn decode_to_string<S: AsRef<[T]>>(
        &self,
        tokens: S,
        skip_special_tokens: bool,
    ) -> String {
        string_from_utf8_lossy(self.decode_to_bytes(tokens, skip_special_tokens))
    }

    /// Decode a batch of token sequences to strings.
    fn decode_batch_to_strings<S: AsRef<[T]> + Sync>(
        &self,
        batch: &[S],
        skip_special_tokens: bool,
    ) -> Vec<String> {
        batch
            .iter()
            .map(|tokens| self.decode_to_string(tokens, skip_special_tokens))
            .collect()
    }
}
