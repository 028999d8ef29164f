//! # Byte/Token Mapping Table

use core::fmt::Debug;

use crate::{
    errors::{BPError, BPResult},
    types::TokenType,
    vocab::{ByteTokenArray, SpecialTokens, validators::U8_SIZE},
};

/// ``0..=255`` Byte/Token Bijection Table
///
/// Byte `b` maps to token ``b + offset``, where `offset` is the
/// number of special tokens.
#[derive(Clone, PartialEq)]
pub struct ByteMapVocab<T: TokenType> {
    /// Table mapping from byte ordinal (position) to token.
    byte_tokens: ByteTokenArray<T>,
}

impl<T: TokenType> Debug for ByteMapVocab<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ByteMapVocab")
            .field("offset", &self.offset())
            .field("max_token", &self.max_token())
            .finish()
    }
}

impl<T: TokenType> ByteMapVocab<T> {
    /// Build a `ByteMapVocab` placing byte tokens at ``offset..offset + 256``.
    ///
    /// ## Arguments
    /// * `offset` - The token of byte `0`.
    ///
    /// ## Returns
    /// A new `ByteMapVocab`, or `VocabSizeOverflow` if the
    /// byte tokens don't fit in `T`.
    pub fn with_offset(offset: usize) -> BPResult<Self> {
        let size = offset + U8_SIZE;
        if T::from_usize(size - 1).is_none() {
            return Err(BPError::VocabSizeOverflow { size });
        }

        let mut byte_tokens = [T::zero(); U8_SIZE];
        for (b, token) in byte_tokens.iter_mut().enumerate() {
            *token = T::from_usize(offset + b).ok_or(BPError::VocabSizeOverflow { size })?;
        }

        Ok(Self { byte_tokens })
    }

    /// Build the `ByteMapVocab` which follows the given special tokens.
    pub fn for_specials(specials: &SpecialTokens<T>) -> BPResult<Self> {
        Self::with_offset(specials.byte_offset())
    }

    /// Get the byte-ord => token mapping table.
    pub fn byte_tokens(&self) -> &ByteTokenArray<T> {
        &self.byte_tokens
    }

    /// The token of byte `0`.
    pub fn offset(&self) -> T {
        self.byte_tokens[0]
    }

    /// The token of byte `255`.
    pub fn max_token(&self) -> T {
        self.byte_tokens[U8_SIZE - 1]
    }

    /// Get the token corresponding to a given byte.
    #[inline(always)]
    pub fn get_token(
        &self,
        byte: u8,
    ) -> T {
        self.byte_tokens[byte as usize]
    }

    /// Get the byte corresponding to a given token, if it is a byte token.
    ///
    /// ## Arguments
    /// * `token` - The token to look up.
    ///
    /// ## Returns
    /// The byte, or `None` for tokens outside the byte range.
    pub fn get_byte(
        &self,
        token: T,
    ) -> Option<u8> {
        if token < self.offset() || token > self.max_token() {
            return None;
        }
        (token - self.offset()).to_u8()
    }

    /// Append the byte tokens of a byte span.
    pub fn append_tokens(
        &self,
        span: &[u8],
        tokens: &mut Vec<T>,
    ) {
        tokens.extend(span.iter().map(|&b| self.get_token(b)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_offset() {
        type T = u32;
        let specials: SpecialTokens<T> = Default::default();
        let byte_vocab = ByteMapVocab::<T>::for_specials(&specials).unwrap();

        assert_eq!(byte_vocab.offset(), 4);
        assert_eq!(byte_vocab.max_token(), 259);

        for b in 0..=255u8 {
            let token = byte_vocab.get_token(b);
            assert_eq!(token, b as T + 4);
            assert_eq!(byte_vocab.get_byte(token), Some(b));
        }

        assert_eq!(byte_vocab.get_byte(3), None);
        assert_eq!(byte_vocab.get_byte(260), None);

        let mut tokens = vec![];
        byte_vocab.append_tokens("hi".as_bytes(), &mut tokens);
        assert_eq!(tokens, vec![108, 109]);

        assert!(format!("{byte_vocab:?}").contains("offset: 4"));
    }

    #[test]
    fn test_overflow() {
        assert!(ByteMapVocab::<u8>::with_offset(0).is_ok());
        assert!(matches!(
            ByteMapVocab::<u8>::with_offset(4),
            Err(BPError::VocabSizeOverflow { size: 260 })
        ));
    }
}
