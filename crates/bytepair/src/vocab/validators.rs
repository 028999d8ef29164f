//! Validators for vocabulary sizes.

use crate::{
    errors::{BPError, BPResult},
    types::TokenType,
};

/// The size of the u8 space.
pub const U8_SIZE: usize = u8::MAX as usize + 1;

/// Validates a vocab size against the token type.
///
/// The largest id of a vocab of `vocab_size` tokens is `vocab_size - 1`;
/// it must be representable as `T`.
pub fn try_vocab_size<T: TokenType>(vocab_size: usize) -> BPResult<usize> {
    if vocab_size > 0 && T::from_usize(vocab_size - 1).is_none() {
        Err(BPError::VocabSizeOverflow { size: vocab_size })
    } else {
        Ok(vocab_size)
    }
}

/// Validates a training target size; it must leave room for at least one merge.
///
/// ## Arguments
/// * `vocab_size` - the requested vocab size.
/// * `base_vocab_size` - the size of the special + byte vocab.
pub fn try_training_vocab_size<T: TokenType>(
    vocab_size: usize,
    base_vocab_size: usize,
) -> BPResult<usize> {
    if vocab_size <= base_vocab_size {
        return Err(BPError::VocabSizeTooSmall {
            size: vocab_size,
            base: base_vocab_size,
        });
    }
    try_vocab_size::<T>(vocab_size)
}
