//! # Vocabulary
//!
//! * [`SpecialTokens`] - the reserved ``0..n`` tokens.
//! * [`ByteMapVocab`] - the ``u8 -> T`` table placed after the specials.
//! * [`MergeTable`] - ranked ``(T, T) -> T`` merge rules.
//! * [`UnifiedVocab`] - the frozen combination used by encoders and decoders.
//!
//! ## Loading Vocabularies
//!
//! See [`io`] for the ``vocab.json`` / ``merges.txt`` / ``config.json`` artifacts.

pub mod io;
pub mod validators;

mod byte_vocab;
mod merge_table;
mod special_vocab;
mod unified_vocab;
mod vocab_types;

#[doc(inline)]
pub use byte_vocab::ByteMapVocab;
#[doc(inline)]
pub use merge_table::{MergeRule, MergeTable};
#[doc(inline)]
pub use special_vocab::{
    BOS_TOKEN,
    DEFAULT_SPECIAL_TOKENS,
    EOS_TOKEN,
    PAD_TOKEN,
    SpecialTokens,
    UNK_TOKEN,
};
#[doc(inline)]
pub use unified_vocab::UnifiedVocab;
#[doc(inline)]
pub use vocab_types::*;
