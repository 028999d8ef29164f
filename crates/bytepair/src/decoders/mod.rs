//! # Token Decoders
//!
//! Decoding never fails: unknown tokens decode as `<UNK>`,
//! and invalid UTF-8 is replaced with `U+FFFD`.

mod dictionary_decoder;
mod token_decoder;

#[doc(inline)]
pub use dictionary_decoder::DictionaryDecoder;
#[doc(inline)]
pub use token_decoder::TokenDecoder;
