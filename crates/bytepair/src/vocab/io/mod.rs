//! # Vocabulary IO
//!
//! A trained tokenizer is three files in one directory:
//! * ``vocab.json`` - ``{ symbol -> token }``; see [`vocab_json`].
//! * ``merges.txt`` - ``left right new`` per line, in rank order; see [`merges_text`].
//! * ``config.json`` - sizes and special tokens; see [`TokenizerConfig`].

pub mod config_json;
pub mod corpus;
pub mod merges_text;
pub mod tokenizer_dir;
pub mod vocab_json;

#[doc(inline)]
pub use config_json::TokenizerConfig;
#[doc(inline)]
pub use corpus::read_corpus;
#[doc(inline)]
pub use tokenizer_dir::{
    CONFIG_FILE,
    MERGES_FILE,
    VOCAB_FILE,
    load_tokenizer_dir,
    save_tokenizer_dir,
};
