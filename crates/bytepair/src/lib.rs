//! # `bytepair` Byte-Level BPE Tokenizer
//!
//! Trains, saves, loads and runs byte-level byte-pair-encoding tokenizers.
//!
//! Every byte value has a base token (``id = byte + 4``, after the
//! ``<PAD>``, ``<UNK>``, ``<BOS>``, ``<EOS>`` special tokens), so encoding
//! never fails and ``decode(encode(s)) == s`` for every string.
//!
//! See:
//! * [`segmentation`] to split text into chunks.
//! * [`training`] to learn a merge table from a corpus.
//! * [`encoders`] to encode text into tokens.
//! * [`decoders`] to decode tokens into text.
//! * [`vocab`] to manage vocabularies and the ``vocab.json`` /
//!   ``merges.txt`` / ``config.json`` artifacts.
//! * [`Tokenizer`] for the combined encoder/decoder over a saved model.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::BPHash{*}`` type alias machinery.
//!
//! #### feature: ``rayon``
//!
//! This enables parallel pair counting during training,
//! and the batch parallelism wrappers in [`rayon`].
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! ## Training and Loading
//!
//! ```rust,no_run
//! use bytepair::{Tokenizer, tokenizer::train_tokenizer_dir, training::BpeTrainerOptions};
//!
//! fn example() -> bytepair::BPResult<()> {
//!     let results = train_tokenizer_dir::<u32, _, _>(
//!         &["corpus.txt"],
//!         "model/",
//!         BpeTrainerOptions::new(1000),
//!         Some(50_000),
//!     )?;
//!     println!("merges: {}", results.num_merges());
//!
//!     let tokenizer = Tokenizer::<u32>::load("model/")?;
//!     let tokens = tokenizer.encode("hello world", true);
//!     assert_eq!(tokenizer.decode(&tokens, true), "hello world");
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

#[cfg(feature = "rayon")]
pub mod rayon;

pub mod decoders;
pub mod encoders;
pub mod errors;
pub mod regex;
pub mod segmentation;
pub mod support;
pub mod tokenizer;
pub mod training;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use errors::{BPError, BPResult};
#[doc(inline)]
pub use tokenizer::Tokenizer;
#[doc(inline)]
pub use types::TokenType;
