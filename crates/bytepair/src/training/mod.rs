//! # Vocabulary Training
//!
//! Learns an ordered merge table from a text corpus.
//!
//! Training:
//! 1. segments every sample into chunks, counting distinct chunks;
//! 2. indexes adjacent token pairs over the distinct chunks;
//! 3. repeatedly merges the most frequent pair, until the target
//!    vocab size is reached or no pairs remain.
//!
//! Ties between equally frequent pairs go to the smallest ``(left, right)``
//! pair, so training is reproducible.
//!
//! ```rust,no_run
//! use bytepair::{
//!     training::BpeTrainerOptions,
//!     vocab::{SpecialTokens, io::save_tokenizer_dir},
//! };
//!
//! fn example<I>(samples: I) -> bytepair::BPResult<()>
//! where
//!     I: IntoIterator,
//!     I::Item: AsRef<str>,
//! {
//!     let mut trainer = BpeTrainerOptions::new(1000).init::<String, u64>()?;
//!     trainer.update_from_samples(samples);
//!
//!     let results = trainer.train::<u32>(SpecialTokens::default())?;
//!     save_tokenizer_dir(&results.vocab, "model/")
//! }
//! ```

pub mod utility;

mod bpe_trainer;
mod training_types;

#[doc(inline)]
pub use bpe_trainer::{BpeTrainer, BpeTrainerOptions, MergeJob, TrainResults};
#[doc(inline)]
pub use training_types::{CountType, StringChunkType};
