//! # Token Encoders
//!
//! Encoders segment text into chunks, map each chunk to byte tokens,
//! then repeatedly apply the lowest-rank merge present in the chunk,
//! at its leftmost position.
//!
//! * [`MergeHeapEncoder`] - min-heap over a linked token list; the default.
//! * [`MergeScanEncoder`] - rescans the chunk's pairs after every merge.
//!
//! Both produce identical tokens.

mod merge_heap_encoder;
mod merge_scan_encoder;
mod token_encoder;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[doc(inline)]
pub use merge_heap_encoder::MergeHeapEncoder;
#[doc(inline)]
pub use merge_scan_encoder::MergeScanEncoder;
#[doc(inline)]
pub use token_encoder::TokenEncoder;

/// The default encoder.
pub type DefaultTokenEncoder<T> = MergeHeapEncoder<T>;
