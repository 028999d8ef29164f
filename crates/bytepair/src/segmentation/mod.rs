//! # Text Segmentation
//!
//! Splits text into chunks; merges never cross a chunk boundary,
//! and the concatenation of all chunks reproduces the input.

pub mod patterns;
pub mod segmentation_config;
pub mod text_segmentor;

#[doc(inline)]
pub use patterns::{DEFAULT_CHUNK_PATTERN, DEFAULT_FALLBACK_PATTERN};
#[doc(inline)]
pub use segmentation_config::SegmentationConfig;
#[doc(inline)]
pub use text_segmentor::{SpanRef, TextSegmentor};
