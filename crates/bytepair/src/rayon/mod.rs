//! # Rayon Batch Parallelism
//!
//! Batch-level wrappers; vocab and segmentor are shared read-only
//! across rayon tasks.

mod rayon_decoder;
mod rayon_encoder;

#[doc(inline)]
pub use rayon_decoder::ParallelRayonDecoder;
#[doc(inline)]
pub use rayon_encoder::ParallelRayonEncoder;
