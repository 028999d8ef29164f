//! # Training Types
//!
//! Bound sets for the trainer's generic chunk keys and counts.

use core::{
    fmt::{Debug, Display},
    hash::Hash,
    ops::{AddAssign, SubAssign},
};

use num_traits::{FromPrimitive, PrimInt};

/// A chunk key: built from a chunk slice, hashed into the chunk counter,
/// and read back as text when the chunk is mapped to byte tokens.
pub trait StringChunkType: for<'a> From<&'a str> + AsRef<str> + Eq + Hash {}

impl<K> StringChunkType for K where K: for<'a> From<&'a str> + AsRef<str> + Eq + Hash {}

/// An occurrence count.
///
/// Counts are summed across rayon partitions, adjusted in place by merge
/// deltas, and logged with the merge progress.
pub trait CountType:
    PrimInt + FromPrimitive + AddAssign + SubAssign + Default + Debug + Display + Send + Sync
{
}

impl<C> CountType for C where
    C: PrimInt + FromPrimitive + AddAssign + SubAssign + Default + Debug + Display + Send + Sync
{
}

#[cfg(test)]
mod tests {
    use compact_str::CompactString;

    use super::*;

    fn is_count<C: CountType>() {}

    fn is_chunk<K: StringChunkType>() {}

    #[test]
    fn test_common_count_types() {
        is_count::<u16>();
        is_count::<u32>();
        is_count::<u64>();
        is_count::<usize>();
    }

    #[test]
    fn test_common_string_chunk_types() {
        is_chunk::<String>();
        is_chunk::<CompactString>();
    }
}
