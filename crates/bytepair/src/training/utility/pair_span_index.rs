//! # `PairIndex` Builder

use crate::{
    training::{CountType, utility::token_span_buffer::TokenSpanBuf},
    types::{BPHashMap, BPHashSet, Pair, TokenType},
};

/// A map from [`Pair`] to its occurrence count.
pub type PairCountMap<T, C> = BPHashMap<Pair<T>, C>;

/// A map from [`Pair`] to indices over ``spans``.
pub type PairIndexMap<T> = BPHashMap<Pair<T>, BPHashSet<usize>>;

/// An index of ``(T, T)`` pair information relative to a ``&[TokenSpanBuf<T>]``.
#[derive(Debug, Clone)]
pub struct PairSpanIndex<T: TokenType, C: CountType> {
    /// A map from [`Pair`] to its weighted occurrence count.
    ///
    /// ``sum(spans[i].window_count(pair) * counts[i]) for all i``
    pub pair_counts: PairCountMap<T, C>,

    /// A map from [`Pair`] to the indices of the spans containing it.
    pub pair_index: PairIndexMap<T>,
}

impl<T: TokenType, C: CountType> PairSpanIndex<T, C> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            pair_counts: PairCountMap::with_capacity(capacity),
            pair_index: PairIndexMap::with_capacity(capacity),
        }
    }

    fn observe(
        &mut self,
        index: usize,
        span: &TokenSpanBuf<T>,
        count: C,
    ) {
        if count == C::zero() || span.len() < 2 {
            return;
        }
        for p in span.pairs() {
            *self.pair_counts.entry(p).or_default() += count;
            self.pair_index.entry(p).or_default().insert(index);
        }
    }

    /// Build a [`PairSpanIndex`] from a slice of [`TokenSpanBuf`]s, using a count table.
    ///
    /// # Arguments
    /// * `spans` - a sequence of text spans; assumed to be unique.
    /// * `counts` - `counts[i]` is the count of `spans[i]`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(spans, counts)))]
    pub fn from_span_count_table(
        spans: &[TokenSpanBuf<T>],
        counts: &[C],
    ) -> Self {
        let mut index = Self::with_capacity(spans.len() / 1000);
        for (idx, (span, &count)) in spans.iter().zip(counts).enumerate() {
            index.observe(idx, span, count);
        }
        index
    }

    /// Parallel variant of [`Self::from_span_count_table`].
    ///
    /// Each rayon task indexes a partition of the spans;
    /// the partial indexes are then summed.
    #[cfg(feature = "rayon")]
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(spans, counts)))]
    pub fn from_span_count_table_par(
        spans: &[TokenSpanBuf<T>],
        counts: &[C],
    ) -> Self {
        use rayon::prelude::*;

        spans
            .par_iter()
            .zip(counts.par_iter())
            .enumerate()
            .fold(
                || Self::with_capacity(0),
                |mut acc, (idx, (span, &count))| {
                    acc.observe(idx, span, count);
                    acc
                },
            )
            .reduce(|| Self::with_capacity(0), Self::merge)
    }

    /// Sum two indexes over disjoint span sets.
    pub fn merge(
        self,
        other: Self,
    ) -> Self {
        let (mut big, small) = if self.pair_index.len() >= other.pair_index.len() {
            (self, other)
        } else {
            (other, self)
        };

        for (p, count) in small.pair_counts {
            *big.pair_counts.entry(p).or_default() += count;
        }
        for (p, indices) in small.pair_index {
            big.pair_index.entry(p).or_default().extend(indices);
        }
        big
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::ByteMapVocab;

    fn test_spans<T: TokenType>() -> Vec<TokenSpanBuf<T>> {
        let byte_vocab = ByteMapVocab::<T>::with_offset(0).unwrap();
        vec![
            TokenSpanBuf::from_string("hello", &byte_vocab),
            TokenSpanBuf::from_string("world", &byte_vocab),
            TokenSpanBuf::from_string("help", &byte_vocab),
            TokenSpanBuf::from_string("☃", &byte_vocab), // "☃" := [0xE2 0x98] 0x83
            TokenSpanBuf::from_string("zz", &byte_vocab),
        ]
    }

    fn check_pair_index<T: TokenType, C: CountType>(index: PairSpanIndex<T, C>) {
        let to_pair = |a: char, b: char| (T::from_u8(a as u8).unwrap(), T::from_u8(b as u8).unwrap());

        assert_eq!(
            index.pair_counts,
            [
                (('e', 'l'), 4),                   // 1 h[el]lo, 3 h[el]p
                (('h', 'e'), 4),                   // 1 [he]llo, 3 [he]lp
                (('l', 'p'), 3),                   // 3 hel[lp]
                (('l', 'd'), 2),                   // 2 wor[ld]
                (('o', 'r'), 2),                   // 2 w[or]ld
                (('r', 'l'), 2),                   // 2 wo[rl]d
                (('w', 'o'), 2),                   // 2 [wo]rld
                (('l', 'l'), 1),                   // 1 he[ll]o
                (('l', 'o'), 1),                   // 1 hel[lo]
                ((0xE2 as char, 0x98 as char), 4), // "☃" := [0xE2 0x98] 0x83
                ((0x98 as char, 0x83 as char), 4), // "☃" := 0xE2 [0x98 0x83]
            ]
            .into_iter()
            .map(|((a, b), c)| (to_pair(a, b), C::from_u32(c).unwrap()))
            .collect::<PairCountMap<T, C>>()
        );

        assert_eq!(
            index.pair_index,
            [
                (('e', 'l'), vec![0, 2]),
                (('h', 'e'), vec![0, 2]),
                (('l', 'd'), vec![1]),
                (('l', 'l'), vec![0]),
                (('l', 'o'), vec![0]),
                (('l', 'p'), vec![2]),
                (('o', 'r'), vec![1]),
                (('r', 'l'), vec![1]),
                (('w', 'o'), vec![1]),
                ((0xE2 as char, 0x98 as char), vec![3]),
                ((0x98 as char, 0x83 as char), vec![3]),
            ]
            .into_iter()
            .map(|((a, b), s)| (to_pair(a, b), BPHashSet::from_iter(s)))
            .collect::<PairIndexMap<T>>()
        );
    }

    fn test_counts<C: CountType>() -> Vec<C> {
        // "zz" has count 0; it is not indexed.
        [1, 2, 3, 4, 0]
            .into_iter()
            .map(|c| C::from_u32(c).unwrap())
            .collect()
    }

    #[test]
    fn test_pair_index_serial() {
        check_pair_index(PairSpanIndex::<u32, usize>::from_span_count_table(
            &test_spans(),
            &test_counts(),
        ));
        check_pair_index(PairSpanIndex::<u16, u64>::from_span_count_table(
            &test_spans(),
            &test_counts(),
        ));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_pair_index_parallel() {
        check_pair_index(PairSpanIndex::<u32, u64>::from_span_count_table_par(
            &test_spans(),
            &test_counts(),
        ));
    }
}
