//! # Vocab Trainer

use core::cmp::{Ordering, Reverse};

use compact_str::CompactString;
use dary_heap::OctonaryHeap;

use crate::{
    errors::{BPError, BPResult},
    regex::RegexPattern,
    segmentation::{SegmentationConfig, TextSegmentor},
    training::{
        CountType,
        StringChunkType,
        utility::{PairIndexMap, PairSpanIndex, TextSpanCounter, TokenSpanBuf},
    },
    types::{BPHashSet, Pair, TokenType},
    vocab::{
        ByteMapVocab,
        MergeRule,
        MergeTable,
        SpecialTokens,
        UnifiedVocab,
        validators::{U8_SIZE, try_training_vocab_size},
    },
};

/// Options for [`BpeTrainer`].
#[derive(Debug, Clone)]
pub struct BpeTrainerOptions {
    /// The chunk segmentation config.
    pub segmentation: SegmentationConfig,

    /// The target vocab size; specials and byte tokens included.
    pub vocab_size: usize,

    /// Build the initial pair index in parallel (requires the `rayon` feature).
    pub parallel: bool,
}

impl BpeTrainerOptions {
    /// Create new options with the default chunk pattern.
    ///
    /// ## Arguments
    /// * `vocab_size` - The target vocabulary size.
    ///
    /// ## Returns
    /// A new `BpeTrainerOptions` instance.
    pub fn new(vocab_size: usize) -> Self {
        Self {
            segmentation: SegmentationConfig::default(),
            vocab_size,
            parallel: cfg!(feature = "rayon"),
        }
    }

    /// Sets the vocab size.
    ///
    /// ## Arguments
    /// * `vocab_size` - The target size; must exceed the base vocab size.
    ///
    /// ## Returns
    /// The updated `BpeTrainerOptions` instance.
    pub fn with_vocab_size(
        self,
        vocab_size: usize,
    ) -> Self {
        Self { vocab_size, ..self }
    }

    /// Sets the chunk pattern; compiled by [`Self::init`].
    pub fn with_pattern<P: Into<RegexPattern>>(
        self,
        pattern: P,
    ) -> Self {
        Self {
            segmentation: SegmentationConfig::from_pattern(pattern),
            ..self
        }
    }

    /// Enables or disables the parallel pair index build.
    pub fn with_parallel(
        self,
        parallel: bool,
    ) -> Self {
        Self { parallel, ..self }
    }

    /// Initializes a [`BpeTrainer`] from these options.
    ///
    /// ## Returns
    /// A new `BpeTrainer`, or a pattern error.
    pub fn init<K, C>(self) -> BPResult<BpeTrainer<K, C>>
    where
        K: StringChunkType,
        C: CountType,
    {
        BpeTrainer::new(self)
    }
}

/// Info about a [`Pair`] that could be merged.
#[derive(Debug, Eq)]
pub struct MergeJob<T: TokenType, C: CountType> {
    /// The number of instances of this pair in the corpus.
    ///
    /// May be stale (too high) while in the heap.
    pub count: C,

    /// The pair to merge.
    pub pair: Pair<T>,

    /// Span indices that may contain this pair.
    pub span_indices: BPHashSet<usize>,
}

impl<T: TokenType, C: CountType> MergeJob<T, C> {
    /// The job key.
    ///
    /// Max-heap by count; ties go to the smallest pair.
    pub fn heap_key(&self) -> (C, Reverse<Pair<T>>) {
        (self.count, Reverse(self.pair))
    }
}

impl<T: TokenType, C: CountType> PartialEq for MergeJob<T, C> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.heap_key() == other.heap_key()
    }
}

impl<T: TokenType, C: CountType> PartialOrd for MergeJob<T, C> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: TokenType, C: CountType> Ord for MergeJob<T, C> {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.heap_key().cmp(&other.heap_key())
    }
}

/// Basic BPE train results.
#[derive(Debug, Clone)]
pub struct TrainResults<T: TokenType> {
    /// The trained vocab.
    pub vocab: UnifiedVocab<T>,

    /// The requested vocab size.
    pub requested_vocab_size: usize,
}

impl<T: TokenType> TrainResults<T> {
    /// The achieved vocab size.
    pub fn vocab_size(&self) -> usize {
        self.vocab.vocab_size()
    }

    /// The number of learned merges.
    pub fn num_merges(&self) -> usize {
        self.vocab.num_merges()
    }

    /// Did training run out of pairs before the requested size?
    pub fn stopped_early(&self) -> bool {
        self.vocab_size() < self.requested_vocab_size
    }
}

/// Trainer for learning byte pair encodings.
///
/// # Parameters
/// * `K` - the type used to store chunk strings.
/// * `C` - the type used to store counts.
pub struct BpeTrainer<K = CompactString, C = u64>
where
    K: StringChunkType,
    C: CountType,
{
    /// Trainer options.
    pub options: BpeTrainerOptions,

    /// The chunk counter.
    pub span_counter: TextSpanCounter<K, C>,
}

impl<K, C> BpeTrainer<K, C>
where
    K: StringChunkType,
    C: CountType,
{
    /// Initializes a [`BpeTrainer`].
    ///
    /// ## Arguments
    /// * `options` - The trainer options.
    ///
    /// ## Returns
    /// A new `BpeTrainer`, or a pattern error.
    pub fn new(options: BpeTrainerOptions) -> BPResult<Self> {
        let segmentor = TextSegmentor::from_config(&options.segmentation)?;
        Ok(BpeTrainer {
            options,
            span_counter: TextSpanCounter::new(segmentor),
        })
    }

    /// Update chunk counts inplace from text.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) {
        self.span_counter.update_from_text(text);
    }

    /// Update chunk counts inplace from a sample iterator.
    ///
    /// ## Arguments
    /// * `samples` - An iterator over string-like samples.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, samples)))]
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.span_counter.update_from_samples(samples);
    }

    fn build_pair_index<T: TokenType>(
        &self,
        spans: &[TokenSpanBuf<T>],
        span_counts: &[C],
    ) -> PairSpanIndex<T, C> {
        cfg_if::cfg_if! {
            if #[cfg(feature = "rayon")] {
                if self.options.parallel {
                    return PairSpanIndex::from_span_count_table_par(spans, span_counts);
                }
            }
        }
        PairSpanIndex::from_span_count_table(spans, span_counts)
    }

    /// Learn merges until the target vocab size, or until no pairs remain.
    ///
    /// The vocab size is validated before any work is done.
    ///
    /// ## Arguments
    /// * `specials` - the special tokens; byte tokens follow them.
    ///
    /// ## Returns
    /// The [`TrainResults`], or `VocabSizeTooSmall` / `VocabSizeOverflow`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, specials)))]
    pub fn train<T>(
        self,
        specials: SpecialTokens<T>,
    ) -> BPResult<TrainResults<T>>
    where
        T: TokenType,
    {
        let base_vocab_size = specials.len() + U8_SIZE;
        let vocab_size = try_training_vocab_size::<T>(self.options.vocab_size, base_vocab_size)?;
        let byte_vocab = ByteMapVocab::for_specials(&specials)?;

        let num_merges = vocab_size - base_vocab_size;
        log::info!("Starting BPE training: {num_merges} merges to compute");

        let (mut spans, span_counts): (Vec<TokenSpanBuf<T>>, Vec<C>) = self
            .span_counter
            .to_text_span_counts_iter(&byte_vocab)
            .unzip();
        log::info!("Counted {} distinct chunks", spans.len());

        log::info!("Building pair index...");
        let PairSpanIndex {
            mut pair_counts,
            pair_index,
        } = self.build_pair_index(&spans, &span_counts);

        let zero = C::zero();

        log::info!("Building heap with {} unique pairs", pair_counts.len());
        let mut heap = OctonaryHeap::with_capacity(pair_counts.len());
        for (pair, span_indices) in pair_index {
            let count = pair_counts.get(&pair).copied().unwrap_or(zero);
            if count > zero {
                heap.push(MergeJob {
                    count,
                    pair,
                    span_indices,
                });
            }
        }

        log::info!("Starting merge loop");
        let mut merges = MergeTable::default();
        let mut last_log_percent = 0;

        while merges.len() < num_merges {
            let Some(mut job) = heap.pop() else {
                break;
            };

            // Lazy refresh; heap counts only ever overestimate.
            let current = pair_counts.get(&job.pair).copied().unwrap_or(zero);
            if job.count != current {
                job.count = current;
                if current > zero {
                    heap.push(job);
                }
                continue;
            }
            if job.count == zero {
                break;
            }

            // Merge tokens follow the byte tokens; `vocab_size` fits `T`.
            let new_token = T::from_usize(base_vocab_size + merges.len())
                .ok_or(BPError::VocabSizeOverflow { size: vocab_size })?;
            merges.push(MergeRule::new(job.pair, new_token))?;

            // Pairs containing `new_token`; not yet in the heap.
            let mut new_pair_index: PairIndexMap<T> = PairIndexMap::with_capacity(16);

            for &span_idx in &job.span_indices {
                let weight = span_counts[span_idx];
                spans[span_idx].merge_pair_cb(job.pair, new_token, &mut |pair, delta| {
                    if delta < 0 {
                        *pair_counts.entry(pair).or_default() -= weight;
                    } else {
                        *pair_counts.entry(pair).or_default() += weight;
                        new_pair_index.entry(pair).or_default().insert(span_idx);
                    }
                });
            }
            pair_counts.remove(&job.pair);

            for (pair, span_indices) in new_pair_index {
                let count = pair_counts.get(&pair).copied().unwrap_or(zero);
                if count > zero {
                    heap.push(MergeJob {
                        count,
                        pair,
                        span_indices,
                    });
                }
            }

            let current_percent = (merges.len() * 100) / num_merges;
            if current_percent > last_log_percent {
                log::info!(
                    "Progress: {}% ({}/{} merges) - Last merge: {:?} -> {} (frequency: {})",
                    current_percent,
                    merges.len(),
                    num_merges,
                    job.pair,
                    new_token,
                    job.count
                );
                last_log_percent = current_percent;
            }
        }

        if merges.len() < num_merges {
            log::info!(
                "No pairs remain; stopping early at {} of {num_merges} merges",
                merges.len()
            );
        }
        log::info!("Finished training: {} merges completed", merges.len());

        merges.shrink_to_fit();
        let vocab = UnifiedVocab::init(self.options.segmentation, specials, merges)?;

        Ok(TrainResults {
            vocab,
            requested_vocab_size: vocab_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::BPError,
        segmentation::DEFAULT_CHUNK_PATTERN,
        support::traits::static_is_send_sync_check,
        types::BPHashMap,
    };

    /// Full-recount reference trainer over ``(chunk tokens, count)``.
    fn naive_train(
        mut chunks: Vec<(Vec<u32>, u64)>,
        num_merges: usize,
        first_token: u32,
    ) -> Vec<MergeRule<u32>> {
        let mut rules = Vec::new();
        for new_token in first_token..first_token + num_merges as u32 {
            let mut counts: BPHashMap<Pair<u32>, u64> = BPHashMap::default();
            for (tokens, count) in &chunks {
                for w in tokens.windows(2) {
                    *counts.entry((w[0], w[1])).or_default() += count;
                }
            }
            let Some((pair, _)) = counts
                .into_iter()
                .filter(|(_, c)| *c > 0)
                .max_by_key(|(p, c)| (*c, Reverse(*p)))
            else {
                break;
            };

            for (tokens, _) in chunks.iter_mut() {
                let mut span = TokenSpanBuf::from_tokens(&tokens[..]);
                span.merge_pair(pair, new_token);
                *tokens = span.tokens().to_vec();
            }
            rules.push(MergeRule::new(pair, new_token));
        }
        rules
    }

    #[test]
    fn test_trainer_options() {
        let options = BpeTrainerOptions::new(1000);
        assert_eq!(options.vocab_size, 1000);
        assert_eq!(
            options.segmentation.pattern().as_str(),
            DEFAULT_CHUNK_PATTERN
        );
        assert_eq!(options.parallel, cfg!(feature = "rayon"));

        let options = options
            .with_vocab_size(2000)
            .with_pattern(r"\S+")
            .with_parallel(false);
        assert_eq!(options.vocab_size, 2000);
        assert_eq!(options.segmentation.pattern().as_str(), r"\S+");
        assert!(!options.parallel);
    }

    #[test]
    fn test_bad_pattern() {
        let result = BpeTrainerOptions::new(1000)
            .with_pattern("(")
            .init::<String, u32>();
        assert!(matches!(result, Err(BPError::Pattern(_))));
    }

    #[test]
    fn test_vocab_too_small() {
        for size in [0, 100, 259, 260] {
            let trainer = BpeTrainerOptions::new(size)
                .init::<CompactString, u64>()
                .unwrap();
            assert!(matches!(
                trainer.train::<u32>(SpecialTokens::default()),
                Err(BPError::VocabSizeTooSmall { base: 260, .. })
            ));
        }
    }

    #[test]
    fn test_vocab_overflow() {
        let trainer = BpeTrainerOptions::new(70_000)
            .init::<CompactString, u64>()
            .unwrap();
        assert!(matches!(
            trainer.train::<u16>(SpecialTokens::default()),
            Err(BPError::VocabSizeOverflow { size: 70_000 })
        ));
    }

    #[test]
    fn test_fills_token_type() {
        // xorshift; 40k distinct-ish 10 letter words.
        let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
        let mut text = String::with_capacity(40_000 * 11);
        for _ in 0..40_000 {
            text.push(' ');
            for _ in 0..10 {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                text.push((b'a' + (state % 26) as u8) as char);
            }
        }

        let size = u16::MAX as usize + 1;
        let mut trainer = BpeTrainerOptions::new(size)
            .init::<CompactString, u64>()
            .unwrap();
        trainer.update_from_text(&text);

        let results = trainer.train::<u16>(SpecialTokens::default()).unwrap();
        assert_eq!(results.vocab_size(), size);
        assert!(!results.stopped_early());
        assert_eq!(
            results.vocab.merges().rules().last().map(|rule| rule.token),
            Some(u16::MAX)
        );
    }

    #[test]
    fn test_first_merge_and_tie_break() {
        // "ab" x3, "ba" x3; (a, b) and (b, a) tie at 3.
        let mut trainer = BpeTrainerOptions::new(261)
            .with_pattern(r"\S+")
            .init::<String, u32>()
            .unwrap();
        trainer.update_from_text("ba ab ba ab ba ab");

        let results = trainer.train::<u32>(SpecialTokens::default()).unwrap();
        let a = b'a' as u32 + 4;
        let b = b'b' as u32 + 4;

        assert_eq!(results.num_merges(), 1);
        assert_eq!(results.vocab_size(), 261);
        assert!(!results.stopped_early());
        assert_eq!(
            results.vocab.merges().rules(),
            &[MergeRule::new((a, b), 260)]
        );
        assert_eq!(results.vocab.id_to_bytes(260), Some("ab".as_bytes()));
    }

    #[test]
    fn test_stops_early() {
        let mut trainer = BpeTrainerOptions::new(10_000)
            .init::<String, u64>()
            .unwrap();
        trainer.update_from_text("aaaa");

        let results = trainer.train::<u32>(SpecialTokens::default()).unwrap();
        let a = b'a' as u32 + 4;

        // aaaa -> [X, X] -> [Y]
        assert_eq!(
            results.vocab.merges().rules(),
            &[MergeRule::new((a, a), 260), MergeRule::new((260, 260), 261)]
        );
        assert_eq!(results.vocab_size(), 262);
        assert_eq!(results.requested_vocab_size, 10_000);
        assert!(results.stopped_early());
    }

    #[test]
    fn test_empty_corpus() {
        let trainer = BpeTrainerOptions::new(300)
            .init::<String, u64>()
            .unwrap();
        let results = trainer.train::<u32>(SpecialTokens::default()).unwrap();
        assert_eq!(results.num_merges(), 0);
        assert_eq!(results.vocab_size(), 260);
        assert!(results.stopped_early());
    }

    fn check_matches_naive(parallel: bool) {
        let samples = [
            "hello world",
            "hello san francisco",
            "it's not the heat, it's the salt",
            "aaaaaaa bbbbbb aaaa abababab",
            "the theme of the thesis: there, then, thereafter.",
            "日本語のテキスト 日本語",
        ];

        let options = BpeTrainerOptions::new(400).with_parallel(parallel);
        let mut trainer = options.clone().init::<String, u64>().unwrap();
        trainer.update_from_samples(samples);

        let byte_vocab = ByteMapVocab::<u32>::with_offset(4).unwrap();
        let chunks: Vec<(Vec<u32>, u64)> = trainer
            .span_counter
            .to_text_span_counts_iter(&byte_vocab)
            .map(|(span, count)| (span.tokens().to_vec(), count))
            .collect();
        let expected = naive_train(chunks, 400 - 260, 260);

        let results = trainer.train::<u32>(SpecialTokens::default()).unwrap();
        assert_eq!(results.vocab.merges().rules(), expected.as_slice());
        assert_eq!(results.vocab_size(), 260 + expected.len());
    }

    #[test]
    fn test_matches_full_recount() {
        check_matches_naive(false);
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_matches_full_recount_parallel() {
        check_matches_naive(true);
    }

    #[test]
    fn test_trained_vocab_is_shareable() {
        let mut trainer = BpeTrainerOptions::new(300)
            .init::<CompactString, u32>()
            .unwrap();
        trainer.update_from_text("hello hello world");
        let results = trainer.train::<u16>(SpecialTokens::default()).unwrap();
        static_is_send_sync_check(&results.vocab);
    }

    #[test]
    fn test_merge_job_heap_key() {
        type T = u32;
        type C = u32;

        let job = |pair: Pair<T>, count: C| MergeJob {
            count,
            pair,
            span_indices: Default::default(),
        };

        let job1 = job((1, 2), 2);
        let job2 = job((2, 1), 1);
        let job3 = job((2, 2), 1);

        assert_eq!(&job1, &job1);
        assert_ne!(&job1, &job2);

        assert_eq!(job1.heap_key(), (2, Reverse((1, 2))));

        // Higher count wins.
        assert_eq!(job1.cmp(&job2), Ordering::Greater);

        // Equal counts: the smaller pair wins.
        assert_eq!(job2.cmp(&job3), Ordering::Greater);
        assert_eq!(job3.partial_cmp(&job2), Some(Ordering::Less));

        let mut heap = OctonaryHeap::new();
        heap.push(job((9, 9), 5));
        heap.push(job((3, 4), 5));
        heap.push(job((3, 5), 5));
        heap.push(job((1, 1), 4));
        assert_eq!(heap.pop().map(|j| j.pair), Some((3, 4)));
        assert_eq!(heap.pop().map(|j| j.pair), Some((3, 5)));
        assert_eq!(heap.pop().map(|j| j.pair), Some((9, 9)));
    }
}
