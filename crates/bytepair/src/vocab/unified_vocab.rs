//! # Unified Token Vocabulary

use crate::{
    errors::{BPError, BPResult},
    segmentation::SegmentationConfig,
    types::{Pair, TokenType},
    vocab::{
        ByteMapVocab,
        MergeRule,
        MergeTable,
        SpanTokenMap,
        SpecialTokens,
        TokenSpanMap,
        validators::{U8_SIZE, try_vocab_size},
    },
};

/// Unified token vocabulary.
///
/// Frozen after construction; shared read-only by encoders and decoders.
///
/// Token layout:
/// * ``0..n`` - the special tokens; their bytes are their names.
/// * ``n..n + 256`` - one token per byte value.
/// * the rest - merge tokens; the concatenation of their parents' bytes.
#[derive(Debug, Clone)]
pub struct UnifiedVocab<T: TokenType> {
    /// Chunk segmentation configuration.
    segmentation: SegmentationConfig,

    /// Special tokens.
    specials: SpecialTokens<T>,

    /// ``{ u8 -> T }`` byte table.
    byte_vocab: ByteMapVocab<T>,

    /// ``{ (T, T) -> (rank, T) }`` merges.
    merges: MergeTable<T>,

    /// ``{ T -> Vec<u8> }`` for every token.
    token_spans: TokenSpanMap<T>,

    /// ``{ Vec<u8> -> T }``; the lowest token wins on shared bytes.
    span_tokens: SpanTokenMap<T>,
}

impl<T: TokenType> UnifiedVocab<T> {
    /// Initialize a [`UnifiedVocab`].
    ///
    /// ## Arguments
    /// * `segmentation` - The chunk segmentation configuration.
    /// * `specials` - The special tokens.
    /// * `merges` - The merge rules, in rank order.
    ///
    /// ## Returns
    /// The vocab, or `VocabConflict` if a rule references an undefined
    /// or special parent, or reuses an existing token.
    pub fn init(
        segmentation: SegmentationConfig,
        specials: SpecialTokens<T>,
        merges: MergeTable<T>,
    ) -> BPResult<Self> {
        let byte_vocab = ByteMapVocab::for_specials(&specials)?;
        try_vocab_size::<T>(specials.len() + U8_SIZE + merges.len())?;

        let mut token_spans: TokenSpanMap<T> =
            TokenSpanMap::with_capacity(specials.len() + U8_SIZE + merges.len());

        for (name, token) in specials.iter() {
            token_spans.insert(token, name.as_bytes().to_vec());
        }
        for (b, &token) in byte_vocab.byte_tokens().iter().enumerate() {
            token_spans.insert(token, vec![b as u8]);
        }

        for (rank, rule) in merges.rules().iter().enumerate() {
            let MergeRule {
                pair: (a, b),
                token,
            } = *rule;

            if specials.contains_token(a) || specials.contains_token(b) {
                return Err(BPError::VocabConflict(format!(
                    "merge {rank} has a special token parent: {:?}",
                    rule.pair
                )));
            }
            if token_spans.contains_key(&token) {
                return Err(BPError::VocabConflict(format!(
                    "merge {rank} reuses token {token}"
                )));
            }

            let span = match (token_spans.get(&a), token_spans.get(&b)) {
                (Some(left), Some(right)) => [left.as_slice(), right.as_slice()].concat(),
                _ => {
                    return Err(BPError::VocabConflict(format!(
                        "merge {rank} has an undefined parent: {:?}",
                        rule.pair
                    )));
                }
            };
            token_spans.insert(token, span);
        }

        let mut vocab = Self {
            segmentation,
            specials,
            byte_vocab,
            merges,
            token_spans,
            span_tokens: SpanTokenMap::default(),
        };
        vocab.rebuild_span_tokens();
        Ok(vocab)
    }

    /// Add decode-only tokens.
    ///
    /// Tokens already defined keep their bytes; the others are added
    /// with the given bytes.
    ///
    pub fn with_extra_spans<I>(
        mut self,
        spans: I,
    ) -> Self
    where
        I: IntoIterator<Item = (T, Vec<u8>)>,
    {
        for (token, span) in spans {
            self.token_spans.entry(token).or_insert(span);
        }
        self.rebuild_span_tokens();
        self
    }

    fn rebuild_span_tokens(&mut self) {
        let mut span_tokens = SpanTokenMap::with_capacity(self.token_spans.len());
        for (token, span) in self.sorted_token_spans() {
            span_tokens.entry(span.to_vec()).or_insert(token);
        }
        self.span_tokens = span_tokens;
    }

    /// The segmentation configuration.
    pub fn segmentation(&self) -> &SegmentationConfig {
        &self.segmentation
    }

    /// The special tokens.
    pub fn specials(&self) -> &SpecialTokens<T> {
        &self.specials
    }

    /// The byte table.
    pub fn byte_vocab(&self) -> &ByteMapVocab<T> {
        &self.byte_vocab
    }

    /// The merge table.
    pub fn merges(&self) -> &MergeTable<T> {
        &self.merges
    }

    /// The ``{ T -> Vec<u8> }`` map of all tokens.
    pub fn token_spans(&self) -> &TokenSpanMap<T> {
        &self.token_spans
    }

    /// All ``(token, bytes)`` entries, in token order.
    pub fn sorted_token_spans(&self) -> Vec<(T, &[u8])> {
        let mut items: Vec<(T, &[u8])> = self
            .token_spans
            .iter()
            .map(|(&t, span)| (t, span.as_slice()))
            .collect();
        items.sort_by_key(|(t, _)| *t);
        items
    }

    /// The number of tokens in the vocab.
    pub fn vocab_size(&self) -> usize {
        self.token_spans.len()
    }

    /// The size of the special + byte vocab.
    pub fn base_vocab_size(&self) -> usize {
        self.specials.len() + U8_SIZE
    }

    /// The number of merge rules.
    pub fn num_merges(&self) -> usize {
        self.merges.len()
    }

    /// The largest token, if any.
    pub fn max_token(&self) -> Option<T> {
        self.token_spans.keys().copied().max()
    }

    /// Look up the token for a byte span.
    pub fn lookup_token(
        &self,
        span: &[u8],
    ) -> Option<T> {
        self.span_tokens.get(span).copied()
    }

    /// Look up the token for a byte span, falling back to the unknown token.
    pub fn token_to_id(
        &self,
        span: &[u8],
    ) -> T {
        self.lookup_token(span).unwrap_or(self.specials.unk())
    }

    /// Look up the bytes of a token.
    pub fn id_to_bytes(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        self.token_spans.get(&token).map(Vec::as_slice)
    }

    /// Look up ``(rank, token)`` for a pair.
    #[inline(always)]
    pub fn lookup_pair(
        &self,
        pair: &Pair<T>,
    ) -> Option<(usize, T)> {
        self.merges.lookup(pair)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hello_vocab() -> UnifiedVocab<u32> {
        UnifiedVocab::init(
            Default::default(),
            Default::default(),
            MergeTable::from_rules([
                MergeRule::new((108, 105), 260), // "h" "e"
                MergeRule::new((112, 112), 261), // "l" "l"
                MergeRule::new((260, 261), 262), // "he" "ll"
            ])
            .unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_init() {
        let vocab = hello_vocab();

        assert_eq!(vocab.vocab_size(), 263);
        assert_eq!(vocab.base_vocab_size(), 260);
        assert_eq!(vocab.num_merges(), 3);
        assert_eq!(vocab.max_token(), Some(262));

        assert_eq!(vocab.id_to_bytes(0), Some("<PAD>".as_bytes()));
        assert_eq!(vocab.id_to_bytes(108), Some("h".as_bytes()));
        assert_eq!(vocab.id_to_bytes(262), Some("hell".as_bytes()));
        assert_eq!(vocab.id_to_bytes(263), None);

        assert_eq!(vocab.token_to_id("hell".as_bytes()), 262);
        assert_eq!(vocab.token_to_id("<EOS>".as_bytes()), 3);
        assert_eq!(vocab.token_to_id("hello".as_bytes()), 1);

        assert_eq!(vocab.lookup_pair(&(112, 112)), Some((1, 261)));

        let sorted = vocab.sorted_token_spans();
        assert_eq!(sorted.len(), 263);
        assert_eq!(sorted[4], (4, &[0u8][..]));
    }

    #[test]
    fn test_conflicts() {
        let init = |rules: Vec<MergeRule<u32>>| {
            UnifiedVocab::<u32>::init(
                Default::default(),
                Default::default(),
                MergeTable::from_rules(rules).unwrap(),
            )
        };

        // undefined parent
        assert!(init(vec![MergeRule::new((300, 104), 260)]).is_err());

        // special parent
        assert!(init(vec![MergeRule::new((2, 104), 260)]).is_err());

        // byte token reused
        assert!(init(vec![MergeRule::new((104, 104), 104)]).is_err());

        // ids may skip; parents only need to be defined earlier.
        assert!(init(vec![MergeRule::new((104, 104), 300)]).is_ok());
    }

    #[test]
    fn test_extra_spans() {
        let vocab = hello_vocab()
            .with_extra_spans([(262, b"zzz".to_vec()), (270, b"hell".to_vec())]);

        assert_eq!(vocab.vocab_size(), 264);
        assert_eq!(vocab.id_to_bytes(262), Some("hell".as_bytes()));
        assert_eq!(vocab.id_to_bytes(270), Some("hell".as_bytes()));
        assert_eq!(vocab.token_to_id("hell".as_bytes()), 262);
    }

    #[test]
    fn test_overflow() {
        // 260 base tokens don't fit in u8.
        assert!(
            UnifiedVocab::<u8>::init(Default::default(), Default::default(), Default::default())
                .is_err()
        );
    }
}
