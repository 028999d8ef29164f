//! # Merge Heap Encoder

use std::{cmp::Reverse, collections::BinaryHeap, sync::Arc};

use crate::{
    encoders::token_encoder::TokenEncoder,
    errors::BPResult,
    segmentation::TextSegmentor,
    types::TokenType,
    vocab::UnifiedVocab,
};

const NONE: usize = usize::MAX;

/// ``Reverse((rank, left position, left token, right token))``
type Candidate<T> = Reverse<(usize, usize, T, T)>;

/// A ``(T, T) -> (rank, T)`` merge heap [`TokenEncoder`].
///
/// Chunk tokens form a linked list; candidate merges sit in a min-heap
/// keyed by ``(rank, position)``. Entries invalidated by earlier merges are
/// discarded when popped.
///
/// More complex than [`super::MergeScanEncoder`], but each merge costs
/// ``O(log n)`` rather than a scan of the chunk.
#[derive(Clone)]
pub struct MergeHeapEncoder<T: TokenType> {
    /// Data for the encoders.
    pub data: Arc<UnifiedVocab<T>>,

    /// Text Segmentor.
    pub segmentor: Arc<TextSegmentor>,
}

impl<T: TokenType> MergeHeapEncoder<T> {
    /// Construct an encoder from data.
    ///
    /// ## Arguments
    /// * `data` - The unified token vocabulary to build the encoder from.
    ///
    /// ## Returns
    /// A new `MergeHeapEncoder`, or a pattern error.
    pub fn init(data: Arc<UnifiedVocab<T>>) -> BPResult<Self> {
        let segmentor = TextSegmentor::from_config(data.segmentation())?.into();
        Ok(Self { data, segmentor })
    }
}

impl<T: TokenType> TokenEncoder<T> for MergeHeapEncoder<T> {
    fn vocab(&self) -> &UnifiedVocab<T> {
        &self.data
    }

    fn segmentor(&self) -> &TextSegmentor {
        &self.segmentor
    }

    fn encode_append_chunk(
        &self,
        chunk: &[u8],
        tokens: &mut Vec<T>,
    ) {
        let n = chunk.len();
        if n < 2 {
            self.data.byte_vocab().append_tokens(chunk, tokens);
            return;
        }

        let mut nodes: Vec<T> = Vec::with_capacity(n);
        self.data.byte_vocab().append_tokens(chunk, &mut nodes);

        let mut next: Vec<usize> = (1..=n).map(|i| if i < n { i } else { NONE }).collect();
        let mut prev: Vec<usize> = (0..n).map(|i| if i > 0 { i - 1 } else { NONE }).collect();
        let mut alive: Vec<bool> = vec![true; n];

        let mut heap: BinaryHeap<Candidate<T>> = BinaryHeap::with_capacity(n);
        let push = |heap: &mut BinaryHeap<Candidate<T>>, i: usize, a: T, b: T| {
            if let Some((rank, _)) = self.data.lookup_pair(&(a, b)) {
                heap.push(Reverse((rank, i, a, b)));
            }
        };

        for i in 0..n - 1 {
            push(&mut heap, i, nodes[i], nodes[i + 1]);
        }

        while let Some(Reverse((_, i, a, b))) = heap.pop() {
            let j = next[i];
            if !alive[i] || j == NONE || nodes[i] != a || nodes[j] != b {
                continue;
            }
            let Some((_, new_token)) = self.data.lookup_pair(&(a, b)) else {
                continue;
            };

            nodes[i] = new_token;
            alive[j] = false;

            let k = next[j];
            next[i] = k;
            if k != NONE {
                prev[k] = i;
                push(&mut heap, i, new_token, nodes[k]);
            }

            let h = prev[i];
            if h != NONE {
                push(&mut heap, h, nodes[h], new_token);
            }
        }

        let mut i = 0;
        while i != NONE {
            tokens.push(nodes[i]);
            i = next[i];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        encoders::{
            MergeScanEncoder,
            testing::{common_encoder_test_vocab, common_encoder_tests},
        },
        vocab::{MergeRule, MergeTable},
    };

    #[test]
    fn test_encoder_u16() {
        let vocab = common_encoder_test_vocab::<u16>();
        let encoder = MergeHeapEncoder::init(vocab.clone()).unwrap();
        common_encoder_tests(vocab, &encoder);
    }

    #[test]
    fn test_encoder_u32() {
        let vocab = common_encoder_test_vocab::<u32>();
        let encoder = MergeHeapEncoder::init(vocab.clone()).unwrap();
        common_encoder_tests(vocab, &encoder);
    }

    #[test]
    fn test_rank_beats_position() {
        type T = u32;
        let (a, b, c) = (b'a' as T + 4, b'b' as T + 4, b'c' as T + 4);

        // "bc" is learned before "ab"; "abc" -> ["a", "bc"].
        let vocab: Arc<UnifiedVocab<T>> = UnifiedVocab::init(
            Default::default(),
            Default::default(),
            MergeTable::from_rules([MergeRule::new((b, c), 260), MergeRule::new((a, b), 261)])
                .unwrap(),
        )
        .unwrap()
        .into();

        let heap = MergeHeapEncoder::init(vocab.clone()).unwrap();
        let scan = MergeScanEncoder::init(vocab).unwrap();

        assert_eq!(heap.encode("abc", false), vec![a, 260]);
        assert_eq!(scan.encode("abc", false), vec![a, 260]);
    }
}
