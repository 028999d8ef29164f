//! # Merge Scan Encoder

use std::sync::Arc;

use crate::{
    encoders::token_encoder::TokenEncoder,
    errors::BPResult,
    segmentation::TextSegmentor,
    types::TokenType,
    vocab::UnifiedVocab,
};

/// A ``(T, T) -> (rank, T)`` rescanning [`TokenEncoder`].
///
/// Keeps one cached rank per adjacent pair, and scans them all for the
/// lowest ``(rank, position)`` before every merge. Simple; quadratic in the
/// chunk length.
#[derive(Clone)]
pub struct MergeScanEncoder<T: TokenType> {
    /// Data for the encoders.
    pub data: Arc<UnifiedVocab<T>>,

    /// Text Segmentor.
    pub segmentor: Arc<TextSegmentor>,
}

impl<T: TokenType> MergeScanEncoder<T> {
    /// Construct an encoder from data.
    ///
    /// ## Arguments
    /// * `data` - The unified token vocabulary to build the encoder from.
    ///
    /// ## Returns
    /// A new `MergeScanEncoder`, or a pattern error.
    pub fn init(data: Arc<UnifiedVocab<T>>) -> BPResult<Self> {
        let segmentor = TextSegmentor::from_config(data.segmentation())?.into();
        Ok(Self { data, segmentor })
    }

    /// Compiler Hint.
    fn lookup_pair(
        &self,
        a: T,
        b: T,
    ) -> Option<(usize, T)> {
        self.data.lookup_pair(&(a, b))
    }
}

impl<T: TokenType> TokenEncoder<T> for MergeScanEncoder<T> {
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
        // CURRENT := tokens[start..]
        let start = tokens.len();
        self.data.byte_vocab().append_tokens(chunk, tokens);

        // ranks[i] := lookup(CURRENT[i], CURRENT[i + 1])
        let mut ranks: Vec<Option<(usize, T)>> = tokens[start..]
            .windows(2)
            .map(|w| self.lookup_pair(w[0], w[1]))
            .collect();

        while let Some((i, new_token)) = ranks
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.map(|(rank, t)| (rank, i, t)))
            .min_by_key(|&(rank, i, _)| (rank, i))
            .map(|(_, i, t)| (i, t))
        {
            let at = start + i;
            tokens[at] = new_token;
            tokens.remove(at + 1);
            ranks.remove(i);

            if i > 0 {
                ranks[i - 1] = self.lookup_pair(tokens[at - 1], tokens[at]);
            }
            if i < ranks.len() {
                ranks[i] = self.lookup_pair(tokens[at], tokens[at + 1]);
            }
        }
    }
}
