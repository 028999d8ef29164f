//! # Dictionary ``{ T -> Vec<u8> }`` Token Decoder

use crate::{
    decoders::token_decoder::TokenDecoder,
    types::TokenType,
    vocab::{SpecialTokens, TokenSpanMap, UnifiedVocab},
};

/// A token dictionary [`TokenDecoder<T>`].
#[derive(Debug, Clone)]
pub struct DictionaryDecoder<T: TokenType> {
    /// Token to bytes mapping; special tokens map to their names.
    pub token_spans: TokenSpanMap<T>,

    /// The special tokens.
    pub specials: SpecialTokens<T>,

    /// The bytes emitted for unknown tokens.
    pub unk_span: Vec<u8>,
}

impl<T: TokenType> DictionaryDecoder<T> {
    /// Build a [`DictionaryDecoder`] from a [`UnifiedVocab`].
    pub fn from_vocab(vocab: &UnifiedVocab<T>) -> Self {
        Self::init(vocab.token_spans().clone(), vocab.specials().clone())
    }

    /// Creates a new Decoder.
    ///
    /// ## Arguments
    /// * `token_spans` - The token to bytes mapping.
    /// * `specials` - The special tokens.
    pub fn init(
        token_spans: TokenSpanMap<T>,
        specials: SpecialTokens<T>,
    ) -> Self {
        let unk = specials.unk();
        let unk_span = token_spans
            .get(&unk)
            .cloned()
            .or_else(|| specials.lookup_name(unk).map(|name| name.as_bytes().to_vec()))
            .unwrap_or_default();

        Self {
            token_spans,
            specials,
            unk_span,
        }
    }
}

impl<T: TokenType> TokenDecoder<T> for DictionaryDecoder<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens, buf)))]
    fn decode_append_bytes(
        &self,
        tokens: &[T],
        skip_special_tokens: bool,
        buf: &mut Vec<u8>,
    ) {
        for &t in tokens {
            if skip_special_tokens && self.specials.contains_token(t) {
                continue;
            }
            match self.token_spans.get(&t) {
                Some(span) => buf.extend_from_slice(span),
                None => buf.extend_from_slice(&self.unk_span),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        support::traits::static_is_send_sync_check,
        vocab::{MergeRule, MergeTable},
    };

    fn hello_decoder() -> DictionaryDecoder<u32> {
        let vocab = UnifiedVocab::<u32>::init(
            Default::default(),
            Default::default(),
            MergeTable::from_rules([MergeRule::new((108, 105), 260)]).unwrap(),
        )
        .unwrap();
        DictionaryDecoder::from_vocab(&vocab)
    }

    #[test]
    fn test_decode() {
        let decoder = hello_decoder();
        static_is_send_sync_check(&decoder);

        assert_eq!(decoder.decode_to_string([260, 112, 112, 115], true), "hello");
        assert_eq!(decoder.decode_to_string([] as [u32; 0], true), "");
    }

    #[test]
    fn test_special_tokens() {
        let decoder = hello_decoder();
        let tokens = [2, 260, 112, 112, 115, 3, 0];

        assert_eq!(decoder.decode_to_string(tokens, true), "hello");
        assert_eq!(
            decoder.decode_to_string(tokens, false),
            "<BOS>hello<EOS><PAD>"
        );
    }

    #[test]
    fn test_unknown_tokens() {
        let decoder = hello_decoder();

        // Unknown ids decode as <UNK>, even when skipping specials.
        assert_eq!(decoder.decode_to_string([260, 9999], true), "he<UNK>");
        assert_eq!(decoder.decode_to_string([1, 260], true), "he");
    }

    #[test]
    fn test_invalid_utf8() {
        let decoder = hello_decoder();

        // "é" = [0xC3, 0xA9]; truncated and reordered.
        let c3 = 0xC3 + 4;
        let a9 = 0xA9 + 4;
        assert_eq!(decoder.decode_to_string([c3, a9], true), "é");
        assert_eq!(decoder.decode_to_string([c3], true), "\u{FFFD}");
        assert_eq!(decoder.decode_to_string([a9, c3], true), "\u{FFFD}\u{FFFD}");

        assert_eq!(decoder.decode_to_bytes([c3], true), vec![0xC3]);
    }

    #[test]
    fn test_batch() {
        let decoder = hello_decoder();
        let batch = vec![vec![260], vec![112, 112]];
        assert_eq!(
            decoder.decode_batch_to_strings(&batch, true),
            vec!["he".to_string(), "ll".to_string()]
        );
    }
}
