//! # Encoder Test Utilities

use std::sync::Arc;

use crate::{
    decoders::{DictionaryDecoder, TokenDecoder},
    encoders::{MergeScanEncoder, TokenEncoder},
    support::traits::static_is_send_sync_check,
    training::BpeTrainerOptions,
    types::TokenType,
    vocab::{SpecialTokens, UnifiedVocab},
};

/// Samples used to train and check the common test vocab.
pub const COMMON_SAMPLES: &[&str] = &[
    "hello world",
    "hello san francisco",
    "it's not the heat, it's the salt",
    "aaaaaaa bbbbbb aaaa abababab",
    "café crème brûlée",
    "the theme of the thesis: there, then, thereafter.\n",
    "  multiple   spaces  ",
    "line one\r\nline two\n\n",
    "in 2024, 42 of 1000",
    "日本語のテキスト 日本語",
];

/// Train a small vocab on [`COMMON_SAMPLES`].
pub fn common_encoder_test_vocab<T: TokenType>() -> Arc<UnifiedVocab<T>> {
    let mut trainer = BpeTrainerOptions::new(420)
        .init::<String, u32>()
        .unwrap();
    trainer.update_from_samples(COMMON_SAMPLES);

    trainer
        .train::<T>(SpecialTokens::default())
        .unwrap()
        .vocab
        .into()
}

/// Common [`TokenEncoder`] checks.
///
/// * round-trips through a [`DictionaryDecoder`];
/// * matches [`MergeScanEncoder`] token for token;
/// * wraps in `BOS` / `EOS` on request.
pub fn common_encoder_tests<T: TokenType, E: TokenEncoder<T>>(
    vocab: Arc<UnifiedVocab<T>>,
    encoder: &E,
) {
    static_is_send_sync_check(encoder);

    let decoder = DictionaryDecoder::from_vocab(&vocab);
    let reference = MergeScanEncoder::init(vocab.clone()).unwrap();

    let mut samples: Vec<&str> = COMMON_SAMPLES.to_vec();
    samples.extend(["", "x", "unseen: qwzj 🦀!", "hello\u{0}world"]);

    let batch = encoder.encode_batch(&samples, false);
    assert_eq!(batch.len(), samples.len());

    for (sample, tokens) in samples.iter().zip(&batch) {
        assert_eq!(&decoder.decode_to_string(tokens, true), sample);
        assert_eq!(tokens, &reference.encode(sample, false), "{sample:?}");
        assert_eq!(tokens, &encoder.encode(sample, false));
    }

    let specials = vocab.specials();
    let tokens = encoder.encode("hello world", true);
    assert_eq!(tokens.first(), Some(&specials.bos()));
    assert_eq!(tokens.last(), Some(&specials.eos()));
    assert_eq!(&tokens[1..tokens.len() - 1], encoder.encode("hello world", false));
    assert_eq!(decoder.decode_to_string(&tokens, true), "hello world");
    assert_eq!(
        decoder.decode_to_string(&tokens, false),
        "<BOS>hello world<EOS>"
    );

    // The trained merges apply.
    assert!(encoder.encode("hello", false).len() < "hello".len());
}
