//! # Tokenizer
//!
//! [`Tokenizer`] bundles a frozen [`UnifiedVocab`] with the default
//! encoder and decoder; it is what a loaded model directory becomes.

use std::{path::Path, sync::Arc};

use crate::{
    decoders::{DictionaryDecoder, TokenDecoder},
    encoders::{DefaultTokenEncoder, TokenEncoder},
    errors::BPResult,
    training::{BpeTrainerOptions, TrainResults},
    types::TokenType,
    vocab::{
        SpecialTokens,
        UnifiedVocab,
        io::{load_tokenizer_dir, read_corpus, save_tokenizer_dir},
        validators::{U8_SIZE, try_training_vocab_size},
    },
};

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use crate::rayon::{ParallelRayonDecoder, ParallelRayonEncoder};

        type BatchEncoder<T> = ParallelRayonEncoder<T, DefaultTokenEncoder<T>>;
        type BatchDecoder<T> = ParallelRayonDecoder<T, DictionaryDecoder<T>>;

        fn batch_encoder<T: TokenType>(encoder: DefaultTokenEncoder<T>) -> BatchEncoder<T> {
            ParallelRayonEncoder::new(encoder)
        }

        fn batch_decoder<T: TokenType>(decoder: DictionaryDecoder<T>) -> BatchDecoder<T> {
            ParallelRayonDecoder::new(decoder)
        }
    } else {
        type BatchEncoder<T> = DefaultTokenEncoder<T>;
        type BatchDecoder<T> = DictionaryDecoder<T>;

        fn batch_encoder<T: TokenType>(encoder: DefaultTokenEncoder<T>) -> BatchEncoder<T> {
            encoder
        }

        fn batch_decoder<T: TokenType>(decoder: DictionaryDecoder<T>) -> BatchDecoder<T> {
            decoder
        }
    }
}

/// A trained byte-level BPE tokenizer.
#[derive(Clone)]
pub struct Tokenizer<T: TokenType> {
    vocab: Arc<UnifiedVocab<T>>,
    encoder: BatchEncoder<T>,
    decoder: BatchDecoder<T>,
}

impl<T: TokenType> Tokenizer<T> {
    /// Build a tokenizer over a vocab.
    ///
    /// ## Arguments
    /// * `vocab` - The frozen vocab.
    ///
    /// ## Returns
    /// A new `Tokenizer`, or a pattern error.
    pub fn from_vocab<V: Into<Arc<UnifiedVocab<T>>>>(vocab: V) -> BPResult<Self> {
        let vocab = vocab.into();
        let encoder = DefaultTokenEncoder::init(vocab.clone())?;
        let decoder = DictionaryDecoder::from_vocab(&vocab);
        Ok(Self {
            vocab,
            encoder: batch_encoder(encoder),
            decoder: batch_decoder(decoder),
        })
    }

    /// Load a tokenizer from a directory; see [`load_tokenizer_dir`].
    pub fn load<P: AsRef<Path>>(dir: P) -> BPResult<Self> {
        Self::from_vocab(load_tokenizer_dir::<T, _>(dir)?)
    }

    /// Save the tokenizer to a directory; see [`save_tokenizer_dir`].
    pub fn save<P: AsRef<Path>>(
        &self,
        dir: P,
    ) -> BPResult<()> {
        save_tokenizer_dir(&self.vocab, dir)
    }

    /// The vocab.
    pub fn vocab(&self) -> &Arc<UnifiedVocab<T>> {
        &self.vocab
    }

    /// The special tokens.
    pub fn specials(&self) -> &SpecialTokens<T> {
        self.vocab.specials()
    }

    /// The encoder.
    pub fn encoder(&self) -> &impl TokenEncoder<T> {
        &self.encoder
    }

    /// The decoder.
    pub fn decoder(&self) -> &impl TokenDecoder<T> {
        &self.decoder
    }

    /// The number of tokens: specials, bytes and merges.
    pub fn vocab_size(&self) -> usize {
        self.vocab.vocab_size()
    }

    /// The token for a byte span, or the unknown token.
    pub fn token_to_id<B: AsRef<[u8]>>(
        &self,
        span: B,
    ) -> T {
        self.vocab.token_to_id(span.as_ref())
    }

    /// The bytes of a token, if defined.
    pub fn id_to_bytes(
        &self,
        token: T,
    ) -> Option<&[u8]> {
        self.vocab.id_to_bytes(token)
    }

    /// Encode text.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `add_special_tokens` - Wrap the tokens in `BOS` / `EOS`.
    pub fn encode<S: AsRef<str>>(
        &self,
        text: S,
        add_special_tokens: bool,
    ) -> Vec<T> {
        self.encoder.encode(text, add_special_tokens)
    }

    /// Encode a batch of texts.
    pub fn encode_batch<S: AsRef<str> + Sync>(
        &self,
        batch: &[S],
        add_special_tokens: bool,
    ) -> Vec<Vec<T>> {
        self.encoder.encode_batch(batch, add_special_tokens)
    }

    /// Decode tokens; never fails.
    ///
    /// ## Arguments
    /// * `tokens` - The tokens to decode.
    /// * `skip_special_tokens` - Drop special tokens instead of rendering their names.
    pub fn decode<S: AsRef<[T]>>(
        &self,
        tokens: S,
        skip_special_tokens: bool,
    ) -> String {
        self.decoder.decode_to_string(tokens, skip_special_tokens)
    }

    /// Decode a batch of token sequences.
    pub fn decode_batch<S: AsRef<[T]> + Sync>(
        &self,
        batch: &[S],
        skip_special_tokens: bool,
    ) -> Vec<String> {
        self.decoder
            .decode_batch_to_strings(batch, skip_special_tokens)
    }
}

/// Train a tokenizer on corpus files and save it to a directory.
///
/// The vocab size is checked before the corpus is read;
/// nothing is written unless training succeeds.
///
/// ## Arguments
/// * `corpus_paths` - UTF-8 text files.
/// * `output_dir` - Where to save the artifacts.
/// * `options` - The trainer options.
/// * `max_lines` - Read at most this many lines from each file; `Some(0)` is no cap.
///
/// ## Returns
/// The [`TrainResults`].
pub fn train_tokenizer_dir<T, P, Q>(
    corpus_paths: &[P],
    output_dir: Q,
    options: BpeTrainerOptions,
    max_lines: Option<usize>,
) -> BPResult<TrainResults<T>>
where
    T: TokenType,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let specials = SpecialTokens::default();
    try_training_vocab_size::<T>(options.vocab_size, specials.len() + U8_SIZE)?;

    let mut trainer = options.init::<compact_str::CompactString, u64>()?;
    for path in corpus_paths {
        let path = path.as_ref();
        log::info!("Reading corpus {}", path.display());
        let text = read_corpus(path, max_lines)?;
        trainer.update_from_text(text);
    }

    let results = trainer.train::<T>(specials)?;
    log::info!(
        "Trained vocab_size={} num_merges={}",
        results.vocab_size(),
        results.num_merges()
    );

    save_tokenizer_dir(&results.vocab, output_dir)?;
    Ok(results)
}

#[cfg(test)]
mod tests {
    use tempdir::TempDir;

    use super::*;
    use crate::encoders::testing::{COMMON_SAMPLES, common_encoder_test_vocab};

    #[test]
    fn test_tokenizer_round_trip() {
        type T = u32;
        let tokenizer = Tokenizer::<T>::from_vocab(common_encoder_test_vocab::<T>()).unwrap();

        for sample in COMMON_SAMPLES {
            let tokens = tokenizer.encode(sample, true);
            assert_eq!(tokens.first(), Some(&tokenizer.specials().bos()));
            assert_eq!(tokens.last(), Some(&tokenizer.specials().eos()));
            assert_eq!(&tokenizer.decode(&tokens, true), sample);
        }

        let batch = tokenizer.encode_batch(COMMON_SAMPLES, false);
        assert_eq!(tokenizer.decode_batch(&batch, true), COMMON_SAMPLES);
    }

    #[test]
    fn test_introspection() {
        type T = u16;
        let tokenizer = Tokenizer::<T>::from_vocab(common_encoder_test_vocab::<T>()).unwrap();

        assert_eq!(tokenizer.vocab_size(), tokenizer.vocab().vocab_size());
        assert_eq!(tokenizer.token_to_id(b"a"), 97 + 4);
        assert_eq!(tokenizer.token_to_id("<UNK>"), 1);
        assert_eq!(tokenizer.token_to_id("not a token at all"), 1);
        assert_eq!(tokenizer.id_to_bytes(97 + 4), Some(&b"a"[..]));
        assert_eq!(tokenizer.id_to_bytes(T::MAX), None);
    }

    #[test]
    fn test_save_load() {
        type T = u32;
        let tokenizer = Tokenizer::<T>::from_vocab(common_encoder_test_vocab::<T>()).unwrap();

        let dir = TempDir::new("tokenizer").unwrap();
        tokenizer.save(dir.path()).unwrap();

        let loaded = Tokenizer::<T>::load(dir.path()).unwrap();
        assert_eq!(loaded.vocab_size(), tokenizer.vocab_size());
        assert_eq!(loaded.vocab().merges(), tokenizer.vocab().merges());
        for sample in COMMON_SAMPLES {
            assert_eq!(
                loaded.encode(sample, true),
                tokenizer.encode(sample, true)
            );
        }
    }

    #[test]
    fn test_train_tokenizer_dir() {
        let dir = TempDir::new("train").unwrap();
        let corpus = dir.path().join("corpus.txt");
        std::fs::write(&corpus, "hello hello\nhello world\nignored line\n").unwrap();

        let output = dir.path().join("model");
        let results = train_tokenizer_dir::<u32, _, _>(
            &[&corpus],
            &output,
            BpeTrainerOptions::new(270),
            Some(2),
        )
        .unwrap();
        assert!(results.num_merges() > 0);

        let tokenizer = Tokenizer::<u32>::load(&output).unwrap();
        assert_eq!(tokenizer.vocab_size(), results.vocab_size());
        assert_eq!(tokenizer.encode(" hello", false).len(), 1);
    }

    #[test]
    fn test_train_too_small_writes_nothing() {
        let dir = TempDir::new("train").unwrap();
        let corpus = dir.path().join("corpus.txt");
        std::fs::write(&corpus, "hello world\n").unwrap();

        let output = dir.path().join("model");
        let result = train_tokenizer_dir::<u32, _, _>(
            &[&corpus],
            &output,
            BpeTrainerOptions::new(260),
            None,
        );
        assert!(result.is_err());
        assert!(!output.exists());
    }
}
