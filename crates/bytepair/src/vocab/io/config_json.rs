//! # ``config.json`` IO

use core::fmt;
use std::io::{Read, Write};

use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
    de::{MapAccess, Visitor},
};

use crate::{
    errors::{BPError, BPResult},
    segmentation::SegmentationConfig,
    types::TokenType,
    vocab::{SpecialTokens, UnifiedVocab},
};

/// Ordered ``{ name -> token }`` special token entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecialTokenEntries(pub Vec<(String, u64)>);

impl Serialize for SpecialTokenEntries {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.0.iter().map(|(name, id)| (name, id)))
    }
}

impl<'de> Deserialize<'de> for SpecialTokenEntries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SpecialTokenEntries;

            fn expecting(
                &self,
                f: &mut fmt::Formatter,
            ) -> fmt::Result {
                f.write_str("a map of special token names to ids")
            }

            fn visit_map<A>(
                self,
                mut map: A,
            ) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(4));
                while let Some((name, id)) = map.next_entry::<String, u64>()? {
                    entries.push((name, id));
                }
                Ok(SpecialTokenEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// The persisted tokenizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenizerConfig {
    /// The number of tokens in ``vocab.json``.
    pub vocab_size: usize,

    /// The number of rules in ``merges.txt``.
    pub num_merges: usize,

    /// ``{ name -> token }`` for the special tokens.
    pub special_tokens: SpecialTokenEntries,

    /// The size of the special + byte vocab.
    pub base_vocab_size: usize,

    /// The chunk pattern, when it differs from the default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl TokenizerConfig {
    /// Describe a vocab.
    pub fn from_vocab<T: TokenType>(vocab: &UnifiedVocab<T>) -> Self {
        let segmentation = vocab.segmentation();
        Self {
            vocab_size: vocab.vocab_size(),
            num_merges: vocab.num_merges(),
            special_tokens: SpecialTokenEntries(
                vocab
                    .specials()
                    .iter()
                    .map(|(name, token)| (name.to_string(), token.to_u64().unwrap_or(u64::MAX)))
                    .collect(),
            ),
            base_vocab_size: vocab.base_vocab_size(),
            pattern: if segmentation.is_default_pattern() {
                None
            } else {
                Some(segmentation.pattern().as_str().to_string())
            },
        }
    }

    /// Build the [`SpecialTokens`] described by this config.
    pub fn special_tokens<T: TokenType>(&self) -> BPResult<SpecialTokens<T>> {
        let words = self
            .special_tokens
            .0
            .iter()
            .map(|(name, id)| {
                T::from_u64(*id)
                    .map(|token| (name.as_str(), token))
                    .ok_or(BPError::VocabSizeOverflow {
                        size: id.saturating_add(1) as usize,
                    })
            })
            .collect::<BPResult<Vec<_>>>()?;

        SpecialTokens::from_words(words)
    }

    /// Build the [`SegmentationConfig`] described by this config.
    pub fn segmentation(&self) -> SegmentationConfig {
        match &self.pattern {
            Some(pattern) => SegmentationConfig::from_pattern(pattern),
            None => SegmentationConfig::default(),
        }
    }
}

/// Write ``config.json``.
pub fn write_config_json<W: Write>(
    config: &TokenizerConfig,
    writer: W,
) -> BPResult<()> {
    serde_json::to_writer_pretty(writer, config)?;
    Ok(())
}

/// Read ``config.json``.
pub fn read_config_json<R: Read>(reader: R) -> BPResult<TokenizerConfig> {
    Ok(serde_json::from_reader(reader)?)
}
