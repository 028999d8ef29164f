//! # ``vocab.json`` IO
//!
//! A JSON object ``{ key -> token }``, written in token order.
//!
//! Keys render symbol bytes one char per byte (``U+0000..=U+00FF``);
//! special tokens are keyed by their names. When two tokens render
//! to the same key, the lower token keeps it.

use std::{
    collections::BTreeMap,
    io::{Read, Write},
};

use serde::{Serialize, Serializer};

use crate::{
    errors::{BPError, BPResult},
    support::strings::{latin1_bytes, latin1_string},
    types::{BPHashSet, TokenType},
    vocab::UnifiedVocab,
};

/// Ordered ``(key, token)`` entries, serialized as a JSON object.
struct VocabEntries<T: TokenType>(Vec<(String, T)>);

impl<T: TokenType> Serialize for VocabEntries<T> {
    fn serialize<S>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(key, token)| (key.as_str(), token.to_u64().unwrap_or(u64::MAX))),
        )
    }
}

/// Render the ``vocab.json`` entries of a vocab, in token order.
pub fn vocab_json_entries<T: TokenType>(vocab: &UnifiedVocab<T>) -> Vec<(String, T)> {
    let specials = vocab.specials();
    let mut seen: BPHashSet<String> = BPHashSet::with_capacity(vocab.vocab_size());
    let mut entries = Vec::with_capacity(vocab.vocab_size());

    for (token, span) in vocab.sorted_token_spans() {
        let key = match specials.lookup_name(token) {
            Some(name) => name.to_string(),
            None => latin1_string(span),
        };
        if seen.insert(key.clone()) {
            entries.push((key, token));
        } else {
            log::debug!("vocab.json: key {key:?} already taken; omitting token {token}");
        }
    }

    entries
}

/// Write ``vocab.json``.
///
/// ## Arguments
/// * `vocab` - The vocab to write.
/// * `writer` - The target writer.
pub fn write_vocab_json<T, W>(
    vocab: &UnifiedVocab<T>,
    writer: W,
) -> BPResult<()>
where
    T: TokenType,
    W: Write,
{
    serde_json::to_writer_pretty(writer, &VocabEntries(vocab_json_entries(vocab)))?;
    Ok(())
}

/// Decode a ``vocab.json`` key to symbol bytes.
///
/// Keys with chars above ``U+00FF`` are not one-char-per-byte renderings;
/// they fall back to their UTF-8 bytes.
pub fn vocab_key_bytes(key: &str) -> Vec<u8> {
    latin1_bytes(key).unwrap_or_else(|| key.as_bytes().to_vec())
}

/// Read ``vocab.json``.
///
/// ## Returns
/// ``(token, bytes)`` entries, in token order.
pub fn read_vocab_json<T, R>(reader: R) -> BPResult<Vec<(T, Vec<u8>)>>
where
    T: TokenType,
    R: Read,
{
    let raw: BTreeMap<String, u64> = serde_json::from_reader(reader)?;

    let mut entries = raw
        .into_iter()
        .map(|(key, id)| {
            T::from_u64(id)
                .map(|token| (token, vocab_key_bytes(&key)))
                .ok_or(BPError::VocabSizeOverflow {
                    size: id.saturating_add(1) as usize,
                })
        })
        .collect::<BPResult<Vec<_>>>()?;
    entries.sort_by_key(|(token, _)| *token);

    Ok(entries)
}
