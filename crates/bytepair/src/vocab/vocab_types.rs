//! # Vocabulary Types

use crate::types::{BPHashMap, Pair};

/// `{ Pair<T> -> (rank, T) }` map.
///
/// ## Style Hints
/// Instance names should prefer `pair_ranks`, or `pair_rank_map`.
pub type PairRankMap<T> = BPHashMap<Pair<T>, (usize, T)>;

/// `{ Vec<u8> -> T }` map.
///
/// ## Style Hints
/// Instance names should prefer `span_tokens`, or `span_token_map`.
pub type SpanTokenMap<T> = BPHashMap<Vec<u8>, T>;

/// `{ T -> Vec<u8> }` map.
///
/// ## Style Hints
/// Instance names should prefer `token_spans`, or `token_span_map`.
pub type TokenSpanMap<T> = BPHashMap<T, Vec<u8>>;

/// `[T; 256]` array.
///
/// ## Style Hints
/// Instance names should prefer `byte_tokens`, or `byte_token_array`.
pub type ByteTokenArray<T> = [T; 256];
