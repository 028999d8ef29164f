//! # Chunk Patterns

/// The default chunk pattern.
///
/// Alternatives, tried in order at each position:
/// * contraction suffixes (``'s``, ``'d``, ``'m``, ``'t``, ``'ll``, ``'re``, ``'ve``), case-insensitive;
/// * an optional space and a run of letters;
/// * an optional space and exactly one digit;
/// * an optional space, a run of non-space/letter/digit chars, and trailing line breaks;
/// * whitespace ending in a line break;
/// * whitespace not followed by non-whitespace;
/// * any whitespace run.
///
/// The negative lookahead requires `fancy_regex`.
pub const DEFAULT_CHUNK_PATTERN: &str = r"'(?i:[sdmt]|ll|ve|re)| ?\p{L}+| ?\p{N}| ?[^\s\p{L}\p{N}]+[\r\n]*|\s*[\r\n]|\s+(?!\S)|\s+";

/// [`DEFAULT_CHUNK_PATTERN`] without the lookahead alternative.
///
/// Used where the default pattern exceeds the `fancy_regex` backtrack
/// limit (very long runs); the two differ only on whitespace before a word.
pub const DEFAULT_FALLBACK_PATTERN: &str =
    r"'(?i:[sdmt]|ll|ve|re)| ?\p{L}+| ?\p{N}| ?[^\s\p{L}\p{N}]+[\r\n]*|\s*[\r\n]|\s+";
