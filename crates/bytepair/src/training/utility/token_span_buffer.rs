//! # Token Span Buffer

use core::hash::Hash;

use crate::{
    types::{Pair, TokenType},
    vocab::ByteMapVocab,
};

/// A mutable span of tokens (one distinct chunk).
///
/// Iteratively rewritten during BPE vocabulary training.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenSpanBuf<T: TokenType> {
    tokens: Vec<T>,
}

impl<T: TokenType> TokenSpanBuf<T> {
    const DEC: i32 = -1;
    const INC: i32 = 1;

    /// Create a new span buffer from tokens.
    pub fn from_tokens<S>(tokens: S) -> Self
    where
        S: AsRef<[T]>,
    {
        Self {
            tokens: tokens.as_ref().to_vec(),
        }
    }

    /// Create a new span buf from the UTF-8 bytes of a string.
    ///
    /// # Arguments
    /// * `text` - the text to translate to byte-level tokens.
    /// * `byte_vocab` - the translation for the byte tokens.
    pub fn from_string<S: AsRef<str>>(
        text: S,
        byte_vocab: &ByteMapVocab<T>,
    ) -> Self {
        let bytes = text.as_ref().as_bytes();
        let mut tokens = Vec::with_capacity(bytes.len());
        byte_vocab.append_tokens(bytes, &mut tokens);
        Self { tokens }
    }

    /// View the tokens as a slice.
    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    /// Get the length of the span.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Is this span empty?
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get an iterator over adjacent [`Pair<T>`] windows of this span.
    pub fn pairs(&self) -> impl Iterator<Item = Pair<T>> + '_ {
        self.tokens.windows(2).map(|w| (w[0], w[1]))
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement`, left to right.
    ///
    /// After a match at `i`, scanning resumes at ``i + 2``;
    /// so ``[a, a, a]`` with pair ``(a, a)`` becomes ``[r, a]``.
    ///
    /// # Arguments
    /// * `pair` - the pair to merge.
    /// * `replacement` - the token to replace `pair` with.
    /// * `on_merge` - called with each adjacent-pair delta:
    ///   `+1` for an added pair, `-1` for a removed pair.
    pub fn merge_pair_cb<F>(
        &mut self,
        pair: Pair<T>,
        replacement: T,
        on_merge: &mut F,
    ) where
        F: FnMut(Pair<T>, i32),
    {
        let (a, b) = pair;
        let n = self.tokens.len();
        if n < 2 {
            return;
        }

        let mut new_tokens: Vec<T> = Vec::with_capacity(n);

        let mut i = 0;
        while i < n {
            let current = self.tokens[i];

            if i + 1 < n && pair == (current, self.tokens[i + 1]) {
                // The left neighbor is already rewritten; it may be `replacement`.
                if let Some(&x) = new_tokens.last() {
                    on_merge((x, a), Self::DEC);
                    on_merge((x, replacement), Self::INC);
                }

                on_merge(pair, Self::DEC);

                if i + 2 < n {
                    let y = self.tokens[i + 2];
                    on_merge((b, y), Self::DEC);
                    on_merge((replacement, y), Self::INC);
                }

                new_tokens.push(replacement);
                i += 2;
            } else {
                new_tokens.push(current);
                i += 1;
            }
        }

        self.tokens = new_tokens;
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement`.
    ///
    /// # Returns
    /// The pair count deltas for this span; see [`Self::merge_pair_cb`].
    pub fn merge_pair(
        &mut self,
        pair: Pair<T>,
        replacement: T,
    ) -> Vec<(Pair<T>, i32)> {
        let mut deltas: Vec<(Pair<T>, i32)> = Vec::with_capacity(6);
        self.merge_pair_cb(pair, replacement, &mut |p, d| deltas.push((p, d)));
        deltas
    }
}
