//! # Special Token Vocabulary

use crate::{
    errors::{BPError, BPResult},
    types::{BPHashSet, TokenType},
};

/// Padding token name.
pub const PAD_TOKEN: &str = "<PAD>";

/// Unknown token name.
pub const UNK_TOKEN: &str = "<UNK>";

/// Beginning-of-sequence token name.
pub const BOS_TOKEN: &str = "<BOS>";

/// End-of-sequence token name.
pub const EOS_TOKEN: &str = "<EOS>";

/// The required special token names, in default id order.
pub const DEFAULT_SPECIAL_TOKENS: [&str; 4] = [PAD_TOKEN, UNK_TOKEN, BOS_TOKEN, EOS_TOKEN];

/// Special token vocabulary.
///
/// Special tokens occupy the dense ids ``0..len()``; they are never
/// produced by segmentation or merges. The four names of
/// [`DEFAULT_SPECIAL_TOKENS`] are always present.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecialTokens<T: TokenType> {
    /// ``(name, token)`` in token order.
    words: Vec<(String, T)>,

    pad: T,
    unk: T,
    bos: T,
    eos: T,
}

impl<T: TokenType> Default for SpecialTokens<T> {
    fn default() -> Self {
        let words = DEFAULT_SPECIAL_TOKENS
            .iter()
            .enumerate()
            .map(|(i, name)| (name.to_string(), T::from_usize(i).unwrap_or_default()))
            .collect::<Vec<_>>();

        Self {
            pad: words[0].1,
            unk: words[1].1,
            bos: words[2].1,
            eos: words[3].1,
            words,
        }
    }
}

impl<T: TokenType> SpecialTokens<T> {
    /// Build special tokens from ``(name, token)`` pairs.
    ///
    /// ## Arguments
    /// * `words` - The names and ids; in any order.
    ///
    /// ## Returns
    /// The `SpecialTokens`, or a `VocabConflict` error if:
    /// * a name or id is repeated,
    /// * the ids are not exactly ``0..n``,
    /// * a required name is missing.
    pub fn from_words<I, S>(words: I) -> BPResult<Self>
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
    {
        let mut words: Vec<(String, T)> = words
            .into_iter()
            .map(|(name, token)| (name.as_ref().to_string(), token))
            .collect();
        words.sort_by_key(|(_, token)| *token);

        let mut names: BPHashSet<&str> = BPHashSet::with_capacity(words.len());
        for (idx, (name, token)) in words.iter().enumerate() {
            if !names.insert(name.as_str()) {
                return Err(BPError::VocabConflict(format!(
                    "duplicate special token name: {name:?}"
                )));
            }
            if token.to_usize() != Some(idx) {
                return Err(BPError::VocabConflict(format!(
                    "special token ids must be dense from 0; {name:?} has id {token}"
                )));
            }
        }

        let find = |name: &str| -> BPResult<T> {
            words
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, t)| *t)
                .ok_or_else(|| BPError::VocabConflict(format!("missing special token: {name:?}")))
        };

        Ok(Self {
            pad: find(PAD_TOKEN)?,
            unk: find(UNK_TOKEN)?,
            bos: find(BOS_TOKEN)?,
            eos: find(EOS_TOKEN)?,
            words,
        })
    }

    /// The number of special tokens.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Is this empty? (never, once constructed)
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The padding token.
    pub fn pad(&self) -> T {
        self.pad
    }

    /// The unknown token.
    pub fn unk(&self) -> T {
        self.unk
    }

    /// The beginning-of-sequence token.
    pub fn bos(&self) -> T {
        self.bos
    }

    /// The end-of-sequence token.
    pub fn eos(&self) -> T {
        self.eos
    }

    /// Iterate over ``(name, token)`` in token order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, T)> + '_ {
        self.words.iter().map(|(name, token)| (name.as_str(), *token))
    }

    /// Look up the token of a special name.
    pub fn lookup_token(
        &self,
        name: &str,
    ) -> Option<T> {
        self.iter().find(|(n, _)| *n == name).map(|(_, t)| t)
    }

    /// Look up the name of a special token.
    pub fn lookup_name(
        &self,
        token: T,
    ) -> Option<&str> {
        token
            .to_usize()
            .and_then(|idx| self.words.get(idx))
            .map(|(name, _)| name.as_str())
    }

    /// Is `token` a special token?
    #[inline(always)]
    pub fn contains_token(
        &self,
        token: T,
    ) -> bool {
        token.to_usize().is_some_and(|idx| idx < self.words.len())
    }

    /// The first id after the special tokens.
    ///
    /// This is where the byte tokens start.
    pub fn byte_offset(&self) -> usize {
        self.words.len()
    }
}
