//! # Ranked Merge Table

use crate::{
    errors::{BPError, BPResult},
    types::{Pair, TokenType},
    vocab::PairRankMap,
};

/// A learned merge: ``pair -> token``.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MergeRule<T: TokenType> {
    /// The ``(left, right)`` pair.
    pub pair: Pair<T>,

    /// The token the pair is replaced with.
    pub token: T,
}

impl<T: TokenType> MergeRule<T> {
    /// Construct a rule.
    pub fn new(
        pair: Pair<T>,
        token: T,
    ) -> Self {
        Self { pair, token }
    }
}

/// Ordered merge rules, with a ``pair -> (rank, token)`` index.
///
/// The rank of a rule is its position; lower ranks are applied first.
#[derive(Debug, Clone)]
pub struct MergeTable<T: TokenType> {
    rules: Vec<MergeRule<T>>,
    pair_ranks: PairRankMap<T>,
}

impl<T: TokenType> Default for MergeTable<T> {
    fn default() -> Self {
        Self {
            rules: Vec::new(),
            pair_ranks: PairRankMap::default(),
        }
    }
}

impl<T: TokenType> PartialEq for MergeTable<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.rules == other.rules
    }
}

impl<T: TokenType> MergeTable<T> {
    /// Build a table from rules in rank order.
    ///
    /// ## Returns
    /// The table, or `VocabConflict` on a repeated pair.
    pub fn from_rules<I>(rules: I) -> BPResult<Self>
    where
        I: IntoIterator<Item = MergeRule<T>>,
    {
        let mut table = Self::default();
        for rule in rules {
            table.push(rule)?;
        }
        table.shrink_to_fit();
        Ok(table)
    }

    /// Append a rule with the next rank.
    ///
    /// ## Returns
    /// The rank of the rule, or `VocabConflict` on a repeated pair.
    pub fn push(
        &mut self,
        rule: MergeRule<T>,
    ) -> BPResult<usize> {
        let rank = self.rules.len();
        if self.pair_ranks.contains_key(&rule.pair) {
            return Err(BPError::VocabConflict(format!(
                "duplicate merge pair: {:?}",
                rule.pair
            )));
        }
        self.pair_ranks.insert(rule.pair, (rank, rule.token));
        self.rules.push(rule);
        Ok(rank)
    }

    /// Reduce the capacity of the internal buffers.
    pub fn shrink_to_fit(&mut self) {
        self.rules.shrink_to_fit();
        self.pair_ranks.shrink_to_fit();
    }

    /// The number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Is the table empty?
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules, in rank order.
    pub fn rules(&self) -> &[MergeRule<T>] {
        &self.rules
    }

    /// Look up ``(rank, token)`` for a pair.
    #[inline(always)]
    pub fn lookup(
        &self,
        pair: &Pair<T>,
    ) -> Option<(usize, T)> {
        self.pair_ranks.get(pair).copied()
    }
}
