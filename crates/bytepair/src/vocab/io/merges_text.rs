//! # ``merges.txt`` IO
//!
//! One ``left right new`` rule per line; line order is rank order.

use std::io::{BufRead, Write};

use crate::{
    errors::BPResult,
    types::TokenType,
    vocab::{MergeRule, MergeTable},
};

/// Write ``merges.txt``.
pub fn write_merges_text<T, W>(
    merges: &MergeTable<T>,
    mut writer: W,
) -> BPResult<()>
where
    T: TokenType,
    W: Write,
{
    for rule in merges.rules() {
        let (a, b) = rule.pair;
        writeln!(writer, "{a} {b} {}", rule.token)?;
    }
    writer.flush()?;
    Ok(())
}

/// Parse one ``merges.txt`` record.
///
/// ## Returns
/// `None` unless the line is exactly three integers that fit `T`.
pub fn parse_merge_line<T: TokenType>(line: &str) -> Option<MergeRule<T>> {
    let mut parts = line.split_whitespace();
    let mut next = || parts.next().and_then(|p| p.parse::<u64>().ok()).and_then(T::from_u64);

    let rule = MergeRule::new((next()?, next()?), next()?);
    if parts.next().is_some() {
        return None;
    }
    Some(rule)
}

/// Read ``merges.txt``.
///
/// Blank lines are ignored; malformed records are skipped with a warning.
///
/// ## Returns
/// The parsed rules, in file order.
pub fn read_merges_text<T, R>(reader: R) -> BPResult<Vec<MergeRule<T>>>
where
    T: TokenType,
    R: BufRead,
{
    let mut rules = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_merge_line(&line) {
            Some(rule) => rules.push(rule),
            None => log::warn!("merges.txt:{}: skipping malformed record {line:?}", idx + 1),
        }
    }
    Ok(rules)
}
