//! # Tokenizer Directory IO

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use crate::{
    errors::{BPError, BPResult},
    types::{BPHashSet, TokenType},
    vocab::{
        MergeRule,
        MergeTable,
        SpecialTokens,
        UnifiedVocab,
        io::{
            config_json::{TokenizerConfig, read_config_json, write_config_json},
            merges_text::{read_merges_text, write_merges_text},
            vocab_json::{read_vocab_json, write_vocab_json},
        },
        validators::U8_SIZE,
    },
};

/// Vocab artifact file name.
pub const VOCAB_FILE: &str = "vocab.json";

/// Merges artifact file name.
pub const MERGES_FILE: &str = "merges.txt";

/// Config artifact file name.
pub const CONFIG_FILE: &str = "config.json";

/// Save a vocab as ``vocab.json``, ``merges.txt`` and ``config.json``.
///
/// ## Arguments
/// * `vocab` - The vocab to save.
/// * `dir` - The target directory; created if missing.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(vocab, dir)))]
pub fn save_tokenizer_dir<T, P>(
    vocab: &UnifiedVocab<T>,
    dir: P,
) -> BPResult<()>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let path = dir.join(VOCAB_FILE);
    log::debug!("writing {}", path.display());
    write_vocab_json(vocab, BufWriter::new(File::create(&path)?))?;

    let path = dir.join(MERGES_FILE);
    log::debug!("writing {}", path.display());
    write_merges_text(vocab.merges(), BufWriter::new(File::create(&path)?))?;

    let path = dir.join(CONFIG_FILE);
    log::debug!("writing {}", path.display());
    write_config_json(
        &TokenizerConfig::from_vocab(vocab),
        BufWriter::new(File::create(&path)?),
    )?;

    Ok(())
}

/// Keep the rules that extend the vocab in order.
///
/// A rule is skipped, with a warning, when a parent is undefined or
/// special, its pair repeats, or its token is already defined.
pub fn filter_merge_rules<T, I>(
    specials: &SpecialTokens<T>,
    rules: I,
) -> MergeTable<T>
where
    T: TokenType,
    I: IntoIterator<Item = MergeRule<T>>,
{
    let base = specials.len() + U8_SIZE;
    let is_base = |t: T| t.to_usize().is_some_and(|t| t < base);

    let mut defined: BPHashSet<T> = BPHashSet::default();
    let mut table = MergeTable::default();

    for rule in rules {
        let (a, b) = rule.pair;
        let parent_ok = |t: T| !specials.contains_token(t) && (is_base(t) || defined.contains(&t));

        if !parent_ok(a) || !parent_ok(b) {
            log::warn!("skipping merge {rule:?}: undefined parent");
            continue;
        }
        if is_base(rule.token) || defined.contains(&rule.token) {
            log::warn!("skipping merge {rule:?}: token already defined");
            continue;
        }
        if table.push(rule).is_err() {
            log::warn!("skipping merge {rule:?}: duplicate pair");
            continue;
        }
        defined.insert(rule.token);
    }

    table.shrink_to_fit();
    table
}

/// Load a vocab saved by [`save_tokenizer_dir`].
///
/// Merge tokens are rebuilt from ``merges.txt``; ``vocab.json`` contributes
/// the tokens that no rule defines, and disagreements are logged.
///
/// ## Arguments
/// * `dir` - The directory holding the three artifacts.
///
/// ## Returns
/// The loaded vocab, or an IO/parse/conflict error.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(dir)))]
pub fn load_tokenizer_dir<T, P>(dir: P) -> BPResult<UnifiedVocab<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let dir = dir.as_ref();

    let path = dir.join(CONFIG_FILE);
    log::debug!("reading {}", path.display());
    let config = read_config_json(BufReader::new(File::open(&path)?))?;

    let specials: SpecialTokens<T> = config.special_tokens()?;
    if config.base_vocab_size != specials.len() + U8_SIZE {
        return Err(BPError::VocabConflict(format!(
            "base_vocab_size {} does not match {} special tokens + {U8_SIZE} bytes",
            config.base_vocab_size,
            specials.len()
        )));
    }

    let path = dir.join(MERGES_FILE);
    log::debug!("reading {}", path.display());
    let rules = read_merges_text::<T, _>(BufReader::new(File::open(&path)?))?;
    let merges = filter_merge_rules(&specials, rules);

    let vocab = UnifiedVocab::init(config.segmentation(), specials, merges)?;

    let path = dir.join(VOCAB_FILE);
    log::debug!("reading {}", path.display());
    let entries = read_vocab_json::<T, _>(BufReader::new(File::open(&path)?))?;

    let mut extras = Vec::new();
    for (token, span) in entries {
        match vocab.id_to_bytes(token) {
            Some(expected) if expected != span.as_slice() => {
                log::warn!("vocab.json: token {token} disagrees with merges.txt; using merges.txt");
            }
            Some(_) => (),
            None => extras.push((token, span)),
        }
    }
    if !extras.is_empty() {
        log::warn!(
            "vocab.json: {} tokens are not defined by merges.txt; keeping them for decoding",
            extras.len()
        );
    }
    let vocab = vocab.with_extra_spans(extras);

    if config.vocab_size != vocab.vocab_size() {
        log::warn!(
            "config.json: vocab_size {} != loaded vocab size {}",
            config.vocab_size,
            vocab.vocab_size()
        );
    }
    if config.num_merges != vocab.num_merges() {
        log::warn!(
            "config.json: num_merges {} != loaded merges {}",
            config.num_merges,
            vocab.num_merges()
        );
    }

    Ok(vocab)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_merge_rules() {
        let specials: SpecialTokens<u32> = Default::default();
        let table = filter_merge_rules(
            &specials,
            [
                MergeRule::new((108, 105), 260),
                // undefined parent
                MergeRule::new((300, 105), 261),
                // special parent
                MergeRule::new((1, 105), 261),
                // byte token reuse
                MergeRule::new((105, 105), 100),
                // duplicate pair
                MergeRule::new((108, 105), 262),
                // token reuse
                MergeRule::new((112, 112), 260),
                MergeRule::new((260, 112), 261),
            ],
        );

        assert_eq!(
            table.rules(),
            &[
                MergeRule::new((108, 105), 260),
                MergeRule::new((260, 112), 261),
            ]
        );
    }
}
