//! # Corpus Reading

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::errors::BPResult;

/// Read a text corpus, keeping line terminators.
///
/// ## Arguments
/// * `reader` - The source.
/// * `max_lines` - Stop after this many lines, if set; `Some(0)` is no cap.
pub fn read_corpus_from<R: BufRead>(
    mut reader: R,
    max_lines: Option<usize>,
) -> BPResult<String> {
    let max_lines = max_lines.filter(|&max| max > 0);
    let mut text = String::new();
    let mut lines = 0;
    while max_lines.is_none_or(|max| lines < max) {
        if reader.read_line(&mut text)? == 0 {
            break;
        }
        lines += 1;
    }
    Ok(text)
}

/// Read a UTF-8 corpus file; see [`read_corpus_from`].
pub fn read_corpus<P: AsRef<Path>>(
    path: P,
    max_lines: Option<usize>,
) -> BPResult<String> {
    read_corpus_from(BufReader::new(File::open(path)?), max_lines)
}
