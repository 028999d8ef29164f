//! # Regex Wrapper

use core::{fmt::Debug, ops::Range};

/// Error wrapper for regex patterns.
#[non_exhaustive]
#[derive(Clone, Debug)]
pub enum ErrorWrapper {
    /// Error from `regex`.
    Basic(Box<regex::Error>),

    /// Error from `fancy_regex`.
    Fancy(Box<fancy_regex::Error>),
}

impl From<regex::Error> for ErrorWrapper {
    fn from(err: regex::Error) -> Self {
        Self::Basic(err.into())
    }
}

impl From<fancy_regex::Error> for ErrorWrapper {
    fn from(err: fancy_regex::Error) -> Self {
        Self::Fancy(err.into())
    }
}

impl core::fmt::Display for ErrorWrapper {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::Basic(err) => core::fmt::Display::fmt(err, f),
            Self::Fancy(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl core::error::Error for ErrorWrapper {}

/// Wrapper for compiled regex patterns.
#[derive(Debug, Clone)]
pub enum RegexWrapper {
    /// Wrapper for `regex::Regex`.
    Basic(regex::Regex),

    /// Wrapper for `fancy_regex::Regex`.
    Fancy(fancy_regex::Regex),
}

impl PartialEq for RegexWrapper {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        match (self, other) {
            (Self::Basic(a), Self::Basic(b)) => a.as_str() == b.as_str(),
            (Self::Fancy(a), Self::Fancy(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl From<regex::Regex> for RegexWrapper {
    fn from(regex: regex::Regex) -> Self {
        Self::Basic(regex)
    }
}

impl From<fancy_regex::Regex> for RegexWrapper {
    fn from(regex: fancy_regex::Regex) -> Self {
        Self::Fancy(regex)
    }
}

impl RegexWrapper {
    /// Is this `Basic`?
    pub fn is_basic(&self) -> bool {
        matches!(self, Self::Basic(_))
    }

    /// Is this `Fancy`?
    pub fn is_fancy(&self) -> bool {
        matches!(self, Self::Fancy(_))
    }

    /// Get the underlying regex pattern.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(regex) => regex.as_str(),
            Self::Fancy(regex) => regex.as_str(),
        }
    }

    /// Iterate over the byte ranges of non-overlapping matches.
    ///
    /// `fancy_regex` runtime errors (backtrack limits) end the iteration;
    /// callers treat the unmatched remainder as a gap.
    pub fn find_ranges<'r, 'h>(
        &'r self,
        haystack: &'h str,
    ) -> MatchRanges<'r, 'h> {
        self.find_ranges_with_fallback(haystack, None)
    }

    /// Iterate over match ranges, recovering from `fancy_regex` runtime errors.
    ///
    /// When a match attempt aborts, the next match is taken from `fallback`
    /// at the same position and scanning resumes after it.
    ///
    /// ## Arguments
    /// * `haystack` - The text to scan.
    /// * `fallback` - A backtracking-free approximation of this pattern.
    pub fn find_ranges_with_fallback<'r, 'h>(
        &'r self,
        haystack: &'h str,
        fallback: Option<&'r regex::Regex>,
    ) -> MatchRanges<'r, 'h> {
        match self {
            Self::Basic(regex) => MatchRanges::Basic(regex.find_iter(haystack)),
            Self::Fancy(regex) => MatchRanges::Fancy {
                regex,
                fallback,
                haystack,
                pos: 0,
            },
        }
    }
}

/// Iterator over match ranges of a [`RegexWrapper`].
pub enum MatchRanges<'r, 'h> {
    /// Matches from `regex`.
    Basic(regex::Matches<'r, 'h>),

    /// Matches from `fancy_regex`, resumable after an aborted attempt.
    Fancy {
        /// The pattern.
        regex: &'r fancy_regex::Regex,

        /// Used at positions where `regex` aborts.
        fallback: Option<&'r regex::Regex>,

        /// The text.
        haystack: &'h str,

        /// Where the next search starts; past the end when done.
        pos: usize,
    },
}

impl Iterator for MatchRanges<'_, '_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Basic(matches) => matches.next().map(|m| m.range()),
            Self::Fancy {
                regex,
                fallback,
                haystack,
                pos,
            } => {
                if *pos > haystack.len() {
                    return None;
                }

                let found = match regex.find_from_pos(haystack, *pos) {
                    Ok(found) => found.map(|m| m.range()),
                    Err(err) => match fallback {
                        Some(fallback) => {
                            log::debug!("regex match aborted at {pos}, using fallback: {err}");
                            fallback.find_at(haystack, *pos).map(|m| m.range())
                        }
                        None => {
                            log::warn!("regex match aborted at {pos}: {err}");
                            None
                        }
                    },
                };

                let Some(range) = found else {
                    *pos = haystack.len() + 1;
                    return None;
                };

                // Step past empty matches by one char.
                *pos = if range.is_empty() {
                    range.end
                        + haystack[range.end..]
                            .chars()
                            .next()
                            .map_or(1, char::len_utf8)
                } else {
                    range.end
                };
                Some(range)
            }
        }
    }
}
