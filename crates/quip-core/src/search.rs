//! Search: regular-expression matching over document rows.
//!
//! A [`SearchExpression`] is a compiled pattern. [`Document::matches`] runs
//! it over every row independently, so a match never spans a newline, and
//! turns every match into selections:
//!
//! - one for the whole match, then one per capture group that participated,
//!   in group order;
//! - a non-empty capture becomes the inclusive range of its characters;
//! - an empty capture becomes a point at its start.
//!
//! The regex engine reports byte offsets; they are converted to char
//! columns here.
//!
//! [`Document::matches`]: crate::Document::matches

use std::fmt;

use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::location::Location;
use crate::selection::Selection;

// ---------------------------------------------------------------------------
// SearchExpression
// ---------------------------------------------------------------------------

/// A compiled search pattern.
#[derive(Clone)]
pub struct SearchExpression {
    regex: Regex,
}

impl SearchExpression {
    /// Compile `pattern`.
    ///
    /// # Errors
    ///
    /// [`Error::Pattern`] when the pattern does not compile.
    pub fn new(pattern: &str) -> Result<Self> {
        match Regex::new(pattern) {
            Ok(regex) => Ok(Self { regex }),
            Err(err) => {
                debug!(pattern, error = %err, "rejected search pattern");
                Err(Error::Pattern {
                    pattern: pattern.to_owned(),
                    message: err.to_string(),
                })
            }
        }
    }

    /// The source pattern.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Number of capture groups, the whole match included.
    #[inline]
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.regex.captures_len()
    }

    /// Append the selections for every match in `text`, which is row `row`.
    pub(crate) fn collect_row(&self, row: usize, text: &str, out: &mut Vec<Selection>) {
        for captures in self.regex.captures_iter(text) {
            for group in captures.iter().flatten() {
                let start = byte_to_column(text, group.start());
                let selection = if group.is_empty() {
                    Selection::point(Location::new(start, row))
                } else {
                    let end = byte_to_column(text, group.end());
                    Selection::new(Location::new(start, row), Location::new(end - 1, row))
                };
                out.push(selection);
            }
        }
    }
}

impl fmt::Debug for SearchExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SearchExpression").field(&self.as_str()).finish()
    }
}

impl std::str::FromStr for SearchExpression {
    type Err = Error;

    fn from_str(pattern: &str) -> Result<Self> {
        Self::new(pattern)
    }
}

/// Char column of a byte offset that lies on a char boundary.
fn byte_to_column(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn run(pattern: &str, text: &str) -> Vec<Selection> {
        let mut out = Vec::new();
        SearchExpression::new(pattern)
            .unwrap()
            .collect_row(0, text, &mut out);
        out
    }

    fn sel(start: usize, end: usize) -> Selection {
        Selection::new(Location::new(start, 0), Location::new(end, 0))
    }

    // -- Compilation --------------------------------------------------------

    #[test]
    fn invalid_pattern_is_error() {
        let err = SearchExpression::new("(unclosed").unwrap_err();
        assert!(matches!(err, Error::Pattern { ref pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn as_str_and_group_count() {
        let expr: SearchExpression = r"(a)(b)?".parse().unwrap();
        assert_eq!(expr.as_str(), "(a)(b)?");
        assert_eq!(expr.group_count(), 3);
    }

    // -- Matching -----------------------------------------------------------

    #[test]
    fn every_match_in_row() {
        assert_eq!(run("o+", "foo boo o"), vec![sel(1, 2), sel(5, 6), sel(8, 8)]);
    }

    #[test]
    fn groups_follow_whole_match() {
        assert_eq!(run(r"(\d)-(\d)", "x 1-2"), vec![sel(2, 4), sel(2, 2), sel(4, 4)]);
    }

    #[test]
    fn non_participating_group_skipped() {
        assert_eq!(run(r"a(x)?b", "ab"), vec![sel(0, 1)]);
    }

    #[test]
    fn empty_match_is_point() {
        let found = run("^", "abc");
        assert_eq!(found, vec![Selection::point(Location::new(0, 0))]);
    }

    #[test]
    fn empty_match_at_row_end_is_newline_slot() {
        let found = run("$", "abc");
        assert_eq!(found, vec![Selection::point(Location::new(3, 0))]);
    }

    #[test]
    fn columns_are_chars_not_bytes() {
        assert_eq!(run("ü+", "grüüße"), vec![sel(2, 3)]);
    }

    #[test]
    fn rows_are_labelled() {
        let mut out = Vec::new();
        SearchExpression::new("b")
            .unwrap()
            .collect_row(7, "abc", &mut out);
        assert_eq!(out, vec![Selection::point(Location::new(1, 7))]);
    }
}
