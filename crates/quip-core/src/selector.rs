//! Selectors: compute a new selection from a basis selection.
//!
//! Every selector takes the document and a basis and answers with
//! `Ok(Some(selection))`, or `Ok(None)` when there is nothing sensible to
//! select (an empty document, or a word scan that ran off the document).
//! `Err` is reserved for a basis that does not address the document.
//!
//! Word selectors absorb a run of trailing non-newline whitespace after the
//! word, so repeated "next word" commands step cleanly from word to word.
//! Line selectors never include the row's newline.

use crate::document::Document;
use crate::error::Result;
use crate::iterator::{DocumentIterator, Traversal};
use crate::location::Location;
use crate::selection::Selection;

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

/// Letters and digits, in any script.
#[inline]
#[must_use]
pub fn is_word_character(c: char) -> bool {
    c.is_alphanumeric()
}

/// Whitespace that does not end a row.
#[inline]
#[must_use]
pub fn is_whitespace_except_newline(c: char) -> bool {
    c.is_whitespace() && c != '\n'
}

fn is_not_word_character(c: char) -> bool {
    !is_word_character(c)
}

// ---------------------------------------------------------------------------
// Word selectors
// ---------------------------------------------------------------------------

/// The word around the basis origin, plus trailing whitespace.
///
/// Starting on a non-word character selects just that character (and any
/// whitespace after it).
///
/// # Errors
///
/// Out-of-range errors if the basis does not address the document.
pub fn select_this_word(document: &Document, basis: &Selection) -> Result<Option<Selection>> {
    check_basis(document, basis)?;
    if document.is_empty() {
        return Ok(None);
    }
    Ok(Some(word_at(document, basis.origin())))
}

/// The first word after the basis extent.
///
/// # Errors
///
/// Out-of-range errors if the basis does not address the document.
pub fn select_next_word(document: &Document, basis: &Selection) -> Result<Option<Selection>> {
    check_basis(document, basis)?;
    if document.is_empty() {
        return Ok(None);
    }
    Ok(adjacent_word(
        &Traversal::document_order(document),
        DocumentIterator::new(document, basis.extent()),
    ))
}

/// The first word before the basis origin.
///
/// # Errors
///
/// Out-of-range errors if the basis does not address the document.
pub fn select_prior_word(document: &Document, basis: &Selection) -> Result<Option<Selection>> {
    check_basis(document, basis)?;
    if document.is_empty() {
        return Ok(None);
    }
    Ok(adjacent_word(
        &Traversal::reverse_document_order(document),
        DocumentIterator::new(document, basis.origin()),
    ))
}

/// Extend the basis to the end of the word under its extent, plus trailing
/// whitespace. The origin stays put.
///
/// # Errors
///
/// Out-of-range errors if the basis does not address the document.
pub fn select_remaining_word(
    document: &Document,
    basis: &Selection,
) -> Result<Option<Selection>> {
    check_basis(document, basis)?;
    if document.is_empty() {
        return Ok(None);
    }
    let forward = Traversal::document_order(document);
    let extent = forward.advance_while(
        &DocumentIterator::new(document, basis.extent()),
        is_word_character,
    );
    let extent = absorb_trailing_whitespace(&forward, extent);
    Ok(Some(Selection::new(basis.origin(), extent.location())))
}

/// Leave the current word, find the next word character in the traversal
/// direction, and select the word there. `None` if either scan gives out
/// before finding what it looks for.
fn adjacent_word<'a>(
    traversal: &Traversal<'a>,
    start: DocumentIterator<'a>,
) -> Option<Selection> {
    let gap = traversal.advance_until(&start, is_not_word_character);
    if !gap.satisfies(is_not_word_character) {
        return None;
    }
    let word = traversal.advance_until(&gap, is_word_character);
    if !word.satisfies(is_word_character) {
        return None;
    }
    Some(word_at(word.document(), word.location()))
}

fn word_at(document: &Document, location: Location) -> Selection {
    let forward = Traversal::document_order(document);
    let start = DocumentIterator::new(document, location);
    let origin = forward.retreat_while(&start, is_word_character);
    let extent = forward.advance_while(&origin, is_word_character);
    let extent = absorb_trailing_whitespace(&forward, extent);
    Selection::new(origin.location(), extent.location())
}

fn absorb_trailing_whitespace<'a>(
    forward: &Traversal<'a>,
    extent: DocumentIterator<'a>,
) -> DocumentIterator<'a> {
    let next = forward.advance(&extent);
    if next != extent && next.satisfies(is_whitespace_except_newline) {
        forward.advance_while(&next, is_whitespace_except_newline)
    } else {
        extent
    }
}

// ---------------------------------------------------------------------------
// Line selectors
// ---------------------------------------------------------------------------

/// From the start of the origin's row through the last character of the
/// extent's row.
///
/// # Errors
///
/// Out-of-range errors if the basis does not address the document.
pub fn select_this_line(document: &Document, basis: &Selection) -> Result<Option<Selection>> {
    check_basis(document, basis)?;
    if document.is_empty() {
        return Ok(None);
    }
    let extent = last_column(document, basis.extent().row())?;
    Ok(Some(Selection::new(Location::new(0, basis.origin().row()), extent)))
}

/// The row after the extent's, or the current line on the last row.
///
/// # Errors
///
/// Out-of-range errors if the basis does not address the document.
pub fn select_next_line(document: &Document, basis: &Selection) -> Result<Option<Selection>> {
    check_basis(document, basis)?;
    let row = basis.extent().row() + 1;
    if row < document.row_count() {
        whole_row(document, row)
    } else {
        select_this_line(document, basis)
    }
}

/// The row before the origin's, or the current line on row 0.
///
/// # Errors
///
/// Out-of-range errors if the basis does not address the document.
pub fn select_prior_line(document: &Document, basis: &Selection) -> Result<Option<Selection>> {
    match basis.origin().row().checked_sub(1) {
        Some(row) => {
            check_basis(document, basis)?;
            whole_row(document, row)
        }
        None => select_this_line(document, basis),
    }
}

fn whole_row(document: &Document, row: usize) -> Result<Option<Selection>> {
    let extent = last_column(document, row)?;
    Ok(Some(Selection::new(Location::new(0, row), extent)))
}

/// The last character of `row`, or its newline slot when the row is empty.
fn last_column(document: &Document, row: usize) -> Result<Location> {
    let len = document.row_len(row)?;
    Ok(Location::new(len.saturating_sub(1), row))
}

fn check_basis(document: &Document, basis: &Selection) -> Result<()> {
    document.at(basis.origin())?;
    document.at(basis.extent())?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::Error;

    fn loc(column: usize, row: usize) -> Location {
        Location::new(column, row)
    }

    fn point(column: usize, row: usize) -> Selection {
        Selection::point(loc(column, row))
    }

    fn sel(oc: usize, or: usize, ec: usize, er: usize) -> Selection {
        Selection::new(loc(oc, or), loc(ec, er))
    }

    fn every_location(doc: &Document) -> Vec<Location> {
        let mut out = Vec::new();
        for row in 0..doc.row_count() {
            for column in 0..=doc.row_len(row).unwrap() {
                out.push(loc(column, row));
            }
        }
        out
    }

    // -- Character classes --------------------------------------------------

    #[test]
    fn word_characters() {
        assert!(is_word_character('a'));
        assert!(is_word_character('Z'));
        assert!(is_word_character('7'));
        assert!(is_word_character('é'));
        assert!(!is_word_character('_'));
        assert!(!is_word_character(' '));
        assert!(!is_word_character('\n'));
    }

    #[test]
    fn whitespace_except_newline() {
        assert!(is_whitespace_except_newline(' '));
        assert!(is_whitespace_except_newline('\t'));
        assert!(!is_whitespace_except_newline('\n'));
        assert!(!is_whitespace_except_newline('x'));
    }

    // -- This word ----------------------------------------------------------

    #[test]
    fn this_word_absorbs_trailing_space() {
        let doc = Document::new("foo bar\nbaz\n");
        assert_eq!(select_this_word(&doc, &point(0, 0)), Ok(Some(sel(0, 0, 3, 0))));
    }

    #[test]
    fn this_word_from_middle() {
        let doc = Document::new("foo bar\nbaz\n");
        assert_eq!(select_this_word(&doc, &point(5, 0)), Ok(Some(sel(4, 0, 6, 0))));
    }

    #[test]
    fn this_word_stops_before_newline() {
        let doc = Document::new("foo bar\nbaz\n");
        assert_eq!(select_this_word(&doc, &point(1, 1)), Ok(Some(sel(0, 1, 2, 1))));
    }

    #[test]
    fn this_word_absorbs_whitespace_run() {
        let doc = Document::new("ab \t  cd");
        assert_eq!(select_this_word(&doc, &point(1, 0)), Ok(Some(sel(0, 0, 5, 0))));
    }

    #[test]
    fn this_word_on_punctuation() {
        let doc = Document::new("a, b");
        assert_eq!(select_this_word(&doc, &point(1, 0)), Ok(Some(sel(1, 0, 2, 0))));
    }

    #[test]
    fn this_word_at_end_of_document() {
        let doc = Document::new("abc");
        assert_eq!(select_this_word(&doc, &point(3, 0)), Ok(Some(point(3, 0))));
    }

    #[test]
    fn this_word_idempotent_everywhere() {
        let doc = Document::new("fn main() {\n    let x1 = 42;  \n\n}\n");
        for location in every_location(&doc) {
            let once = select_this_word(&doc, &Selection::point(location))
                .unwrap()
                .unwrap();
            let twice = select_this_word(&doc, &once).unwrap().unwrap();
            assert_eq!(once, twice, "basis {location}");
        }
    }

    // -- Next / prior word --------------------------------------------------

    #[test]
    fn next_word_scenario() {
        let doc = Document::new("foo bar\nbaz\n");
        let foo = select_this_word(&doc, &point(0, 0)).unwrap().unwrap();
        assert_eq!(select_next_word(&doc, &foo), Ok(Some(sel(4, 0, 6, 0))));
    }

    #[test]
    fn next_word_crosses_rows() {
        let doc = Document::new("foo bar\nbaz\n");
        assert_eq!(
            select_next_word(&doc, &sel(4, 0, 6, 0)),
            Ok(Some(sel(0, 1, 2, 1)))
        );
    }

    #[test]
    fn next_word_skips_punctuation() {
        let doc = Document::new("a -- b");
        assert_eq!(select_next_word(&doc, &point(0, 0)), Ok(Some(point(5, 0))));
    }

    #[test]
    fn next_word_after_last_word() {
        let doc = Document::new("foo bar\nbaz\n");
        assert_eq!(select_next_word(&doc, &sel(0, 1, 2, 1)), Ok(None));
    }

    #[test]
    fn next_word_only_trailing_punctuation() {
        let doc = Document::new("foo ...");
        assert_eq!(select_next_word(&doc, &point(0, 0)), Ok(None));
    }

    #[test]
    fn prior_word_steps_back() {
        let doc = Document::new("foo bar\nbaz\n");
        assert_eq!(
            select_prior_word(&doc, &sel(0, 1, 2, 1)),
            Ok(Some(sel(4, 0, 6, 0)))
        );
        assert_eq!(
            select_prior_word(&doc, &sel(4, 0, 6, 0)),
            Ok(Some(sel(0, 0, 3, 0)))
        );
    }

    #[test]
    fn prior_word_at_document_start() {
        let doc = Document::new("foo bar\n");
        assert_eq!(select_prior_word(&doc, &point(0, 0)), Ok(None));
        assert_eq!(select_prior_word(&doc, &point(2, 0)), Ok(None));
    }

    #[test]
    fn prior_word_reaches_word_at_start() {
        let doc = Document::new("a b");
        assert_eq!(select_prior_word(&doc, &point(2, 0)), Ok(Some(sel(0, 0, 1, 0))));
    }

    #[test]
    fn next_then_prior_returns_to_word() {
        let doc = Document::new("alpha beta gamma\ndelta\n");
        let start = select_this_word(&doc, &point(6, 0)).unwrap().unwrap();
        let next = select_next_word(&doc, &start).unwrap().unwrap();
        let back = select_prior_word(&doc, &next).unwrap().unwrap();
        assert!(back.overlaps(&start));
        assert_eq!(back, start);
    }

    // -- Remaining word -----------------------------------------------------

    #[test]
    fn remaining_word_keeps_origin() {
        let doc = Document::new("foo bar\n");
        assert_eq!(
            select_remaining_word(&doc, &point(1, 0)),
            Ok(Some(sel(1, 0, 3, 0)))
        );
    }

    #[test]
    fn remaining_word_extends_range() {
        let doc = Document::new("foo bar\n");
        assert_eq!(
            select_remaining_word(&doc, &sel(0, 0, 5, 0)),
            Ok(Some(sel(0, 0, 6, 0)))
        );
    }

    // -- Lines --------------------------------------------------------------

    #[test]
    fn this_line_scenario() {
        let doc = Document::new("foo bar\nbaz\n");
        for column in 0..=3 {
            assert_eq!(
                select_this_line(&doc, &point(column, 1)),
                Ok(Some(sel(0, 1, 2, 1)))
            );
        }
    }

    #[test]
    fn this_line_spans_basis_rows() {
        let doc = Document::new("one\ntwo\nthree\n");
        assert_eq!(
            select_this_line(&doc, &sel(2, 0, 1, 2)),
            Ok(Some(sel(0, 0, 4, 2)))
        );
    }

    #[test]
    fn this_line_on_empty_row() {
        let doc = Document::new("a\n\nb\n");
        assert_eq!(select_this_line(&doc, &point(0, 1)), Ok(Some(point(0, 1))));
    }

    #[test]
    fn next_line_moves_down() {
        let doc = Document::new("foo bar\nbaz\n");
        assert_eq!(select_next_line(&doc, &point(2, 0)), Ok(Some(sel(0, 1, 2, 1))));
    }

    #[test]
    fn next_line_on_last_row_is_this_line() {
        let doc = Document::new("foo bar\nbaz\n");
        assert_eq!(
            select_next_line(&doc, &point(1, 1)),
            select_this_line(&doc, &point(1, 1))
        );
    }

    #[test]
    fn prior_line_moves_up() {
        let doc = Document::new("foo bar\nbaz\n");
        assert_eq!(select_prior_line(&doc, &point(1, 1)), Ok(Some(sel(0, 0, 6, 0))));
    }

    #[test]
    fn prior_line_on_first_row_is_this_line() {
        let doc = Document::new("foo bar\nbaz\n");
        assert_eq!(select_prior_line(&doc, &point(3, 0)), Ok(Some(sel(0, 0, 6, 0))));
    }

    // -- Empty document and bad bases ---------------------------------------

    #[test]
    fn empty_document_selects_nothing() {
        let doc = Document::default();
        let basis = point(0, 0);
        assert_eq!(select_this_word(&doc, &basis), Ok(None));
        assert_eq!(select_next_word(&doc, &basis), Ok(None));
        assert_eq!(select_prior_word(&doc, &basis), Ok(None));
        assert_eq!(select_remaining_word(&doc, &basis), Ok(None));
        assert_eq!(select_this_line(&doc, &basis), Ok(None));
        assert_eq!(select_next_line(&doc, &basis), Ok(None));
        assert_eq!(select_prior_line(&doc, &basis), Ok(None));
    }

    #[test]
    fn out_of_range_basis_is_error() {
        let doc = Document::new("ab\n");
        let basis = point(9, 0);
        assert!(matches!(
            select_this_word(&doc, &basis),
            Err(Error::LocationOutOfRange { .. })
        ));
        assert!(select_next_word(&doc, &basis).is_err());
        assert!(select_this_line(&doc, &point(0, 4)).is_err());
        assert!(select_prior_line(&doc, &point(0, 4)).is_err());
    }

    #[test]
    fn next_line_from_last_possible_row_is_error() {
        let doc = Document::new("ab\n");
        assert!(matches!(
            select_next_line(&doc, &point(0, usize::MAX)),
            Err(Error::RowOutOfRange { .. })
        ));
    }
}
