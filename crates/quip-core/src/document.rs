//! Document: row storage and multi-selection editing.
//!
//! A `Document` owns its text as a vector of rows, none of which contains a
//! newline. Every row conceptually ends in a newline slot (column
//! `row_len`); the slot of the last row doubles as [`Document::end`].
//! Whether the original text really ended in `\n` is remembered separately
//! so [`contents`](Document::contents) reproduces it.
//!
//! # Edits
//!
//! [`insert`](Document::insert), [`append`](Document::append) and
//! [`erase`](Document::erase) all take a whole [`SelectionSet`] (or a single
//! [`Selection`]) and edit at every selection in one batch. Selections are
//! visited in document order while a running [`Displacement`] maps the
//! original coordinates of later selections onto the partly edited rows:
//!
//! - a column delta that applies only to the original row the previous edit
//!   ended on;
//! - a row delta that applies to everything after it.
//!
//! Each edit returns the post-edit cursors as a new set. All anchors are
//! validated against the unmodified document first, so a rejected batch
//! leaves the rows untouched, and the modification signal fires once per
//! successful batch.
//!
//! # Columns
//!
//! Columns are char offsets, as everywhere in this crate. Byte offsets are
//! an implementation detail of slicing and never leak out.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::iterator::DocumentIterator;
use crate::location::Location;
use crate::search::SearchExpression;
use crate::selection::{Selection, SelectionSet};
use crate::signal::{Signal, SubscriptionId};

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// Text as an ordered sequence of rows, plus the observers that want to hear
/// about edits.
pub struct Document {
    rows: Vec<String>,
    path: Option<PathBuf>,
    missing_trailing_newline: bool,
    modified: Signal,
}

impl Document {
    // -- Construction -------------------------------------------------------

    /// Split `text` into rows.
    ///
    /// A final `\n` terminates the last row rather than starting a new empty
    /// one. Text without it is flagged as missing its trailing newline.
    #[must_use]
    pub fn new(text: &str) -> Self {
        let body = text.strip_suffix('\n');
        Self {
            rows: body.unwrap_or(text).split('\n').map(str::to_owned).collect(),
            path: None,
            missing_trailing_newline: body.is_none(),
            modified: Signal::new(),
        }
    }

    // -- Queries ------------------------------------------------------------

    /// True for a single empty row.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.len() == 1 && self.rows[0].is_empty()
    }

    /// True when the text this document was built from did not end in `\n`.
    #[inline]
    #[must_use]
    pub const fn is_missing_trailing_newline(&self) -> bool {
        self.missing_trailing_newline
    }

    /// Number of rows. Never zero.
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The text of row `index`, without its newline.
    ///
    /// # Errors
    ///
    /// [`Error::RowOutOfRange`] past the last row.
    pub fn row(&self, index: usize) -> Result<&str> {
        self.rows
            .get(index)
            .map(String::as_str)
            .ok_or(Error::RowOutOfRange {
                row: index,
                rows: self.rows.len(),
            })
    }

    /// All rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.rows.iter().map(String::as_str)
    }

    /// Length of row `index` in chars.
    ///
    /// # Errors
    ///
    /// [`Error::RowOutOfRange`] past the last row.
    pub fn row_len(&self, index: usize) -> Result<usize> {
        self.row(index).map(char_count)
    }

    /// The leading whitespace of row `index`.
    ///
    /// # Errors
    ///
    /// [`Error::RowOutOfRange`] past the last row.
    pub fn indent_of_row(&self, index: usize) -> Result<&str> {
        let row = self.row(index)?;
        let body = row.trim_start_matches(char::is_whitespace);
        Ok(&row[..row.len() - body.len()])
    }

    /// The whole text, newline-joined, with a final newline unless the source
    /// text lacked one.
    #[must_use]
    pub fn contents(&self) -> String {
        let mut text = self.rows.join("\n");
        if !self.missing_trailing_newline {
            text.push('\n');
        }
        text
    }

    /// The text covered by `selection`, both ends included.
    ///
    /// A selected newline slot contributes `'\n'`; the end of the document
    /// contributes nothing.
    ///
    /// # Errors
    ///
    /// Out-of-range errors if either end is not addressable.
    pub fn contents_of(&self, selection: &Selection) -> Result<String> {
        let (origin, extent) = (selection.origin(), selection.extent());
        self.check(origin)?;
        self.check(extent)?;

        let last_row = self.rows.len() - 1;
        let mut text = String::new();
        for index in origin.row()..=extent.row() {
            let row = &self.rows[index];
            let len = char_count(row);
            let start = if index == origin.row() { origin.column() } else { 0 };
            let stop = if index == extent.row() { extent.column() } else { len };
            text.push_str(slice_columns(row, start, (stop + 1).min(len)));
            if stop == len && index != last_row {
                text.push('\n');
            }
        }
        Ok(text)
    }

    /// [`contents_of`](Self::contents_of) for every selection, in set order.
    ///
    /// # Errors
    ///
    /// The first out-of-range error.
    pub fn contents_of_set(&self, selections: &SelectionSet) -> Result<Vec<String>> {
        selections.iter().map(|s| self.contents_of(s)).collect()
    }

    /// The file path this document was loaded from, if any.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Associate a path. Nothing is read or written.
    #[inline]
    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    // -- Iteration ----------------------------------------------------------

    /// Iterator at `(0, 0)`.
    #[must_use]
    pub const fn begin(&self) -> DocumentIterator<'_> {
        DocumentIterator::new(self, Location::ZERO)
    }

    /// Iterator at the last row's newline slot, one past the last character.
    #[must_use]
    pub fn end(&self) -> DocumentIterator<'_> {
        DocumentIterator::new(self, self.end_location())
    }

    /// Iterator at `location`.
    ///
    /// # Errors
    ///
    /// Out-of-range errors unless the row exists and the column is at most
    /// the row length.
    pub fn at(&self, location: Location) -> Result<DocumentIterator<'_>> {
        self.check(location)?;
        Ok(DocumentIterator::new(self, location))
    }

    /// Signed number of characters from `from` to `to`, counting one newline
    /// per row boundary.
    ///
    /// # Errors
    ///
    /// Out-of-range errors if either location is not addressable.
    pub fn distance(&self, from: Location, to: Location) -> Result<isize> {
        let from = self.linear_offset(from)?;
        let to = self.linear_offset(to)?;
        Ok(signed(to) - signed(from))
    }

    // -- Editing ------------------------------------------------------------

    /// Insert `text` before the origin of every selection.
    ///
    /// Text containing newlines splits the target row. Each selection comes
    /// back as a point just past its inserted text.
    ///
    /// # Errors
    ///
    /// Out-of-range errors if any origin is not addressable. The document is
    /// unchanged on error.
    pub fn insert(
        &mut self,
        selections: impl Into<SelectionSet>,
        text: &str,
    ) -> Result<SelectionSet> {
        let selections = selections.into();
        let anchors = selections.iter().map(Selection::origin).collect();
        self.insert_at(anchors, text, "insert")
    }

    /// [`insert`](Self::insert) with the text given as separate rows.
    ///
    /// # Errors
    ///
    /// As for [`insert`](Self::insert).
    pub fn insert_rows<S: AsRef<str>>(
        &mut self,
        selections: impl Into<SelectionSet>,
        rows: &[S],
    ) -> Result<SelectionSet> {
        self.insert(selections, &join_rows(rows))
    }

    /// Insert `text` just after the extent of every selection.
    ///
    /// "After" is the next slot in document order: the next column, or the
    /// start of the next row when the extent is a newline slot. At the end
    /// of the document the text goes at the end.
    ///
    /// # Errors
    ///
    /// Out-of-range errors if any extent is not addressable. The document is
    /// unchanged on error.
    pub fn append(
        &mut self,
        selections: impl Into<SelectionSet>,
        text: &str,
    ) -> Result<SelectionSet> {
        let selections = selections.into();
        let mut anchors = Vec::with_capacity(selections.len());
        for selection in &selections {
            self.check(selection.extent())?;
            anchors.push(self.following(selection.extent()));
        }
        self.insert_at(anchors, text, "append")
    }

    /// [`append`](Self::append) with the text given as separate rows.
    ///
    /// # Errors
    ///
    /// As for [`append`](Self::append).
    pub fn append_rows<S: AsRef<str>>(
        &mut self,
        selections: impl Into<SelectionSet>,
        rows: &[S],
    ) -> Result<SelectionSet> {
        self.append(selections, &join_rows(rows))
    }

    /// Delete the inclusive range of every selection.
    ///
    /// A range ending on a newline slot joins the following row; one ending
    /// at the end of the document deletes through the last character. Each
    /// selection comes back as a point at its origin.
    ///
    /// # Errors
    ///
    /// Out-of-range errors for unaddressable ends and
    /// [`Error::OverlappingSelections`] when two selections share text. The
    /// document is unchanged on error.
    pub fn erase(&mut self, selections: impl Into<SelectionSet>) -> Result<SelectionSet> {
        let selections = selections.into();
        for selection in &selections {
            self.check(selection.origin())?;
            self.check(selection.extent())?;
        }
        if let Some((first, second)) = selections.first_overlap() {
            return Err(Error::OverlappingSelections { first, second });
        }

        let mut shift = Displacement::default();
        let mut cursors = Vec::with_capacity(selections.len());
        for selection in &selections {
            let origin = shift.apply(selection.origin());
            let extent = shift.apply(selection.extent());
            let row_len = self.char_count(extent.row());

            // Where the text that survives after the range starts, in
            // current and in original coordinates.
            let (tail, resume) = if extent.column() < row_len {
                (extent.adjust_by(1, 0), Some(selection.extent().adjust_by(1, 0)))
            } else if extent.row() + 1 < self.rows.len() {
                (
                    Location::new(0, extent.row() + 1),
                    Some(Location::new(0, selection.extent().row() + 1)),
                )
            } else {
                (extent, None)
            };

            trace!(?selection, ?origin, ?tail, "erase range");
            self.cut(origin, tail);
            if let Some(resume) = resume {
                shift.settle(resume, origin);
            }
            cursors.push(Selection::point(origin));
        }

        debug!(selections = cursors.len(), rows = self.rows.len(), "erase");
        self.modified.emit();
        Ok(SelectionSet::new(cursors))
    }

    // -- Search -------------------------------------------------------------

    /// One selection per match and per participating capture group, row by
    /// row. Matches never span rows.
    #[must_use]
    pub fn matches(&self, expression: &SearchExpression) -> SelectionSet {
        let mut found = Vec::new();
        for (index, row) in self.rows.iter().enumerate() {
            expression.collect_row(index, row, &mut found);
        }
        debug!(pattern = expression.as_str(), matches = found.len(), "search");
        SelectionSet::new(found)
    }

    // -- Notification -------------------------------------------------------

    /// Call `observer` after every successful edit batch.
    pub fn subscribe(&mut self, observer: impl FnMut() + 'static) -> SubscriptionId {
        self.modified.connect(observer)
    }

    /// Stop notifying the observer registered as `id`.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.modified.disconnect(id)
    }

    // -- Crate internals ----------------------------------------------------

    /// The character at `location`: a row char, `'\n'` on a newline slot, or
    /// `None` at the end of the document and anywhere out of range.
    pub(crate) fn char_at(&self, location: Location) -> Option<char> {
        let row = self.rows.get(location.row())?;
        if location == self.end_location() {
            return None;
        }
        let mut chars = row.chars().skip(location.column());
        match chars.next() {
            Some(c) => Some(c),
            None if location.column() == char_count(row) => Some('\n'),
            None => None,
        }
    }

    /// Row length in chars, or 0 past the last row.
    pub(crate) fn char_count(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, |text| char_count(text))
    }

    pub(crate) fn end_location(&self) -> Location {
        let last = self.rows.len() - 1;
        Location::new(char_count(&self.rows[last]), last)
    }

    // -- Helpers ------------------------------------------------------------

    fn check(&self, location: Location) -> Result<()> {
        let row_len = self.row_len(location.row())?;
        if location.column() > row_len {
            return Err(Error::LocationOutOfRange { location, row_len });
        }
        Ok(())
    }

    /// Chars before `location`, newlines included.
    fn linear_offset(&self, location: Location) -> Result<usize> {
        self.check(location)?;
        let before: usize = self.rows[..location.row()]
            .iter()
            .map(|row| char_count(row) + 1)
            .sum();
        Ok(before + location.column())
    }

    /// The slot after `location`, saturating at the end.
    fn following(&self, location: Location) -> Location {
        DocumentIterator::new(self, location).forward().location()
    }

    /// Shared body of insert and append. `anchors` holds each selection's
    /// insertion point in original coordinates, in set order.
    fn insert_at(
        &mut self,
        anchors: Vec<Location>,
        text: &str,
        operation: &'static str,
    ) -> Result<SelectionSet> {
        for anchor in &anchors {
            self.check(*anchor)?;
        }
        // Nested selections can put append points out of order; edit in
        // document order, stable for equal anchors.
        let mut order: Vec<usize> = (0..anchors.len()).collect();
        order.sort_by_key(|&index| anchors[index]);

        let lines: Vec<&str> = text.split('\n').collect();
        let mut shift = Displacement::default();
        let mut cursors = vec![Selection::point(Location::ZERO); anchors.len()];
        for index in order {
            let anchor = anchors[index];
            let target = shift.apply(anchor);
            let after = self.splice(target, &lines);
            trace!(?anchor, ?target, ?after, "{operation} at");
            shift.settle(anchor, after);
            cursors[index] = Selection::point(after);
        }

        debug!(selections = cursors.len(), rows = self.rows.len(), "{operation}");
        self.modified.emit();
        Ok(SelectionSet::new(cursors))
    }

    /// Put `lines` (at least one, joined by newlines) at `at`. Returns the
    /// location just past the inserted text.
    fn splice(&mut self, at: Location, lines: &[&str]) -> Location {
        let row = &mut self.rows[at.row()];
        let split = byte_offset(row, at.column());
        let suffix = row.split_off(split);

        let Some((first, rest)) = lines.split_first() else {
            row.push_str(&suffix);
            return at;
        };
        row.push_str(first);

        match rest.split_last() {
            None => {
                row.push_str(&suffix);
                at.adjust_by(signed(char_count(first)), 0)
            }
            Some((last, middle)) => {
                let mut tail = (*last).to_owned();
                tail.push_str(&suffix);
                let index = at.row() + 1;
                self.rows.splice(
                    index..index,
                    middle
                        .iter()
                        .map(|line| (*line).to_owned())
                        .chain(std::iter::once(tail)),
                );
                Location::new(char_count(last), at.row() + rest.len())
            }
        }
    }

    /// Remove everything from `origin` up to (not including) `tail`, joining
    /// the rows in between.
    fn cut(&mut self, origin: Location, tail: Location) {
        let rest = {
            let row = &self.rows[tail.row()];
            row[byte_offset(row, tail.column())..].to_owned()
        };
        if tail.row() > origin.row() {
            self.rows.drain(origin.row() + 1..=tail.row());
        }
        let head = &mut self.rows[origin.row()];
        head.truncate(byte_offset(head, origin.column()));
        head.push_str(&rest);
    }
}

impl Default for Document {
    /// The empty document: one empty row, no trailing newline.
    fn default() -> Self {
        Self::new("")
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("rows", &self.rows.len())
            .field("missing_trailing_newline", &self.missing_trailing_newline)
            .field("path", &self.path)
            .field("observers", &self.modified.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Displacement
// ---------------------------------------------------------------------------

/// Maps original locations onto a partly edited document.
///
/// `column` only applies on original row `row`, the row the previous edit
/// ended on. Anything on a later row only moves by `rows`.
#[derive(Debug, Clone, Copy)]
struct Displacement {
    row: usize,
    column: isize,
    rows: isize,
}

impl Default for Displacement {
    fn default() -> Self {
        Self {
            row: usize::MAX,
            column: 0,
            rows: 0,
        }
    }
}

impl Displacement {
    fn apply(&self, location: Location) -> Location {
        let column = if location.row() == self.row { self.column } else { 0 };
        location.adjust_by(column, self.rows)
    }

    /// Record that the text originally at `original` now starts at `current`.
    fn settle(&mut self, original: Location, current: Location) {
        self.row = original.row();
        self.column = signed(current.column()) - signed(original.column());
        self.rows = signed(current.row()) - signed(original.row());
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of char column `column`, or the string length past the end.
fn byte_offset(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map_or(text.len(), |(byte, _)| byte)
}

/// Chars `[start, stop)` of `text`.
fn slice_columns(text: &str, start: usize, stop: usize) -> &str {
    if start >= stop {
        return "";
    }
    &text[byte_offset(text, start)..byte_offset(text, stop)]
}

fn join_rows<S: AsRef<str>>(rows: &[S]) -> String {
    rows.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n")
}

#[allow(clippy::cast_possible_wrap)]
const fn signed(n: usize) -> isize {
    n as isize
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
