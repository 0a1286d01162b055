//! Character-by-character traversal of a document.
//!
//! [`DocumentIterator`] is a read-only cursor: a borrowed [`Document`] plus a
//! [`Location`]. It walks every row's characters and then the row's implicit
//! newline slot before moving on to the next row. The newline slot of the
//! last row is [`Document::end`], which reads as no character at all.
//!
//! [`Traversal`] binds movement to a direction. "Advancing" is whatever the
//! traversal says it is: incrementing for [`Traversal::document_order`],
//! decrementing for [`Traversal::reverse_document_order`]. Selector code
//! written against `advance_*`/`retreat_*` therefore serves both "next" and
//! "prior" variants by swapping the traversal.
//!
//! Because iterators borrow the document, they cannot outlive an edit; build
//! fresh ones after every mutation.

use std::fmt;

use crate::document::Document;
use crate::location::Location;

// ---------------------------------------------------------------------------
// DocumentIterator
// ---------------------------------------------------------------------------

/// A read-only position in a document.
#[derive(Clone, Copy)]
pub struct DocumentIterator<'a> {
    document: &'a Document,
    location: Location,
}

impl<'a> DocumentIterator<'a> {
    /// Caller guarantees `location` is addressable in `document`.
    pub(crate) const fn new(document: &'a Document, location: Location) -> Self {
        Self { document, location }
    }

    /// The document this iterator reads from.
    #[inline]
    #[must_use]
    pub const fn document(&self) -> &'a Document {
        self.document
    }

    /// Where the iterator points.
    #[inline]
    #[must_use]
    pub const fn location(&self) -> Location {
        self.location
    }

    /// The character under the iterator: a row character, `'\n'` on a
    /// newline slot, or `None` at [`Document::end`].
    #[must_use]
    pub fn get(&self) -> Option<char> {
        self.document.char_at(self.location)
    }

    /// True when there is a character here and `predicate` accepts it.
    /// The end of the document satisfies nothing.
    #[inline]
    pub fn satisfies(&self, predicate: impl Fn(char) -> bool) -> bool {
        self.get().is_some_and(predicate)
    }

    /// True at [`Document::end`].
    #[inline]
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.location == self.document.end_location()
    }

    /// True at [`Document::begin`].
    #[inline]
    #[must_use]
    pub fn is_begin(&self) -> bool {
        self.location == Location::ZERO
    }

    /// Move one slot forward. Stays put at the end of the document.
    pub fn step_forward(&mut self) {
        if self.is_end() {
            return;
        }
        let row_len = self.document.char_count(self.location.row());
        self.location = if self.location.column() < row_len {
            self.location.adjust_by(1, 0)
        } else {
            Location::new(0, self.location.row() + 1)
        };
    }

    /// Move one slot backward. Stays put at the start of the document.
    pub fn step_backward(&mut self) {
        if self.location.column() > 0 {
            self.location = self.location.adjust_by(-1, 0);
        } else if self.location.row() > 0 {
            let row = self.location.row() - 1;
            self.location = Location::new(self.document.char_count(row), row);
        }
    }

    /// A copy moved one slot forward.
    #[must_use]
    pub fn forward(&self) -> Self {
        let mut moved = *self;
        moved.step_forward();
        moved
    }

    /// A copy moved one slot backward.
    #[must_use]
    pub fn backward(&self) -> Self {
        let mut moved = *self;
        moved.step_backward();
        moved
    }
}

impl PartialEq for DocumentIterator<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.document, other.document) && self.location == other.location
    }
}

impl Eq for DocumentIterator<'_> {}

impl fmt::Debug for DocumentIterator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentIterator")
            .field("location", &self.location)
            .field("char", &self.get())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Traversal
// ---------------------------------------------------------------------------

/// Moves an iterator one step in some direction.
type Movement<'a> = fn(&DocumentIterator<'a>) -> DocumentIterator<'a>;

/// A direction of travel through one document, with its two bounds.
///
/// Traversals are cheap to build and meant to be created per call.
#[derive(Clone, Copy)]
pub struct Traversal<'a> {
    advance: Movement<'a>,
    retreat: Movement<'a>,
    advance_to: DocumentIterator<'a>,
    retreat_to: DocumentIterator<'a>,
}

impl<'a> Traversal<'a> {
    /// Advancing increments toward [`Document::end`].
    #[must_use]
    pub fn document_order(document: &'a Document) -> Self {
        Self {
            advance: DocumentIterator::forward,
            retreat: DocumentIterator::backward,
            advance_to: document.end(),
            retreat_to: document.begin(),
        }
    }

    /// Advancing decrements toward [`Document::begin`].
    #[must_use]
    pub fn reverse_document_order(document: &'a Document) -> Self {
        Self {
            advance: DocumentIterator::backward,
            retreat: DocumentIterator::forward,
            advance_to: document.begin(),
            retreat_to: document.end(),
        }
    }

    /// One step in the traversal direction.
    #[inline]
    #[must_use]
    pub fn advance(&self, iterator: &DocumentIterator<'a>) -> DocumentIterator<'a> {
        (self.advance)(iterator)
    }

    /// One step against the traversal direction.
    #[inline]
    #[must_use]
    pub fn retreat(&self, iterator: &DocumentIterator<'a>) -> DocumentIterator<'a> {
        (self.retreat)(iterator)
    }

    /// The bound reached by advancing.
    #[inline]
    #[must_use]
    pub const fn advance_to(&self) -> DocumentIterator<'a> {
        self.advance_to
    }

    /// The bound reached by retreating.
    #[inline]
    #[must_use]
    pub const fn retreat_to(&self) -> DocumentIterator<'a> {
        self.retreat_to
    }

    /// Advance while the next character passes `predicate`.
    ///
    /// Returns `iterator` unchanged if the predicate fails at `iterator`
    /// itself; otherwise the last position that passed.
    pub fn advance_while(
        &self,
        iterator: &DocumentIterator<'a>,
        predicate: impl Fn(char) -> bool,
    ) -> DocumentIterator<'a> {
        scan_while(iterator, self.advance, &self.advance_to, predicate)
    }

    /// Advance until a character passes `predicate`, stopping at the bound.
    pub fn advance_until(
        &self,
        iterator: &DocumentIterator<'a>,
        predicate: impl Fn(char) -> bool,
    ) -> DocumentIterator<'a> {
        scan_until(iterator, self.advance, &self.advance_to, predicate)
    }

    /// Mirror of [`advance_while`](Self::advance_while).
    pub fn retreat_while(
        &self,
        iterator: &DocumentIterator<'a>,
        predicate: impl Fn(char) -> bool,
    ) -> DocumentIterator<'a> {
        scan_while(iterator, self.retreat, &self.retreat_to, predicate)
    }

    /// Mirror of [`advance_until`](Self::advance_until).
    pub fn retreat_until(
        &self,
        iterator: &DocumentIterator<'a>,
        predicate: impl Fn(char) -> bool,
    ) -> DocumentIterator<'a> {
        scan_until(iterator, self.retreat, &self.retreat_to, predicate)
    }
}

impl fmt::Debug for Traversal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traversal")
            .field("advance_to", &self.advance_to.location())
            .field("retreat_to", &self.retreat_to.location())
            .finish_non_exhaustive()
    }
}

fn scan_while<'a>(
    start: &DocumentIterator<'a>,
    step: Movement<'a>,
    bound: &DocumentIterator<'a>,
    predicate: impl Fn(char) -> bool,
) -> DocumentIterator<'a> {
    let mut cursor = *start;
    if !cursor.satisfies(&predicate) {
        return cursor;
    }
    while cursor != *bound {
        let speculative = step(&cursor);
        if !speculative.satisfies(&predicate) {
            break;
        }
        cursor = speculative;
    }
    cursor
}

fn scan_until<'a>(
    start: &DocumentIterator<'a>,
    step: Movement<'a>,
    bound: &DocumentIterator<'a>,
    predicate: impl Fn(char) -> bool,
) -> DocumentIterator<'a> {
    let mut cursor = *start;
    while !cursor.satisfies(&predicate) && cursor != *bound {
        cursor = step(&cursor);
    }
    cursor
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
