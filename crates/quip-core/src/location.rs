//! Document locations.
//!
//! A [`Location`] names one addressable slot in a document as a
//! `(column, row)` pair, both 0-indexed. Columns count Unicode scalar values
//! (chars), not bytes. Column `row_len` is valid too: it is the slot of the
//! row's implicit newline.
//!
//! Locations are plain values. They carry no reference to a document, so
//! nothing stops a caller from building one that points outside of it;
//! [`Document::at`](crate::document::Document::at) is where that gets caught.

use std::fmt;

// ---------------------------------------------------------------------------
// Location
// ---------------------------------------------------------------------------

/// A `(column, row)` point in a document.
///
/// # Ordering
///
/// Document order: row first, then column. `(100, 0)` sorts before `(0, 1)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    column: usize,
    row: usize,
}

impl Location {
    /// Column 0 of row 0.
    pub const ZERO: Self = Self { column: 0, row: 0 };

    /// Create a location. Argument order follows the `(column, row)` naming.
    #[inline]
    #[must_use]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Char offset within the row.
    #[inline]
    #[must_use]
    pub const fn column(self) -> usize {
        self.column
    }

    /// 0-indexed row.
    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    /// Translate by signed column and row deltas.
    ///
    /// No clamping happens here. A translation that would leave the
    /// non-negative quadrant wraps, which every document lookup then rejects
    /// as out of range.
    #[must_use]
    pub const fn adjust_by(self, column_delta: isize, row_delta: isize) -> Self {
        debug_assert!(
            self.column.checked_add_signed(column_delta).is_some()
                && self.row.checked_add_signed(row_delta).is_some(),
            "Location::adjust_by moved before the document origin"
        );
        Self {
            column: self.column.wrapping_add_signed(column_delta),
            row: self.row.wrapping_add_signed(row_delta),
        }
    }

    /// Same row, different column.
    #[inline]
    #[must_use]
    pub const fn with_column(self, column: usize) -> Self {
        Self { column, row: self.row }
    }
}

impl Ord for Location {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row
            .cmp(&other.row)
            .then(self.column.cmp(&other.column))
    }
}

impl PartialOrd for Location {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Loc({},{})", self.column, self.row)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

impl From<(usize, usize)> for Location {
    /// `(column, row)`.
    fn from((column, row): (usize, usize)) -> Self {
        Self::new(column, row)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- Construction -------------------------------------------------------

    #[test]
    fn zero_is_origin() {
        assert_eq!(Location::ZERO.column(), 0);
        assert_eq!(Location::ZERO.row(), 0);
        assert_eq!(Location::default(), Location::ZERO);
    }

    #[test]
    fn new_keeps_column_row_order() {
        let l = Location::new(5, 2);
        assert_eq!(l.column(), 5);
        assert_eq!(l.row(), 2);
        assert_eq!(Location::from((5, 2)), l);
    }

    // -- Ordering -----------------------------------------------------------

    #[test]
    fn ordering_same_row() {
        assert!(Location::new(3, 1) < Location::new(7, 1));
    }

    #[test]
    fn ordering_is_row_major() {
        assert!(Location::new(100, 0) < Location::new(0, 1));
        assert!(Location::new(0, 2) > Location::new(50, 1));
    }

    #[test]
    fn ordering_consistent_over_sorted_run() {
        let run = [
            Location::ZERO,
            Location::new(1, 0),
            Location::new(100, 0),
            Location::new(0, 1),
            Location::new(1, 1),
            Location::new(0, 10),
        ];
        for pair in run.windows(2) {
            assert!(pair[0] < pair[1], "{:?} should be < {:?}", pair[0], pair[1]);
        }
    }

    // -- Translation --------------------------------------------------------

    #[test]
    fn adjust_by_positive() {
        assert_eq!(Location::new(2, 3).adjust_by(4, 1), Location::new(6, 4));
    }

    #[test]
    fn adjust_by_negative() {
        assert_eq!(Location::new(6, 4).adjust_by(-6, -4), Location::ZERO);
    }

    #[test]
    fn adjust_by_zero_is_identity() {
        let l = Location::new(9, 9);
        assert_eq!(l.adjust_by(0, 0), l);
    }

    #[test]
    fn with_column_keeps_row() {
        assert_eq!(Location::new(4, 7).with_column(0), Location::new(0, 7));
    }

    // -- Formatting ---------------------------------------------------------

    #[test]
    fn debug_format() {
        assert_eq!(format!("{:?}", Location::new(2, 5)), "Loc(2,5)");
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", Location::new(2, 5)), "(2, 5)");
    }
}
