//! Selections and selection sets.
//!
//! A [`Selection`] is an inclusive range between two [`Location`]s. It is the
//! unit every selector produces and every edit consumes: a "cursor" is just a
//! selection whose origin and extent coincide, covering one slot.
//!
//! A [`SelectionSet`] holds the simultaneous selections of a multi-cursor
//! session, kept sorted by origin. Edits on the document walk the set in that
//! order, so the order is an invariant rather than a presentation detail.
//!
//! # Normalization
//!
//! Selections do not remember which end was dragged. Both constructors swap
//! their arguments when needed so that `origin <= extent` always holds.

use std::fmt;
use std::ops::Index;

use crate::location::Location;

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// A normalized, inclusive `[origin, extent]` range.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    origin: Location,
    extent: Location,
}

impl Selection {
    /// Create a selection between two locations in either order.
    #[must_use]
    pub fn new(a: Location, b: Location) -> Self {
        if a <= b {
            Self { origin: a, extent: b }
        } else {
            Self { origin: b, extent: a }
        }
    }

    /// A single-slot selection.
    #[inline]
    #[must_use]
    pub const fn point(location: Location) -> Self {
        Self {
            origin: location,
            extent: location,
        }
    }

    /// The earlier end.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> Location {
        self.origin
    }

    /// The later end (inclusive).
    #[inline]
    #[must_use]
    pub const fn extent(&self) -> Location {
        self.extent
    }

    /// Rows spanned beyond the first. A single-row selection has height 0.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.extent.row() - self.origin.row()
    }

    /// True when origin and extent are the same location.
    #[inline]
    #[must_use]
    pub fn is_point(&self) -> bool {
        self.origin == self.extent
    }

    /// True when `location` lies within `[origin, extent]`.
    #[inline]
    #[must_use]
    pub fn contains(&self, location: Location) -> bool {
        location >= self.origin && location <= self.extent
    }

    /// True when the two inclusive ranges share at least one location.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.origin <= other.extent && other.origin <= self.extent
    }
}

impl From<Location> for Selection {
    fn from(location: Location) -> Self {
        Self::point(location)
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sel({:?} ..= {:?})", self.origin, self.extent)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.origin, self.extent)
    }
}

// ---------------------------------------------------------------------------
// SelectionSet
// ---------------------------------------------------------------------------

/// Simultaneous selections, sorted by origin in document order.
///
/// Sorting is stable, so selections sharing an origin keep the order they
/// were given in. Overlapping selections are kept as they are; nothing here
/// merges them.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct SelectionSet {
    selections: Vec<Selection>,
}

impl SelectionSet {
    /// Create a set, sorting the selections by origin.
    #[must_use]
    pub fn new(mut selections: Vec<Selection>) -> Self {
        selections.sort_by_key(Selection::origin);
        Self { selections }
    }

    /// Number of selections.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// True when the set holds no selections.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// The first selection in document order.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&Selection> {
        self.selections.first()
    }

    /// The last selection in document order.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Selection> {
        self.selections.last()
    }

    /// Iterate in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
        self.selections.iter()
    }

    /// The selections as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Selection] {
        &self.selections
    }

    /// Replace every selection through `f`, keeping the ones `f` rejects.
    ///
    /// This is how a selector is applied to each cursor: a `None` result is
    /// the "nothing to select" outcome and leaves that selection untouched.
    /// The result is re-sorted since selectors may move selections past one
    /// another.
    pub fn map_or_keep<E>(
        &self,
        mut f: impl FnMut(&Selection) -> Result<Option<Selection>, E>,
    ) -> Result<Self, E> {
        let mut mapped = Vec::with_capacity(self.selections.len());
        for selection in &self.selections {
            mapped.push(f(selection)?.unwrap_or(*selection));
        }
        Ok(Self::new(mapped))
    }

    /// First pair of neighbouring selections that share a location.
    #[must_use]
    pub fn first_overlap(&self) -> Option<(Selection, Selection)> {
        self.selections
            .windows(2)
            .find(|pair| pair[0].overlaps(&pair[1]))
            .map(|pair| (pair[0], pair[1]))
    }
}

impl Index<usize> for SelectionSet {
    type Output = Selection;

    fn index(&self, index: usize) -> &Selection {
        &self.selections[index]
    }
}

impl From<Selection> for SelectionSet {
    fn from(selection: Selection) -> Self {
        Self {
            selections: vec![selection],
        }
    }
}

impl From<&Selection> for SelectionSet {
    fn from(selection: &Selection) -> Self {
        Self::from(*selection)
    }
}

impl From<&SelectionSet> for SelectionSet {
    fn from(set: &SelectionSet) -> Self {
        set.clone()
    }
}

impl From<Vec<Selection>> for SelectionSet {
    fn from(selections: Vec<Selection>) -> Self {
        Self::new(selections)
    }
}

impl FromIterator<Selection> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = Selection>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for SelectionSet {
    type Item = Selection;
    type IntoIter = std::vec::IntoIter<Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.selections.into_iter()
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a Selection;
    type IntoIter = std::slice::Iter<'a, Selection>;

    fn into_iter(self) -> Self::IntoIter {
        self.selections.iter()
    }
}

impl fmt::Debug for SelectionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.selections).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(column: usize, row: usize) -> Location {
        Location::new(column, row)
    }

    fn sel(oc: usize, or: usize, ec: usize, er: usize) -> Selection {
        Selection::new(loc(oc, or), loc(ec, er))
    }

    // -- Normalization ------------------------------------------------------

    #[test]
    fn new_keeps_ordered_arguments() {
        let s = sel(1, 0, 4, 2);
        assert_eq!(s.origin(), loc(1, 0));
        assert_eq!(s.extent(), loc(4, 2));
    }

    #[test]
    fn new_swaps_reversed_arguments() {
        let s = Selection::new(loc(4, 2), loc(1, 0));
        assert_eq!(s.origin(), loc(1, 0));
        assert_eq!(s.extent(), loc(4, 2));
    }

    #[test]
    fn normalization_holds_for_all_orders() {
        let points = [loc(0, 0), loc(5, 0), loc(0, 1), loc(3, 1), loc(9, 4)];
        for &a in &points {
            for &b in &points {
                let s = Selection::new(a, b);
                assert!(s.origin() <= s.extent(), "{a:?} {b:?} -> {s:?}");
                assert_eq!(s, Selection::new(b, a));
            }
        }
    }

    #[test]
    fn point_selection() {
        let s = Selection::point(loc(3, 3));
        assert!(s.is_point());
        assert_eq!(s.origin(), s.extent());
        assert_eq!(Selection::from(loc(3, 3)), s);
    }

    // -- Properties ---------------------------------------------------------

    #[test]
    fn height_counts_rows_after_first() {
        assert_eq!(sel(0, 2, 9, 2).height(), 0);
        assert_eq!(sel(4, 1, 0, 3).height(), 2);
    }

    #[test]
    fn contains_is_inclusive() {
        let s = sel(2, 0, 4, 1);
        assert!(s.contains(loc(2, 0)));
        assert!(s.contains(loc(50, 0)));
        assert!(s.contains(loc(4, 1)));
        assert!(!s.contains(loc(5, 1)));
        assert!(!s.contains(loc(1, 0)));
    }

    #[test]
    fn overlaps_touching_endpoints() {
        assert!(sel(0, 0, 3, 0).overlaps(&sel(3, 0, 5, 0)));
        assert!(!sel(0, 0, 3, 0).overlaps(&sel(4, 0, 5, 0)));
    }

    #[test]
    fn display_and_debug() {
        let s = sel(0, 1, 2, 1);
        assert_eq!(format!("{s}"), "(0, 1)-(2, 1)");
        assert_eq!(format!("{s:?}"), "Sel(Loc(0,1) ..= Loc(2,1))");
    }

    // -- SelectionSet -------------------------------------------------------

    #[test]
    fn set_sorts_by_origin() {
        let set = SelectionSet::new(vec![sel(0, 2, 1, 2), sel(5, 0, 6, 0), sel(1, 0, 2, 0)]);
        let origins: Vec<_> = set.iter().map(Selection::origin).collect();
        assert_eq!(origins, vec![loc(1, 0), loc(5, 0), loc(0, 2)]);
    }

    #[test]
    fn set_sort_is_stable_for_shared_origins() {
        let wide = sel(0, 0, 6, 0);
        let narrow = sel(0, 0, 2, 0);
        let set = SelectionSet::new(vec![wide, narrow]);
        assert_eq!(set[0], wide);
        assert_eq!(set[1], narrow);
    }

    #[test]
    fn set_from_single_selection() {
        let set = SelectionSet::from(sel(1, 1, 2, 1));
        assert_eq!(set.len(), 1);
        assert_eq!(set.first(), Some(&sel(1, 1, 2, 1)));
        assert_eq!(set.last(), set.first());
    }

    #[test]
    fn empty_set() {
        let set = SelectionSet::default();
        assert!(set.is_empty());
        assert_eq!(set.first(), None);
    }

    #[test]
    fn map_or_keep_keeps_rejected() {
        let set = SelectionSet::new(vec![sel(0, 0, 0, 0), sel(0, 1, 0, 1)]);
        let mapped = set
            .map_or_keep(|s| -> Result<_, ()> {
                Ok((s.origin().row() == 1).then(|| sel(0, 1, 3, 1)))
            })
            .unwrap();
        assert_eq!(mapped.as_slice(), &[sel(0, 0, 0, 0), sel(0, 1, 3, 1)]);
    }

    #[test]
    fn map_or_keep_propagates_errors() {
        let set = SelectionSet::from(sel(0, 0, 0, 0));
        let result = set.map_or_keep(|_| Err::<Option<Selection>, _>("boom"));
        assert_eq!(result, Err("boom"));
    }

    #[test]
    fn map_or_keep_resorts() {
        let set = SelectionSet::new(vec![sel(0, 0, 0, 0), sel(0, 1, 0, 1)]);
        let mapped = set
            .map_or_keep(|s| -> Result<_, ()> {
                Ok(Some(if s.origin().row() == 0 {
                    sel(0, 5, 0, 5)
                } else {
                    *s
                }))
            })
            .unwrap();
        assert_eq!(mapped[0], sel(0, 1, 0, 1));
        assert_eq!(mapped[1], sel(0, 5, 0, 5));
    }

    #[test]
    fn first_overlap_finds_neighbours() {
        let set = SelectionSet::new(vec![sel(0, 0, 4, 0), sel(2, 0, 6, 0), sel(0, 3, 0, 3)]);
        assert_eq!(set.first_overlap(), Some((sel(0, 0, 4, 0), sel(2, 0, 6, 0))));

        let disjoint = SelectionSet::new(vec![sel(0, 0, 1, 0), sel(2, 0, 3, 0)]);
        assert_eq!(disjoint.first_overlap(), None);
    }

    #[test]
    fn collect_into_set() {
        let set: SelectionSet = vec![sel(3, 0, 3, 0), sel(1, 0, 1, 0)].into_iter().collect();
        assert_eq!(set[0], sel(1, 0, 1, 0));
    }
}
