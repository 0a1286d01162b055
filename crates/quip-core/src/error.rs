//! Error type shared by the document, selector and search modules.
//!
//! Only contract violations and bad patterns are errors. A selector that
//! finds nothing to select returns `Ok(None)`, not an `Err`.

use thiserror::Error;

use crate::location::Location;
use crate::selection::Selection;

/// Errors produced by `quip-core`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A row index past the last row.
    #[error("row {row} is out of range (document has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    /// A location whose row exists but whose column is past the row's
    /// newline slot, or whose row does not exist at all.
    #[error("location {location} is out of range (row length {row_len})")]
    LocationOutOfRange { location: Location, row_len: usize },

    /// Two selections in one batch edit would touch the same text.
    #[error("selections {first:?} and {second:?} overlap")]
    OverlappingSelections { first: Selection, second: Selection },

    /// The search pattern failed to compile.
    #[error("invalid search pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },
}

/// Result alias with [`Error`] as the default error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;
