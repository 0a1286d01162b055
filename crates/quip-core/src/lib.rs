//! # quip-core: editing core for quip
//!
//! The building blocks of a multi-selection, modal text editor:
//!
//! - **[`location`]** `Location` (column, row), 0-indexed, char columns
//! - **[`selection`]** inclusive `Selection` and the ordered `SelectionSet`
//! - **[`document`]** `Document`: row storage, batch edits over a whole
//!   selection set, search, modification notification
//! - **[`iterator`]** `DocumentIterator` and direction-agnostic `Traversal`
//! - **[`selector`]** word and line selectors
//! - **[`search`]** `SearchExpression`, a compiled regular expression
//! - **[`signal`]** the observer list behind `Document::subscribe`
//!
//! Everything is single-threaded and synchronous. Iterators borrow the
//! document, so the borrow checker rules out holding one across an edit.

pub mod document;
pub mod error;
pub mod iterator;
pub mod location;
pub mod search;
pub mod selection;
pub mod selector;
pub mod signal;

pub use document::Document;
pub use error::{Error, Result};
pub use iterator::{DocumentIterator, Traversal};
pub use location::Location;
pub use search::SearchExpression;
pub use selection::{Selection, SelectionSet};
pub use signal::{Signal, SubscriptionId};
