//! Selector and sort surface for document lookups
//!
//! Selectors are conjunctions of field predicates evaluated strictly against
//! JSON documents: no type coercion, missing fields never match.

pub mod filter;
pub mod selector;
pub mod sorter;

pub use filter::SelectorFilter;
pub use selector::{FilterOp, Predicate, Selector, SortDirection, SortSpec};
pub use sorter::DocumentSorter;
