//! Lazily generated sequences.
//!
//! This module provides [`Iterate`], an immutable and unbounded sequence
//! produced by applying a pure function over and over to a seed:
//!
//! ```text
//! seed, f(seed), f(f(seed)), f(f(f(seed))), ...
//! ```
//!
//! - [`Iterate`]: One node of the sequence; memoizes its value and successor
//! - [`Metadata`]: Persistent key-value map that can be attached to a node
//! - [`IterateError`]: Construction errors
//!
//! # Node Traversal vs Direct Folds
//!
//! Walking the sequence through [`Iterate::successor`] or [`Iterate::iter`]
//! builds and memoizes nodes, so every reader of a shared node benefits from
//! work already done. A single pass that will not be repeated can instead use
//! [`Iterate::reduce`] or [`Iterate::fold`], which drive the transformation
//! directly and allocate nothing.
//!
//! ```rust
//! use lazy_iterate::sequence::Iterate;
//! use std::ops::ControlFlow;
//!
//! let naturals = Iterate::new(|value: &u64| value + 1, 1);
//!
//! // Node traversal: nodes are memoized
//! let squares: Vec<u64> = naturals.iter().map(|value| value * value).take(4).collect();
//! assert_eq!(squares, vec![1, 4, 9, 16]);
//!
//! // Direct fold: stops when the combining function breaks
//! let factorial = naturals.fold(1, |product, value| {
//!     if value > 5 { ControlFlow::Break(product) } else { ControlFlow::Continue(product * value) }
//! });
//! assert_eq!(factorial, 120);
//! ```
//!
//! # Purity
//!
//! The transformation must be pure. Concurrent readers of a node may run it
//! more than once for the same input, and the design relies on every run
//! producing an equal value.

mod error;
mod iter;
mod iterate;
mod metadata;

pub use error::IterateError;
pub use iter::IterateIntoIterator;
pub use iter::IterateIterator;
pub use iterate::Iterate;
pub use iterate::Transform;
pub use iterate::iterate;
pub use metadata::Metadata;
pub use metadata::MetadataIterator;
