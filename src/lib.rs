//! # lazy-iterate
//!
//! A lazily evaluated, immutable, unbounded sequence generated by repeated
//! application of a pure function to a seed.
//!
//! ## Overview
//!
//! - **Lazy generation**: nothing is computed until a value is asked for
//! - **Memoization**: each node remembers its value and its successor, and
//!   shares them safely between threads
//! - **Direct folds**: short-circuiting folds that drive the function without
//!   building nodes
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`sequence::Metadata`]
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use lazy_iterate::prelude::*;
//!
//! let powers = iterate(|value: &u32| value * 2, 1);
//! let values: Vec<u32> = powers.iter().take(4).copied().collect();
//! assert_eq!(values, vec![1, 2, 4, 8]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports commonly used types and functions.
///
/// # Usage
///
/// ```rust
/// use lazy_iterate::prelude::*;
/// ```
pub mod prelude {
    pub use crate::sequence::*;
}

pub mod sequence;
