//! Errors raised while constructing an iteration sequence.

use std::fmt;

/// Error returned when an [`Iterate`](super::Iterate) cannot be constructed.
///
/// Construction is the only fallible step of the sequence: once a root node
/// exists, every access either returns a value or propagates whatever the
/// transformation itself raises.
///
/// # Examples
///
/// ```rust
/// use lazy_iterate::sequence::{Iterate, IterateError};
///
/// let result = Iterate::<i32>::try_new(None, 0);
/// assert_eq!(result.unwrap_err(), IterateError::MissingTransform);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IterateError {
    /// No transformation was supplied for the sequence.
    MissingTransform,
}

impl fmt::Display for IterateError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTransform => write!(
                formatter,
                "Iterate: a transformation is required to build the sequence"
            ),
        }
    }
}

impl std::error::Error for IterateError {}
