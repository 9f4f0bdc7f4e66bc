//! Lazily generated, memoized sequence of repeated function application.
//!
//! This module provides [`Iterate`], the sequence `seed, f(seed), f(f(seed)), ...`.
//! Each node computes its own value and its successor only when asked, and
//! remembers both for every later reader.
//!
//! # Overview
//!
//! - O(1) head access after the first computation
//! - O(1) successor access after the first allocation
//! - Direct folds ([`Iterate::reduce`], [`Iterate::fold`]) that drive the
//!   transformation without allocating nodes
//!
//! # Memoization Under Races
//!
//! The head and successor of a node are held in write-once cells. The
//! transformation runs, and candidate successors are allocated, before the
//! cell is touched and without holding any lock. Two threads racing on the
//! same unrealized node may both invoke the transformation; the first value
//! published wins and both callers return it.
//!
//! This is only sound because the transformation is required to be pure:
//! every redundant computation produces a value equal to the published one.
//!
//! # Examples
//!
//! ```rust
//! use lazy_iterate::sequence::Iterate;
//!
//! let powers = Iterate::new(|value: &u64| value * 2, 1);
//! assert_eq!(*powers.head(), 1);
//! assert_eq!(*powers.successor().head(), 2);
//!
//! let first: Vec<u64> = powers.iter().take(5).copied().collect();
//! assert_eq!(first, vec![1, 2, 4, 8, 16]);
//! ```

use std::fmt;
use std::ops::ControlFlow;
use std::sync::{Arc, OnceLock};

use static_assertions::assert_impl_all;

use super::error::IterateError;
use super::iter::IterateIterator;
use super::metadata::Metadata;

/// Shared transformation driving a sequence.
///
/// The function must be pure: given equal inputs it returns equal outputs and
/// has no observable side effects.
pub type Transform<T> = Arc<dyn Fn(&T) -> T + Send + Sync>;

/// Internal node structure for the sequence.
///
/// `base` is the value this node's head is derived from. The root stores the
/// seed in both `base` and `head`; derived nodes start with an empty `head`.
struct Node<T> {
    metadata: Metadata,
    transform: Transform<T>,
    base: T,
    /// Empty until realized; never reset.
    head: OnceLock<T>,
    /// Empty until the successor is first requested; never reset.
    successor: OnceLock<Iterate<T>>,
}

impl<T> Drop for Node<T> {
    // Unlinks the realized chain iteratively so that dropping a long
    // sequence does not recurse once per node.
    fn drop(&mut self) {
        let mut next = self.successor.take();
        while let Some(successor) = next {
            next = match Arc::try_unwrap(successor.node) {
                Ok(mut node) => node.successor.take(),
                Err(_) => None,
            };
        }
    }
}

/// A lazily evaluated, immutable, unbounded sequence generated by repeated
/// application of a pure transformation to a seed.
///
/// An `Iterate` is a handle to one node of the sequence. Cloning the handle
/// is O(1) and shares the node, including everything it has memoized.
///
/// # Time Complexity
///
/// | Operation       | Complexity                          |
/// |-----------------|-------------------------------------|
/// | `new`           | O(1)                                |
/// | `head`          | O(1) plus one transform if unrealized |
/// | `successor`     | O(1) plus one allocation if unset   |
/// | `with_metadata` | O(1)                                |
/// | `drop_first`    | O(n)                                |
///
/// # Thread Safety
///
/// `Iterate<T>` is `Send + Sync` whenever `T: Send + Sync`. Concurrent
/// readers of one node may compute the same value more than once but always
/// observe the same memoized value and the same successor node.
///
/// # Examples
///
/// ```rust
/// use lazy_iterate::sequence::Iterate;
///
/// let naturals = Iterate::new(|value: &i32| value + 1, 0);
/// let third = naturals.drop_first(2);
/// assert_eq!(*third.head(), 2);
/// ```
pub struct Iterate<T> {
    node: Arc<Node<T>>,
}

assert_impl_all!(Iterate<i32>: Send, Sync);
assert_impl_all!(Iterate<String>: Send, Sync, Clone);

/// Creates the sequence `seed, transform(seed), transform(transform(seed)), ...`.
///
/// Shorthand for [`Iterate::new`].
///
/// # Examples
///
/// ```rust
/// use lazy_iterate::sequence::iterate;
///
/// let doubling = iterate(|value: &i32| value * 2, 3);
/// assert_eq!(doubling.iter().nth(3), Some(&24));
/// ```
#[inline]
pub fn iterate<T, F>(transform: F, seed: T) -> Iterate<T>
where
    T: Clone,
    F: Fn(&T) -> T + Send + Sync + 'static,
{
    Iterate::new(transform, seed)
}

impl<T: Clone> Iterate<T> {
    /// Creates the root of a sequence.
    ///
    /// The root's head is `seed` itself; nothing is computed until a
    /// successor is requested.
    ///
    /// # Arguments
    ///
    /// * `transform` - The pure function applied to produce each next value
    /// * `seed` - The first value of the sequence
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_iterate::sequence::Iterate;
    ///
    /// let sequence = Iterate::new(|value: &i32| value + 1, 10);
    /// assert_eq!(*sequence.head(), 10);
    /// assert!(sequence.is_realized());
    /// ```
    #[inline]
    #[must_use]
    pub fn new<F>(transform: F, seed: T) -> Self
    where
        F: Fn(&T) -> T + Send + Sync + 'static,
    {
        Self::root(Arc::new(transform), seed)
    }

    /// Creates the root of a sequence from an already shared transformation.
    ///
    /// Several sequences may be built from one `Transform` without copying it.
    #[inline]
    #[must_use]
    pub fn from_transform(transform: Transform<T>, seed: T) -> Self {
        Self::root(transform, seed)
    }

    /// Creates the root of a sequence from a transformation that may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`IterateError::MissingTransform`] when `transform` is `None`.
    /// The check happens here, never on a later access.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_iterate::sequence::{Iterate, IterateError, Transform};
    /// use std::sync::Arc;
    ///
    /// let transform: Transform<i32> = Arc::new(|value: &i32| value + 1);
    /// let sequence = Iterate::try_new(Some(transform), 0).unwrap();
    /// assert_eq!(*sequence.successor().head(), 1);
    ///
    /// assert_eq!(
    ///     Iterate::<i32>::try_new(None, 0).unwrap_err(),
    ///     IterateError::MissingTransform
    /// );
    /// ```
    pub fn try_new(transform: Option<Transform<T>>, seed: T) -> Result<Self, IterateError> {
        transform
            .map(|transform| Self::root(transform, seed))
            .ok_or(IterateError::MissingTransform)
    }

    fn root(transform: Transform<T>, seed: T) -> Self {
        Self::from_parts(
            Metadata::new(),
            transform,
            seed.clone(),
            OnceLock::from(seed),
        )
    }

    /// Builds a derived node whose head is still unrealized.
    fn derived(metadata: Metadata, transform: Transform<T>, base: T) -> Self {
        Self::from_parts(metadata, transform, base, OnceLock::new())
    }

    /// Returns the node following this one.
    ///
    /// The first call forces this node's head and allocates the successor,
    /// whose own head stays unrealized until asked for. Later calls return
    /// the same node.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by the transformation while forcing the
    /// head; the successor slot stays empty in that case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_iterate::sequence::Iterate;
    ///
    /// let sequence = Iterate::new(|value: &i32| value + 1, 0);
    /// let next = sequence.successor();
    /// assert!(!next.is_realized());
    /// assert_eq!(*next.head(), 1);
    /// assert!(next.ptr_eq(sequence.successor()));
    /// ```
    pub fn successor(&self) -> &Self {
        if let Some(successor) = self.node.successor.get() {
            return successor;
        }
        let candidate = Self::derived(
            Metadata::new(),
            Arc::clone(&self.node.transform),
            self.head().clone(),
        );
        // A candidate built by a losing racer is dropped here.
        self.node.successor.get_or_init(|| {
            tracing::trace!("published successor node");
            candidate
        })
    }

    /// Returns the node `count` positions further along the sequence.
    ///
    /// Every node passed over is memoized.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_iterate::sequence::Iterate;
    ///
    /// let sequence = Iterate::new(|value: &i32| value + 3, 0);
    /// assert_eq!(*sequence.drop_first(4).head(), 12);
    /// assert!(sequence.drop_first(0).ptr_eq(&sequence));
    /// ```
    pub fn drop_first(&self, count: usize) -> &Self {
        let mut current = self;
        for _ in 0..count {
            current = current.successor();
        }
        current
    }

    /// Returns a node with the given metadata and the same position.
    ///
    /// The new node shares the transformation and base of `self`, and keeps
    /// its head if already realized. Nothing is forced. The new node has its
    /// own successor slot, filled lazily on demand.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_iterate::sequence::{Iterate, Metadata};
    ///
    /// let sequence = Iterate::new(|value: &i32| value + 1, 0);
    /// let tagged = sequence.with_metadata(Metadata::new().insert("name", "naturals"));
    ///
    /// assert_eq!(tagged.metadata().get("name"), Some("naturals"));
    /// assert!(sequence.metadata().is_empty());
    /// assert_eq!(tagged.head(), sequence.head());
    /// ```
    #[must_use]
    pub fn with_metadata(&self, metadata: Metadata) -> Self {
        Self::from_parts(
            metadata,
            Arc::clone(&self.node.transform),
            self.node.base.clone(),
            self.node.head.clone(),
        )
    }

    /// Folds the sequence starting from this node's value, without an
    /// explicit initial accumulator.
    ///
    /// The accumulator starts at this node's value (the seed, for a root) and
    /// the first value combined into it is the next value of the sequence.
    /// After each step the transformation is applied once more. The loop only
    /// ends when `combine` returns [`ControlFlow::Break`], whose payload is
    /// returned.
    ///
    /// No nodes are allocated and no memo cell is written. A derived node
    /// whose head is unrealized has its starting value computed transiently.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by `combine` or the transformation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_iterate::sequence::Iterate;
    /// use std::ops::ControlFlow;
    ///
    /// let naturals = Iterate::new(|value: &i32| value + 1, 0);
    /// let total = naturals.reduce(|accumulator, value| {
    ///     let sum = accumulator + value;
    ///     if sum >= 10 { ControlFlow::Break(sum) } else { ControlFlow::Continue(sum) }
    /// });
    /// assert_eq!(total, 10); // 0+1, 1+2, 3+3, 6+4
    /// ```
    pub fn reduce<F>(&self, mut combine: F) -> T
    where
        F: FnMut(T, T) -> ControlFlow<T, T>,
    {
        let transform = &self.node.transform;
        let mut accumulator = self.position_value();
        let mut value = transform(&accumulator);
        let mut steps: usize = 0;
        loop {
            steps = steps.saturating_add(1);
            match combine(accumulator, value.clone()) {
                ControlFlow::Break(result) => {
                    tracing::trace!(steps, "reduce short-circuited");
                    return result;
                }
                ControlFlow::Continue(next) => accumulator = next,
            }
            value = transform(&value);
        }
    }

    /// Folds the sequence starting from this node's value into `init`.
    ///
    /// The first value combined into `init` is this node's own value (the
    /// seed, for a root). The loop only ends when `combine` returns
    /// [`ControlFlow::Break`], whose payload is returned.
    ///
    /// Like [`Iterate::reduce`], this never allocates nodes or writes memo
    /// cells.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by `combine` or the transformation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_iterate::sequence::Iterate;
    /// use std::ops::ControlFlow;
    ///
    /// let naturals = Iterate::new(|value: &i32| value + 1, 0);
    /// let firsts = naturals.fold(Vec::new(), |mut collected, value| {
    ///     collected.push(value);
    ///     if collected.len() == 3 {
    ///         ControlFlow::Break(collected)
    ///     } else {
    ///         ControlFlow::Continue(collected)
    ///     }
    /// });
    /// assert_eq!(firsts, vec![0, 1, 2]);
    /// ```
    pub fn fold<B, F>(&self, init: B, mut combine: F) -> B
    where
        F: FnMut(B, T) -> ControlFlow<B, B>,
    {
        let transform = &self.node.transform;
        let mut accumulator = init;
        let mut value = self.position_value();
        let mut steps: usize = 0;
        loop {
            steps = steps.saturating_add(1);
            match combine(accumulator, value.clone()) {
                ControlFlow::Break(result) => {
                    tracing::trace!(steps, "fold short-circuited");
                    return result;
                }
                ControlFlow::Continue(next) => accumulator = next,
            }
            value = transform(&value);
        }
    }

    /// Returns a borrowing iterator over the values from this node onwards.
    ///
    /// The iterator walks, and therefore memoizes, the node chain. It never
    /// ends; bound it with `take` or similar adapters.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_iterate::sequence::Iterate;
    ///
    /// let sequence = Iterate::new(|value: &i32| value * 3, 1);
    /// let values: Vec<i32> = sequence.iter().take(4).copied().collect();
    /// assert_eq!(values, vec![1, 3, 9, 27]);
    /// ```
    #[inline]
    pub const fn iter(&self) -> IterateIterator<'_, T> {
        IterateIterator::new(self)
    }

    /// This node's value, without memoizing it.
    fn position_value(&self) -> T {
        self.node
            .head
            .get()
            .map_or_else(|| (self.node.transform)(&self.node.base), T::clone)
    }
}

impl<T> Iterate<T> {
    fn from_parts(metadata: Metadata, transform: Transform<T>, base: T, head: OnceLock<T>) -> Self {
        Self {
            node: Arc::new(Node {
                metadata,
                transform,
                base,
                head,
                successor: OnceLock::new(),
            }),
        }
    }

    /// Returns the value at this node's position.
    ///
    /// The first call on a derived node applies the transformation to the
    /// node's base and memoizes the result; later calls return it directly.
    ///
    /// # Panics
    ///
    /// Propagates any panic raised by the transformation; the head stays
    /// unrealized and the next call tries again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lazy_iterate::sequence::Iterate;
    ///
    /// let sequence = Iterate::new(|value: &String| format!("{value}!"), "hey".to_string());
    /// assert_eq!(sequence.successor().head(), "hey!");
    /// ```
    pub fn head(&self) -> &T {
        if let Some(head) = self.node.head.get() {
            return head;
        }
        let computed = (self.node.transform)(&self.node.base);
        self.node.head.get_or_init(|| computed)
    }

    /// Returns `true` if this node's head has been computed.
    ///
    /// Never forces computation. A root is realized from creation.
    #[inline]
    pub fn is_realized(&self) -> bool {
        self.node.head.get().is_some()
    }

    /// Returns the metadata attached to this node.
    #[inline]
    pub fn metadata(&self) -> &Metadata {
        &self.node.metadata
    }

    /// Returns the transformation shared by every node of this sequence.
    #[inline]
    pub fn transform(&self) -> &Transform<T> {
        &self.node.transform
    }

    /// Returns `true` if both handles refer to the same node.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl<T> Clone for Iterate<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iterate<T> {
    /// Prints the realized prefix of the sequence without forcing anything.
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Iterate")?;
        let mut list = formatter.debug_list();
        let mut cursor = Some(self);
        while let Some(current) = cursor {
            let Some(head) = current.node.head.get() else {
                break;
            };
            list.entry(head);
            cursor = current.node.successor.get();
        }
        list.entry(&format_args!("..")).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
