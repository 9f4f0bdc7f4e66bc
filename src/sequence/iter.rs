//! Node-by-node traversal of an [`Iterate`] sequence.
//!
//! Both iterators are unbounded. [`IterateIterator`] borrows the starting node
//! and memoizes every node it passes, so the whole walked prefix stays alive
//! as long as the start does. [`IterateIntoIterator`] owns its cursor and lets
//! go of each node as it moves on, so nodes nobody else holds are freed.

use std::iter::FusedIterator;

use super::iterate::Iterate;

/// Borrowing iterator over the values of an [`Iterate`].
///
/// Created by [`Iterate::iter`].
pub struct IterateIterator<'a, T> {
    current: &'a Iterate<T>,
}

impl<'a, T> IterateIterator<'a, T> {
    #[inline]
    pub(super) const fn new(start: &'a Iterate<T>) -> Self {
        Self { current: start }
    }
}

impl<'a, T: Clone> Iterator for IterateIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current: &'a Iterate<T> = self.current;
        let head = current.head();
        self.current = current.successor();
        Some(head)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<T: Clone> FusedIterator for IterateIterator<'_, T> {}

/// Owning iterator over the values of an [`Iterate`].
///
/// Created by [`IntoIterator::into_iter`] on an `Iterate<T>`.
pub struct IterateIntoIterator<T> {
    current: Iterate<T>,
}

impl<T: Clone> Iterator for IterateIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.current.head().clone();
        let successor = self.current.successor().clone();
        self.current = successor;
        Some(head)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<T: Clone> FusedIterator for IterateIntoIterator<T> {}

impl<T: Clone> IntoIterator for Iterate<T> {
    type Item = T;
    type IntoIter = IterateIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        IterateIntoIterator { current: self }
    }
}

impl<'a, T: Clone> IntoIterator for &'a Iterate<T> {
    type Item = &'a T;
    type IntoIter = IterateIterator<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_iter_memoizes_walked_prefix() {
        let sequence = Iterate::new(|value: &i32| value + 1, 0);
        let _ = sequence.iter().nth(3);

        let third = sequence.drop_first(3);
        assert!(third.is_realized());
        assert!(!sequence.drop_first(4).is_realized());
    }

    #[rstest]
    fn test_into_iter_yields_owned_values() {
        let sequence = Iterate::new(|value: &String| format!("{value}a"), String::new());
        let values: Vec<String> = sequence.into_iter().take(3).collect();
        assert_eq!(values, vec!["", "a", "aa"]);
    }

    #[rstest]
    fn test_into_iter_shares_nodes_with_retained_handle() {
        let sequence = Iterate::new(|value: &i32| value + 1, 0);
        let _ = sequence.clone().into_iter().nth(2);
        assert!(sequence.drop_first(2).is_realized());
    }

    #[rstest]
    fn test_borrowed_into_iter_in_for_loop() {
        let sequence = Iterate::new(|value: &i32| value * 2, 1);
        let mut collected = Vec::new();
        for value in &sequence {
            if *value > 16 {
                break;
            }
            collected.push(*value);
        }
        assert_eq!(collected, vec![1, 2, 4, 8, 16]);
    }
}
