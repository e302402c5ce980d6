//! Priority order strategies for the indexed queue.

use std::cmp::Ordering;

/// Strict total order deciding which element sits closer to the root.
///
/// `compare(a, b)` returns `Greater` when `a` has higher priority than `b`.
/// The order must be total over queued elements: two distinct queued elements
/// must never compare `Equal`, or extraction order becomes arbitrary.
pub trait PriorityOrder<T> {
    /// Compare two elements by priority.
    fn compare(&self, a: &T, b: &T) -> Ordering;

    /// Whether `a` strictly outranks `b`.
    fn outranks(&self, a: &T, b: &T) -> bool {
        self.compare(a, b) == Ordering::Greater
    }
}

/// Largest element (by `Ord`) at the root.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxFirst;

impl<T: Ord> PriorityOrder<T> for MaxFirst {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Smallest element (by `Ord`) at the root.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinFirst;

impl<T: Ord> PriorityOrder<T> for MinFirst {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        b.cmp(a)
    }
}

impl<T, F> PriorityOrder<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
