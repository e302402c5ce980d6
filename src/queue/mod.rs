//! Indexed priority queue.
//!
//! A binary heap paired with a dense position map (element key → heap slot).
//! The map lets a caller change an element's priority from outside the queue
//! and then restore heap order in O(log n) with [`IndexedPriorityQueue::reposition`],
//! which a plain `BinaryHeap` cannot do.
//!
//! ## Invariants
//!
//! - Heap order: no element outranks its parent under the queue's [`PriorityOrder`].
//! - `heap[position[key(x)]] == x` for every queued `x`.
//! - Only queued keys have a position.

pub mod order;

pub use order::{MaxFirst, MinFirst, PriorityOrder};

/// Elements that can live in an [`IndexedPriorityQueue`].
///
/// The key must be a small dense integer: it indexes the position map directly.
pub trait HeapKey {
    /// Dense key identifying this element.
    fn heap_key(&self) -> usize;
}

impl HeapKey for usize {
    fn heap_key(&self) -> usize {
        *self
    }
}

/// Error type for queue operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    /// Peek or extract on an empty queue.
    #[error("Queue is empty")]
    EmptyQueue,
    /// Insert of a key that is already queued.
    #[error("Element with key {key} is already queued")]
    DuplicateElement {
        /// The duplicated key.
        key: usize,
    },
}

/// A broken queue invariant, reported by [`IndexedPriorityQueue::check_invariants`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeapViolation {
    /// A child outranks its parent.
    #[error("Heap order violated: slot {child} outranks parent slot {parent}")]
    OrderViolated {
        /// Parent slot.
        parent: usize,
        /// Child slot.
        child: usize,
    },
    /// The position map disagrees with the heap array.
    #[error("Position map out of sync for key {key} at slot {slot}")]
    PositionMismatch {
        /// Key stored at the slot.
        key: usize,
        /// Heap slot.
        slot: usize,
    },
    /// A key that is no longer queued still has a position.
    #[error("Stale position entry for key {key}")]
    StalePosition {
        /// The stale key.
        key: usize,
    },
}

/// Binary heap with an element → slot index.
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<T, O> {
    /// Heap array, root at slot 0; parent of `i` is `(i - 1) / 2`.
    heap: Vec<T>,
    /// Slot of each queued key, indexed by key.
    position: Vec<Option<usize>>,
    order: O,
}

impl<T: HeapKey, O: PriorityOrder<T>> IndexedPriorityQueue<T, O> {
    /// Create an empty queue.
    pub fn new(order: O) -> Self {
        Self {
            heap: Vec::new(),
            position: Vec::new(),
            order,
        }
    }

    /// Create an empty queue sized for keys `0..capacity`.
    pub fn with_capacity(capacity: usize, order: O) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            position: vec![None; capacity],
            order,
        }
    }

    /// Build a queue from arbitrary items in O(n).
    pub fn from_items<I>(items: I, order: O) -> Result<Self, QueueError>
    where
        I: IntoIterator<Item = T>,
    {
        let mut queue = Self::new(order);
        for item in items {
            let key = item.heap_key();
            if queue.contains(key) {
                return Err(QueueError::DuplicateElement { key });
            }
            queue.ensure_key(key);
            queue.position[key] = Some(queue.heap.len());
            queue.heap.push(item);
        }
        for slot in (0..queue.heap.len() / 2).rev() {
            queue.sift_down(slot);
        }
        Ok(queue)
    }

    /// Add an element. O(log n).
    pub fn insert(&mut self, item: T) -> Result<(), QueueError> {
        let key = item.heap_key();
        if self.contains(key) {
            return Err(QueueError::DuplicateElement { key });
        }
        self.ensure_key(key);
        let slot = self.heap.len();
        self.heap.push(item);
        self.position[key] = Some(slot);
        self.sift_up(slot);
        Ok(())
    }

    /// Highest-priority element, without removing it. O(1).
    pub fn peek_top(&self) -> Result<&T, QueueError> {
        self.heap.first().ok_or(QueueError::EmptyQueue)
    }

    /// Remove and return the highest-priority element. O(log n).
    pub fn extract_top(&mut self) -> Result<T, QueueError> {
        if self.heap.is_empty() {
            return Err(QueueError::EmptyQueue);
        }
        let top = self.heap.swap_remove(0);
        self.position[top.heap_key()] = None;
        if let Some(moved) = self.heap.first() {
            let key = moved.heap_key();
            self.position[key] = Some(0);
            self.sift_down(0);
        }
        Ok(top)
    }

    /// Replace the queued element sharing `item`'s key and restore heap order.
    ///
    /// Call this after the element's priority changed outside the queue. Sifts
    /// up if the element now outranks its parent, otherwise sifts down; never
    /// both. Returns false, leaving the queue untouched, if the key is not
    /// queued. O(log n).
    pub fn reposition(&mut self, item: T) -> bool {
        let Some(slot) = self.slot_of(item.heap_key()) else {
            return false;
        };
        self.heap[slot] = item;
        if slot > 0 && self.order.outranks(&self.heap[slot], &self.heap[(slot - 1) / 2]) {
            self.sift_up(slot);
        } else {
            self.sift_down(slot);
        }
        true
    }

    /// Whether an element with this key is queued.
    pub fn contains(&self, key: usize) -> bool {
        self.slot_of(key).is_some()
    }

    /// The queued element with this key.
    pub fn get(&self, key: usize) -> Option<&T> {
        self.slot_of(key).map(|slot| &self.heap[slot])
    }

    /// Number of queued elements.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.position.iter_mut().for_each(|p| *p = None);
    }

    /// Iterate over queued elements in heap-array order (not priority order).
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.heap.iter()
    }

    /// The order strategy.
    pub fn order(&self) -> &O {
        &self.order
    }

    /// Re-derive every queue invariant from scratch.
    pub fn check_invariants(&self) -> Result<(), HeapViolation> {
        for child in 1..self.heap.len() {
            let parent = (child - 1) / 2;
            if self.order.outranks(&self.heap[child], &self.heap[parent]) {
                return Err(HeapViolation::OrderViolated { parent, child });
            }
        }
        for (slot, item) in self.heap.iter().enumerate() {
            let key = item.heap_key();
            if self.slot_of(key) != Some(slot) {
                return Err(HeapViolation::PositionMismatch { key, slot });
            }
        }
        let mapped = self.position.iter().filter(|p| p.is_some()).count();
        if mapped != self.heap.len() {
            for (key, entry) in self.position.iter().enumerate() {
                let live = entry
                    .map(|slot| slot < self.heap.len() && self.heap[slot].heap_key() == key)
                    .unwrap_or(true);
                if !live {
                    return Err(HeapViolation::StalePosition { key });
                }
            }
        }
        Ok(())
    }

    fn slot_of(&self, key: usize) -> Option<usize> {
        self.position.get(key).copied().flatten()
    }

    fn ensure_key(&mut self, key: usize) {
        if key >= self.position.len() {
            self.position.resize(key + 1, None);
        }
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        let key_a = self.heap[a].heap_key();
        let key_b = self.heap[b].heap_key();
        self.position[key_a] = Some(a);
        self.position[key_b] = Some(b);
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if !self.order.outranks(&self.heap[slot], &self.heap[parent]) {
                break;
            }
            self.swap_slots(slot, parent);
            slot = parent;
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            // Promote the strictly higher-priority child.
            let child = if right < len && self.order.outranks(&self.heap[right], &self.heap[left]) {
                right
            } else {
                left
            };
            if !self.order.outranks(&self.heap[child], &self.heap[slot]) {
                break;
            }
            self.swap_slots(slot, child);
            slot = child;
        }
    }
}

impl<'a, T, O> IntoIterator for &'a IndexedPriorityQueue<T, O> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.heap.iter()
    }
}
