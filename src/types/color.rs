//! Palette colors, coloring outcomes, and the forbidden-color bitset.

use serde::{Deserialize, Serialize};
use std::fmt;

const WORD_BITS: usize = u64::BITS as usize;

/// Index of a color in the ordered palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorIndex(u32);

impl ColorIndex {
    /// Create a new color index.
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index.
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Palette position as usize.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Color assigned to a vertex by the coloring phase.
///
/// `Conflict` is a legitimate terminal state: every palette slot was already
/// held by a colored neighbor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorOutcome {
    /// A real palette color.
    Color(ColorIndex),
    /// The palette was exhausted.
    Conflict,
}

impl ColorOutcome {
    /// The palette color, or `None` for a conflict.
    pub fn color(&self) -> Option<ColorIndex> {
        match self {
            Self::Color(c) => Some(*c),
            Self::Conflict => None,
        }
    }

    /// Whether this is a conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict)
    }
}

impl fmt::Display for ColorOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(c) => write!(f, "{}", c),
            Self::Conflict => write!(f, "conflict"),
        }
    }
}

/// Fixed-capacity set of palette indices.
///
/// Backed by `u64` words so membership and insertion are O(1) and the
/// first-free scan touches one word per 64 colors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ColorSet {
    words: Vec<u64>,
    capacity: usize,
}

impl ColorSet {
    /// Create an empty set able to hold indices `0..capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: vec![0; capacity.div_ceil(WORD_BITS)],
            capacity,
        }
    }

    /// Number of palette slots this set covers.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add a color. Returns false if it was already present or out of range.
    pub fn insert(&mut self, color: ColorIndex) -> bool {
        let i = color.index();
        if i >= self.capacity {
            return false;
        }
        let mask = 1u64 << (i % WORD_BITS);
        let word = &mut self.words[i / WORD_BITS];
        let fresh = *word & mask == 0;
        *word |= mask;
        fresh
    }

    /// Whether a color is in the set.
    pub fn contains(&self, color: ColorIndex) -> bool {
        let i = color.index();
        i < self.capacity && self.words[i / WORD_BITS] & (1u64 << (i % WORD_BITS)) != 0
    }

    /// Remove every color.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Number of colors in the set.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Whether every palette slot is taken.
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Smallest palette index not in the set.
    pub fn first_free(&self) -> Option<ColorIndex> {
        for (w, word) in self.words.iter().enumerate() {
            let free = !*word;
            if free != 0 {
                let bit = w * WORD_BITS + free.trailing_zeros() as usize;
                // Only the last word has bits past capacity, so a miss here is final.
                return (bit < self.capacity).then_some(ColorIndex::new(bit as u32));
            }
        }
        None
    }

    /// Iterate over the colors in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ColorIndex> + '_ {
        (0..self.capacity)
            .map(|i| ColorIndex::new(i as u32))
            .filter(move |c| self.contains(*c))
    }
}
