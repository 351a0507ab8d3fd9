//! Double-ended working buffer the selector samples from.

use std::collections::VecDeque;
use std::ops::Index;

use rand::{rngs::StdRng, seq::SliceRandom};

/// Ordered buffer of candidate values with cheap reads at both ends, a
/// middle read, and an in-place full reshuffle.
pub struct WorkQueue {
    items: VecDeque<i64>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    pub fn append(&mut self, value: i64) {
        self.items.push_back(value);
    }

    pub fn prepend(&mut self, value: i64) {
        self.items.push_front(value);
    }

    pub fn pop_back(&mut self) -> Option<i64> {
        self.items.pop_back()
    }

    pub fn pop_front(&mut self) -> Option<i64> {
        self.items.pop_front()
    }

    /// Element at index `len / 2`.
    pub fn middle(&self) -> Option<i64> {
        self.items.get(self.items.len() / 2).copied()
    }

    pub fn get(&self, idx: usize) -> Option<i64> {
        self.items.get(idx).copied()
    }

    /// Uniform random permutation of the whole buffer, in place.
    pub fn shuffle(&mut self, rng: &mut StdRng) {
        self.items.make_contiguous().shuffle(rng);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.items.iter().copied()
    }
}

impl Index<usize> for WorkQueue {
    type Output = i64;

    fn index(&self, idx: usize) -> &i64 {
        &self.items[idx]
    }
}
