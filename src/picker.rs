//! Orchestrates the pool, queue, selector, and mixers into single picks.

use std::collections::VecDeque;

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::error::PickerError;
use crate::heap::{MaxHeap, MinHeap};
use crate::mix::{BitwiseMixer, HashMixer, MathMixer};
use crate::pool::GappedPool;
use crate::queue::WorkQueue;
use crate::select::CandidateSelector;

const DEFAULT_SEGMENTS: usize = 5;
const HISTORY_CAP: usize = 1000;
const RESHUFFLE_EVERY: u64 = 7;
const REGION_COUNT: u64 = 10;

/// Order tag for the per-candidate mixer permutation.
#[derive(Clone, Copy)]
enum Mix {
    Bitwise,
    Math,
    Hash,
}

/// Produces integers in `[start, end]` through the obfuscation pipeline.
///
/// One instance per `(start, end, segment_count)` configuration; rebuild on
/// change, which regenerates all gaps, salts, and keys and clears history.
pub struct Picker {
    start: i64,
    end: i64,
    size: u64,
    rng: StdRng,
    pool: GappedPool,
    // Built from the pool alongside the queue and kept for the lifetime of
    // the picker; selection never consults them.
    min_heap: MinHeap,
    max_heap: MaxHeap,
    queue: WorkQueue,
    selector: CandidateSelector,
    bitwise: BitwiseMixer,
    math: MathMixer,
    hash: HashMixer,
    history: VecDeque<i64>,
}

impl Picker {
    /// Builds a picker over `[start, end]` with the default segment count.
    pub fn new(start: i64, end: i64) -> Result<Self, PickerError> {
        Self::with_segment_count(start, end, DEFAULT_SEGMENTS)
    }

    pub fn with_segment_count(
        start: i64,
        end: i64,
        segment_count: usize,
    ) -> Result<Self, PickerError> {
        if start >= end {
            return Err(PickerError::Configuration(format!(
                "start {start} must be below end {end}"
            )));
        }
        if segment_count == 0 {
            return Err(PickerError::Configuration(
                "segment count must be at least 1".to_string(),
            ));
        }

        let mut rng = StdRng::from_os_rng();
        let pool = GappedPool::new(start, end, segment_count, &mut rng);

        let mut min_heap = MinHeap::new();
        let mut max_heap = MaxHeap::new();
        let mut queue = WorkQueue::new();
        for n in pool.all_numbers() {
            min_heap.insert(n);
            max_heap.insert(n);
            queue.append(n);
        }

        let hash = HashMixer::new(&mut rng);
        Ok(Self {
            start,
            end,
            size: (end - start + 1) as u64,
            rng,
            pool,
            min_heap,
            max_heap,
            queue,
            selector: CandidateSelector::new(),
            bitwise: BitwiseMixer::new(),
            math: MathMixer::new(),
            hash,
            history: VecDeque::with_capacity(HISTORY_CAP + 1),
        })
    }

    /// Produces the next value in `[start, end]`.
    pub fn pick(&mut self) -> Result<i64, PickerError> {
        let candidates = self.selector.select(&self.queue, &mut self.rng)?;

        // Each candidate runs through all three mixers in a fresh random
        // order, chaining outputs.
        let transformed: Vec<u64> = candidates
            .iter()
            .map(|&candidate| {
                let mut order = [Mix::Bitwise, Mix::Math, Mix::Hash];
                order.shuffle(&mut self.rng);
                let mut value = candidate as u64;
                for stage in order {
                    value = match stage {
                        Mix::Bitwise => self.bitwise.transform(&mut self.rng, value),
                        Mix::Math => self.math.transform(&mut self.rng, value),
                        Mix::Hash => self.hash.transform(&mut self.rng, value),
                    };
                }
                value
            })
            .collect();

        let result = self.reduce(&transformed);

        if self.selector.calls() % RESHUFFLE_EVERY == 0 {
            self.queue.shuffle(&mut self.rng);
        }

        self.history.push_back(result);
        if self.history.len() > HISTORY_CAP {
            self.history.pop_front();
        }

        Ok(result)
    }

    /// Reduces the transformed candidates through four parallel strategies
    /// and keeps one at random.
    fn reduce(&mut self, transformed: &[u64]) -> i64 {
        let mut finals = Vec::with_capacity(4);

        finals.push(self.start + (transformed[0] % self.size) as i64);
        finals.push(self.start + (transformed[1].reverse_bits() % self.size) as i64);

        let folded = transformed.iter().fold(0u64, |acc, &t| acc ^ t);
        finals.push(self.start + (folded % self.size) as i64);

        if let Some(adaptive) = region_pick(
            &self.history,
            self.start,
            self.end,
            self.size,
            &mut self.rng,
        ) {
            finals.push(adaptive);
        }

        finals[self.rng.random_range(0..finals.len())]
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Previously produced values, oldest first, at most the last 1000.
    pub fn history(&self) -> impl ExactSizeIterator<Item = i64> + '_ {
        self.history.iter().copied()
    }

    /// Smallest and largest surviving pool values, from the heap peeks.
    pub fn pool_extremes(&self) -> Option<(i64, i64)> {
        self.min_heap.peek().zip(self.max_heap.peek())
    }

    pub fn survivor_count(&self) -> usize {
        self.queue.len()
    }

    pub fn excluded_count(&self) -> usize {
        self.pool.excluded_count()
    }
}

/// Picks a uniform value inside a random under-represented tenth of the
/// range, judged against the history's mean hits per region. `None` without
/// history; the whole range when every region is at or above the mean.
fn region_pick(
    history: &VecDeque<i64>,
    start: i64,
    end: i64,
    size: u64,
    rng: &mut StdRng,
) -> Option<i64> {
    if history.is_empty() {
        return None;
    }

    let region_size = (size / REGION_COUNT).max(1);
    let mut counts = [0u64; REGION_COUNT as usize];
    for &n in history {
        let idx = ((n - start) as u64 / region_size).min(REGION_COUNT - 1);
        counts[idx as usize] += 1;
    }

    let mean = counts.iter().sum::<u64>() as f64 / REGION_COUNT as f64;
    let mut sparse: Vec<(i64, i64)> = Vec::new();
    for (idx, &count) in counts.iter().enumerate() {
        if (count as f64) < mean {
            let lo = start + (idx as u64 * region_size) as i64;
            if lo > end {
                // Ranges narrower than ten values leave trailing regions
                // with nothing under them.
                continue;
            }
            let hi = (lo + region_size as i64 - 1).min(end);
            sparse.push((lo, hi));
        }
    }

    let (lo, hi) = if sparse.is_empty() {
        (start, end)
    } else {
        sparse[rng.random_range(0..sparse.len())]
    };
    Some(rng.random_range(lo..=hi))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(12345)
    }

    #[test]
    fn region_pick_needs_history() {
        let mut rng = seeded_rng();
        assert_eq!(region_pick(&VecDeque::new(), 1, 100, 100, &mut rng), None);
    }

    #[test]
    fn region_pick_stays_inside_the_range() {
        let mut rng = seeded_rng();
        let history: VecDeque<i64> = (1..=30).collect();
        for _ in 0..500 {
            let n = region_pick(&history, 1, 100, 100, &mut rng).unwrap();
            assert!((1..=100).contains(&n));
        }
    }

    #[test]
    fn region_pick_favors_unvisited_regions() {
        let mut rng = seeded_rng();
        // Every historical hit sits in the first tenth of [1, 100].
        let history: VecDeque<i64> = std::iter::repeat(5).take(50).collect();
        for _ in 0..500 {
            let n = region_pick(&history, 1, 100, 100, &mut rng).unwrap();
            // The saturated first region [1, 10] never qualifies.
            assert!(n > 10);
        }
    }

    #[test]
    fn region_pick_handles_ranges_narrower_than_ten() {
        let mut rng = seeded_rng();
        let history: VecDeque<i64> = vec![1, 1, 2].into();
        for _ in 0..500 {
            let n = region_pick(&history, 1, 4, 4, &mut rng).unwrap();
            assert!((1..=4).contains(&n));
        }
    }

    #[test]
    fn queue_length_is_stable_across_picks() {
        let mut picker = Picker::new(1, 100).unwrap();
        let before = picker.survivor_count();
        for _ in 0..20 {
            picker.pick().unwrap();
        }
        assert_eq!(picker.survivor_count(), before);
    }

    #[test]
    fn selector_counter_tracks_picks() {
        let mut picker = Picker::new(1, 100).unwrap();
        for expected in 1..=14u64 {
            picker.pick().unwrap();
            assert_eq!(picker.selector.calls(), expected);
        }
    }

    #[test]
    fn pool_extremes_come_from_the_heaps() {
        let picker = Picker::with_segment_count(1, 20, 5).unwrap();
        // No gaps at this size, so the heaps hold the full range.
        assert_eq!(picker.pool_extremes(), Some((1, 20)));
        assert_eq!(picker.excluded_count(), 0);
    }

    #[test]
    fn degenerate_survivor_sets_error_at_pick_time() {
        // [0, 2] yields three survivors, below the sampling minimum.
        let mut picker = Picker::new(0, 2).unwrap();
        assert!(matches!(
            picker.pick(),
            Err(PickerError::EmptyStructure { needed: 4, .. })
        ));
    }
}
