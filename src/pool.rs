//! Segmented candidate pool with pseudo-random gaps.

use std::collections::HashSet;

use rand::{rngs::StdRng, Rng};

/// Partition of `[start, end]` into contiguous segments, each with ~10% of
/// its values knocked out at random.
pub struct GappedPool {
    segments: Vec<(i64, i64)>,
    excluded: HashSet<i64>,
}

impl GappedPool {
    pub fn new(start: i64, end: i64, segment_count: usize, rng: &mut StdRng) -> Self {
        let mut pool = Self {
            segments: Vec::with_capacity(segment_count),
            excluded: HashSet::new(),
        };
        pool.split_segments(start, end, segment_count);
        pool.punch_gaps(rng);
        pool
    }

    fn split_segments(&mut self, start: i64, end: i64, segment_count: usize) {
        let size = end - start + 1;
        let segment_size = size / segment_count as i64;

        for i in 0..segment_count as i64 {
            let lo = start + i * segment_size;
            // Last segment absorbs the division remainder.
            let hi = if i == segment_count as i64 - 1 {
                end
            } else {
                lo + segment_size - 1
            };
            self.segments.push((lo, hi));
        }
    }

    fn punch_gaps(&mut self, rng: &mut StdRng) {
        for &(lo, hi) in &self.segments {
            let segment_size = hi - lo + 1;
            if segment_size <= 0 {
                continue;
            }
            // Strictly less than the segment size, so at least one value
            // survives per non-empty segment.
            let gap_count = segment_size / 10;

            for _ in 0..gap_count {
                // Rejection sampling against values already excluded.
                loop {
                    let n = rng.random_range(lo..=hi);
                    if self.excluded.insert(n) {
                        break;
                    }
                }
            }
        }
    }

    /// All surviving values across all segments, ascending.
    pub fn all_numbers(&self) -> Vec<i64> {
        let mut numbers = Vec::new();
        for &(lo, hi) in &self.segments {
            for n in lo..=hi {
                if !self.excluded.contains(&n) {
                    numbers.push(n);
                }
            }
        }
        numbers
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}
