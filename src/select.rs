//! Multi-position candidate sampling over the working queue.

use rand::{rngs::StdRng, Rng};

use crate::error::PickerError;
use crate::queue::WorkQueue;

/// Fewest queue elements the sampling positions are well-defined for.
const MIN_QUEUE_LEN: usize = 4;

/// Draws 4-6 candidates per call from fixed positions (both ends, middle)
/// plus one uniform random position, and counts how often it has run.
pub struct CandidateSelector {
    calls: u64,
}

impl CandidateSelector {
    pub fn new() -> Self {
        Self { calls: 0 }
    }

    pub fn select(
        &mut self,
        queue: &WorkQueue,
        rng: &mut StdRng,
    ) -> Result<Vec<i64>, PickerError> {
        let len = queue.len();
        if len < MIN_QUEUE_LEN {
            return Err(PickerError::EmptyStructure {
                structure: "work queue",
                needed: MIN_QUEUE_LEN,
                len,
            });
        }

        let mut candidates = Vec::with_capacity(6);
        candidates.push(queue[0]);
        if rng.random_bool(0.5) {
            candidates.push(queue[1]);
        }
        candidates.push(queue[len - 1]);
        if rng.random_bool(0.5) {
            candidates.push(queue[len - 2]);
        }
        candidates.push(queue[len / 2]);
        // With replacement, so this may repeat a positional pick.
        candidates.push(queue[rng.random_range(0..len)]);

        self.calls += 1;
        Ok(candidates)
    }

    /// Total `select` invocations over this selector's lifetime.
    pub fn calls(&self) -> u64 {
        self.calls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn queue_of(values: &[i64]) -> WorkQueue {
        let mut queue = WorkQueue::new();
        for &v in values {
            queue.append(v);
        }
        queue
    }

    #[test]
    fn yields_between_four_and_six_candidates() {
        let queue = queue_of(&(0..50).collect::<Vec<_>>());
        let mut selector = CandidateSelector::new();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..200 {
            let candidates = selector.select(&queue, &mut rng).unwrap();
            assert!((4..=6).contains(&candidates.len()));
            // Ends are always sampled, first element first.
            assert_eq!(candidates[0], 0);
            assert!(candidates.contains(&49));
            assert!(candidates.iter().all(|&c| (0..50).contains(&c)));
        }
    }

    #[test]
    fn counter_increments_once_per_call() {
        let queue = queue_of(&[1, 2, 3, 4, 5]);
        let mut selector = CandidateSelector::new();
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(selector.calls(), 0);
        for expected in 1..=20 {
            selector.select(&queue, &mut rng).unwrap();
            assert_eq!(selector.calls(), expected);
        }
    }

    #[test]
    fn short_queue_is_rejected_without_counting() {
        let queue = queue_of(&[1, 2, 3]);
        let mut selector = CandidateSelector::new();
        let mut rng = StdRng::seed_from_u64(3);

        let err = selector.select(&queue, &mut rng).unwrap_err();
        assert_eq!(
            err,
            PickerError::EmptyStructure {
                structure: "work queue",
                needed: 4,
                len: 3,
            }
        );
        assert_eq!(selector.calls(), 0);
    }
}
