// Random source used for tie-breaking decisions
//
// Every randomized choice (neighbour rotation, trap escape, reversal fallback)
// goes through `RandomSource` so tests can pin the outcome.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// Returns an index in `0..bound`; `bound` is never zero
    fn pick(&mut self, bound: usize) -> usize;
}

/// Picks one element of a non-empty slice
pub fn choose<T: Copy>(rng: &mut dyn RandomSource, items: &[T]) -> T {
    items[rng.pick(items.len()) % items.len()]
}

/// Production source backed by `StdRng`
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Seeds from the wall clock, one fresh sequence per run
    pub fn from_time() -> Self {
        let nanos = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_else(|| chrono::Utc::now().timestamp_millis());
        Self::from_seed(nanos as u64)
    }

    pub fn from_seed(seed: u64) -> Self {
        SeededRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, bound: usize) -> usize {
        self.rng.random_range(0..bound)
    }
}

/// Always answers with the same index, clamped to the bound
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn pick(&mut self, bound: usize) -> usize {
        self.0.min(bound - 1)
    }
}
