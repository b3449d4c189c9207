//! Randomness seam for door draws.
//!
//! The engine only ever asks for a uniform integer in an inclusive
//! range, so tests can script the exact sequence of draws and assert
//! the door invariants deterministically.

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::VecDeque;

/// Source of uniform integer draws.
pub trait RandomSource: Send {
    /// Draw a uniform integer in the inclusive range `[min, max]`.
    fn next_uniform(&mut self, min: u32, max: u32) -> u32;
}

/// OS-seeded random source for production use.
///
/// Backed by [`StdRng`] rather than the thread-local generator so the
/// engine stays `Send` and can live inside a spawned task.
pub struct StdRandomSource {
    rng: StdRng,
}

impl StdRandomSource {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl Default for StdRandomSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for StdRandomSource {
    fn next_uniform(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}

/// Scripted random source for tests: pops pre-arranged draws, clamping
/// each into the requested range. Once exhausted it returns `min`.
pub struct SequenceSource {
    values: VecDeque<u32>,
}

impl SequenceSource {
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RandomSource for SequenceSource {
    fn next_uniform(&mut self, min: u32, max: u32) -> u32 {
        match self.values.pop_front() {
            Some(value) => value.clamp(min, max),
            None => min,
        }
    }
}
