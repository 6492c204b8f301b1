use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

/// Source of the one non-deterministic value in a reply.
pub trait RandomSource: Send + Sync {
    /// Returns an integer inside `range` (both ends inclusive).
    fn next_in_range(&self, range: RangeInclusive<u32>) -> u32;
}

/// Uniform draw from the thread-local generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_in_range(&self, range: RangeInclusive<u32>) -> u32 {
        if range.is_empty() {
            return *range.start();
        }
        rand::thread_rng().gen_range(range)
    }
}

/// Always yields the same value, clamped into the requested range.
#[derive(Clone, Copy, Debug)]
pub struct FixedRandom(pub u32);

impl RandomSource for FixedRandom {
    fn next_in_range(&self, range: RangeInclusive<u32>) -> u32 {
        clamp(self.0, &range)
    }
}

/// Cycles through a fixed list of values, clamping each into the requested range.
#[derive(Debug)]
pub struct SequenceRandom {
    values: Vec<u32>,
    cursor: AtomicUsize,
}

impl SequenceRandom {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, cursor: AtomicUsize::new(0) }
    }
}

impl RandomSource for SequenceRandom {
    fn next_in_range(&self, range: RangeInclusive<u32>) -> u32 {
        if self.values.is_empty() {
            return *range.start();
        }
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.values.len();
        clamp(self.values[index], &range)
    }
}

fn clamp(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), (*range.end()).max(*range.start()))
}
