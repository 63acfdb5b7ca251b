//! Landing index selection
//!
//! The bank asks a picker where each reel should stop. Production uses a
//! uniform RNG; tests script the result.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::fmt;

/// Chooses a landing index for a strip of `len` symbols
pub trait IndexPicker {
    /// Index in `0..len`. Never called with `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

impl<F> IndexPicker for F
where
    F: FnMut(usize) -> usize,
{
    fn pick(&mut self, len: usize) -> usize {
        self(len)
    }
}

/// Uniform random picker
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    /// Seeded from the OS
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded for reproducible results
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RandomPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomPicker").finish_non_exhaustive()
    }
}

impl IndexPicker for RandomPicker {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

/// Replays a fixed list of indices, each reduced modulo the strip length.
/// Once exhausted it starts over.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    script: Vec<usize>,
    queue: VecDeque<usize>,
}

impl ScriptedPicker {
    pub fn new(script: impl Into<Vec<usize>>) -> Self {
        let script = script.into();
        Self {
            queue: script.iter().copied().collect(),
            script,
        }
    }
}

impl IndexPicker for ScriptedPicker {
    fn pick(&mut self, len: usize) -> usize {
        if self.queue.is_empty() {
            self.queue.extend(self.script.iter().copied());
        }
        self.queue.pop_front().unwrap_or(0) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_picker_in_range() {
        let mut picker = RandomPicker::seeded(42);
        for len in 1..50 {
            for _ in 0..20 {
                assert!(picker.pick(len) < len);
            }
        }
    }

    #[test]
    fn test_random_picker_reproducible() {
        let mut a = RandomPicker::seeded(7);
        let mut b = RandomPicker::seeded(7);
        let xs: Vec<usize> = (0..32).map(|_| a.pick(100)).collect();
        let ys: Vec<usize> = (0..32).map(|_| b.pick(100)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_random_picker_covers_range() {
        let mut picker = RandomPicker::seeded(1);
        let mut seen = [false; 8];
        for _ in 0..1000 {
            seen[picker.pick(8)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_scripted_picker_repeats() {
        let mut picker = ScriptedPicker::new(vec![3, 9]);
        assert_eq!(picker.pick(8), 3);
        assert_eq!(picker.pick(8), 1); // 9 % 8
        assert_eq!(picker.pick(8), 3);
    }

    #[test]
    fn test_empty_script_picks_zero() {
        let mut picker = ScriptedPicker::default();
        assert_eq!(picker.pick(5), 0);
    }

    #[test]
    fn test_closure_picker() {
        let mut last = |len: usize| len - 1;
        assert_eq!(last.pick(10), 9);
    }
}
