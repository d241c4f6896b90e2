//! RNG module - injectable random source for board generation and shuffling
//!
//! Everything random in a session (the initial layout, silent and manual
//! shuffles) goes through [`TileRng`], so a fixed seed replays an identical
//! session. [`SimpleRng`] is the default source.

/// Source of randomness for permuting tiles
pub trait TileRng {
    /// Uniform-ish value in `[0, bound)`. `bound` is never 0.
    fn next_below(&mut self, bound: u32) -> u32;

    /// Shuffle a slice in place using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Current internal state; feeding it back to [`SimpleRng::new`] resumes the sequence
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl TileRng for SimpleRng {
    fn next_below(&mut self, bound: u32) -> u32 {
        // The low bits of an LCG have short periods; use the high half.
        (self.next_u32() >> 16) % bound.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_below_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for bound in 1..50 {
            for _ in 0..20 {
                assert!(rng.next_below(bound) < bound);
            }
        }
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = SimpleRng::new(99);
        let mut values: Vec<u32> = (0..32).collect();
        rng.shuffle(&mut values);

        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
        assert_ne!(values, sorted, "32 elements should not stay in order");
    }

    #[test]
    fn test_shuffle_same_seed_same_order() {
        let mut a: Vec<u8> = (0..20).collect();
        let mut b = a.clone();
        SimpleRng::new(5).shuffle(&mut a);
        SimpleRng::new(5).shuffle(&mut b);
        assert_eq!(a, b);
    }
}
