//! RNG trait abstraction for graph and layout randomness
//!
//! Lets the graph work with any seeded generator (the layout generator uses
//! `Xoshiro256StarStar`) without naming a concrete type in its signatures.

/// Random number generator trait for street generation
pub trait GraphRng {
    /// Random boolean with 50% probability
    fn coin_flip(&mut self) -> bool;

    /// Random f64 in [0.0, 1.0)
    fn unit_f64(&mut self) -> f64;

    /// Random index in `0..len`. Returns 0 for an empty range.
    fn pick_index(&mut self, len: usize) -> usize;

    /// Check if a random value is less than the probability threshold
    fn chance(&mut self, probability: f64) -> bool {
        self.unit_f64() < probability
    }

    /// Random f64 in `[min, max)`, or `min` when the range is empty
    fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        if max <= min {
            min
        } else {
            min + (max - min) * self.unit_f64()
        }
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> GraphRng for T {
    fn coin_flip(&mut self) -> bool {
        rand::Rng::r#gen(self)
    }

    fn unit_f64(&mut self) -> f64 {
        rand::Rng::r#gen(self)
    }

    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            0
        } else {
            rand::Rng::gen_range(self, 0..len)
        }
    }
}
