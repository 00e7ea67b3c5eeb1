//! Random sampling for particle spawning and respawning.
//!
//! Each particle is spawned through a [`SpawnContext`] that owns its own
//! small RNG, seeded from the spawn index and the wall clock (or from an
//! explicit seed for deterministic replay).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Sample a coordinate uniformly within `[radius * 2, length - radius * 2)`.
///
/// The double-radius margin keeps a freshly placed particle's disc clear of
/// the surface edge. When the surface is too small for the margin (or has
/// degenerate dimensions) the midpoint is returned instead of inverting the
/// sampling range.
pub fn boundary_coordinate(rng: &mut impl Rng, length: f32, radius: f32) -> f32 {
    let margin = radius * 2.0;
    if length - margin <= margin {
        return length * 0.5;
    }
    rng.gen_range(margin..length - margin)
}

/// Per-particle sampling context handed to the spawn routine.
pub struct SpawnContext {
    /// Index of the particle being spawned (0 to count-1).
    pub index: usize,
    /// Total number of particles being spawned.
    pub count: usize,
    rng: SmallRng,
}

impl SpawnContext {
    /// Context seeded from the spawn index and the wall clock: stable within
    /// a run, different across runs.
    pub(crate) fn new(index: usize, count: usize) -> Self {
        let seed = index as u64
            ^ std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(42);
        Self::with_seed(index, count, seed)
    }

    /// Context with an explicit seed, for deterministic fields.
    pub(crate) fn with_seed(index: usize, count: usize, seed: u64) -> Self {
        Self {
            index,
            count,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Random f32 between 0.0 and 1.0.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random f32 in the given range; returns `min` when the range is empty.
    #[inline]
    pub fn random_range(&mut self, min: f32, max: f32) -> f32 {
        if min < max {
            self.rng.gen_range(min..max)
        } else {
            min
        }
    }

    /// Random magnitude in the given range with a random sign.
    pub fn signed_speed(&mut self, range: (f32, f32)) -> f32 {
        let magnitude = self.random_range(range.0, range.1);
        if self.rng.gen::<bool>() {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Boundary-safe coordinate within a surface dimension.
    pub fn coordinate_in(&mut self, length: f32, radius: f32) -> f32 {
        boundary_coordinate(&mut self.rng, length, radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_coordinate_in_range() {
        let mut ctx = SpawnContext::with_seed(0, 1, 7);
        for _ in 0..200 {
            let x = ctx.coordinate_in(1000.0, 2.0);
            assert!((4.0..996.0).contains(&x));
        }
    }

    #[test]
    fn test_boundary_coordinate_degenerate_surface() {
        let mut rng = SmallRng::seed_from_u64(7);
        // Too narrow for the margin: fall back to the midpoint.
        assert_eq!(boundary_coordinate(&mut rng, 6.0, 2.0), 3.0);
        assert_eq!(boundary_coordinate(&mut rng, 0.0, 2.0), 0.0);
    }

    #[test]
    fn test_signed_speed_magnitude() {
        let mut ctx = SpawnContext::with_seed(3, 10, 11);
        let mut seen_negative = false;
        let mut seen_positive = false;
        for _ in 0..100 {
            let speed = ctx.signed_speed((0.05, 1.5));
            assert!((0.05..1.5).contains(&speed.abs()));
            seen_negative |= speed < 0.0;
            seen_positive |= speed > 0.0;
        }
        assert!(seen_negative && seen_positive);
    }

    #[test]
    fn test_random_range_empty() {
        let mut ctx = SpawnContext::with_seed(0, 1, 1);
        assert_eq!(ctx.random_range(2.0, 2.0), 2.0);
    }
}
