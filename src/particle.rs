//! A single drifting particle.
//!
//! Particles carry a constant velocity, radius, and opacity for their whole
//! lifetime. Per tick a particle respawns any axis that left the surface,
//! yields to pointer repulsion, then drifts by its velocity. Movement is
//! per-tick (frame-locked), matching the effect's original pacing.

use glam::Vec2;
use rand::rngs::SmallRng;

use crate::config::FieldConfig;
use crate::field::Bounds;
use crate::pointer::PointerState;
use crate::spawn::{boundary_coordinate, SpawnContext};

/// Repulsion displacement magnitude at the given pointer distance.
///
/// Linear falloff: `strength` as distance approaches zero, zero at and
/// beyond `reach`. Monotonically non-increasing in distance.
pub fn repulsion_at(distance: f32, reach: f32, strength: f32) -> f32 {
    if distance >= reach {
        return 0.0;
    }
    (1.0 - distance / reach) * strength
}

/// One particle of the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    /// Position in surface pixels.
    pub position: Vec2,
    /// Drift per tick in pixels; constant for the particle's lifetime.
    pub velocity: Vec2,
    /// Disc radius in pixels.
    pub radius: f32,
    /// Fill opacity, 0.0-1.0.
    pub opacity: f32,
}

impl Particle {
    /// Spawn a particle with sampled position, velocity, radius and opacity.
    pub fn spawn(ctx: &mut SpawnContext, bounds: Bounds, config: &FieldConfig) -> Self {
        let radius = ctx.random_range(config.radius_range.0, config.radius_range.1);
        let position = Vec2::new(
            ctx.coordinate_in(bounds.width, radius),
            ctx.coordinate_in(bounds.height, radius),
        );
        let velocity = Vec2::new(
            ctx.signed_speed(config.speed_range),
            ctx.signed_speed(config.speed_range),
        );
        let opacity = ctx.random_range(config.opacity_range.0, config.opacity_range.1);
        Self {
            position,
            velocity,
            radius,
            opacity,
        }
    }

    /// Advance the particle by one tick.
    ///
    /// Order matters and is observable: boundary respawn first, then pointer
    /// repulsion, then the velocity step. A respawned particle can therefore
    /// overshoot its fresh coordinate by at most one velocity step.
    pub fn update(
        &mut self,
        bounds: Bounds,
        pointer: &PointerState,
        config: &FieldConfig,
        rng: &mut SmallRng,
    ) {
        // Respawn each exited axis independently; the other axis and the
        // velocity are untouched.
        if self.position.x < 0.0 || self.position.x > bounds.width {
            self.position.x = boundary_coordinate(rng, bounds.width, self.radius);
        }
        if self.position.y < 0.0 || self.position.y > bounds.height {
            self.position.y = boundary_coordinate(rng, bounds.height, self.radius);
        }

        if let (Some(repulsion), Some(pointer_pos)) = (config.repulsion, pointer.position()) {
            let offset = self.position - pointer_pos;
            let distance = offset.length();
            let push = repulsion_at(distance, pointer.radius(), repulsion.strength);
            // A particle sitting exactly on the pointer has no away
            // direction; it stays put rather than propagating NaN.
            if push > 0.0 && distance > 0.0 {
                self.position += offset / distance * push;
            }
        }

        self.position += self.velocity;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn fixed_particle(x: f32, y: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            radius: 2.0,
            opacity: 1.0,
        }
    }

    #[test]
    fn test_repulsion_falloff() {
        // (1 - 10/50) * 100 = 80
        assert!((repulsion_at(10.0, 50.0, 100.0) - 80.0).abs() < 0.001);
        // Monotonically non-increasing with distance.
        let samples: Vec<f32> = (0..50)
            .map(|d| repulsion_at(d as f32, 50.0, 100.0))
            .collect();
        assert!(samples.windows(2).all(|pair| pair[0] >= pair[1]));
        // Zero at and beyond the reach.
        assert_eq!(repulsion_at(50.0, 50.0, 100.0), 0.0);
        assert_eq!(repulsion_at(80.0, 50.0, 100.0), 0.0);
    }

    #[test]
    fn test_update_pushes_away_from_pointer() {
        // 1000x500 surface gives an interaction radius of 10 * 5 = 50.
        let bounds = Bounds::new(1000.0, 500.0);
        let mut pointer = PointerState::new(bounds);
        pointer.on_move(500.0, 250.0);
        assert_eq!(pointer.radius(), 50.0);

        let mut particle = fixed_particle(510.0, 250.0);
        let config = FieldConfig::classic();
        let mut rng = SmallRng::seed_from_u64(0);
        particle.update(bounds, &pointer, &config, &mut rng);

        // Distance 10 inside radius 50: pushed 80px along +x.
        assert!((particle.position.x - 590.0).abs() < 0.001);
        assert!((particle.position.y - 250.0).abs() < 0.001);
    }

    #[test]
    fn test_update_ignores_disengaged_pointer() {
        let bounds = Bounds::new(1000.0, 500.0);
        let pointer = PointerState::new(bounds);

        let mut particle = fixed_particle(510.0, 250.0);
        particle.velocity = Vec2::new(1.0, -0.5);
        let config = FieldConfig::classic();
        let mut rng = SmallRng::seed_from_u64(0);
        particle.update(bounds, &pointer, &config, &mut rng);

        assert_eq!(particle.position, Vec2::new(511.0, 249.5));
    }

    #[test]
    fn test_update_zero_distance_stays_finite() {
        let bounds = Bounds::new(1000.0, 500.0);
        let mut pointer = PointerState::new(bounds);
        pointer.on_move(510.0, 250.0);

        let mut particle = fixed_particle(510.0, 250.0);
        let config = FieldConfig::classic();
        let mut rng = SmallRng::seed_from_u64(0);
        particle.update(bounds, &pointer, &config, &mut rng);

        assert!(particle.position.x.is_finite());
        assert!(particle.position.y.is_finite());
        // No away direction: only the (zero) velocity applied.
        assert_eq!(particle.position, Vec2::new(510.0, 250.0));
    }

    #[test]
    fn test_update_respawns_exited_axis() {
        let bounds = Bounds::new(1000.0, 1000.0);
        let pointer = PointerState::new(bounds);
        let config = FieldConfig::classic();
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..100 {
            let mut particle = fixed_particle(5.0, 500.0);
            particle.velocity = Vec2::new(-3.0, 0.0);
            // Drive it out past the left edge, then update once more.
            particle.position.x = -1.0;
            particle.update(bounds, &pointer, &config, &mut rng);
            // Resampled into [4, 996), then the -3 velocity step applied.
            assert!((1.0..993.0).contains(&particle.position.x));
            // y untouched by the x respawn.
            assert_eq!(particle.position.y, 500.0);
        }
    }

    #[test]
    fn test_no_pointer_config_disables_repulsion() {
        let bounds = Bounds::new(1000.0, 500.0);
        let mut pointer = PointerState::new(bounds);
        pointer.on_move(500.0, 250.0);

        let mut particle = fixed_particle(510.0, 250.0);
        let config = FieldConfig::drift();
        let mut rng = SmallRng::seed_from_u64(0);
        particle.update(bounds, &pointer, &config, &mut rng);

        assert_eq!(particle.position, Vec2::new(510.0, 250.0));
    }
}
