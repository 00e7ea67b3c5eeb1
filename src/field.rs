//! The particle field: population, per-tick stepping, and connections.
//!
//! A field is populated exactly once, sized from the surface area and the
//! configured density. Resizing the surface afterwards rescales bounds and
//! pointer radius but never repopulates; particles that find themselves
//! outside the new bounds respawn through the ordinary boundary check.
//!
//! # Usage
//!
//! ```ignore
//! use plexus::{Bounds, FieldConfig, ParticleField, PointerState};
//!
//! let bounds = Bounds::new(1280.0, 720.0);
//! let mut field = ParticleField::new(FieldConfig::classic());
//! field.populate(bounds);
//!
//! let pointer = PointerState::new(bounds);
//! field.step(bounds, &pointer);      // one tick
//! let lines = field.connections();   // segments to draw this tick
//! ```

use glam::Vec2;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::{ConnectionConfig, FieldConfig};
use crate::particle::Particle;
use crate::pointer::PointerState;
use crate::spawn::SpawnContext;

/// Logical surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Surface area in square pixels.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// A line segment between two near particles, styled for drawing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub start: Vec2,
    pub end: Vec2,
    /// Line opacity, 0.0-1.0.
    pub alpha: f32,
    /// Line width in pixels.
    pub width: f32,
}

/// Number of particles a surface supports at the given density.
///
/// `density` is square pixels per particle; degenerate surfaces (or a
/// non-positive density) yield an empty field.
pub fn particle_count(bounds: Bounds, density: f32) -> usize {
    if density <= 0.0 {
        return 0;
    }
    let count = bounds.area() / density;
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}

/// Styled segments for every unordered particle pair closer than the
/// connection radius.
///
/// O(n²) over the slice; self-pairs are excluded. Symmetric by
/// construction: each pair is visited exactly once.
pub fn connect(particles: &[Particle], config: &ConnectionConfig) -> Vec<Connection> {
    let mut lines = Vec::new();
    for (index, first) in particles.iter().enumerate() {
        for second in &particles[index + 1..] {
            let distance = first.position.distance(second.position);
            if distance < config.radius {
                lines.push(Connection {
                    start: first.position,
                    end: second.position,
                    alpha: config.alpha_at(distance),
                    width: config.width_at(distance),
                });
            }
        }
    }
    lines
}

/// The collection of particles and the RNG that respawns them.
pub struct ParticleField {
    config: FieldConfig,
    particles: Vec<Particle>,
    rng: SmallRng,
    seed: Option<u64>,
}

impl ParticleField {
    /// Field with wall-clock seeding; every run drifts differently.
    pub fn new(config: FieldConfig) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42);
        Self {
            config,
            particles: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
            seed: None,
        }
    }

    /// Field with an explicit seed: population and respawns are
    /// deterministic, for tests and replayable demos.
    pub fn seeded(config: FieldConfig, seed: u64) -> Self {
        Self {
            config,
            particles: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Fill the field with `area / density` freshly sampled particles.
    ///
    /// Clears any previous population first. Called once at startup; resize
    /// handling deliberately does not reach here.
    pub fn populate(&mut self, bounds: Bounds) {
        self.particles.clear();
        let count = particle_count(bounds, self.config.density);
        self.particles.reserve(count);
        for index in 0..count {
            let mut ctx = match self.seed {
                Some(seed) => SpawnContext::with_seed(
                    index,
                    count,
                    seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15),
                ),
                None => SpawnContext::new(index, count),
            };
            self.particles
                .push(Particle::spawn(&mut ctx, bounds, &self.config));
        }
    }

    /// Advance every particle by one tick.
    pub fn step(&mut self, bounds: Bounds, pointer: &PointerState) {
        for particle in &mut self.particles {
            particle.update(bounds, pointer, &self.config, &mut self.rng);
        }
    }

    /// Connection segments for the current particle positions.
    ///
    /// Empty when the config has no connection pass.
    pub fn connections(&self) -> Vec<Connection> {
        match &self.config.connections {
            Some(config) => connect(&self.particles, config),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle_at(x: f32, y: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            radius: 1.0,
            opacity: 1.0,
        }
    }

    #[test]
    fn test_particle_count_exact() {
        assert_eq!(particle_count(Bounds::new(1000.0, 1000.0), 5000.0), 200);
        assert_eq!(particle_count(Bounds::new(1920.0, 1080.0), 3000.0), 691);
        assert_eq!(particle_count(Bounds::new(0.0, 1000.0), 3000.0), 0);
        assert_eq!(particle_count(Bounds::new(1000.0, 1000.0), 0.0), 0);
    }

    #[test]
    fn test_populate_matches_density() {
        let mut field = ParticleField::seeded(FieldConfig::sparse(), 1);
        field.populate(Bounds::new(1000.0, 1000.0));
        assert_eq!(field.len(), 200);
    }

    #[test]
    fn test_populate_places_particles_clear_of_edges() {
        let bounds = Bounds::new(800.0, 600.0);
        let mut field = ParticleField::seeded(FieldConfig::classic(), 9);
        field.populate(bounds);
        for particle in field.particles() {
            let margin = particle.radius * 2.0;
            assert!(particle.position.x >= margin);
            assert!(particle.position.x < bounds.width - margin);
            assert!(particle.position.y >= margin);
            assert!(particle.position.y < bounds.height - margin);
        }
    }

    #[test]
    fn test_populate_replaces_previous_population() {
        let mut field = ParticleField::seeded(FieldConfig::sparse(), 1);
        field.populate(Bounds::new(1000.0, 1000.0));
        field.populate(Bounds::new(500.0, 500.0));
        assert_eq!(field.len(), 50);
    }

    #[test]
    fn test_seeded_population_is_deterministic() {
        let bounds = Bounds::new(640.0, 480.0);
        let mut a = ParticleField::seeded(FieldConfig::classic(), 123);
        let mut b = ParticleField::seeded(FieldConfig::classic(), 123);
        a.populate(bounds);
        b.populate(bounds);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_connect_threshold() {
        let config = ConnectionConfig::default();
        let particles = vec![particle_at(0.0, 0.0), particle_at(30.0, 0.0)];
        let lines = connect(&particles, &config);
        assert_eq!(lines.len(), 1);
        assert!((lines[0].alpha - 0.4).abs() < 0.001);
        assert!((lines[0].width - 1.4).abs() < 0.001);

        let far = vec![particle_at(0.0, 0.0), particle_at(60.0, 0.0)];
        assert!(connect(&far, &config).is_empty());
    }

    #[test]
    fn test_connect_is_symmetric() {
        let config = ConnectionConfig::default();
        let forward = vec![particle_at(10.0, 10.0), particle_at(40.0, 10.0)];
        let reverse = vec![particle_at(40.0, 10.0), particle_at(10.0, 10.0)];
        let a = connect(&forward, &config);
        let b = connect(&reverse, &config);
        assert_eq!(a.len(), b.len());
        assert!((a[0].alpha - b[0].alpha).abs() < 0.001);
        assert!((a[0].width - b[0].width).abs() < 0.001);
    }

    #[test]
    fn test_connect_skips_self_pairs() {
        let config = ConnectionConfig::default();
        let particles = vec![particle_at(5.0, 5.0)];
        assert!(connect(&particles, &config).is_empty());
    }

    #[test]
    fn test_connections_disabled() {
        let mut field = ParticleField::seeded(FieldConfig::sparse(), 4);
        field.populate(Bounds::new(400.0, 400.0));
        assert!(field.connections().is_empty());
    }

    #[test]
    fn test_step_keeps_particles_near_bounds() {
        let bounds = Bounds::new(200.0, 200.0);
        let config = FieldConfig::classic();
        let max_speed = config.speed_range.1;
        let mut field = ParticleField::seeded(config, 77);
        field.populate(bounds);
        assert!(!field.is_empty());

        let pointer = PointerState::new(bounds);
        for _ in 0..500 {
            field.step(bounds, &pointer);
            for particle in field.particles() {
                // A particle may overshoot the surface by at most one
                // velocity step before the next tick respawns that axis.
                assert!(particle.position.x >= -max_speed - 0.001);
                assert!(particle.position.x <= bounds.width + max_speed + 0.001);
                assert!(particle.position.y >= -max_speed - 0.001);
                assert!(particle.position.y <= bounds.height + max_speed + 0.001);
            }
        }
    }

    #[test]
    fn test_degenerate_bounds_yield_empty_field() {
        let mut field = ParticleField::seeded(FieldConfig::classic(), 5);
        field.populate(Bounds::new(0.0, 0.0));
        assert!(field.is_empty());
        // Stepping and connecting an empty field is a no-op.
        let pointer = PointerState::new(Bounds::new(0.0, 0.0));
        field.step(Bounds::new(0.0, 0.0), &pointer);
        assert!(field.connections().is_empty());
    }
}
