//! Field configuration.
//!
//! All the constants that vary between renditions of the effect live here:
//! particle density, size/speed/opacity ranges, colors, pointer repulsion,
//! and connection-line styling. The four classic renditions are available as
//! preset constructors.
//!
//! # Usage
//!
//! ```ignore
//! use plexus::{Background, FieldConfig};
//!
//! Background::new()
//!     .with_config(FieldConfig::fine_mesh())
//!     .run()?;
//! ```

use glam::Vec3;

/// Upper bound for connection line width in pixels.
///
/// The narrowing width curve grows without bound as distance approaches
/// zero; every computed width is capped here.
pub const MAX_LINE_WIDTH: f32 = 4.0;

/// Convert a 24-bit `0xRRGGBB` color to linear-ish RGB in 0.0-1.0.
pub fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    )
}

/// Pointer repulsion settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RepulsionConfig {
    /// Peak displacement in pixels, applied as the pointer distance
    /// approaches zero. Falls off linearly to zero at the pointer radius.
    pub strength: f32,
}

impl Default for RepulsionConfig {
    fn default() -> Self {
        Self { strength: 100.0 }
    }
}

/// How connection line width varies with particle distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidthCurve {
    /// Lines thicken toward the connection radius: `base + distance * gain`.
    Widening { base: f32, gain: f32 },
    /// Lines thin toward the connection radius: `scale / distance`.
    ///
    /// The denominator is clamped so the width stays finite at distance
    /// zero; the result is capped at [`MAX_LINE_WIDTH`] either way.
    Narrowing { scale: f32 },
}

impl WidthCurve {
    /// Line width in pixels at the given particle distance.
    pub fn width_at(&self, distance: f32) -> f32 {
        let width = match *self {
            WidthCurve::Widening { base, gain } => base + distance * gain,
            WidthCurve::Narrowing { scale } => scale / distance.max(1e-3),
        };
        width.min(MAX_LINE_WIDTH)
    }
}

/// Connection line settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionConfig {
    /// Maximum particle distance for a line to be drawn, in pixels.
    pub radius: f32,
    /// Line color (RGB, 0.0-1.0).
    pub color: Vec3,
    /// Line opacity at distance zero.
    pub alpha_base: f32,
    /// Opacity lost per pixel of distance.
    pub alpha_fade: f32,
    /// Width curve over distance.
    pub width: WidthCurve,
}

impl ConnectionConfig {
    /// Line opacity at the given particle distance, clamped to 0.0-1.0.
    pub fn alpha_at(&self, distance: f32) -> f32 {
        (self.alpha_base - distance * self.alpha_fade).clamp(0.0, 1.0)
    }

    /// Line width at the given particle distance, capped at
    /// [`MAX_LINE_WIDTH`].
    pub fn width_at(&self, distance: f32) -> f32 {
        self.width.width_at(distance)
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            radius: 60.0,
            color: rgb(0xECF0F3),
            alpha_base: 0.7,
            alpha_fade: 1.0 / 100.0,
            width: WidthCurve::Widening {
                base: 1.0,
                gain: 1.0 / 75.0,
            },
        }
    }
}

/// Everything that shapes a particle field.
///
/// `density` is surface area in square pixels per particle, so a larger
/// value means fewer particles. The pointer and connection passes are
/// optional; disabling both leaves plain drifting particles.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Square pixels of surface area per particle.
    pub density: f32,
    /// Particle radius range in pixels, sampled once per particle.
    pub radius_range: (f32, f32),
    /// Per-axis speed magnitude range in pixels per tick.
    pub speed_range: (f32, f32),
    /// Particle opacity range, sampled once per particle.
    pub opacity_range: (f32, f32),
    /// Particle fill color (RGB, 0.0-1.0).
    pub color: Vec3,
    /// Surface clear color (RGB, 0.0-1.0).
    pub background: Vec3,
    /// Pointer repulsion, or `None` for a pointer-blind field.
    pub repulsion: Option<RepulsionConfig>,
    /// Connection lines, or `None` to skip the pairwise pass.
    pub connections: Option<ConnectionConfig>,
}

impl FieldConfig {
    /// The canonical rendition: medium density, widening lines at 60px.
    pub fn classic() -> Self {
        Self {
            density: 3000.0,
            radius_range: (0.5, 2.5),
            speed_range: (0.05, 1.5),
            opacity_range: (0.1, 1.0),
            color: rgb(0xE3E6EC),
            background: Vec3::new(0.02, 0.02, 0.05),
            repulsion: Some(RepulsionConfig::default()),
            connections: Some(ConnectionConfig::default()),
        }
    }

    /// Denser field with smaller particles and narrowing lines at 70px.
    pub fn fine_mesh() -> Self {
        Self {
            density: 2500.0,
            radius_range: (0.5, 2.0),
            connections: Some(ConnectionConfig {
                radius: 70.0,
                alpha_base: 1.0,
                alpha_fade: 1.0 / 100.0,
                width: WidthCurve::Narrowing { scale: 10.0 },
                ..ConnectionConfig::default()
            }),
            ..Self::classic()
        }
    }

    /// Sparse field without connection lines.
    pub fn sparse() -> Self {
        Self {
            density: 5000.0,
            connections: None,
            ..Self::classic()
        }
    }

    /// Plain drifting particles: no pointer interaction, no lines.
    pub fn drift() -> Self {
        Self {
            repulsion: None,
            connections: None,
            ..Self::classic()
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_conversion() {
        let white = rgb(0xFFFFFF);
        assert!((white.x - 1.0).abs() < 0.001);
        assert!((white.y - 1.0).abs() < 0.001);
        assert!((white.z - 1.0).abs() < 0.001);

        let red = rgb(0xFF0000);
        assert!((red.x - 1.0).abs() < 0.001);
        assert!(red.y < 0.001);
        assert!(red.z < 0.001);
    }

    #[test]
    fn test_alpha_fades_with_distance() {
        let conn = ConnectionConfig::default();
        assert!((conn.alpha_at(30.0) - 0.4).abs() < 0.001);
        // Far beyond the fade range the alpha clamps at zero rather than
        // going negative.
        assert_eq!(conn.alpha_at(200.0), 0.0);
    }

    #[test]
    fn test_widening_width() {
        let conn = ConnectionConfig::default();
        assert!((conn.width_at(30.0) - 1.4).abs() < 0.001);
        assert!((conn.width_at(0.0) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_narrowing_width_stays_finite() {
        let curve = WidthCurve::Narrowing { scale: 10.0 };
        assert!(curve.width_at(0.0).is_finite());
        assert!(curve.width_at(0.0) <= MAX_LINE_WIDTH);
        assert!((curve.width_at(20.0) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_presets() {
        assert_eq!(FieldConfig::classic().density, 3000.0);
        assert_eq!(FieldConfig::fine_mesh().density, 2500.0);
        assert_eq!(FieldConfig::sparse().density, 5000.0);
        assert!(FieldConfig::sparse().connections.is_none());
        assert!(FieldConfig::drift().repulsion.is_none());

        let mesh = FieldConfig::fine_mesh().connections.unwrap();
        assert_eq!(mesh.radius, 70.0);
    }
}
