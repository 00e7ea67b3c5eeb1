//! # Plexus
//!
//! An animated particle background: small discs drift across the window,
//! shy away from the cursor, and link up with their neighbors through
//! distance-faded lines.
//!
//! ## Quick Start
//!
//! ```ignore
//! use plexus::Background;
//!
//! fn main() -> Result<(), plexus::BackgroundError> {
//!     Background::new().run()
//! }
//! ```
//!
//! ## Core Concepts
//!
//! ### Field
//!
//! A [`ParticleField`] is populated once, sized from the surface area and
//! the configured density (square pixels per particle). Each tick every
//! particle respawns any axis that left the surface, yields to pointer
//! repulsion, and drifts by its constant velocity.
//!
//! ### Pointer
//!
//! [`PointerState`] tracks the cursor while it is over the surface. Within
//! the interaction radius — `(width/100) * (height/100)`, 1.25x while a
//! button is held — particles are pushed away with force proportional to
//! proximity.
//!
//! ### Connections
//!
//! Particle pairs closer than the connection radius are linked by a line
//! whose opacity and width depend on the distance. The pairwise pass is
//! O(n²), fine at the particle counts the density presets produce.
//!
//! ### Presets
//!
//! [`FieldConfig`] carries every tunable; four preset constructors cover
//! the classic renditions of the effect:
//!
//! | Preset | Density | Pointer | Lines |
//! |--------|---------|---------|-------|
//! | [`FieldConfig::classic`] | 3000 | yes | widening, 60px |
//! | [`FieldConfig::fine_mesh`] | 2500 | yes | narrowing, 70px |
//! | [`FieldConfig::sparse`] | 5000 | yes | none |
//! | [`FieldConfig::drift`] | 3000 | no | none |

mod background;
pub mod config;
mod error;
pub mod field;
mod gpu;
pub mod particle;
pub mod pointer;
pub mod spawn;
pub mod time;

pub use background::Background;
pub use config::{ConnectionConfig, FieldConfig, RepulsionConfig, WidthCurve, MAX_LINE_WIDTH};
pub use error::{BackgroundError, GpuError};
pub use field::{connect, particle_count, Bounds, Connection, ParticleField};
pub use glam::{Vec2, Vec3};
pub use particle::Particle;
pub use pointer::PointerState;
pub use time::Time;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use plexus::prelude::*;
/// ```
pub mod prelude {
    pub use crate::background::Background;
    pub use crate::config::{ConnectionConfig, FieldConfig, RepulsionConfig, WidthCurve};
    pub use crate::error::BackgroundError;
    pub use crate::field::{Bounds, Connection, ParticleField};
    pub use crate::particle::Particle;
    pub use crate::pointer::PointerState;
    pub use crate::{Vec2, Vec3};
}
