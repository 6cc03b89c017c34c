//! Particle field simulation
//!
//! Everything that moves lives here. This module has no platform
//! dependencies:
//! - Randomness comes from a seeded PCG stream owned by the field
//! - Time only enters through the timestamps passed to pointer/step calls
//! - Drawing goes through the [`crate::renderer::Surface`] trait

pub mod field;
pub mod particle;
pub mod physics;
pub mod pointer;

pub use field::{Bounds, ParticleField};
pub use particle::Particle;
pub use physics::{clamp_speed, link_alpha, pointer_force, reflect};
pub use pointer::PointerTracker;
