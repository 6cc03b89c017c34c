//! Particle Field - pointer-reactive ambient background for a 2D canvas
//!
//! Core modules:
//! - `sim`: Particle simulation (drift, pointer repulsion, reflection, speed clamp)
//! - `renderer`: Drawing surface abstraction and the recording backend
//! - `platform`: Frame loop state machine and browser mount glue
//! - `settings`: Data-driven field tuning
//! - `backend`: In-memory agency backend used by the landing page

pub mod backend;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{MountError, SettingsError};
pub use renderer::{RecordingSurface, Rgba, Surface};
pub use settings::FieldSettings;
pub use sim::{Bounds, ParticleField};

/// Field configuration constants
pub mod consts {
    /// Horizontal pixels per particle (count = floor(width / spacing))
    pub const PARTICLE_SPACING: f64 = 20.0;
    /// Smallest spacing settings may ask for
    pub const MIN_SPACING: f64 = 1.0;
    /// Upper bound on particle count; the link pass is O(N^2)
    pub const MAX_PARTICLES: usize = 4000;

    /// Particle radius range
    pub const RADIUS_MIN: f64 = 0.5;
    pub const RADIUS_MAX: f64 = 2.5;
    /// Initial velocity components are drawn from [-INITIAL_SPEED, INITIAL_SPEED]
    pub const INITIAL_SPEED: f64 = 0.25;

    /// Color channel range (min inclusive, max exclusive)
    pub const CHANNEL_MIN: u8 = 100;
    pub const CHANNEL_MAX: u8 = 250;
    /// Particle alpha range
    pub const ALPHA_MIN: f64 = 0.1;
    pub const ALPHA_MAX: f64 = 0.6;

    /// Speed limit applied after every step (pixels/frame)
    pub const MAX_SPEED: f64 = 0.5;

    /// Pointer repulsion reach (pixels)
    pub const POINTER_RADIUS: f64 = 80.0;
    /// Velocity change at zero distance from the pointer
    pub const POINTER_STRENGTH: f64 = 0.02;
    /// Pointer goes inactive this long after the last move event
    pub const POINTER_IDLE_MS: f64 = 100.0;

    /// Per-particle, per-frame chance of a velocity nudge
    pub const JITTER_PROBABILITY: f64 = 0.01;
    /// Nudge is uniform in [-JITTER_AMPLITUDE, JITTER_AMPLITUDE] per axis
    pub const JITTER_AMPLITUDE: f64 = 0.005;

    /// Particles closer than this are joined by a line
    pub const LINK_DISTANCE: f64 = 100.0;
    /// Line alpha at zero distance
    pub const LINK_MAX_ALPHA: f64 = 0.2;
    pub const LINK_COLOR: (u8, u8, u8) = (210, 210, 210);
    pub const LINK_WIDTH: f64 = 0.5;
}

/// Number of particles for a surface of the given width, capped at
/// [`consts::MAX_PARTICLES`]
#[inline]
pub fn particle_count(width: f64, spacing: f64) -> usize {
    if spacing <= 0.0 {
        return 0;
    }
    let count = (width / spacing).floor();
    // NaN and negative widths give no particles
    if count.is_nan() || count <= 0.0 {
        return 0;
    }
    count.min(consts::MAX_PARTICLES as f64) as usize
}
