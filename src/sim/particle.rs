//! Particle entity and random spawning

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::renderer::Rgba;
use crate::settings::FieldSettings;

/// A single drifting dot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    /// Fixed at spawn
    pub radius: f64,
    /// Fixed at spawn
    pub color: Rgba,
}

impl Particle {
    pub fn new(pos: DVec2, vel: DVec2, radius: f64, color: Rgba) -> Self {
        Self {
            pos,
            vel,
            radius,
            color,
        }
    }

    /// Spawn at a uniform random point in `[0, width) x [0, height)` with
    /// random radius, velocity and low-saturation color
    pub fn random<R: Rng>(
        rng: &mut R,
        width: f64,
        height: f64,
        settings: &FieldSettings,
    ) -> Self {
        let pos = DVec2::new(rng.random::<f64>() * width, rng.random::<f64>() * height);
        let radius = settings.radius.lerp(rng.random());

        let s = settings.initial_speed;
        let vel = DVec2::new(
            rng.random::<f64>() * 2.0 * s - s,
            rng.random::<f64>() * 2.0 * s - s,
        );

        let color = Rgba::new(
            random_channel(rng, settings),
            random_channel(rng, settings),
            random_channel(rng, settings),
            settings.alpha.lerp(rng.random()),
        );

        Self::new(pos, vel, radius, color)
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.vel.length()
    }
}

/// `floor(U * span) + min`, never reaching `channel_max` unless the range is empty
fn random_channel<R: Rng>(rng: &mut R, settings: &FieldSettings) -> u8 {
    let min = settings.channel_min as f64;
    let span = settings.channel_max as f64 - min;
    (min + (rng.random::<f64>() * span).floor()).min(255.0) as u8
}
