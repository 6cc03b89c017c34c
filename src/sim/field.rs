//! The particle field: population, per-frame update and draw passes
//!
//! A frame runs in this order:
//! 1. Clear the surface
//! 2. For each particle: draw it, then advance it (integrate, pointer push,
//!    reflect, jitter, clamp)
//! 3. Join every pair closer than `link_distance` with a faded line
//!
//! The step is frame-coupled: velocities are pixels per frame, with no
//! delta-time scaling, so the field drifts faster on high refresh displays.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::particle::Particle;
use super::physics::{clamp_speed, link_alpha, pointer_push, reflect};
use super::pointer::PointerTracker;
use crate::particle_count;
use crate::renderer::{Rgba, Surface};
use crate::settings::FieldSettings;

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Bounds of a surface's current pixel size
    pub fn of<S: Surface + ?Sized>(surface: &S) -> Self {
        let (width, height) = surface.size();
        Self { width, height }
    }
}

/// A fixed population of particles drifting over a surface
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
    pointer: PointerTracker,
    settings: FieldSettings,
    rng: Pcg32,
    frame_count: u64,
}

impl ParticleField {
    /// Populate a field for a surface of the given size.
    ///
    /// Particle count is `floor(width / spacing)` and stays fixed for the
    /// field's lifetime.
    pub fn initialize(bounds: Bounds, settings: FieldSettings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let count = particle_count(bounds.width, settings.spacing);
        let particles = (0..count)
            .map(|_| Particle::random(&mut rng, bounds.width, bounds.height, &settings))
            .collect();

        log::debug!(
            "Seeded {} particles for {}x{} surface (seed {})",
            count,
            bounds.width,
            bounds.height,
            seed
        );

        Self {
            particles,
            bounds,
            pointer: PointerTracker::new(settings.pointer_idle_ms),
            settings,
            rng,
            frame_count: 0,
        }
    }

    /// Populate with default settings
    pub fn with_defaults(bounds: Bounds, seed: u64) -> Self {
        Self::initialize(bounds, FieldSettings::default(), seed)
    }

    /// Pointer moved to surface-relative `(x, y)` at `now` (ms)
    pub fn on_pointer_move(&mut self, x: f64, y: f64, now: f64) {
        self.pointer.on_move(x, y, now);
    }

    /// Surface changed size. Particles are neither moved nor re-counted;
    /// reflection flips the velocity of any left outside on each step they
    /// remain there.
    pub fn resize(&mut self, bounds: Bounds) {
        log::debug!(
            "Field bounds {}x{} -> {}x{}",
            self.bounds.width,
            self.bounds.height,
            bounds.width,
            bounds.height
        );
        self.bounds = bounds;
    }

    /// Advance every particle by one frame
    pub fn step(&mut self, now: f64) {
        let pointer = self.pointer.active_position(now);
        for particle in &mut self.particles {
            advance(particle, pointer, self.bounds, &self.settings, &mut self.rng);
        }
        self.frame_count += 1;
    }

    /// Draw a complete frame and advance the simulation.
    ///
    /// Each particle is drawn at its position before the step; links are
    /// drawn between post-step positions.
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S, now: f64) -> usize {
        surface.clear(0.0, 0.0, self.bounds.width, self.bounds.height);

        let pointer = self.pointer.active_position(now);
        for particle in &mut self.particles {
            surface.fill_circle(particle.pos, particle.radius, particle.color);
            advance(particle, pointer, self.bounds, &self.settings, &mut self.rng);
        }
        self.frame_count += 1;

        self.draw_links(surface)
    }

    /// Draw the current state without advancing it
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        surface.clear(0.0, 0.0, self.bounds.width, self.bounds.height);
        self.draw_particles(surface);
        self.draw_links(surface)
    }

    pub fn draw_particles<S: Surface + ?Sized>(&self, surface: &mut S) {
        for particle in &self.particles {
            surface.fill_circle(particle.pos, particle.radius, particle.color);
        }
    }

    /// Stroke a line between every pair closer than `link_distance`.
    /// Returns the number of lines drawn.
    pub fn draw_links<S: Surface + ?Sized>(&self, surface: &mut S) -> usize {
        let s = &self.settings;
        let (r, g, b) = s.link_color;
        let base = Rgba::new(r, g, b, 0.0);

        let mut drawn = 0;
        for (i, p1) in self.particles.iter().enumerate() {
            for p2 in &self.particles[i + 1..] {
                let distance = p1.pos.distance(p2.pos);
                if distance < s.link_distance {
                    let alpha = link_alpha(distance, s.link_distance, s.link_max_alpha);
                    surface.stroke_line(p1.pos, p2.pos, s.link_width, base.with_alpha(alpha));
                    drawn += 1;
                }
            }
        }
        drawn
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

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_pointer_active(&self, now: f64) -> bool {
        self.pointer.is_active(now)
    }

    /// Frames stepped since initialization
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Fastest particle right now
    pub fn max_speed(&self) -> f64 {
        self.particles
            .iter()
            .map(Particle::speed)
            .fold(0.0, f64::max)
    }
}

/// One frame of motion for a single particle
fn advance(
    particle: &mut Particle,
    pointer: Option<DVec2>,
    bounds: Bounds,
    settings: &FieldSettings,
    rng: &mut Pcg32,
) {
    particle.pos += particle.vel;

    if let Some(pointer) = pointer {
        if let Some(push) = pointer_push(
            particle.pos,
            pointer,
            settings.pointer_radius,
            settings.pointer_strength,
        ) {
            particle.vel += push;
        }
    }

    reflect(particle.pos, &mut particle.vel, bounds.width, bounds.height);

    if rng.random::<f64>() < settings.jitter_probability {
        let amp = settings.jitter_amplitude;
        particle.vel.x += (rng.random::<f64>() - 0.5) * 2.0 * amp;
        particle.vel.y += (rng.random::<f64>() - 0.5) * 2.0 * amp;
    }

    particle.vel = clamp_speed(particle.vel, settings.max_speed);
}
