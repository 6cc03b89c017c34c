//! Field tuning
//!
//! Every constant the simulation uses, gathered into one serializable struct.
//! Partial JSON is accepted; missing keys fall back to the defaults in
//! [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Inclusive-exclusive numeric range used for random draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map a unit sample `u` in [0, 1) onto the range
    #[inline]
    pub fn lerp(&self, u: f64) -> f64 {
        self.min + u * (self.max - self.min)
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Simulation and styling parameters for a particle field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    // === Population ===
    /// Pixels of surface width per particle
    pub spacing: f64,
    /// Particle radius draw range
    pub radius: Range,
    /// Initial velocity components are uniform in [-initial_speed, initial_speed]
    pub initial_speed: f64,
    /// Color channel draw range (min inclusive, max exclusive)
    pub channel_min: u8,
    pub channel_max: u8,
    /// Particle alpha draw range
    pub alpha: Range,

    // === Motion ===
    pub max_speed: f64,
    pub jitter_probability: f64,
    pub jitter_amplitude: f64,

    // === Pointer ===
    pub pointer_radius: f64,
    pub pointer_strength: f64,
    /// Milliseconds after the last move before the pointer counts as idle
    pub pointer_idle_ms: f64,

    // === Links ===
    pub link_distance: f64,
    pub link_max_alpha: f64,
    pub link_color: (u8, u8, u8),
    pub link_width: f64,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            spacing: PARTICLE_SPACING,
            radius: Range::new(RADIUS_MIN, RADIUS_MAX),
            initial_speed: INITIAL_SPEED,
            channel_min: CHANNEL_MIN,
            channel_max: CHANNEL_MAX,
            alpha: Range::new(ALPHA_MIN, ALPHA_MAX),

            max_speed: MAX_SPEED,
            jitter_probability: JITTER_PROBABILITY,
            jitter_amplitude: JITTER_AMPLITUDE,

            pointer_radius: POINTER_RADIUS,
            pointer_strength: POINTER_STRENGTH,
            pointer_idle_ms: POINTER_IDLE_MS,

            link_distance: LINK_DISTANCE,
            link_max_alpha: LINK_MAX_ALPHA,
            link_color: LINK_COLOR,
            link_width: LINK_WIDTH,
        }
    }
}

impl FieldSettings {
    /// Parse settings from JSON, filling gaps with defaults, and validate
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file (native runner)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Settings with random perturbation switched off
    pub fn without_jitter(mut self) -> Self {
        self.jitter_probability = 0.0;
        self
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn check(ok: bool, field: &'static str, reason: &'static str) -> Result<(), SettingsError> {
            if ok {
                Ok(())
            } else {
                Err(SettingsError::OutOfRange { field, reason })
            }
        }

        check(self.spacing >= MIN_SPACING, "spacing", "must be at least 1 pixel")?;
        check(
            self.radius.is_valid() && self.radius.min >= 0.0,
            "radius",
            "must be a non-negative range with min <= max",
        )?;
        check(
            self.initial_speed >= 0.0 && self.initial_speed.is_finite(),
            "initial_speed",
            "must be non-negative",
        )?;
        check(
            self.channel_min <= self.channel_max,
            "channel_min",
            "must not exceed channel_max",
        )?;
        check(
            self.alpha.is_valid() && self.alpha.min >= 0.0 && self.alpha.max <= 1.0,
            "alpha",
            "must lie within [0, 1] with min <= max",
        )?;
        check(self.max_speed > 0.0, "max_speed", "must be positive")?;
        check(
            (0.0..=1.0).contains(&self.jitter_probability),
            "jitter_probability",
            "must lie within [0, 1]",
        )?;
        check(self.jitter_amplitude >= 0.0, "jitter_amplitude", "must be non-negative")?;
        check(self.pointer_radius > 0.0, "pointer_radius", "must be positive")?;
        check(self.pointer_strength >= 0.0, "pointer_strength", "must be non-negative")?;
        check(self.pointer_idle_ms >= 0.0, "pointer_idle_ms", "must be non-negative")?;
        check(self.link_distance > 0.0, "link_distance", "must be positive")?;
        check(
            (0.0..=1.0).contains(&self.link_max_alpha),
            "link_max_alpha",
            "must lie within [0, 1]",
        )?;
        check(self.link_width >= 0.0, "link_width", "must be non-negative")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = FieldSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.spacing, 20.0);
        assert_eq!(settings.max_speed, 0.5);
        assert_eq!(settings.pointer_idle_ms, 100.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = FieldSettings::from_json(r#"{"max_speed": 1.5, "link_distance": 60}"#)
            .expect("valid settings");
        assert_eq!(settings.max_speed, 1.5);
        assert_eq!(settings.link_distance, 60.0);
        assert_eq!(settings.spacing, PARTICLE_SPACING);
        assert_eq!(settings.radius, Range::new(RADIUS_MIN, RADIUS_MAX));
    }

    #[test]
    fn test_empty_object_is_default() {
        let settings = FieldSettings::from_json("{}").expect("valid settings");
        assert_eq!(settings, FieldSettings::default());
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = FieldSettings::from_json(r#"{"jitter_probability": 1.5}"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::OutOfRange {
                field: "jitter_probability",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = FieldSettings::from_json(r#"{"alpha": {"min": 0.8, "max": 0.2}}"#).unwrap_err();
        assert!(matches!(err, SettingsError::OutOfRange { field: "alpha", .. }));
    }

    #[test]
    fn test_rejects_tiny_spacing() {
        let err = FieldSettings::from_json(r#"{"spacing": 0.0001}"#).unwrap_err();
        assert!(matches!(err, SettingsError::OutOfRange { field: "spacing", .. }));
        assert!(FieldSettings::from_json(r#"{"spacing": 1}"#).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = FieldSettings::from_json("{max_speed: }").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_without_jitter() {
        let settings = FieldSettings::default().without_jitter();
        assert_eq!(settings.jitter_probability, 0.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_range_lerp() {
        let range = Range::new(0.5, 2.5);
        assert_eq!(range.lerp(0.0), 0.5);
        assert_eq!(range.lerp(0.5), 1.5);
    }
}
