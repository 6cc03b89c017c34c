//! Drawing surface abstraction
//!
//! The simulation only ever needs four primitives from whatever it draws on:
//! the pixel size, a rectangular clear, a filled circle and a stroked line.
//! The browser backend wraps `CanvasRenderingContext2d`; [`RecordingSurface`]
//! keeps the calls in memory for tests and the headless runner.

pub mod recording;

pub use recording::{DrawCommand, RecordingSurface};

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 8-bit RGB with a floating point alpha, matching CSS `rgba()`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    #[inline]
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// CSS color string, e.g. `rgba(210, 210, 210, 0.2)`
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// A 2D target the field can draw onto
pub trait Surface {
    /// Current pixel size (width, height)
    fn size(&self) -> (f64, f64);

    /// Clear a rectangle to transparent
    fn clear(&mut self, x: f64, y: f64, width: f64, height: f64);

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba);

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba);

    /// Clear the whole surface
    fn clear_all(&mut self) {
        let (w, h) = self.size();
        self.clear(0.0, 0.0, w, h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_css() {
        assert_eq!(Rgba::new(210, 210, 210, 0.2).to_css(), "rgba(210, 210, 210, 0.2)");
        assert_eq!(Rgba::new(100, 249, 120, 1.0).to_css(), "rgba(100, 249, 120, 1)");
    }

    #[test]
    fn test_with_alpha() {
        let c = Rgba::new(1, 2, 3, 0.5).with_alpha(0.1);
        assert_eq!(c, Rgba::new(1, 2, 3, 0.1));
    }
}
