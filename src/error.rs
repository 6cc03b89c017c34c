//! Error types for mounting the field and loading settings.
//!
//! Neither error ever reaches the page: callers log it and carry on without
//! the animated background.

use std::fmt;

/// Errors that can occur while attaching the field to a canvas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// Window has no document.
    NoDocument,
    /// Nothing matched the canvas selector.
    CanvasNotFound(String),
    /// The selected element is not a `<canvas>`.
    NotACanvas,
    /// The canvas refused to hand out a 2D context.
    NoContext,
    /// A browser API call threw.
    Js(String),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MountError::NoWindow => write!(f, "No window object available"),
            MountError::NoDocument => write!(f, "Window has no document"),
            MountError::CanvasNotFound(selector) => {
                write!(f, "No element matches canvas selector '{}'", selector)
            }
            MountError::NotACanvas => write!(f, "Selected element is not a canvas"),
            MountError::NoContext => write!(f, "Canvas 2D context unavailable"),
            MountError::Js(msg) => write!(f, "Browser call failed: {}", msg),
        }
    }
}

impl std::error::Error for MountError {}

/// Errors that can occur while loading field settings.
#[derive(Debug)]
pub enum SettingsError {
    /// Settings text is not valid JSON for `FieldSettings`.
    Parse(serde_json::Error),
    /// Failed to read a settings file.
    Io(std::io::Error),
    /// A value is outside its allowed range.
    OutOfRange {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "Failed to parse field settings: {}", e),
            SettingsError::Io(e) => write!(f, "Failed to read field settings: {}", e),
            SettingsError::OutOfRange { field, reason } => {
                write!(f, "Invalid field setting '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Io(e) => Some(e),
            SettingsError::OutOfRange { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}
