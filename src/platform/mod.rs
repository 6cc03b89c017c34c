//! Platform layer
//!
//! - `frame_loop`: Stopped/Running state machine shared by every host
//! - `web`: Canvas surface and mount/unmount glue (wasm32 only)

pub mod frame_loop;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use frame_loop::{FrameLoop, LoopState};
