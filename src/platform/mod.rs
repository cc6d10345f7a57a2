//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (held buttons in, edge-triggered presses out)
//! - Asset lookup (preloaded images, sprite sheets)

pub mod assets;
pub mod input;

pub use assets::Assets;
pub use input::{Button, ButtonState, InputState};
