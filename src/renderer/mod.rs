//! Rendering collaborator interface
//!
//! Headless side of rendering: what is registered, where, and where the
//! camera looks. Pixel output belongs to the host.

pub mod camera;
pub mod drawable;
pub mod registry;

pub use camera::{Axis, Camera, CameraMessage};
pub use drawable::{Drawable, SpriteSheet};
pub use registry::{RenderComponent, RenderList};
