//! Camera directives
//!
//! The simulation issues fire-and-forget directives; the host applies them to
//! its camera whenever it gets to them.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{CAMERA_BOUNDS_MAX_X, CAMERA_BOUNDS_MAX_Y, WINDOW_HEIGHT, WINDOW_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    X,
    Y,
}

/// Move the camera along one axis, by `value` or to `value`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraMessage {
    pub axis: Axis,
    pub value: f32,
    pub incremental: bool,
}

impl CameraMessage {
    pub fn scroll_x(delta: f32) -> Self {
        Self {
            axis: Axis::X,
            value: delta,
            incremental: true,
        }
    }

    pub fn set_x(x: f32) -> Self {
        Self {
            axis: Axis::X,
            value: x,
            incremental: false,
        }
    }
}

/// Camera center in world pixels, kept inside its bounds
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub center: Vec2,
    half_view: Vec2,
    bounds_min: Vec2,
    bounds_max: Vec2,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vec2::new(WINDOW_WIDTH as f32, WINDOW_HEIGHT as f32),
            Vec2::ZERO,
            Vec2::new(CAMERA_BOUNDS_MAX_X, CAMERA_BOUNDS_MAX_Y),
        )
    }
}

impl Camera {
    pub fn new(view: Vec2, bounds_min: Vec2, bounds_max: Vec2) -> Self {
        let half_view = view / 2.0;
        Self {
            center: half_view,
            half_view,
            bounds_min,
            bounds_max,
        }
    }

    pub fn apply(&mut self, msg: CameraMessage) {
        let current = match msg.axis {
            Axis::X => &mut self.center.x,
            Axis::Y => &mut self.center.y,
        };
        if msg.incremental {
            *current += msg.value;
        } else {
            *current = msg.value;
        }
        self.clamp();
    }

    /// World X of the left edge of the view
    pub fn left(&self) -> f32 {
        self.center.x - self.half_view.x
    }

    /// Keep the view inside the bounds on each axis where the bounds are
    /// wider than the view
    fn clamp(&mut self) {
        let lo = self.bounds_min + self.half_view;
        let hi = self.bounds_max - self.half_view;
        if lo.x <= hi.x {
            self.center.x = self.center.x.clamp(lo.x, hi.x);
        }
        if lo.y <= hi.y {
            self.center.y = self.center.y.clamp(lo.y, hi.y);
        }
    }
}
