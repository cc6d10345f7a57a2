//! Side Runner - a side-scrolling platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (level generation, player, enemies, overlay)
//! - `renderer`: Headless draw registry and camera the host reads each step
//! - `platform`: Input edge detection, asset catalog
//! - `settings`: Runner configuration

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AssetError, ConfigError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Window metrics (fixed after startup)
    pub const WINDOW_WIDTH: i32 = 480;
    pub const WINDOW_HEIGHT: i32 = 320;

    /// Number of level columns (the axis runs `0..=TILE_NUM`)
    pub const TILE_NUM: i32 = 200;
    /// Columns between the goal and the last column
    pub const GOAL_TILE_NUM: i32 = 10;
    /// Hazard-free columns before the end of the level
    pub const AROUND_GOAL_TILE_NUM: i32 = 30;
    /// Hazard-free columns at the start of the level
    pub const START_SAFE_TILE_NUM: i32 = 10;
    pub const MOUNT_TILE_NUM: i32 = 5;
    pub const PIPE_TILE_NUM: i32 = 1;
    /// Ground tiles stacked under a non-pitfall column
    pub const TILE_DEPTH: i32 = 4;
    /// Columns skipped after placing a mountain / pipe
    pub const MOUNT_SPACING: i32 = 20;
    pub const PIPE_SPACING: i32 = 30;
    /// 1 in N chance per column to open a pitfall
    pub const PITFALL_ODDS: u32 = 10;
    /// A cloud starts when a roll in `0..CLOUD_ROLL` lands below `CLOUD_TIERS`
    pub const CLOUD_ROLL: i32 = 12;
    pub const CLOUD_TIERS: i32 = 3;

    /// Sprite cell sizes (pixels)
    pub const CELL_WIDTH_16: i32 = 16;
    pub const CELL_HEIGHT_16: i32 = 16;
    pub const CELL_WIDTH_32: i32 = 32;
    pub const CELL_HEIGHT_32: i32 = 32;
    pub const CELL_HEIGHT_64: i32 = 64;

    /// Sprite sheet cells
    pub const GROUND_SPRITE_CELL: usize = 0;
    pub const CLOUD_SPRITE_CELL: usize = 6;
    pub const MOUNT_SPRITE_CELL: usize = 11;
    pub const PIPE_SPRITE_CELL: usize = 3;
    pub const PLAYER_SPRITE_CELL: usize = 8;
    pub const ENEMY_TYPE0_SPRITE_CELL: usize = 7;

    /// Player movement (pixels / steps)
    pub const MOVE_DISTANCE: i32 = 4;
    pub const JUMP_HEIGHT: i32 = 4;
    pub const MAX_COUNT: i32 = 40;
    /// Extra descent budget when a jump starts on top of a pipe
    pub const PIPE_JUMP_BONUS: i32 = 8;
    /// Foot inset from each side of the 32px player sprite
    pub const EXTRA_SIZE_X: i32 = 8;
    pub const WALK_FRAMES: usize = 5;
    pub const JUMP_FRAME: usize = 3;

    /// Enemy type 0 animation phase length (steps)
    pub const TYPE0_COUNT: i32 = 128;
    /// Hit-zone insets of the 32px enemy sprite
    pub const EXTRA_SIZE_X_TYPE0: i32 = 6;
    pub const EXTRA_SIZE_Y_TYPE0: i32 = 8;

    /// Derived heights (top edge Y)
    pub const MOUNT_POSITION_Y: i32 = WINDOW_HEIGHT - CELL_HEIGHT_16 * 7;
    pub const PIPE_POSITION_Y: i32 = WINDOW_HEIGHT - CELL_HEIGHT_16 * 6;
    pub const ON_PIPE_POSITION_Y: i32 = WINDOW_HEIGHT - CELL_HEIGHT_16 * 8;
    pub const CASTLE_POSITION_Y: i32 = WINDOW_HEIGHT - CELL_HEIGHT_16 * 9;
    pub const PLAYER_START_Y: i32 = WINDOW_HEIGHT - CELL_HEIGHT_16 * 6;

    /// Left-foot X at which the goal triggers
    pub const GOAL_X: i32 = (TILE_NUM - GOAL_TILE_NUM + 2) * CELL_WIDTH_16;
    /// First column of the goal-side safety margin
    pub const HAZARD_END_COLUMN: i32 = TILE_NUM - AROUND_GOAL_TILE_NUM;

    /// Camera bounds (world pixels)
    pub const CAMERA_BOUNDS_MAX_X: f32 = 3200.0;
    pub const CAMERA_BOUNDS_MAX_Y: f32 = 300.0;
}

/// Pixel X of the left edge of a level column
#[inline]
pub fn column_x(column: i32) -> i32 {
    column * consts::CELL_WIDTH_16
}

/// Column containing a pixel X
#[inline]
pub fn column_of(x: i32) -> i32 {
    x.div_euclid(consts::CELL_WIDTH_16)
}
