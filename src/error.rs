//! Error types
//!
//! Gameplay itself never fails: counters and indices are in range by
//! construction. Errors only come from the host edges (assets, settings).

use thiserror::Error;

/// Asset lookup failure. Callers log it and fall back to a degraded drawable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("unable to load texture: {image} (not preloaded)")]
    NotLoaded { image: String },
    #[error("invalid sprite sheet cell size for {image}: {cell_width}x{cell_height}")]
    InvalidCellSize {
        image: String,
        cell_width: u32,
        cell_height: u32,
    },
}

/// Settings file failure
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
