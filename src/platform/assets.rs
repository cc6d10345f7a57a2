//! Asset catalog
//!
//! Images must be preloaded before the level is built. Lookups of anything
//! else fail with `AssetError`; the `*_or_missing` helpers log the failure and
//! hand back a degraded drawable so play continues.

use std::collections::BTreeSet;

use crate::error::AssetError;
use crate::renderer::{Drawable, SpriteSheet};

pub const TILE_SHEET: &str = "assets/tilesets/overworld.png";
pub const CASTLE_IMAGE: &str = "assets/tilesets/castle.png";
pub const PLAYER_SHEET: &str = "assets/characters/hero.png";
pub const ENEMY_SHEET: &str = "assets/characters/enemies.png";

/// Names of the images the host has loaded
#[derive(Debug, Clone, Default)]
pub struct Assets {
    loaded: BTreeSet<String>,
}

impl Assets {
    /// Nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Every image the game uses
    pub fn preloaded() -> Self {
        let mut assets = Self::new();
        for image in [TILE_SHEET, CASTLE_IMAGE, PLAYER_SHEET, ENEMY_SHEET] {
            assets.load(image);
        }
        assets
    }

    pub fn load(&mut self, image: &str) {
        self.loaded.insert(image.to_string());
    }

    pub fn is_loaded(&self, image: &str) -> bool {
        self.loaded.contains(image)
    }

    /// Resolve a sprite sheet with fixed cell size
    pub fn sheet(
        &self,
        image: &'static str,
        cell_width: u32,
        cell_height: u32,
    ) -> Result<SpriteSheet, AssetError> {
        if cell_width == 0 || cell_height == 0 {
            return Err(AssetError::InvalidCellSize {
                image: image.to_string(),
                cell_width,
                cell_height,
            });
        }
        if !self.is_loaded(image) {
            return Err(AssetError::NotLoaded {
                image: image.to_string(),
            });
        }
        Ok(SpriteSheet::new(image, cell_width, cell_height))
    }

    /// Resolve a whole image
    pub fn sprite(&self, image: &'static str) -> Result<Drawable, AssetError> {
        if !self.is_loaded(image) {
            return Err(AssetError::NotLoaded {
                image: image.to_string(),
            });
        }
        Ok(Drawable::Sprite { image })
    }

    pub fn sheet_or_missing(
        &self,
        image: &'static str,
        cell_width: u32,
        cell_height: u32,
    ) -> SpriteSheet {
        self.sheet(image, cell_width, cell_height).unwrap_or_else(|err| {
            log::warn!("{}", err);
            SpriteSheet::missing(cell_width, cell_height)
        })
    }

    pub fn sprite_or_missing(&self, image: &'static str) -> Drawable {
        self.sprite(image).unwrap_or_else(|err| {
            log::warn!("{}", err);
            Drawable::Missing
        })
    }
}
