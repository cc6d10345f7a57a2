//! Drawables and sprite sheets
//!
//! The simulation never touches pixels; it only names which cell of which
//! image an entity shows. The host decodes and draws.

use serde::Serialize;

/// Something the host can draw
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Drawable {
    /// One cell of a sprite sheet
    Cell {
        image: &'static str,
        cell_width: u32,
        cell_height: u32,
        index: usize,
    },
    /// A whole image
    Sprite { image: &'static str },
    /// HUD text
    Text { text: String, size: f32 },
    /// Asset failed to resolve; drawn as nothing
    Missing,
}

impl Drawable {
    pub fn is_missing(&self) -> bool {
        matches!(self, Drawable::Missing)
    }
}

/// A sprite sheet split into fixed-size cells
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSheet {
    /// `None` when the image failed to resolve
    image: Option<&'static str>,
    pub cell_width: u32,
    pub cell_height: u32,
}

impl SpriteSheet {
    pub fn new(image: &'static str, cell_width: u32, cell_height: u32) -> Self {
        Self {
            image: Some(image),
            cell_width,
            cell_height,
        }
    }

    /// A sheet whose every cell is `Drawable::Missing`
    pub fn missing(cell_width: u32, cell_height: u32) -> Self {
        Self {
            image: None,
            cell_width,
            cell_height,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.image.is_none()
    }

    /// Drawable for one cell
    pub fn cell(&self, index: usize) -> Drawable {
        match self.image {
            Some(image) => Drawable::Cell {
                image,
                cell_width: self.cell_width,
                cell_height: self.cell_height,
                index,
            },
            None => Drawable::Missing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_carries_geometry() {
        let sheet = SpriteSheet::new("tiles.png", 16, 64);
        assert_eq!(
            sheet.cell(11),
            Drawable::Cell {
                image: "tiles.png",
                cell_width: 16,
                cell_height: 64,
                index: 11,
            }
        );
    }

    #[test]
    fn test_missing_sheet_degrades() {
        let sheet = SpriteSheet::missing(32, 32);
        assert!(sheet.is_missing());
        assert!(sheet.cell(3).is_missing());
    }
}
