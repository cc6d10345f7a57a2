//! Procedural level generation
//!
//! Lays ground, pitfalls, clouds, mountains, pipes and the castle along the
//! column axis, recording hazard pixels into the membership sets. Runs once
//! per level before any step.
//!
//! Passes:
//! 1. Ground/pitfalls, with clouds interleaved in the same column loop
//! 2. Mountains (need 7 pitfall-free columns, spaced by 20)
//! 3. Pipes (need 3 columns free of pitfalls and mountains, spaced by 30)
//! 4. Castle at the goal column

use glam::Vec2;
use rand::Rng;

use super::points::{PointKind, SpatialSets};
use crate::column_x;
use crate::consts::*;
use crate::platform::Assets;
use crate::platform::assets::{CASTLE_IMAGE, TILE_SHEET};
use crate::renderer::{Drawable, RenderComponent, SpriteSheet};

/// What a tile depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileKind {
    Ground,
    Cloud,
    Mountain,
    Pipe,
    Castle,
}

/// A static drawable placed by the generator
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub kind: TileKind,
    pub drawable: Drawable,
    pub pos: Vec2,
    pub z: f32,
}

impl Tile {
    pub fn render_component(&self) -> RenderComponent {
        RenderComponent::world(self.drawable.clone(), self.pos, self.z)
    }
}

/// Generated geometry plus its membership sets
#[derive(Debug, Clone, Default)]
pub struct Level {
    tiles: Vec<Tile>,
    points: SpatialSets,
}

impl Level {
    pub fn new(tiles: Vec<Tile>, points: SpatialSets) -> Self {
        Self { tiles, points }
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn points(&self) -> &SpatialSets {
        &self.points
    }

    /// Only level setup (enemy spawning) may still append
    pub(crate) fn points_mut(&mut self) -> &mut SpatialSets {
        &mut self.points
    }

    pub fn count(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|t| t.kind == kind).count()
    }
}

/// Pitfall run state: a started pitfall is always forced to continue once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pitfall {
    None,
    Started,
    Continuing,
}

impl Pitfall {
    fn advance(self, start: bool) -> Self {
        if start {
            Pitfall::Started
        } else if self == Pitfall::Started {
            Pitfall::Continuing
        } else {
            Pitfall::None
        }
    }

    fn is_open(self) -> bool {
        self != Pitfall::None
    }
}

/// Cloud drawing state. A cloud is a head cell, a body cell, and a tail that
/// overlaps the body by half a cloud cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cloud {
    Idle,
    Head { tier: i32 },
    Body { tier: i32 },
    Tail { tier: i32 },
}

struct Sheets {
    tiles16: SpriteSheet,
    tiles32: SpriteSheet,
    tiles16x64: SpriteSheet,
}

/// Build a full level
pub fn generate_level<R: Rng + ?Sized>(rng: &mut R, assets: &Assets) -> Level {
    let sheets = Sheets {
        tiles16: assets.sheet_or_missing(TILE_SHEET, CELL_WIDTH_16 as u32, CELL_HEIGHT_16 as u32),
        tiles32: assets.sheet_or_missing(TILE_SHEET, CELL_WIDTH_32 as u32, CELL_HEIGHT_32 as u32),
        tiles16x64: assets.sheet_or_missing(TILE_SHEET, CELL_WIDTH_16 as u32, CELL_HEIGHT_64 as u32),
    };

    let mut tiles = Vec::new();
    let mut points = SpatialSets::new();

    lay_ground_and_clouds(rng, &sheets, &mut tiles, &mut points);
    lay_mountains(&sheets, &mut tiles, &mut points);
    lay_pipes(&sheets, &mut tiles, &mut points);

    tiles.push(Tile {
        kind: TileKind::Castle,
        drawable: assets.sprite_or_missing(CASTLE_IMAGE),
        pos: Vec2::new(
            column_x(TILE_NUM - GOAL_TILE_NUM) as f32,
            CASTLE_POSITION_Y as f32,
        ),
        z: 0.0,
    });

    let level = Level::new(tiles, points);
    log::info!(
        "Level generated: {} tiles, {} pitfall px, {} mountains, {} pipes",
        level.tiles.len(),
        level.points.len(PointKind::Fall),
        level.count(TileKind::Mountain) / MOUNT_TILE_NUM as usize,
        level.count(TileKind::Pipe),
    );
    level
}

fn lay_ground_and_clouds<R: Rng + ?Sized>(
    rng: &mut R,
    sheets: &Sheets,
    tiles: &mut Vec<Tile>,
    points: &mut SpatialSets,
) {
    let mut pitfall = Pitfall::None;
    let mut cloud = Cloud::Idle;

    for column in 0..=TILE_NUM {
        // Ground / pitfall
        if (START_SAFE_TILE_NUM..HAZARD_END_COLUMN).contains(&column) {
            let hit = rng.random_range(0..PITFALL_ODDS) == 0;
            // The forced continuation must also land before the goal margin
            let room = column + 1 < HAZARD_END_COLUMN;
            pitfall = pitfall.advance(hit && room);
        } else {
            pitfall = Pitfall::None;
        }

        if pitfall.is_open() {
            points.insert_span(PointKind::Fall, column_x(column), CELL_WIDTH_16);
        } else {
            for depth in 0..TILE_DEPTH {
                tiles.push(Tile {
                    kind: TileKind::Ground,
                    drawable: sheets.tiles16.cell(GROUND_SPRITE_CELL),
                    pos: Vec2::new(
                        column_x(column) as f32,
                        (WINDOW_HEIGHT - (depth + 1) * CELL_HEIGHT_16) as f32,
                    ),
                    z: 0.0,
                });
            }
        }

        // Clouds
        if cloud == Cloud::Idle {
            let roll = rng.random_range(0..CLOUD_ROLL);
            if roll < CLOUD_TIERS {
                cloud = Cloud::Head { tier: roll };
            }
        }
        let (tier, slot, cell, z, next) = match cloud {
            Cloud::Idle => continue,
            Cloud::Head { tier } => (tier, column as f32, 0, 1.0, Cloud::Body { tier }),
            Cloud::Body { tier } => (tier, column as f32, 1, 2.0, Cloud::Tail { tier }),
            Cloud::Tail { tier } => (tier, column as f32 - 0.5, 1, 3.0, Cloud::Idle),
        };
        tiles.push(Tile {
            kind: TileKind::Cloud,
            drawable: sheets.tiles32.cell(CLOUD_SPRITE_CELL + cell),
            pos: Vec2::new(
                slot * CELL_WIDTH_32 as f32,
                (WINDOW_HEIGHT / 3 - tier * CELL_HEIGHT_16) as f32,
            ),
            z,
        });
        cloud = next;
    }
}

fn lay_mountains(sheets: &Sheets, tiles: &mut Vec<Tile>, points: &mut SpatialSets) {
    let mut column = 0;
    while column <= TILE_NUM {
        let clear = !points.any_column(PointKind::Fall, column, MOUNT_TILE_NUM + 2);
        let in_zone =
            column >= START_SAFE_TILE_NUM && column + MOUNT_TILE_NUM <= HAZARD_END_COLUMN;
        if clear && in_zone {
            for j in 0..MOUNT_TILE_NUM {
                tiles.push(Tile {
                    kind: TileKind::Mountain,
                    drawable: sheets.tiles16x64.cell(MOUNT_SPRITE_CELL + j as usize),
                    pos: Vec2::new(column_x(column + j) as f32, MOUNT_POSITION_Y as f32),
                    z: 0.0,
                });
                points.insert_span(PointKind::Mountain, column_x(column + j), CELL_WIDTH_16);
            }
            log::debug!("mountain at column {}", column);
            column += MOUNT_SPACING;
        }
        column += 1;
    }
}

fn lay_pipes(sheets: &Sheets, tiles: &mut Vec<Tile>, points: &mut SpatialSets) {
    let pipe_columns = CELL_WIDTH_32 / CELL_WIDTH_16;
    let mut column = 0;
    while column <= TILE_NUM {
        let lookahead = PIPE_TILE_NUM + 2;
        let clear = !points.any_column(PointKind::Fall, column, lookahead)
            && !points.any_column(PointKind::Mountain, column, lookahead);
        let in_zone =
            column >= START_SAFE_TILE_NUM && column + pipe_columns <= HAZARD_END_COLUMN;
        if clear && in_zone {
            tiles.push(Tile {
                kind: TileKind::Pipe,
                drawable: sheets.tiles32.cell(PIPE_SPRITE_CELL),
                pos: Vec2::new(column_x(column) as f32, PIPE_POSITION_Y as f32),
                z: 7.0,
            });
            points.insert_span(PointKind::Pipe, column_x(column), CELL_WIDTH_32);
            log::debug!("pipe at column {}", column);
            column += PIPE_SPACING;
        }
        column += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_of;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::BTreeSet;

    fn level_for(seed: u64) -> Level {
        let mut rng = Pcg32::seed_from_u64(seed);
        generate_level(&mut rng, &Assets::preloaded())
    }

    fn columns(level: &Level, kind: PointKind) -> BTreeSet<i32> {
        level.points().iter(kind).map(column_of).collect()
    }

    /// Lengths of consecutive column runs
    fn runs(columns: &BTreeSet<i32>) -> Vec<i32> {
        let mut runs = Vec::new();
        let mut prev: Option<i32> = None;
        for &c in columns {
            match prev {
                Some(p) if p + 1 == c => {
                    if let Some(last) = runs.last_mut() {
                        *last += 1;
                    }
                }
                _ => runs.push(1),
            }
            prev = Some(c);
        }
        runs
    }

    #[test]
    fn test_pitfall_forced_continue() {
        assert_eq!(Pitfall::None.advance(true), Pitfall::Started);
        assert_eq!(Pitfall::Started.advance(false), Pitfall::Continuing);
        assert_eq!(Pitfall::Continuing.advance(false), Pitfall::None);
        assert_eq!(Pitfall::Continuing.advance(true), Pitfall::Started);
        assert_eq!(Pitfall::Started.advance(true), Pitfall::Started);
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = level_for(7);
        let b = level_for(7);
        assert_eq!(a.tiles(), b.tiles());
        for kind in [PointKind::Fall, PointKind::Mountain, PointKind::Pipe] {
            assert_eq!(columns(&a, kind), columns(&b, kind));
        }
    }

    #[test]
    fn test_ground_fills_every_solid_column() {
        let level = level_for(42);
        let pit_columns = columns(&level, PointKind::Fall);
        let solid = (TILE_NUM + 1) as usize - pit_columns.len();
        assert_eq!(level.count(TileKind::Ground), solid * TILE_DEPTH as usize);
        // Pits cover whole columns
        assert_eq!(
            level.points().len(PointKind::Fall),
            pit_columns.len() * CELL_WIDTH_16 as usize
        );
    }

    #[test]
    fn test_castle_at_goal_column() {
        let level = level_for(3);
        let castles: Vec<_> = level
            .tiles()
            .iter()
            .filter(|t| t.kind == TileKind::Castle)
            .collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].pos, Vec2::new(3040.0, CASTLE_POSITION_Y as f32));
        assert_eq!(castles[0].drawable, Drawable::Sprite { image: CASTLE_IMAGE });
    }

    #[test]
    fn test_missing_assets_still_generate() {
        let mut rng = Pcg32::seed_from_u64(5);
        let level = generate_level(&mut rng, &Assets::new());
        assert!(!level.tiles().is_empty());
        assert!(level.tiles().iter().all(|t| t.drawable.is_missing()));
    }

    #[test]
    fn test_clouds_come_in_threes() {
        let level = level_for(11);
        let clouds: Vec<_> = level
            .tiles()
            .iter()
            .filter(|t| t.kind == TileKind::Cloud)
            .collect();
        assert!(!clouds.is_empty());
        for cloud in &clouds {
            assert!((1.0..=3.0).contains(&cloud.z));
        }
        // Every tail overlaps the body half a cloud cell back
        for pair in clouds.windows(2) {
            if pair[1].z == 3.0 {
                assert_eq!(pair[0].z, 2.0);
                assert_eq!(pair[1].pos.x, pair[0].pos.x + CELL_WIDTH_32 as f32 / 2.0);
                assert_eq!(pair[1].pos.y, pair[0].pos.y);
            }
        }
    }

    proptest! {
        #[test]
        fn hazards_stay_out_of_safety_margins(seed in any::<u64>()) {
            let level = level_for(seed);
            let lo = column_x(START_SAFE_TILE_NUM);
            let hi = column_x(HAZARD_END_COLUMN);
            for kind in [PointKind::Fall, PointKind::Mountain, PointKind::Pipe] {
                for x in level.points().iter(kind) {
                    prop_assert!(x >= lo && x < hi, "{:?} at {}", kind, x);
                }
            }
        }

        #[test]
        fn mountains_and_pipes_disjoint(seed in any::<u64>()) {
            let level = level_for(seed);
            let points = level.points();
            for x in points.iter(PointKind::Pipe) {
                prop_assert!(!points.contains(PointKind::Mountain, x));
                prop_assert!(!points.is_fall(x));
            }
            for x in points.iter(PointKind::Mountain) {
                prop_assert!(!points.is_fall(x));
            }
        }

        #[test]
        fn pitfalls_span_at_least_two_columns(seed in any::<u64>()) {
            let level = level_for(seed);
            for run in runs(&columns(&level, PointKind::Fall)) {
                prop_assert!(run >= 2);
            }
        }

        #[test]
        fn features_keep_their_spacing(seed in any::<u64>()) {
            let level = level_for(seed);
            let pipes: Vec<i32> = level
                .tiles()
                .iter()
                .filter(|t| t.kind == TileKind::Pipe)
                .map(|t| column_of(t.pos.x as i32))
                .collect();
            for pair in pipes.windows(2) {
                prop_assert!(pair[1] - pair[0] > PIPE_SPACING);
            }
            prop_assert_eq!(pipes.len() * CELL_WIDTH_32 as usize, level.points().len(PointKind::Pipe));

            let mountains = level.count(TileKind::Mountain);
            prop_assert_eq!(mountains % MOUNT_TILE_NUM as usize, 0);
            prop_assert_eq!(mountains * CELL_WIDTH_16 as usize, level.points().len(PointKind::Mountain));
        }
    }
}
