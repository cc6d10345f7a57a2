//! Enemies living in pipes
//!
//! Type 0 sits inside a pipe and bobs: up one cell over 128 steps, holds for
//! 128, sinks back over 128, repeat. It never moves sideways and is never
//! removed. Standing over one while it pokes up is fatal.

use std::ops::Range;

use glam::IVec2;
use serde::Serialize;

use super::command::{Command, DeathCause, Outbox};
use super::points::{PointKind, SpatialSets};
use super::state::{EntityIds, SimFlags};
use crate::column_x;
use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnemyKind {
    /// Pipe plant: bobs out of its pipe
    Type0,
}

/// Where the player's feet are this step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerProbe {
    pub left_foot_x: i32,
    pub right_foot_x: i32,
    pub bottom_y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: IVec2,
    /// Position in the bob cycle (0..3 * TYPE0_COUNT)
    pub count: i32,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: IVec2) -> Self {
        Self {
            id,
            kind,
            pos,
            count: 0,
        }
    }

    /// Pixel X range that counts as a hit (sprite minus its side borders)
    pub fn hit_zone(&self) -> Range<i32> {
        self.pos.x + EXTRA_SIZE_X_TYPE0 + 1..self.pos.x + CELL_WIDTH_32 - EXTRA_SIZE_X_TYPE0
    }

    /// Player feet over this enemy, standing no lower than the pipe top, with
    /// the enemy's head already above the foot line
    pub fn touches(&self, points: &SpatialSets, probe: PlayerProbe) -> bool {
        let zone = self.hit_zone();
        let over = [probe.left_foot_x, probe.right_foot_x]
            .into_iter()
            .any(|x| zone.contains(&x) && points.contains(PointKind::EnemyType0, x));
        over
            && PIPE_POSITION_Y >= probe.bottom_y
            && self.pos.y + EXTRA_SIZE_Y_TYPE0 < probe.bottom_y
    }

    /// One step of the bob animation
    pub fn bob(&mut self) {
        match self.kind {
            EnemyKind::Type0 => {
                if self.count < TYPE0_COUNT {
                    self.pos.y = PIPE_POSITION_Y - self.count / 4;
                } else if self.count < TYPE0_COUNT * 2 {
                    // hold
                } else {
                    self.pos.y =
                        PIPE_POSITION_Y - CELL_HEIGHT_32 + (self.count - TYPE0_COUNT * 2) / 4;
                }
                self.count = (self.count + 1) % (TYPE0_COUNT * 3);
            }
        }
    }
}

/// Put one enemy in every pipe and record their hit zones
pub fn spawn_enemies(points: &mut SpatialSets, ids: &mut EntityIds) -> Vec<Enemy> {
    let mut enemies = Vec::new();
    let mut column = 0;
    while column <= TILE_NUM {
        let x = column_x(column);
        if points.is_pipe(x) {
            let enemy = Enemy::new(
                ids.allocate(),
                EnemyKind::Type0,
                IVec2::new(x, PIPE_POSITION_Y),
            );
            for hx in enemy.hit_zone() {
                points.insert(PointKind::EnemyType0, hx);
            }
            enemies.push(enemy);
            // The pipe spans two columns
            column += 1;
        }
        column += 1;
    }
    log::info!("Spawned {} enemies", enemies.len());
    enemies
}

/// Advance every enemy one step.
///
/// A touch registered last step kills the player now, before anything else
/// moves.
pub fn step(
    enemies: &mut [Enemy],
    points: &SpatialSets,
    flags: &mut SimFlags,
    probe: PlayerProbe,
    outbox: &mut Outbox,
) {
    if flags.touched {
        if flags.game_over {
            return;
        }
        flags.touched = false;
        outbox.push(Command::KillPlayer(DeathCause::Enemy));
        flags.game_over = true;
    }
    if flags.game_over {
        return;
    }

    for enemy in enemies.iter_mut() {
        if enemy.touches(points, probe) {
            flags.touched = true;
        }
        enemy.bob();
    }
}
