//! Player state machine
//!
//! Fixed per-step deltas, no velocity: walking moves 4px, a jump climbs 4px
//! per step until `top_count` then sinks 4px per step until `bottom_count`.
//! All ground and hazard tests use the two foot X coordinates against the
//! level's membership sets.

use glam::IVec2;
use serde::Serialize;

use super::command::{Command, DeathCause, Outbox};
use super::enemy::PlayerProbe;
use super::points::SpatialSets;
use super::state::SimFlags;
use super::tick::TickInput;
use crate::consts::*;
use crate::renderer::CameraMessage;

/// Observable phase, derived from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlayerPhase {
    WaitingToStart,
    Running,
    Jumping,
    Falling,
    Dead,
    AtGoal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: u32,
    /// Top-left of the 32x32 sprite, world pixels
    pub pos: IVec2,
    /// Y when standing on the ground
    pub rest_y: i32,
    /// Distance the camera has been asked to scroll
    pub camera_distance: i32,
    /// Walk-cycle frame (0..WALK_FRAMES)
    pub use_cell: usize,
    /// Sprite sheet cell currently shown
    pub sprite_cell: usize,
    /// Steps into the current jump; 0 when not jumping
    pub jump_count: i32,
    /// Extra descent budget carried over by a double jump
    pub jump_count_2step: i32,
    pub top_count: i32,
    pub bottom_count: i32,
    pub is_jumping: bool,
    pub is_on_pipe: bool,
    pub is_falling: bool,
    pub has_started: bool,
    pub at_goal: bool,
}

impl Player {
    pub fn new(id: u32) -> Self {
        let mut player = Self {
            id,
            pos: IVec2::ZERO,
            rest_y: 0,
            camera_distance: 0,
            use_cell: 0,
            sprite_cell: PLAYER_SPRITE_CELL,
            jump_count: 0,
            jump_count_2step: 0,
            top_count: 0,
            bottom_count: 0,
            is_jumping: false,
            is_on_pipe: false,
            is_falling: false,
            has_started: false,
            at_goal: false,
        };
        player.reset();
        player
    }

    /// Back to the start line, waiting for the title to be confirmed
    pub fn reset(&mut self) {
        self.pos = IVec2::new(0, PLAYER_START_Y);
        self.rest_y = PLAYER_START_Y;
        self.camera_distance = 0;
        self.use_cell = 0;
        self.sprite_cell = PLAYER_SPRITE_CELL;
        self.jump_count = 0;
        self.jump_count_2step = 0;
        self.top_count = 1 + MAX_COUNT / 2;
        self.bottom_count = 0;
        self.is_jumping = false;
        self.is_on_pipe = false;
        self.is_falling = false;
        self.has_started = false;
        self.at_goal = false;
    }

    #[inline]
    pub fn left_foot_x(&self) -> i32 {
        self.pos.x + EXTRA_SIZE_X
    }

    #[inline]
    pub fn right_foot_x(&self) -> i32 {
        self.pos.x + CELL_WIDTH_32 - EXTRA_SIZE_X
    }

    /// Foot line Y
    #[inline]
    pub fn bottom_y(&self) -> i32 {
        self.pos.y + CELL_HEIGHT_32
    }

    pub fn probe(&self) -> PlayerProbe {
        PlayerProbe {
            left_foot_x: self.left_foot_x(),
            right_foot_x: self.right_foot_x(),
            bottom_y: self.bottom_y(),
        }
    }

    fn over_pipe(&self, points: &SpatialSets) -> bool {
        points.is_pipe(self.left_foot_x()) || points.is_pipe(self.right_foot_x())
    }

    pub fn phase(&self, flags: &SimFlags) -> PlayerPhase {
        if flags.game_over {
            PlayerPhase::Dead
        } else if self.at_goal {
            PlayerPhase::AtGoal
        } else if !self.has_started {
            PlayerPhase::WaitingToStart
        } else if self.is_falling {
            PlayerPhase::Falling
        } else if self.jump_count != 0 {
            PlayerPhase::Jumping
        } else {
            PlayerPhase::Running
        }
    }

    /// Advance one step
    pub fn step(
        &mut self,
        points: &SpatialSets,
        flags: &SimFlags,
        input: &TickInput,
        outbox: &mut Outbox,
    ) {
        if flags.game_over || !self.has_started || self.at_goal {
            return;
        }

        if self.left_foot_x() >= GOAL_X {
            self.at_goal = true;
            outbox.push(Command::ReachGoal);
            return;
        }

        // Both feet over a pitfall while grounded: fall for good
        if self.jump_count == 0
            && points.is_fall(self.left_foot_x())
            && points.is_fall(self.right_foot_x())
        {
            self.is_falling = true;
            self.pos.y += MOVE_DISTANCE;
        }
        if self.pos.y > WINDOW_HEIGHT {
            outbox.push(Command::KillPlayer(DeathCause::Fall));
            return;
        }
        if self.is_falling {
            return;
        }

        if self.pos.y == self.rest_y || self.is_on_pipe {
            self.sprite_cell = PLAYER_SPRITE_CELL;
        }

        if input.move_right {
            self.move_right(points, outbox);
        }
        if input.jump {
            self.start_jump();
        }
        if self.jump_count != 0 {
            self.advance_jump(points);
        }
    }

    fn move_right(&mut self, points: &SpatialSets, outbox: &mut Outbox) {
        // Can't walk into a pipe's body
        let blocked = points.is_pipe(self.right_foot_x()) && self.pos.y > ON_PIPE_POSITION_Y;
        if !blocked {
            if self.is_on_pipe
                && self.jump_count == 0
                && !points.is_pipe(self.left_foot_x())
                && !points.is_pipe(self.right_foot_x())
            {
                // Walked off the pipe edge
                self.is_on_pipe = false;
                self.pos.y = self.rest_y;
            }

            let half_window = WINDOW_WIDTH / 2;
            if self.pos.x < self.camera_distance + half_window {
                self.pos.x += MOVE_DISTANCE;
            } else {
                if self.pos.x < WINDOW_WIDTH - CELL_WIDTH_32 {
                    self.pos.x += MOVE_DISTANCE;
                }
                if self.pos.x < TILE_NUM * CELL_WIDTH_16 - half_window {
                    outbox.camera(CameraMessage::scroll_x(MOVE_DISTANCE as f32));
                }
                self.camera_distance += MOVE_DISTANCE;
            }
        }

        self.use_cell = if self.jump_count == 0 {
            (self.use_cell + 1) % WALK_FRAMES
        } else {
            JUMP_FRAME
        };
        self.sprite_cell = PLAYER_SPRITE_CELL + self.use_cell;
    }

    fn start_jump(&mut self) {
        if self.is_jumping {
            // Double jump: mirror what is left of the arc into extra descent
            self.jump_count_2step = if self.jump_count <= MAX_COUNT / 2 {
                self.jump_count - 1
            } else {
                MAX_COUNT - (self.jump_count - 1)
            };
            self.jump_count = 1;
            self.is_jumping = false;
        }
        if self.jump_count == 0 {
            self.jump_count_2step = 0;
            self.jump_count = 1;
            self.is_jumping = true;
        }
        let pipe_bonus = if self.is_on_pipe { PIPE_JUMP_BONUS } else { 0 };
        self.bottom_count = 1 + MAX_COUNT + self.jump_count_2step + pipe_bonus;
    }

    fn advance_jump(&mut self, points: &SpatialSets) {
        self.jump_count += 1;
        if self.jump_count <= self.top_count {
            self.pos.y -= JUMP_HEIGHT;
        } else if self.jump_count <= self.bottom_count {
            if self.pos.y == ON_PIPE_POSITION_Y && self.over_pipe(points) {
                self.land(true);
            } else {
                self.pos.y += JUMP_HEIGHT;
            }
        } else {
            let on_pipe = self.over_pipe(points);
            self.land(on_pipe);
        }
    }

    fn land(&mut self, on_pipe: bool) {
        self.jump_count = 0;
        self.is_jumping = false;
        self.is_on_pipe = on_pipe;
    }
}
