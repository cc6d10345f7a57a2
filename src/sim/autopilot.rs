//! Demo autopilot
//!
//! Synthesizes input from the state: confirms overlays after a short pause,
//! otherwise runs right and hops over whatever is just ahead.

use super::hud::Overlay;
use super::points::PointKind;
use super::state::GameState;
use super::tick::TickInput;
use crate::consts::*;

/// Ticks between confirm presses while an overlay shows
const CONFIRM_INTERVAL: u64 = 30;
/// How far past the right foot to look for trouble (pixels)
const LOOKAHEAD: i32 = 28;

pub fn drive(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();

    if state.hud.overlay != Overlay::None {
        input.move_right = false;
        input.jump = false;
        input.confirm = state.time_ticks % CONFIRM_INTERVAL == 0;
        return input;
    }

    let player = &state.player;
    let points = state.level.points();
    input.move_right = true;
    input.confirm = false;

    let grounded = player.jump_count == 0 && !player.is_falling;
    let ahead = (MOVE_DISTANCE..=LOOKAHEAD)
        .step_by(MOVE_DISTANCE as usize)
        .map(|d| player.right_foot_x() + d);
    let trouble = ahead.clone().any(|x| points.is_fall(x))
        || ahead
            .clone()
            .any(|x| points.is_pipe(x) && player.pos.y > ON_PIPE_POSITION_Y)
        || ahead.into_iter().any(|x| points.contains(PointKind::EnemyType0, x));
    input.jump = grounded && trouble;
    input
}
