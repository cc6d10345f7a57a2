//! Fixed-step simulation tick
//!
//! One step runs every component to completion in a fixed order: player,
//! enemies, overlay. Commands each one emits are applied before the next one
//! runs, then registered drawables are synced.

use super::autopilot;
use super::enemy;
use super::state::GameState;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move right (held)
    pub move_right: bool,
    /// Move left (held); bound but unused by gameplay
    pub move_left: bool,
    /// Jump (just pressed)
    pub jump: bool,
    /// Confirm overlay (just pressed)
    pub confirm: bool,
    /// Idle/demo mode - autopilot plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one step
pub fn tick(state: &mut GameState, input: &TickInput) {
    let input = if input.idle_mode {
        autopilot::drive(state, input)
    } else {
        input.clone()
    };

    state.time_ticks += 1;

    state
        .player
        .step(state.level.points(), &state.flags, &input, &mut state.outbox);
    state.apply_commands();

    let probe = state.player.probe();
    enemy::step(
        &mut state.enemies,
        state.level.points(),
        &mut state.flags,
        probe,
        &mut state.outbox,
    );
    state.apply_commands();

    state.hud.step(input.confirm, &mut state.outbox);
    state.apply_commands();

    state.sync_render();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column_x;
    use crate::consts::*;
    use crate::platform::Assets;
    use crate::sim::command::DeathCause;
    use crate::sim::hud::Overlay;
    use crate::sim::level::Level;
    use crate::sim::player::PlayerPhase;
    use crate::sim::points::{PointKind, SpatialSets};
    use crate::sim::state::{GameEvent, RngState};
    use glam::{IVec2, Vec2};

    fn state_with(points: SpatialSets) -> GameState {
        GameState::with_level(
            RngState::new(0),
            Level::new(Vec::new(), points),
            &Assets::preloaded(),
        )
    }

    fn confirm() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    fn right() -> TickInput {
        TickInput {
            move_right: true,
            ..Default::default()
        }
    }

    fn started(points: SpatialSets) -> GameState {
        let mut state = state_with(points);
        tick(&mut state, &confirm());
        state
    }

    #[test]
    fn test_confirm_starts_run() {
        let mut state = state_with(SpatialSets::new());

        // Moving before confirming does nothing
        for _ in 0..10 {
            tick(&mut state, &right());
        }
        assert_eq!(state.player.pos, IVec2::new(0, PLAYER_START_Y));
        assert!(!state.player.has_started);

        tick(&mut state, &confirm());
        assert!(state.player.has_started);
        assert_eq!(state.hud.overlay, Overlay::None);
        assert!(!state.render.contains(state.hud.id));
        assert_eq!(state.drain_events(), vec![GameEvent::Started { tick: 11 }]);

        tick(&mut state, &right());
        assert_eq!(state.player.pos.x, MOVE_DISTANCE);
        assert_eq!(
            state.render.get(state.player.id).map(|c| c.pos),
            Some(Vec2::new(4.0, PLAYER_START_Y as f32))
        );
    }

    #[test]
    fn test_confirm_ignored_during_play() {
        let mut state = started(SpatialSets::new());
        tick(&mut state, &right());
        tick(&mut state, &confirm());
        assert_eq!(state.hud.overlay, Overlay::None);
        assert_eq!(state.player.pos.x, MOVE_DISTANCE);
        assert!(state.player.has_started);
    }

    #[test]
    fn test_goal_scenario() {
        let mut state = started(SpatialSets::new());
        state.player.pos.x = GOAL_X - EXTRA_SIZE_X;
        assert_eq!(state.player.left_foot_x(), 3072);

        tick(&mut state, &right());
        assert_eq!(state.hud.overlay, Overlay::Goal);
        assert!(!state.render.contains(state.player.id));
        assert!(state.render.contains(state.hud.id));
        assert_eq!(state.player_phase(), PlayerPhase::AtGoal);

        let x = state.player.pos.x;
        for _ in 0..5 {
            tick(&mut state, &right());
        }
        assert_eq!(state.player.pos.x, x);
        let goals = state
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::ReachedGoal { .. }))
            .count();
        assert_eq!(goals, 1);

        // Confirm restarts at the title
        tick(&mut state, &confirm());
        assert_eq!(state.hud.overlay, Overlay::Title);
        assert_eq!(state.player.pos, IVec2::new(0, PLAYER_START_Y));
        assert!(state.render.contains(state.player.id));
        assert_eq!(state.player_phase(), PlayerPhase::WaitingToStart);
    }

    #[test]
    fn test_fall_death_scenario() {
        let mut points = SpatialSets::new();
        points.insert_span(PointKind::Fall, column_x(2), 32);
        let mut state = started(points);
        state.player.pos.x = 28;

        let mut ticks = 0;
        while !state.flags.game_over && ticks < 50 {
            tick(&mut state, &TickInput::default());
            ticks += 1;
        }
        assert!(state.flags.game_over);
        assert_eq!(ticks, 25);
        assert!(state.player.pos.y > WINDOW_HEIGHT);
        assert_eq!(state.hud.overlay, Overlay::End);
        assert!(!state.render.contains(state.player.id));
        assert_eq!(state.player_phase(), PlayerPhase::Dead);
        assert!(state.drain_events().iter().any(|e| matches!(
            e,
            GameEvent::Died {
                cause: DeathCause::Fall,
                ..
            }
        )));

        // Frozen until confirmed
        let frozen = state.player.clone();
        tick(&mut state, &right());
        assert_eq!(state.player, frozen);

        tick(&mut state, &confirm());
        assert_eq!(state.hud.overlay, Overlay::Title);
        assert!(!state.flags.game_over);
        assert!(!state.player.is_falling);

        tick(&mut state, &confirm());
        assert_eq!(state.hud.overlay, Overlay::None);
        assert!(state.player.has_started);
    }

    #[test]
    fn test_enemy_death_scenario() {
        let mut points = SpatialSets::new();
        points.insert_span(PointKind::Pipe, column_x(20), CELL_WIDTH_32);
        let mut state = started(points);
        assert_eq!(state.enemies.len(), 1);

        // Stand on the pipe, feet over the enemy
        state.player.pos = IVec2::new(column_x(20), ON_PIPE_POSITION_Y);
        state.player.is_on_pipe = true;

        let mut ticks = 0;
        while !state.flags.game_over && ticks < 400 {
            tick(&mut state, &TickInput::default());
            ticks += 1;
        }
        assert!(state.flags.game_over);
        assert!(!state.flags.touched);
        assert_eq!(state.hud.overlay, Overlay::End);
        assert!(state.drain_events().contains(&GameEvent::Died {
            tick: state.time_ticks,
            cause: DeathCause::Enemy
        }));

        // Enemies freeze with the player
        let frozen = state.enemies.clone();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies, frozen);
    }

    #[test]
    fn test_enemies_bob_during_title() {
        let mut points = SpatialSets::new();
        points.insert_span(PointKind::Pipe, column_x(20), CELL_WIDTH_32);
        let mut state = state_with(points);
        for _ in 0..100 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.enemies[0].count, 100);
        let enemy_id = state.enemies[0].id;
        assert_eq!(
            state.render.get(enemy_id).map(|c| c.pos.y),
            Some(state.enemies[0].pos.y as f32)
        );
    }

    #[test]
    fn test_camera_scroll_reaches_host() {
        let mut state = started(SpatialSets::new());
        state.take_camera_messages();
        for _ in 0..70 {
            tick(&mut state, &right());
        }
        let scrolls = state.take_camera_messages();
        assert_eq!(scrolls.len(), 10);
        assert!(scrolls.iter().all(|m| m.incremental && m.value == 4.0));
    }

    #[test]
    fn test_determinism() {
        let assets = Assets::preloaded();
        let mut state1 = GameState::new(99999, &assets);
        let mut state2 = GameState::new(99999, &assets);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..2000 {
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }
        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.enemies, state2.enemies);
        assert_eq!(state1.drain_events(), state2.drain_events());
    }

    #[test]
    fn test_autopilot_makes_progress() {
        let mut state = GameState::new(2024, &Assets::preloaded());
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let mut furthest = 0;
        for _ in 0..600 {
            tick(&mut state, &input);
            furthest = furthest.max(state.player.pos.x);
        }
        assert!(furthest > 100);
    }
}
