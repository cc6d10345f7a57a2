//! Game state and command application
//!
//! `GameState` owns every component plus the host-facing render registry and
//! camera queue. Components only see the pieces they need; cross-component
//! effects go through `Command`s applied here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::command::{Command, DeathCause, Outbox};
use super::enemy::{Enemy, spawn_enemies};
use super::hud::{Hud, Overlay};
use super::level::{Level, generate_level};
use super::player::{Player, PlayerPhase};
use crate::consts::*;
use crate::platform::Assets;
use crate::platform::assets::{ENEMY_SHEET, PLAYER_SHEET};
use crate::renderer::{CameraMessage, RenderComponent, RenderList, SpriteSheet};

/// Shared per-run flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimFlags {
    /// Player is dead; player and enemies are frozen
    pub game_over: bool,
    /// An enemy registered contact; death is dispatched next enemy step
    pub touched: bool,
}

/// Something the host may want to know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    Started { tick: u64 },
    ReachedGoal { tick: u64 },
    Died { tick: u64, cause: DeathCause },
    Restarted { tick: u64 },
}

/// RNG seed wrapper
#[derive(Debug, Clone, Serialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Entity id allocator
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityIds {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rng_state: RngState,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub level: Level,
    pub player: Player,
    /// Sorted by id
    pub enemies: Vec<Enemy>,
    pub hud: Hud,
    pub flags: SimFlags,
    /// What the host draws
    pub render: RenderList,
    pub(crate) outbox: Outbox,
    events: Vec<GameEvent>,
    player_sheet: SpriteSheet,
    enemy_sheet: SpriteSheet,
}

impl GameState {
    /// Generate a level from `seed` and set everything up on it
    pub fn new(seed: u64, assets: &Assets) -> Self {
        let rng_state = RngState::new(seed);
        let mut rng = rng_state.to_rng();
        let level = generate_level(&mut rng, assets);
        Self::with_level(rng_state, level, assets)
    }

    /// Set up on an existing level: spawn enemies, register drawables,
    /// show the title
    pub fn with_level(rng_state: RngState, mut level: Level, assets: &Assets) -> Self {
        let mut ids = EntityIds::new();
        let mut render = RenderList::new();

        for tile in level.tiles() {
            render.add(ids.allocate(), tile.render_component());
        }

        let enemies = spawn_enemies(level.points_mut(), &mut ids);
        let enemy_sheet =
            assets.sheet_or_missing(ENEMY_SHEET, CELL_WIDTH_32 as u32, CELL_HEIGHT_32 as u32);
        for enemy in &enemies {
            render.add(
                enemy.id,
                RenderComponent::world(
                    enemy_sheet.cell(ENEMY_TYPE0_SPRITE_CELL),
                    enemy.pos.as_vec2(),
                    6.0,
                ),
            );
        }

        let player = Player::new(ids.allocate());
        let hud = Hud::new(ids.allocate());
        let player_sheet =
            assets.sheet_or_missing(PLAYER_SHEET, CELL_WIDTH_32 as u32, CELL_HEIGHT_32 as u32);

        let mut state = Self {
            rng_state,
            time_ticks: 0,
            level,
            player,
            enemies,
            hud,
            flags: SimFlags::default(),
            render,
            outbox: Outbox::default(),
            events: Vec::new(),
            player_sheet,
            enemy_sheet,
        };
        state.reset_player();
        state.show_overlay(Overlay::Title);
        state
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn player_phase(&self) -> PlayerPhase {
        self.player.phase(&self.flags)
    }

    /// Camera directives issued since the last call
    pub fn take_camera_messages(&mut self) -> Vec<CameraMessage> {
        std::mem::take(&mut self.outbox.camera)
    }

    /// Events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Apply every queued command in order
    pub(crate) fn apply_commands(&mut self) {
        let commands = std::mem::take(&mut self.outbox.commands);
        for command in commands {
            self.apply(command);
        }
    }

    fn apply(&mut self, command: Command) {
        let tick = self.time_ticks;
        match command {
            Command::StartRun => {
                self.player.has_started = true;
                self.render.remove(self.hud.id);
                self.hud.overlay = Overlay::None;
                self.flags.game_over = false;
                log::info!("Run started at tick {}", tick);
                self.events.push(GameEvent::Started { tick });
            }
            Command::ReachGoal => {
                self.show_overlay(Overlay::Goal);
                self.render.remove(self.player.id);
                log::info!("Goal reached at tick {}", tick);
                self.events.push(GameEvent::ReachedGoal { tick });
            }
            Command::KillPlayer(cause) => {
                self.flags.game_over = true;
                self.show_overlay(Overlay::End);
                self.render.remove(self.player.id);
                log::info!(
                    "Player died ({:?}) at x={} tick {}",
                    cause,
                    self.player.pos.x,
                    tick
                );
                self.events.push(GameEvent::Died { tick, cause });
            }
            Command::ResetPlayer => {
                self.reset_player();
                self.show_overlay(Overlay::Title);
                log::info!("Player restarted at tick {}", tick);
                self.events.push(GameEvent::Restarted { tick });
            }
        }
    }

    /// Reinitialize the player, clear the run flags, re-register the sprite
    /// and recenter the camera
    fn reset_player(&mut self) {
        self.player.reset();
        self.flags = SimFlags::default();
        self.render.add(
            self.player.id,
            RenderComponent::world(
                self.player_sheet.cell(self.player.sprite_cell),
                self.player.pos.as_vec2(),
                5.0,
            ),
        );
        self.outbox.camera(CameraMessage::set_x((WINDOW_WIDTH / 2) as f32));
    }

    /// Switch the overlay. The overlay entity is registered by id, so showing
    /// a message over another one replaces it.
    fn show_overlay(&mut self, overlay: Overlay) {
        log::debug!("overlay {:?} -> {:?}", self.hud.overlay, overlay);
        self.hud.overlay = overlay;
        match self.hud.render_component() {
            Some(component) => {
                self.render.add(self.hud.id, component);
            }
            None => {
                self.render.remove(self.hud.id);
            }
        }
    }

    /// Push current positions and sprite cells to registered drawables
    pub(crate) fn sync_render(&mut self) {
        self.render.update(
            self.player.id,
            self.player_sheet.cell(self.player.sprite_cell),
            self.player.pos.as_vec2(),
        );
        for enemy in &self.enemies {
            self.render.update(
                enemy.id,
                self.enemy_sheet.cell(ENEMY_TYPE0_SPRITE_CELL),
                enemy.pos.as_vec2(),
            );
        }
    }
}
