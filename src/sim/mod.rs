//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed step only, fixed per-step deltas
//! - Seeded RNG only, and only during level generation
//! - Stable iteration order (by entity ID)
//! - Components talk through commands, never by calling each other

pub mod autopilot;
pub mod command;
pub mod enemy;
pub mod hud;
pub mod level;
pub mod player;
pub mod points;
pub mod state;
pub mod tick;

pub use command::{Command, DeathCause, Outbox};
pub use enemy::{Enemy, EnemyKind, PlayerProbe, spawn_enemies};
pub use hud::{Hud, Overlay};
pub use level::{Level, Tile, TileKind, generate_level};
pub use player::{Player, PlayerPhase};
pub use points::{PointKind, SpatialSets};
pub use state::{EntityIds, GameEvent, GameState, RngState, SimFlags};
pub use tick::{TickInput, tick};
