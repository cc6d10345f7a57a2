//! Per-step command queue
//!
//! Components never call each other. They push commands into the outbox and
//! `tick` drains it right after each component's update, so a command takes
//! effect within the same step, in a fixed order.

use serde::Serialize;

use crate::renderer::CameraMessage;

/// Why the player died
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeathCause {
    /// Fell below the window through a pitfall
    Fall,
    /// An enemy poked up through the player's feet
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Title confirmed: let the player move
    StartRun,
    /// Player crossed the goal line
    ReachGoal,
    KillPlayer(DeathCause),
    /// Goal/End confirmed: reinitialize the player and show the title
    ResetPlayer,
}

/// Everything a component emits during its update
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    pub commands: Vec<Command>,
    /// Fire-and-forget camera directives for the host
    pub camera: Vec<CameraMessage>,
}

impl Outbox {
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn camera(&mut self, msg: CameraMessage) {
        log::debug!("camera {:?}", msg);
        self.camera.push(msg);
    }
}
