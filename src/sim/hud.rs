//! HUD overlay: title, goal and game-over messages
//!
//! One overlay entity. While any message shows, the player is either not
//! started or frozen; confirming it starts or restarts the run.

use glam::Vec2;
use serde::Serialize;

use super::command::{Command, Outbox};
use crate::consts::WINDOW_HEIGHT;
use crate::renderer::{Drawable, RenderComponent};

pub const TEXT_SIZE: f32 = 40.0;
pub const TEXT_Z: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Overlay {
    None,
    Title,
    Goal,
    End,
}

impl Overlay {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Overlay::None => None,
            Overlay::Title => Some("         GAME START!"),
            Overlay::Goal => Some("             GOAL!!"),
            Overlay::End => Some("          GAME OVER"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub id: u32,
    pub overlay: Overlay,
}

impl Hud {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            overlay: Overlay::Title,
        }
    }

    /// React to a confirm press (edge-triggered)
    pub fn step(&self, confirm: bool, outbox: &mut Outbox) {
        if !confirm {
            return;
        }
        match self.overlay {
            Overlay::Title => outbox.push(Command::StartRun),
            Overlay::Goal | Overlay::End => outbox.push(Command::ResetPlayer),
            Overlay::None => {}
        }
    }

    /// Screen-space text for the current overlay, if any
    pub fn render_component(&self) -> Option<RenderComponent> {
        self.overlay.message().map(|text| {
            RenderComponent::hud(
                Drawable::Text {
                    text: text.to_string(),
                    size: TEXT_SIZE,
                },
                Vec2::new(0.0, (WINDOW_HEIGHT - 220) as f32),
                TEXT_Z,
            )
        })
    }
}
