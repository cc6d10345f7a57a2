//! Runner settings
//!
//! Loaded from a JSON file; every field is optional and falls back to its
//! default. Level layout is not configurable.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::platform::Button;

/// Keys held for a range of ticks (inclusive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSpan {
    pub from_tick: u64,
    pub to_tick: u64,
    /// Host key names, e.g. "ArrowRight", "Space", "Enter"
    pub keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level seed; random when absent
    pub seed: Option<u64>,
    /// Steps to simulate
    pub max_steps: u64,
    /// Let the autopilot play
    pub autoplay: bool,
    /// End the run when the goal is reached
    pub stop_on_goal: bool,
    /// Scripted key presses (ignored while autoplay is on)
    pub script: Vec<InputSpan>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            max_steps: 6000,
            autoplay: true,
            stop_on_goal: true,
            script: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Buttons the script holds at `tick`. Unknown key names are skipped.
    pub fn held_at(&self, tick: u64) -> Vec<Button> {
        let mut held = Vec::new();
        for span in self
            .script
            .iter()
            .filter(|s| (s.from_tick..=s.to_tick).contains(&tick))
        {
            for key in &span.keys {
                match Button::from_key(key) {
                    Some(button) if !held.contains(&button) => held.push(button),
                    Some(_) => {}
                    None => log::warn!("Unknown key in script: {}", key),
                }
            }
        }
        held
    }
}
