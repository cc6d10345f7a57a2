//! Logical buttons and edge detection
//!
//! Hosts report which buttons are held each step; `InputState` turns that
//! into "held" and "just pressed" queries.

use serde::Serialize;

use crate::sim::TickInput;

/// Logical buttons the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Button {
    MoveRight,
    /// Registered but no gameplay reads it
    MoveLeft,
    Jump,
    Confirm,
}

impl Button {
    pub const ALL: [Button; 4] = [
        Button::MoveRight,
        Button::MoveLeft,
        Button::Jump,
        Button::Confirm,
    ];

    /// Default key bindings, as host key names
    pub fn default_keys(&self) -> &'static [&'static str] {
        match self {
            Button::MoveRight => &["D", "ArrowRight"],
            Button::MoveLeft => &["A", "ArrowLeft"],
            Button::Jump => &["Space"],
            Button::Confirm => &["Enter"],
        }
    }

    /// Resolve a host key name (case-insensitive) to a button
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|button| {
            button
                .default_keys()
                .iter()
                .any(|k| k.eq_ignore_ascii_case(key))
        })
    }

    fn index(&self) -> usize {
        match self {
            Button::MoveRight => 0,
            Button::MoveLeft => 1,
            Button::Jump => 2,
            Button::Confirm => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub held: bool,
    pub just_pressed: bool,
}

/// Per-step button states
#[derive(Debug, Clone, Default)]
pub struct InputState {
    buttons: [ButtonState; 4],
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample a new step from the set of held buttons
    pub fn update(&mut self, held: &[Button]) {
        for button in Button::ALL {
            let state = &mut self.buttons[button.index()];
            let now = held.contains(&button);
            state.just_pressed = now && !state.held;
            state.held = now;
        }
    }

    pub fn button(&self, button: Button) -> ButtonState {
        self.buttons[button.index()]
    }

    pub fn held(&self, button: Button) -> bool {
        self.button(button).held
    }

    pub fn just_pressed(&self, button: Button) -> bool {
        self.button(button).just_pressed
    }

    /// Build the simulation input for this step
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            move_right: self.held(Button::MoveRight),
            move_left: self.held(Button::MoveLeft),
            jump: self.just_pressed(Button::Jump),
            confirm: self.just_pressed(Button::Confirm),
            idle_mode: false,
        }
    }
}
