// Input manager - tracks held keys and answers per-frame action queries

use super::action::{Action, InputSource};
use super::config::InputConfig;
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Polled keyboard state, queried once per frame
#[derive(Debug, Default)]
pub struct InputManager {
    /// Key bindings
    config: InputConfig,

    /// Sources currently held down
    held: HashSet<InputSource>,
}

impl InputManager {
    /// Create a new input manager with the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::default())
    }

    /// Create an input manager with custom bindings
    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            held: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            let source = InputSource::key(key_code);
            if self.config.get_action(source).is_none() {
                return;
            }
            match event.state {
                ElementState::Pressed => self.press(source),
                ElementState::Released => self.release(source),
            }
        }
    }

    /// Mark a source as held
    pub(crate) fn press(&mut self, source: InputSource) {
        self.held.insert(source);
    }

    /// Mark a source as released
    pub(crate) fn release(&mut self, source: InputSource) {
        self.held.remove(&source);
    }

    /// Check if any source bound to `action` is held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.config
            .sources_for(action)
            .iter()
            .any(|source| self.held.contains(source))
    }

    /// Horizontal movement this frame; left wins when both are held
    pub fn horizontal(&self) -> Option<Action> {
        if self.is_pressed(Action::MoveLeft) {
            Some(Action::MoveLeft)
        } else if self.is_pressed(Action::MoveRight) {
            Some(Action::MoveRight)
        } else {
            None
        }
    }

    /// Vertical movement this frame; up wins when both are held
    pub fn vertical(&self) -> Option<Action> {
        if self.is_pressed(Action::MoveUp) {
            Some(Action::MoveUp)
        } else if self.is_pressed(Action::MoveDown) {
            Some(Action::MoveDown)
        } else {
            None
        }
    }

    /// Whether the quit action is held
    pub fn quit_requested(&self) -> bool {
        self.is_pressed(Action::Quit)
    }

    /// Forget every held key (used when focus is lost mid-press)
    pub fn reset(&mut self) {
        self.held.clear();
    }
}
