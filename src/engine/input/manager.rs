// Input manager - turns window key events into a polled keyboard snapshot

use super::action::{default_bindings, Action, InputSource};
use super::keyboard::Keyboard;
use std::collections::HashMap;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Maps physical keys to actions and keeps the keyboard snapshot current
pub struct InputManager {
    bindings: HashMap<InputSource, Action>,
    keyboard: Keyboard,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self {
            bindings: default_bindings().into_iter().collect(),
            keyboard: Keyboard::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.handle_key(key_code, event.state == ElementState::Pressed, event.repeat);
        }
    }

    /// Apply one key transition
    pub fn handle_key(&mut self, code: KeyCode, pressed: bool, repeat: bool) {
        let Some(action) = self.bindings.get(&InputSource::key(code)).copied() else {
            return;
        };
        if pressed {
            if !repeat {
                self.keyboard.press(action);
            }
        } else {
            self.keyboard.release(action);
        }
    }

    /// Snapshot polled by the simulation
    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    /// Call once the frame's simulation ticks have consumed the input
    pub fn end_frame(&mut self) {
        self.keyboard.end_frame();
    }

    /// Release every key (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.keyboard.reset();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
