// Polled keyboard state

use super::action::Action;
use std::collections::HashSet;

/// Per-action key state as seen by one simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyState {
    /// Pressed since the previous frame
    NewDown,
    /// Held for more than one frame
    Down,
    Up,
}

/// Snapshot of which actions are held and which were just pressed
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    pressed: HashSet<Action>,
    just_pressed: HashSet<Action>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// State of one action
    pub fn state(&self, action: Action) -> KeyState {
        if self.just_pressed.contains(&action) {
            KeyState::NewDown
        } else if self.pressed.contains(&action) {
            KeyState::Down
        } else {
            KeyState::Up
        }
    }

    /// Check if an action is held (including the frame it was pressed)
    pub fn is_down(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed this frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// All held actions
    pub fn held(&self) -> &HashSet<Action> {
        &self.pressed
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        self.pressed.remove(&action);
    }

    /// Demote fresh presses to held; call once the frame's ticks have run
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Release everything
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
    }

    /// Build a keyboard with actions held (and freshly pressed)
    pub fn with_pressed(actions: &[Action]) -> Self {
        let mut keyboard = Self::new();
        for action in actions {
            keyboard.press(*action);
        }
        keyboard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_new_down_then_down() {
        let mut keyboard = Keyboard::new();
        keyboard.press(Action::Attack);
        assert_eq!(keyboard.state(Action::Attack), KeyState::NewDown);
        assert!(keyboard.is_down(Action::Attack));

        keyboard.end_frame();
        assert_eq!(keyboard.state(Action::Attack), KeyState::Down);
        assert!(!keyboard.just_pressed(Action::Attack));
    }

    #[test]
    fn test_release() {
        let mut keyboard = Keyboard::new();
        keyboard.press(Action::MoveLeft);
        keyboard.end_frame();
        keyboard.release(Action::MoveLeft);
        assert_eq!(keyboard.state(Action::MoveLeft), KeyState::Up);
    }

    #[test]
    fn test_repeat_press_is_not_new() {
        let mut keyboard = Keyboard::new();
        keyboard.press(Action::Attack);
        keyboard.end_frame();
        keyboard.press(Action::Attack);
        assert_eq!(keyboard.state(Action::Attack), KeyState::Down);
    }

    #[test]
    fn test_held_set() {
        let keyboard = Keyboard::with_pressed(&[Action::MoveUp, Action::MoveRight]);
        assert_eq!(keyboard.held().len(), 2);

        let mut keyboard = keyboard;
        keyboard.reset();
        assert!(keyboard.held().is_empty());
        assert_eq!(keyboard.state(Action::MoveUp), KeyState::Up);
    }
}
