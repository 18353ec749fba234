// Input handling system
//
// Window key events are mapped to game actions and folded into a `Keyboard`
// snapshot that the simulation polls once per tick. There is no buffering: an
// action is `NewDown` for the frame it was pressed, `Down` while held.
//
// - `action`: game actions and default key bindings
// - `keyboard`: the polled snapshot
// - `manager`: event processing and bindings

pub mod action;
pub mod keyboard;
pub mod manager;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use keyboard::{KeyState, Keyboard};
pub use manager::InputManager;
