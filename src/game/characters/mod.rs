// Character system
//
// This module contains everything related to the hero and the orcs:
// - The shared actor entity and its state machine
// - Facing memory and directional combat geometry
// - Keyboard-driven and autonomous behavior
// - Animation clips for the sprite sheets

pub mod actor;
pub mod animation;
pub mod combat;
pub mod direction;
pub mod enemy;
pub mod player;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use actor::{
    Actor, ActorEvent, ActorId, Control, EnemyBrain, HealthBand, TickContext, DIE_CLIP,
};
pub use animation::{AnimationClip, AnimationPlayer};
pub use direction::{Facing, Heading, Horizontal, Quadrant, Vertical};
pub use state::{ActorState, ActorStateMachine};
pub use stats::ActorStats;
