// Gameplay: characters, the keep, the encounter and its stages

pub mod characters;
pub mod config;
pub mod encounter;
pub mod map;
pub mod stage;
