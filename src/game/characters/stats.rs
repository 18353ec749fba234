// Actor stats - one set for the hero, one shared by every orc

use crate::game::config::GameConfig;

/// Side of the square footprint used for wall collision
pub const FOOTPRINT_SIZE: f32 = 7.5;
/// Offset from the actor's feet to the footprint's top-left corner
pub const FOOTPRINT_OFFSET: f32 = 4.0;
/// Movement speeds are expressed in tenths of a pixel per second
pub const SPEED_SCALE: f32 = 10.0;

/// Fixed per-kind actor properties
#[derive(Debug, Clone, PartialEq)]
pub struct ActorStats {
    // Combat
    /// Life at spawn
    pub max_life: i32,
    /// Damage dealt by one landed strike
    pub damage: i32,
    /// Reach of a strike in pixels
    pub attack_range: f32,

    // Movement
    /// Walk speed (before `SPEED_SCALE`)
    pub speed: f32,
}

impl ActorStats {
    /// Stats of the hero
    pub fn hero(config: &GameConfig) -> Self {
        Self {
            max_life: config.hero_life,
            damage: config.hero_damage,
            attack_range: config.hero_attack_range,
            speed: config.hero_speed,
        }
    }

    /// Stats shared by every orc
    pub fn orc(config: &GameConfig) -> Self {
        Self {
            max_life: config.orc_life,
            damage: config.orc_damage,
            attack_range: config.orc_attack_range,
            speed: config.orc_speed,
        }
    }
}
