// Gameplay tuning
//
// Every number that shapes a fight lives here and is handed to the encounter at
// construction. Missing fields in config.json fall back to BASE_CONFIG values.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A batch of orcs sharing one respawn anchor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnGroup {
    pub position: Vec2,
    pub count: u32,
}

impl SpawnGroup {
    pub fn new(x: f32, y: f32, count: u32) -> Self {
        Self {
            position: Vec2::new(x, y),
            count,
        }
    }
}

/// Where everyone starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub player_start: Vec2,
    pub spawns: Vec<SpawnGroup>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            player_start: Vec2::new(180.0, 148.0),
            spawns: vec![
                SpawnGroup::new(40.0, 50.0, 10),
                SpawnGroup::new(35.0, 135.0, 5),
                SpawnGroup::new(200.0, 60.0, 10),
            ],
        }
    }
}

/// Tuning values for the hero, the orcs and the stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // Hero
    pub hero_life: i32,
    pub hero_damage: i32,
    /// Walk speed; displacement per tick is `speed * 10 * dt`
    pub hero_speed: f32,
    pub hero_attack_range: f32,

    // Orcs
    pub orc_life: i32,
    pub orc_damage: i32,
    pub orc_speed: f32,
    pub orc_chase_speed: f32,
    pub orc_attack_range: f32,
    pub orc_chase_range: f32,
    /// Seconds between two swings
    pub orc_attack_cooldown: f32,
    /// Seconds a dead orc lies before its replacement appears
    pub orc_respawn_delay: f32,

    // Stage
    /// World-to-screen scale used by the renderer
    pub global_scale: f32,
    pub layout: Layout,
}

/// Reference tuning
pub const BASE_CONFIG: GameConfig = GameConfig {
    hero_life: 100,
    hero_damage: 10,
    hero_speed: 5.0,
    hero_attack_range: 12.0,

    orc_life: 30,
    orc_damage: 5,
    orc_speed: 2.0,
    orc_chase_speed: 4.0,
    orc_attack_range: 6.0,
    orc_chase_range: 40.0,
    orc_attack_cooldown: 1.0,
    orc_respawn_delay: 5.0,

    global_scale: 4.0,
    layout: Layout {
        player_start: Vec2::new(180.0, 148.0),
        spawns: Vec::new(),
    },
};

/// Rejected tuning values
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("orc attack range ({attack}) exceeds chase range ({chase})")]
    RangeOrder { attack: f32, chase: f32 },
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            ..BASE_CONFIG
        }
    }
}

impl GameConfig {
    /// Check that the tuning values can drive a fight
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("hero_life", self.hero_life as f32),
            ("orc_life", self.orc_life as f32),
            ("hero_attack_range", self.hero_attack_range),
            ("orc_attack_range", self.orc_attack_range),
            ("orc_chase_range", self.orc_chase_range),
            ("global_scale", self.global_scale),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("hero_damage", self.hero_damage as f32),
            ("orc_damage", self.orc_damage as f32),
            ("hero_speed", self.hero_speed),
            ("orc_speed", self.orc_speed),
            ("orc_chase_speed", self.orc_chase_speed),
            ("orc_attack_cooldown", self.orc_attack_cooldown),
            ("orc_respawn_delay", self.orc_respawn_delay),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.orc_attack_range > self.orc_chase_range {
            return Err(ConfigError::RangeOrder {
                attack: self.orc_attack_range,
                chase: self.orc_chase_range,
            });
        }

        Ok(())
    }

    /// Parse a JSON document, filling gaps with defaults
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
}
