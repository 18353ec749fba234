// Actor entity shared by the hero and the orcs

use glam::Vec2;
use log::debug;

use super::animation::AnimationPlayer;
use super::direction::Facing;
use super::state::{ActorState, ActorStateMachine};
use super::stats::{ActorStats, FOOTPRINT_OFFSET, FOOTPRINT_SIZE, SPEED_SCALE};
use crate::engine::assets::SoundHandle;
use crate::engine::audio::AudioBackend;
use crate::game::config::GameConfig;
use crate::game::map::TileMap;

/// Unique identifier for an actor
pub type ActorId = u32;

/// Sound channel and clip of a swing
pub const ATTACK_SOUND_CHANNEL: &str = "attack";
pub const ATTACK_SOUND_CLIP: &str = "punch";

/// The death clip has no direction
pub const DIE_CLIP: &str = "die";

/// Things an actor's tick reports back to the encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorEvent {
    /// An orc finished dying; pays one point
    EnemySlain(ActorId),
    /// A dead orc's countdown ran out
    EnemyRespawnDue(ActorId),
    /// The hero finished dying
    PlayerDefeated,
}

/// Everything an actor's tick reads or writes besides the actors themselves
pub struct TickContext<'a> {
    pub dt: f32,
    pub map: &'a TileMap,
    pub config: &'a GameConfig,
    pub audio: &'a mut dyn AudioBackend,
    pub events: &'a mut Vec<ActorEvent>,
}

/// Orc-only timers and memory
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyBrain {
    /// Seconds until the next swing may start (0 = ready)
    pub attack_cooldown: f32,
    /// Seconds left lying dead
    pub respawn_timer: f32,
    /// Where the replacement appears
    pub spawn_position: Vec2,
    bounty_paid: bool,
}

impl EnemyBrain {
    pub fn new(spawn_position: Vec2, respawn_delay: f32) -> Self {
        Self {
            attack_cooldown: 0.0,
            respawn_timer: respawn_delay,
            spawn_position,
            bounty_paid: false,
        }
    }

    /// Whether this death has already been scored
    pub fn bounty_paid(&self) -> bool {
        self.bounty_paid
    }
}

/// Who decides what the actor does
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Driven by the keyboard
    Player,
    /// Driven by the orc heuristics
    Autonomous(EnemyBrain),
}

/// One attack animation in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Swing {
    /// Set once the strike frame has been handled
    pub resolved: bool,
}

/// Coarse life reading shown above actors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthBand {
    Healthy,
    Bruised,
    Wounded,
    Critical,
}

/// A hero or an orc
#[derive(Debug)]
pub struct Actor {
    /// Unique identifier
    pub id: ActorId,
    pub control: Control,
    pub stats: ActorStats,

    /// Feet position in world pixels
    pub position: Vec2,
    pub facing: Facing,
    /// Current life, never negative
    pub life: i32,

    pub state_machine: ActorStateMachine,
    pub animation: AnimationPlayer,

    pub(crate) swing: Option<Swing>,
    sound: SoundHandle,
}

impl Actor {
    /// Create the hero, idling toward the bottom right
    pub fn hero(
        id: ActorId,
        position: Vec2,
        config: &GameConfig,
        audio: &mut dyn AudioBackend,
    ) -> Self {
        Self::new(
            id,
            Control::Player,
            ActorStats::hero(config),
            ActorState::Idle,
            AnimationPlayer::hero(),
            position,
            audio,
        )
    }

    /// Create an orc anchored at `position`, about to pick a heading
    pub fn orc(
        id: ActorId,
        position: Vec2,
        config: &GameConfig,
        audio: &mut dyn AudioBackend,
    ) -> Self {
        Self::new(
            id,
            Control::Autonomous(EnemyBrain::new(position, config.orc_respawn_delay)),
            ActorStats::orc(config),
            ActorState::ChooseDirection,
            AnimationPlayer::orc(),
            position,
            audio,
        )
    }

    fn new(
        id: ActorId,
        control: Control,
        stats: ActorStats,
        initial: ActorState,
        animation: AnimationPlayer,
        position: Vec2,
        audio: &mut dyn AudioBackend,
    ) -> Self {
        Self {
            id,
            control,
            life: stats.max_life,
            stats,
            position,
            facing: Facing::default(),
            state_machine: ActorStateMachine::new(initial),
            animation,
            swing: None,
            sound: audio.create_sound(ATTACK_SOUND_CHANNEL, ATTACK_SOUND_CLIP, false),
        }
    }

    /// Get the current state
    pub fn state(&self) -> ActorState {
        self.state_machine.state()
    }

    pub fn is_player(&self) -> bool {
        matches!(self.control, Control::Player)
    }

    pub fn brain(&self) -> Option<&EnemyBrain> {
        match &self.control {
            Control::Autonomous(brain) => Some(brain),
            Control::Player => None,
        }
    }

    pub fn brain_mut(&mut self) -> Option<&mut EnemyBrain> {
        match &mut self.control {
            Control::Autonomous(brain) => Some(brain),
            Control::Player => None,
        }
    }

    /// Whether an attack animation is in flight
    pub fn swing_active(&self) -> bool {
        self.swing.is_some()
    }

    /// Ensure the directional clip of `state` is playing
    pub fn play_state_clip(&mut self, state: ActorState) {
        let clip = self.facing.clip(state.animation_prefix());
        self.animation.play(&clip);
    }

    /// Restart the directional clip of `state`
    pub fn restart_state_clip(&mut self, state: ActorState) {
        let clip = self.facing.clip(state.animation_prefix());
        self.animation.play_from_start(&clip);
    }

    /// Move along the current intent, sliding along walls
    ///
    /// Each axis is tried on its own against the map. Returns whether any
    /// axis with a non-zero component actually moved.
    pub fn step(&mut self, speed: f32, dt: f32, map: &TileMap) -> bool {
        let delta = self.facing.travel() * (speed * SPEED_SCALE * dt);
        let mut moved = false;

        let x = self.position.x + delta.x;
        if map.is_walkable(
            x - FOOTPRINT_OFFSET,
            self.position.y - FOOTPRINT_OFFSET,
            FOOTPRINT_SIZE,
            FOOTPRINT_SIZE,
        ) {
            self.position.x = x;
            moved |= delta.x != 0.0;
        }

        let y = self.position.y + delta.y;
        if map.is_walkable(
            self.position.x - FOOTPRINT_OFFSET,
            y - FOOTPRINT_OFFSET,
            FOOTPRINT_SIZE,
            FOOTPRINT_SIZE,
        ) {
            self.position.y = y;
            moved |= delta.y != 0.0;
        }

        moved
    }

    /// Begin a swing: attack clip from the start, plus the punch sound
    pub fn start_swing(&mut self, audio: &mut dyn AudioBackend) {
        self.restart_state_clip(ActorState::Attack);
        self.swing = Some(Swing::default());
        audio.play(self.sound);
    }

    /// Take a blow: lose life (floored at 0), drop any swing, recoil
    pub fn receive_blow(&mut self, damage: i32) {
        self.life = (self.life - damage).max(0);
        self.swing = None;
        self.state_machine.force_transition(ActorState::Hit);
        debug!("actor {} hit for {}, life {}", self.id, damage, self.life);
    }

    /// Shared Hit handling: recoil clip, then Die or Idle
    pub(crate) fn update_hit(&mut self) {
        if self.state_machine.take_entry() {
            self.restart_state_clip(ActorState::Hit);
            return;
        }
        if self.animation.is_finished() {
            let next = if self.life <= 0 {
                ActorState::Die
            } else {
                ActorState::Idle
            };
            self.state_machine.transition(next);
        }
    }

    /// Shared Die handling: death clip, then the control-specific aftermath
    pub(crate) fn update_die(&mut self, dt: f32, events: &mut Vec<ActorEvent>) {
        if self.state_machine.take_entry() {
            self.swing = None;
            self.animation.play_from_start(DIE_CLIP);
            return;
        }
        if !self.animation.is_finished() {
            return;
        }

        let id = self.id;
        match &mut self.control {
            Control::Player => events.push(ActorEvent::PlayerDefeated),
            Control::Autonomous(brain) => {
                if !brain.bounty_paid {
                    brain.bounty_paid = true;
                    events.push(ActorEvent::EnemySlain(id));
                }
                brain.respawn_timer -= dt;
                if brain.respawn_timer <= 0.0 {
                    events.push(ActorEvent::EnemyRespawnDue(id));
                }
            }
        }
    }

    /// End-of-tick bookkeeping: animation time and the life floor
    pub(crate) fn finish_tick(&mut self, dt: f32) {
        self.animation.update(dt);
        self.life = self.life.max(0);
    }

    /// Life band relative to the spawn life
    pub fn health_band(&self) -> HealthBand {
        let life = self.life as f32;
        let max = self.stats.max_life as f32;
        if life <= max / 5.0 {
            HealthBand::Critical
        } else if life <= max / 2.5 {
            HealthBand::Wounded
        } else if life <= max / 1.5 {
            HealthBand::Bruised
        } else {
            HealthBand::Healthy
        }
    }

    /// Give the attack sound back to the audio backend
    pub fn release(&self, audio: &mut dyn AudioBackend) {
        audio.destroy(self.sound);
    }
}
