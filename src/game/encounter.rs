// Encounter coordinator
//
// Owns the hero, the orcs, the keep and the score, and drives them one fixed
// tick at a time. Actors never look each other up: the coordinator hands each
// one the targets it may strike.

use glam::Vec2;
use log::{debug, info};

use super::characters::{enemy, player, Actor, ActorEvent, ActorId, HealthBand, TickContext};
use super::config::GameConfig;
use super::map::{MapError, TileMap, TiledMap};
use super::stage::StageSwitch;
use crate::engine::audio::AudioBackend;
use crate::engine::input::Keyboard;
use crate::engine::random::{self, RandomSource};

/// The hero always carries this id
pub const PLAYER_ID: ActorId = 0;

/// What the HUD prints above a living actor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthLabel {
    pub id: ActorId,
    pub position: Vec2,
    pub life: i32,
    pub band: HealthBand,
}

/// One fight in the keep
pub struct Encounter {
    config: GameConfig,
    map: TileMap,
    player: Actor,
    enemies: Vec<Actor>,
    /// Actor ids, back to front
    draw_order: Vec<ActorId>,
    score: u32,
    random: Box<dyn RandomSource>,
    next_id: ActorId,
}

impl Encounter {
    /// Build the keep from a map document and populate it from the layout
    pub fn load(
        config: GameConfig,
        document: &TiledMap,
        seed: u64,
        audio: &mut dyn AudioBackend,
    ) -> Result<Self, MapError> {
        let map = TileMap::build(document)?;
        Ok(Self::with_random(
            config,
            map,
            Box::new(random::seeded(seed)),
            audio,
        ))
    }

    /// Populate an already built map using the given random source
    pub fn with_random(
        config: GameConfig,
        map: TileMap,
        random: Box<dyn RandomSource>,
        audio: &mut dyn AudioBackend,
    ) -> Self {
        let player = Actor::hero(PLAYER_ID, config.layout.player_start, &config, audio);
        let mut encounter = Self {
            config,
            map,
            player,
            enemies: Vec::new(),
            draw_order: vec![PLAYER_ID],
            score: 0,
            random,
            next_id: PLAYER_ID + 1,
        };

        let spawns = encounter.config.layout.spawns.clone();
        for group in &spawns {
            for _ in 0..group.count {
                encounter.spawn_enemy(group.position, audio);
            }
        }
        info!(
            "Encounter ready: hero at {}, {} orcs",
            encounter.player.position,
            encounter.enemies.len()
        );
        encounter
    }

    /// Add an orc anchored at `position`
    pub fn spawn_enemy(&mut self, position: Vec2, audio: &mut dyn AudioBackend) -> ActorId {
        let id = self.next_id;
        self.next_id += 1;

        self.enemies
            .push(Actor::orc(id, position, &self.config, audio));
        self.sort_draw_order();
        debug!("orc {} spawned at {}", id, position);
        id
    }

    /// Advance the whole fight by one fixed tick
    ///
    /// Returns a stage switch once the hero has finished dying.
    pub fn tick(
        &mut self,
        dt: f32,
        keyboard: &Keyboard,
        audio: &mut dyn AudioBackend,
    ) -> Option<StageSwitch> {
        self.map.tick(dt);

        let mut events = Vec::new();
        {
            let mut ctx = TickContext {
                dt,
                map: &self.map,
                config: &self.config,
                audio: &mut *audio,
                events: &mut events,
            };
            player::update(&mut self.player, keyboard, &mut self.enemies, &mut ctx);
            for orc in self.enemies.iter_mut() {
                enemy::update(orc, &mut self.player, self.random.as_mut(), &mut ctx);
            }
        }

        let mut defeated = false;
        for event in events {
            match event {
                ActorEvent::EnemySlain(id) => {
                    debug!("orc {} slain", id);
                    self.award_point();
                }
                ActorEvent::EnemyRespawnDue(id) => self.respawn(id, audio),
                ActorEvent::PlayerDefeated => defeated = true,
            }
        }

        self.sort_draw_order();

        if defeated {
            info!("Hero defeated, final score {}", self.score);
            return Some(StageSwitch::Menu { score: self.score });
        }
        None
    }

    /// One more orc down
    pub fn award_point(&mut self) {
        self.score += 1;
    }

    /// Replace a dead orc by a fresh one at its anchor
    ///
    /// Unknown ids are ignored, so a respawn can only happen once per death.
    fn respawn(&mut self, id: ActorId, audio: &mut dyn AudioBackend) {
        let Some(index) = self.enemies.iter().position(|orc| orc.id == id) else {
            return;
        };

        let fallen = self.enemies.remove(index);
        fallen.release(audio);
        let anchor = fallen
            .brain()
            .map_or(fallen.position, |brain| brain.spawn_position);

        let replacement = self.spawn_enemy(anchor, audio);
        info!("orc {} respawned as {} at {}", id, replacement, anchor);
    }

    /// Release every sound and drop the orcs
    pub fn teardown(&mut self, audio: &mut dyn AudioBackend) {
        self.player.release(audio);
        for orc in self.enemies.drain(..) {
            orc.release(audio);
        }
        self.draw_order.clear();
    }

    fn sort_draw_order(&mut self) {
        let mut depths: Vec<(ActorId, f32)> = std::iter::once(&self.player)
            .chain(self.enemies.iter())
            .map(|actor| (actor.id, actor.position.y))
            .collect();
        depths.sort_by(|a, b| a.1.total_cmp(&b.1));
        self.draw_order = depths.into_iter().map(|(id, _)| id).collect();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn player(&self) -> &Actor {
        &self.player
    }

    pub fn enemies(&self) -> &[Actor] {
        &self.enemies
    }

    /// Actor ids sorted by feet position, back to front
    pub fn draw_order(&self) -> &[ActorId] {
        &self.draw_order
    }

    /// Look up any actor, hero included
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        if id == self.player.id {
            return Some(&self.player);
        }
        self.enemies.iter().find(|orc| orc.id == id)
    }

    /// Life readouts in draw order
    ///
    /// The hero always shows one, even at zero life; fallen orcs show none.
    pub fn health_labels(&self) -> Vec<HealthLabel> {
        self.draw_order
            .iter()
            .filter_map(|&id| self.actor(id))
            .filter(|actor| actor.is_player() || actor.life > 0)
            .map(|actor| HealthLabel {
                id: actor.id,
                position: actor.position,
                life: actor.life,
                band: actor.health_band(),
            })
            .collect()
    }
}
