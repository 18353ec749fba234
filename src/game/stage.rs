// Menu and game stages
//
// The director owns whichever stage is live plus its music. Switching always
// tears the old stage down first: every sound stops and the encounter gives
// its handles back.

use log::info;

use super::config::GameConfig;
use super::encounter::Encounter;
use super::map::{MapError, TiledMap};
use crate::engine::assets::SoundHandle;
use crate::engine::audio::AudioBackend;
use crate::engine::input::{Action, Keyboard};

const MUSIC_CHANNEL: &str = "music";
const MENU_MUSIC: &str = "menu";
const GAME_MUSIC: &str = "game";
const MUSIC_VOLUME: f32 = 0.5;

/// Request to leave the current stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageSwitch {
    /// Back to the menu after a defeat
    Menu { score: u32 },
    /// Start a new fight
    Game,
}

/// The live stage
pub enum Stage {
    Menu { last_score: Option<u32> },
    Game(Encounter),
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Menu { .. } => "menu",
            Stage::Game(_) => "game",
        }
    }

    /// Menu headline: the score of the lost fight, if any
    pub fn headline(&self) -> Option<String> {
        match self {
            Stage::Menu {
                last_score: Some(score),
            } => Some(format!("defeated - score {}", score)),
            _ => None,
        }
    }
}

/// Runs the menu and the fights, one at a time
pub struct StageDirector {
    stage: Stage,
    music: Option<SoundHandle>,
    config: GameConfig,
    map: TiledMap,
    seed: u64,
    games_started: u64,
}

impl StageDirector {
    /// Open on the menu
    pub fn new(config: GameConfig, map: TiledMap, seed: u64, audio: &mut dyn AudioBackend) -> Self {
        let mut director = Self {
            stage: Stage::Menu { last_score: None },
            music: None,
            config,
            map,
            seed,
            games_started: 0,
        };
        director.start_music(MENU_MUSIC, audio);
        info!("Stage: menu");
        director
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// Encounter of the running fight
    pub fn encounter(&self) -> Option<&Encounter> {
        match &self.stage {
            Stage::Game(encounter) => Some(encounter),
            Stage::Menu { .. } => None,
        }
    }

    /// Advance the live stage by one fixed tick
    pub fn tick(
        &mut self,
        dt: f32,
        keyboard: &Keyboard,
        audio: &mut dyn AudioBackend,
    ) -> Result<(), MapError> {
        let next = match &mut self.stage {
            Stage::Menu { .. } => {
                let start =
                    keyboard.just_pressed(Action::Attack) || keyboard.just_pressed(Action::Confirm);
                start.then_some(StageSwitch::Game)
            }
            Stage::Game(encounter) => encounter.tick(dt, keyboard, audio),
        };

        match next {
            Some(switch) => self.switch(switch, audio),
            None => Ok(()),
        }
    }

    /// Leave the current stage and enter the requested one
    pub fn switch(
        &mut self,
        switch: StageSwitch,
        audio: &mut dyn AudioBackend,
    ) -> Result<(), MapError> {
        audio.stop_all();
        if let Some(music) = self.music.take() {
            audio.destroy(music);
        }
        let previous = std::mem::replace(&mut self.stage, Stage::Menu { last_score: None });
        if let Stage::Game(mut encounter) = previous {
            encounter.teardown(audio);
        }

        match switch {
            StageSwitch::Menu { score } => {
                self.stage = Stage::Menu {
                    last_score: Some(score),
                };
                self.start_music(MENU_MUSIC, audio);
            }
            StageSwitch::Game => {
                let seed = self.seed.wrapping_add(self.games_started);
                self.games_started += 1;
                match Encounter::load(self.config.clone(), &self.map, seed, audio) {
                    Ok(encounter) => {
                        self.stage = Stage::Game(encounter);
                        self.start_music(GAME_MUSIC, audio);
                    }
                    Err(err) => {
                        self.start_music(MENU_MUSIC, audio);
                        return Err(err);
                    }
                }
            }
        }

        info!("Stage: {}", self.stage.name());
        Ok(())
    }

    /// Stop everything, e.g. when the window closes
    pub fn shutdown(&mut self, audio: &mut dyn AudioBackend) {
        audio.stop_all();
        if let Some(music) = self.music.take() {
            audio.destroy(music);
        }
        if let Stage::Game(encounter) = &mut self.stage {
            encounter.teardown(audio);
        }
    }

    fn start_music(&mut self, clip: &str, audio: &mut dyn AudioBackend) {
        let music = audio.create_sound(MUSIC_CHANNEL, clip, true);
        audio.set_volume(music, MUSIC_VOLUME);
        audio.play(music);
        self.music = Some(music);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::HeadlessAudio;
    use crate::game::map::walled_arena;

    fn director() -> (StageDirector, HeadlessAudio) {
        let mut audio = HeadlessAudio::new();
        let map = walled_arena(32, 24);
        let director = StageDirector::new(GameConfig::default(), map, 9, &mut audio);
        (director, audio)
    }

    #[test]
    fn test_opens_on_menu_with_music() {
        let (director, audio) = director();
        assert!(matches!(director.stage(), Stage::Menu { last_score: None }));
        assert_eq!(director.stage().headline(), None);

        let music = director.music.unwrap();
        let instance = audio.instance(music).unwrap();
        assert_eq!(instance.clip, "menu");
        assert!(instance.looping);
        assert!(instance.playing);
        assert_eq!(instance.volume, 0.5);
    }

    #[test]
    fn test_menu_waits_for_start_key() {
        let (mut director, mut audio) = director();
        let walk = Keyboard::with_pressed(&[Action::MoveLeft]);
        director.tick(1.0 / 60.0, &walk, &mut audio).unwrap();
        assert_eq!(director.stage().name(), "menu");

        let confirm = Keyboard::with_pressed(&[Action::Confirm]);
        director.tick(1.0 / 60.0, &confirm, &mut audio).unwrap();
        assert_eq!(director.stage().name(), "game");
        assert_eq!(director.encounter().map(|e| e.enemies().len()), Some(25));
    }

    #[test]
    fn test_attack_key_also_starts() {
        let (mut director, mut audio) = director();
        let attack = Keyboard::with_pressed(&[Action::Attack]);
        director.tick(1.0 / 60.0, &attack, &mut audio).unwrap();
        assert!(director.encounter().is_some());

        let music = director.music.unwrap();
        assert_eq!(audio.instance(music).map(|m| m.clip.as_str()), Some("game"));
        assert_eq!(audio.plays_of("menu"), 0);
    }

    #[test]
    fn test_defeat_returns_to_menu_with_score() {
        let (mut director, mut audio) = director();
        director.switch(StageSwitch::Game, &mut audio).unwrap();
        // Music plus one sound per actor
        assert_eq!(audio.live_count(), 27);

        director
            .switch(StageSwitch::Menu { score: 4 }, &mut audio)
            .unwrap();
        let headline = director.stage().headline();
        assert_eq!(headline.as_deref(), Some("defeated - score 4"));
        // Only the menu music is left
        assert_eq!(audio.live_count(), 1);
    }

    #[test]
    fn test_shutdown_releases_everything() {
        let (mut director, mut audio) = director();
        director.switch(StageSwitch::Game, &mut audio).unwrap();
        director.shutdown(&mut audio);
        assert_eq!(audio.live_count(), 0);
    }

    #[test]
    fn test_broken_map_keeps_menu() {
        let mut audio = HeadlessAudio::new();
        let mut map = walled_arena(8, 8);
        map.layers.truncate(1);
        let mut director = StageDirector::new(GameConfig::default(), map, 1, &mut audio);

        assert!(director.switch(StageSwitch::Game, &mut audio).is_err());
        assert_eq!(director.stage().name(), "menu");
        assert_eq!(audio.live_count(), 1);
    }
}
