// Audio seam
//
// Gameplay only ever creates, plays and destroys sounds; nothing flows back into
// game logic. `HeadlessAudio` is the backend used when no mixer is attached: it
// logs every request and keeps track of live handles so leaks are visible.

use crate::engine::assets::{AssetHandle, AssetId, SoundHandle};
use log::debug;
use std::collections::HashMap;

/// Fire-and-forget sound playback
pub trait AudioBackend {
    /// Create a sound instance for `clip` on `channel`
    fn create_sound(&mut self, channel: &str, clip: &str, looping: bool) -> SoundHandle;

    /// Start (or restart) playback
    fn play(&mut self, handle: SoundHandle);

    /// Set the instance volume (0.0 - 1.0)
    fn set_volume(&mut self, handle: SoundHandle, volume: f32);

    /// Release the instance; unknown handles are ignored
    fn destroy(&mut self, handle: SoundHandle);

    /// Stop every playing instance
    fn stop_all(&mut self);
}

/// State of one live sound instance
#[derive(Debug, Clone, PartialEq)]
pub struct SoundInstance {
    pub channel: String,
    pub clip: String,
    pub looping: bool,
    pub volume: f32,
    pub playing: bool,
    pub play_count: u32,
}

/// Audio backend that only records what would be played
#[derive(Debug, Default)]
pub struct HeadlessAudio {
    sounds: HashMap<AssetId, SoundInstance>,
    next_id: u64,
}

impl HeadlessAudio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of instances created and not yet destroyed
    pub fn live_count(&self) -> usize {
        self.sounds.len()
    }

    /// Look up a live instance
    pub fn instance(&self, handle: SoundHandle) -> Option<&SoundInstance> {
        self.sounds.get(&handle.id())
    }

    /// Total number of play requests for a clip across live instances
    pub fn plays_of(&self, clip: &str) -> u32 {
        self.sounds
            .values()
            .filter(|s| s.clip == clip)
            .map(|s| s.play_count)
            .sum()
    }
}

impl AudioBackend for HeadlessAudio {
    fn create_sound(&mut self, channel: &str, clip: &str, looping: bool) -> SoundHandle {
        let id = AssetId::from_u64(self.next_id);
        self.next_id += 1;
        self.sounds.insert(
            id,
            SoundInstance {
                channel: channel.to_string(),
                clip: clip.to_string(),
                looping,
                volume: 1.0,
                playing: false,
                play_count: 0,
            },
        );
        debug!("sound {} created ({}/{})", id.as_u64(), channel, clip);
        AssetHandle::new(id)
    }

    fn play(&mut self, handle: SoundHandle) {
        if let Some(sound) = self.sounds.get_mut(&handle.id()) {
            sound.playing = true;
            sound.play_count += 1;
            debug!("play {}/{}", sound.channel, sound.clip);
        }
    }

    fn set_volume(&mut self, handle: SoundHandle, volume: f32) {
        if let Some(sound) = self.sounds.get_mut(&handle.id()) {
            sound.volume = volume.clamp(0.0, 1.0);
        }
    }

    fn destroy(&mut self, handle: SoundHandle) {
        if let Some(sound) = self.sounds.remove(&handle.id()) {
            debug!("sound {} destroyed ({})", handle.id().as_u64(), sound.clip);
        }
    }

    fn stop_all(&mut self) {
        for sound in self.sounds.values_mut() {
            sound.playing = false;
        }
    }
}
