// Character animation system
//
// The state machines never time frames themselves: they pick clips by name and
// read `current_frame` / `is_finished` back from the player.

use std::collections::HashMap;

/// A single animation clip
#[derive(Debug, Clone)]
pub struct AnimationClip {
    /// Name of the animation (e.g., "idle_right_down", "die")
    pub name: String,
    /// Number of frames in the animation
    pub frame_count: usize,
    /// Duration of each frame in seconds
    pub frame_duration: f32,
    /// Whether the animation loops
    pub looping: bool,
}

impl AnimationClip {
    /// Create a new animation clip
    pub fn new(name: &str, frame_count: usize, fps: f32, looping: bool) -> Self {
        Self {
            name: name.to_string(),
            frame_count: frame_count.max(1),
            frame_duration: 1.0 / fps,
            looping,
        }
    }

    /// Create a looping animation
    pub fn looping(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, true)
    }

    /// Create a one-shot animation (plays once)
    pub fn one_shot(name: &str, frame_count: usize, fps: f32) -> Self {
        Self::new(name, frame_count, fps, false)
    }
}

/// Frame counts and rates for one character sprite sheet
#[derive(Debug, Clone, Copy)]
pub struct CharacterClipTimings {
    pub idle: (usize, f32),
    pub walk: (usize, f32),
    pub attack: (usize, f32),
    pub hit: (usize, f32),
    pub die: (usize, f32),
}

/// Hero sheet: 5-frame swing, strike lands on frame 2
pub const HERO_TIMINGS: CharacterClipTimings = CharacterClipTimings {
    idle: (4, 6.0),
    walk: (6, 10.0),
    attack: (5, 12.0),
    hit: (3, 10.0),
    die: (6, 8.0),
};

/// Orc sheet: slightly slower swing than the hero
pub const ORC_TIMINGS: CharacterClipTimings = CharacterClipTimings {
    idle: (4, 6.0),
    walk: (6, 8.0),
    attack: (5, 10.0),
    hit: (3, 10.0),
    die: (6, 8.0),
};

/// Frames in the torch flame / light loop
pub const TORCH_FRAMES: usize = 8;

/// Build every directional clip for a character sheet
///
/// Produces `{state}_{left|right}_{up|down}` for idle/walk/attack/hit and a
/// single undirected `die` clip.
pub fn character_clips(timings: &CharacterClipTimings) -> Vec<AnimationClip> {
    let mut clips = Vec::with_capacity(17);
    for horizontal in ["left", "right"] {
        for vertical in ["up", "down"] {
            let (frames, fps) = timings.idle;
            clips.push(AnimationClip::looping(
                &format!("idle_{horizontal}_{vertical}"),
                frames,
                fps,
            ));
            let (frames, fps) = timings.walk;
            clips.push(AnimationClip::looping(
                &format!("walk_{horizontal}_{vertical}"),
                frames,
                fps,
            ));
            let (frames, fps) = timings.attack;
            clips.push(AnimationClip::one_shot(
                &format!("attack_{horizontal}_{vertical}"),
                frames,
                fps,
            ));
            let (frames, fps) = timings.hit;
            clips.push(AnimationClip::one_shot(
                &format!("hit_{horizontal}_{vertical}"),
                frames,
                fps,
            ));
        }
    }
    let (frames, fps) = timings.die;
    clips.push(AnimationClip::one_shot("die", frames, fps));
    clips
}

/// Manages animation playback for one sprite
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    /// All available animations
    animations: HashMap<String, AnimationClip>,
    /// Currently playing animation name
    current_animation: String,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Whether the animation is playing
    playing: bool,
}

impl AnimationPlayer {
    /// Create a player over a clip table, starting on `initial`
    pub fn new(clips: Vec<AnimationClip>, initial: &str) -> Self {
        let mut player = Self {
            animations: clips.into_iter().map(|c| (c.name.clone(), c)).collect(),
            current_animation: String::new(),
            current_frame: 0,
            frame_timer: 0.0,
            playing: true,
        };
        player.play(initial);
        player
    }

    /// Hero sheet, idling to the bottom right
    pub fn hero() -> Self {
        Self::new(character_clips(&HERO_TIMINGS), "idle_right_down")
    }

    /// Orc sheet, idling to the bottom right
    pub fn orc() -> Self {
        Self::new(character_clips(&ORC_TIMINGS), "idle_right_down")
    }

    /// Torch flame or light halo loop
    pub fn torch() -> Self {
        let flame = AnimationClip::looping("run", TORCH_FRAMES, 10.0);
        Self::new(vec![flame], "run")
    }

    /// Check whether a clip exists
    pub fn has_animation(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    /// Play an animation by name; no restart if it is already current
    pub fn play(&mut self, name: &str) {
        if self.current_animation != name {
            self.play_from_start(name);
        }
    }

    /// Play an animation from the beginning, even if it's the same
    pub fn play_from_start(&mut self, name: &str) {
        if !self.animations.contains_key(name) {
            debug_assert!(false, "missing animation clip '{name}'");
            log::error!("missing animation clip '{}'", name);
            return;
        }
        self.current_animation = name.to_string();
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.playing = true;
    }

    /// Jump to a frame of the current clip (used to de-synchronise loops)
    pub fn set_frame(&mut self, frame: usize) {
        let last = self
            .current_clip()
            .map(|clip| clip.frame_count - 1)
            .unwrap_or(0);
        self.current_frame = frame.min(last);
        self.frame_timer = 0.0;
    }

    /// Update the animation (called every frame)
    pub fn update(&mut self, dt: f32) {
        if !self.playing {
            return;
        }

        let Some(clip) = self.animations.get(&self.current_animation) else {
            return;
        };

        self.frame_timer += dt;

        while self.frame_timer >= clip.frame_duration {
            self.frame_timer -= clip.frame_duration;
            self.current_frame += 1;

            if self.current_frame >= clip.frame_count {
                if clip.looping {
                    self.current_frame = 0;
                } else {
                    // Stay on last frame
                    self.current_frame = clip.frame_count - 1;
                    self.playing = false;
                    break;
                }
            }
        }
    }

    /// Get the current animation name
    pub fn current_animation(&self) -> &str {
        &self.current_animation
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Check if the current animation has finished (one-shot clips only)
    pub fn is_finished(&self) -> bool {
        match self.current_clip() {
            Some(clip) => !clip.looping && !self.playing,
            None => true,
        }
    }

    /// Get the clip info for the current animation
    pub fn current_clip(&self) -> Option<&AnimationClip> {
        self.animations.get(&self.current_animation)
    }
}
