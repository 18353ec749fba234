/// Game loop timing and control system
///
/// Fixed timestep simulation: the encounter always ticks with `FIXED_TIMESTEP`,
/// however fast frames arrive, so animation-frame driven combat stays the same
/// on every machine.
use std::time::{Duration, Instant};

/// Simulation rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of simulation ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// How often the FPS overlay reports
const FPS_REPORT_INTERVAL: Duration = Duration::from_secs(1);

/// Game loop timing state
pub struct GameLoop {
    /// Accumulated time not yet simulated
    accumulator: Duration,

    /// Time of last frame
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Current frame number
    frame_count: u64,

    /// Total simulation ticks executed
    tick_count: u64,

    /// Current FPS (updated periodically)
    current_fps: f32,

    /// Whether the FPS overlay is shown
    fps_overlay: bool,

    /// Time accumulated since the last FPS report
    since_fps_report: Duration,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            tick_count: 0,
            current_fps: 0.0,
            fps_overlay: false,
            since_fps_report: Duration::ZERO,
        }
    }

    /// Begin a new frame, returns the number of fixed ticks to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(frame_time)
    }

    /// Account for `frame_time` of wall-clock time, returns the ticks to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;
        self.since_fps_report += frame_time;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        // Update FPS counter every 10 frames
        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Drop the backlog instead of replaying it next frame
        if ticks == MAX_TICKS_PER_FRAME {
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    /// Get total number of frames
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of simulation ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Toggle the FPS overlay
    pub fn toggle_fps_overlay(&mut self) {
        self.fps_overlay = !self.fps_overlay;
        self.since_fps_report = Duration::ZERO;
        log::info!(
            "FPS overlay {}",
            if self.fps_overlay { "on" } else { "off" }
        );
    }

    /// Check if the FPS overlay is shown
    pub fn fps_overlay(&self) -> bool {
        self.fps_overlay
    }

    /// Current FPS, once per report interval while the overlay is on
    pub fn fps_report(&mut self) -> Option<f32> {
        if !self.fps_overlay || self.since_fps_report < FPS_REPORT_INTERVAL {
            return None;
        }
        self.since_fps_report = Duration::ZERO;
        Some(self.current_fps)
    }

    /// Update FPS calculation
    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.tick_count(), 0);
        assert!(!game_loop.fps_overlay());
    }

    #[test]
    fn test_fixed_timestep_matches_tick_duration() {
        let seconds = FIXED_TIMESTEP_DURATION.as_secs_f32();
        assert_relative_eq!(seconds, FIXED_TIMESTEP, epsilon = 1e-5);
    }

    #[test]
    fn test_one_tick_per_timestep() {
        let mut game_loop = GameLoop::new();
        assert_eq!(game_loop.advance(FIXED_TIMESTEP_DURATION), 1);
        assert_eq!(game_loop.advance(Duration::from_millis(5)), 0);
        assert_eq!(game_loop.advance(Duration::from_millis(12)), 1);
        assert_eq!(game_loop.tick_count(), 2);
        assert_eq!(game_loop.frame_count(), 3);
    }

    #[test]
    fn test_max_ticks_limit() {
        let mut game_loop = GameLoop::new();

        // 300ms would allow 18 ticks
        let ticks = game_loop.advance(Duration::from_millis(300));
        assert_eq!(ticks, MAX_TICKS_PER_FRAME);

        // The backlog is dropped
        assert_eq!(game_loop.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_fps_from_frame_times() {
        let mut game_loop = GameLoop::new();
        for _ in 0..10 {
            game_loop.advance(Duration::from_millis(20));
        }
        assert_relative_eq!(game_loop.fps(), 50.0, epsilon = 0.01);
    }

    #[test]
    fn test_fps_report_only_when_overlay_on() {
        let mut game_loop = GameLoop::new();
        for _ in 0..70 {
            game_loop.advance(Duration::from_millis(16));
        }
        assert!(game_loop.fps_report().is_none());

        game_loop.toggle_fps_overlay();
        assert!(game_loop.fps_report().is_none());
        for _ in 0..70 {
            game_loop.advance(Duration::from_millis(16));
        }
        assert!(game_loop.fps_report().is_some());
        assert!(game_loop.fps_report().is_none());
    }
}
