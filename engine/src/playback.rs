//! Animation playback over a trajectory.
//!
//! Frames run `0..=n` for `n` samples; frame `k` reveals the first `k` samples,
//! so the last frame shows the whole trajectory.

use std::time::Duration;

use stellar_types::ui::{AnimationSettings, FrameClock, MAX_SPEED, MIN_SPEED};

#[derive(Debug, Clone)]
pub struct Playback {
    frame: usize,
    last_frame: usize,
    clock: FrameClock,
    speed: f64,
    paused: bool,
    repeat: bool,
}

impl Playback {
    #[must_use]
    pub fn new(sample_count: usize, settings: AnimationSettings) -> Self {
        Self {
            frame: 0,
            last_frame: sample_count,
            clock: FrameClock::new(settings.frame_interval),
            speed: settings.speed.clamp(MIN_SPEED, MAX_SPEED),
            paused: false,
            repeat: settings.repeat,
        }
    }

    /// Jump to the last frame and pause.
    pub fn show_final(&mut self) {
        self.frame = self.last_frame;
        self.paused = true;
    }

    #[must_use]
    pub const fn frame(&self) -> usize {
        self.frame
    }

    #[must_use]
    pub const fn last_frame(&self) -> usize {
        self.last_frame
    }

    /// Number of samples revealed by the current frame.
    #[must_use]
    pub const fn visible(&self) -> usize {
        self.frame
    }

    #[must_use]
    pub const fn speed(&self) -> f64 {
        self.speed
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// True once a non-repeating playback has reached its last frame.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        !self.repeat && self.frame == self.last_frame
    }

    /// Advance by elapsed wall time. Returns true when the frame changed.
    pub fn advance(&mut self, delta: Duration) -> bool {
        if self.paused || self.is_finished() {
            return false;
        }
        let due = self.clock.advance(delta, self.speed);
        if due == 0 {
            return false;
        }

        let before = self.frame;
        if self.repeat {
            let cycle = self.last_frame + 1;
            self.frame = (self.frame + due % cycle) % cycle;
        } else {
            self.frame = self.frame.saturating_add(due).min(self.last_frame);
        }
        self.frame != before
    }

    pub fn toggle_pause(&mut self) {
        if self.is_finished() {
            // Resuming a finished run starts it over.
            self.restart();
            return;
        }
        self.paused = !self.paused;
        self.clock.reset();
    }

    pub fn restart(&mut self) {
        self.frame = 0;
        self.paused = false;
        self.clock.reset();
    }

    pub fn step_forward(&mut self) {
        self.paused = true;
        self.frame = (self.frame + 1).min(self.last_frame);
    }

    pub fn step_back(&mut self) {
        self.paused = true;
        self.frame = self.frame.saturating_sub(1);
    }

    pub fn faster(&mut self) {
        self.speed = (self.speed * 2.0).min(MAX_SPEED);
    }

    pub fn slower(&mut self) {
        self.speed = (self.speed / 2.0).max(MIN_SPEED);
    }
}
