//! UI state types for the viewer.
//!
//! Pure data types with no IO, no async, no ratatui dependency.
//! Used by both the engine (state ownership) and tui (rendering/input).

mod animation;

pub use animation::FrameClock;

use std::fmt;
use std::time::Duration;

use crate::{EnumKind, EnumParseError, normalize_token};

/// UI configuration options derived from config/environment/flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiOptions {
    pub ascii_only: bool,
    pub high_contrast: bool,
    /// Skip the animation: start on the final frame, paused.
    pub reduced_motion: bool,
}

pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(20);
pub const MIN_SPEED: f64 = 0.125;
pub const MAX_SPEED: f64 = 64.0;

/// Playback timing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    /// Wall time per frame at 1x speed.
    pub frame_interval: Duration,
    /// Initial speed multiplier, within `[MIN_SPEED, MAX_SPEED]`.
    pub speed: f64,
    /// Loop back to the first frame after the last one.
    pub repeat: bool,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            frame_interval: DEFAULT_FRAME_INTERVAL,
            speed: 1.0,
            repeat: true,
        }
    }
}

/// Chart arrangement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    /// Radius, mass, luminosity and temperature in a 2x2 grid.
    #[default]
    Grid,
    /// One quantity filling the chart area.
    Single,
}

const LAYOUT_PARSE_VALUES: &[&str] = &["grid", "single"];

impl Layout {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Layout::Grid => "grid",
            Layout::Single => "single",
        }
    }

    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Layout::Grid => Layout::Single,
            Layout::Single => Layout::Grid,
        }
    }

    pub fn parse(s: &str) -> Result<Self, EnumParseError> {
        match normalize_token(s).as_str() {
            "grid" | "quad" | "all" => Ok(Layout::Grid),
            "single" | "one" => Ok(Layout::Single),
            _ => Err(EnumParseError::new(
                EnumKind::Layout,
                s.trim(),
                LAYOUT_PARSE_VALUES,
            )),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Layout;

    #[test]
    fn layout_toggle_round_trips() {
        assert_eq!(Layout::Grid.toggle(), Layout::Single);
        assert_eq!(Layout::Grid.toggle().toggle(), Layout::Grid);
    }

    #[test]
    fn layout_parse_is_case_insensitive() {
        assert_eq!(Layout::parse("SINGLE").unwrap(), Layout::Single);
        assert!(Layout::parse("stacked").is_err());
    }
}
