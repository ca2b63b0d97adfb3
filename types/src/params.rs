//! Run parameters for a simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DURATION_YEARS, DEFAULT_MASS_SOLAR, DEFAULT_RADIUS_SOLAR, DEFAULT_STEP_YEARS,
    MAX_STEPS, SOLAR_LUMINOSITY_W, SOLAR_TEMPERATURE_K,
};
use crate::{EnumKind, EnumParseError, normalize_token};

/// How consecutive integration steps relate to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepMode {
    /// Each step advances the state produced by the previous step.
    #[default]
    Continuous,
    /// Every step restarts from the initial conditions at its grid time, so each
    /// sample is the one-step response of the initial state.
    ///
    /// Labelling matches [`StepMode::Continuous`]: the initial state is sample
    /// 0 and the step taken from `t_i` is stamped `t_i + h`. A restart loop
    /// that stamps each result with its start time `t_i` and records no `t = 0`
    /// sample plots the same values one step `h` earlier.
    FromInitial,
}

const STEP_MODE_PARSE_VALUES: &[&str] = &["continuous", "from-initial"];

impl StepMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            StepMode::Continuous => "continuous",
            StepMode::FromInitial => "from-initial",
        }
    }

    pub fn parse(s: &str) -> Result<Self, EnumParseError> {
        match normalize_token(s).as_str() {
            "continuous" => Ok(StepMode::Continuous),
            "from-initial" | "initial" | "restart" => Ok(StepMode::FromInitial),
            _ => Err(EnumParseError::new(
                EnumKind::StepMode,
                s.trim(),
                STEP_MODE_PARSE_VALUES,
            )),
        }
    }
}

impl fmt::Display for StepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the fusion rate is derived for each sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FusionMode {
    /// Evaluated from the temperature after each step.
    #[default]
    Instantaneous,
    /// Integrated as a fifth state component starting at zero.
    Accumulated,
}

const FUSION_MODE_PARSE_VALUES: &[&str] = &["instantaneous", "accumulated"];

impl FusionMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FusionMode::Instantaneous => "instantaneous",
            FusionMode::Accumulated => "accumulated",
        }
    }

    pub fn parse(s: &str) -> Result<Self, EnumParseError> {
        match normalize_token(s).as_str() {
            "instantaneous" | "instant" => Ok(FusionMode::Instantaneous),
            "accumulated" | "integrated" => Ok(FusionMode::Accumulated),
            _ => Err(EnumParseError::new(
                EnumKind::FusionMode,
                s.trim(),
                FUSION_MODE_PARSE_VALUES,
            )),
        }
    }
}

impl fmt::Display for FusionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Initial stellar state in report units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialConditions {
    pub mass_solar: f64,
    pub radius_solar: f64,
    pub luminosity_w: f64,
    pub temperature_k: f64,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            mass_solar: DEFAULT_MASS_SOLAR,
            radius_solar: DEFAULT_RADIUS_SOLAR,
            luminosity_w: SOLAR_LUMINOSITY_W,
            temperature_k: SOLAR_TEMPERATURE_K,
        }
    }
}

/// Everything needed to reproduce one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub initial: InitialConditions,
    pub duration_years: f64,
    pub step_years: f64,
    pub step_mode: StepMode,
    pub fusion_mode: FusionMode,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            initial: InitialConditions::default(),
            duration_years: DEFAULT_DURATION_YEARS,
            step_years: DEFAULT_STEP_YEARS,
            step_mode: StepMode::default(),
            fusion_mode: FusionMode::default(),
        }
    }
}

impl SimulationParams {
    /// Steps the grid `0, h, 2h, .. < duration` asks for, before any cap.
    ///
    /// Zero when the duration or step is not a positive finite number. May be
    /// far larger than any `usize`, or infinite for subnormal steps.
    #[must_use]
    pub fn requested_steps(&self) -> f64 {
        let (duration, step) = (self.duration_years, self.step_years);
        if !(duration.is_finite() && step.is_finite()) || duration <= 0.0 || step <= 0.0 {
            return 0.0;
        }
        (duration / step).ceil()
    }

    /// Whether the grid fits within [`MAX_STEPS`].
    #[must_use]
    pub fn fits_step_limit(&self) -> bool {
        self.requested_steps() <= MAX_STEPS as f64
    }

    /// Number of steps on the grid, clamped to [`MAX_STEPS`].
    #[must_use]
    pub fn step_count(&self) -> usize {
        if self.fits_step_limit() {
            self.requested_steps() as usize
        } else {
            MAX_STEPS
        }
    }

    /// Grid time at the start of step `index`.
    #[must_use]
    pub fn grid_time(&self, index: usize) -> f64 {
        index as f64 * self.step_years
    }
}
