//! Recorded simulation output.

use serde::{Deserialize, Serialize};

use crate::{Quantity, SimulationParams};

/// One recorded point of a trajectory, in report units.
///
/// Radius and mass are in solar units; luminosity, temperature and fusion rate
/// are raw model values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time_years: f64,
    pub radius_solar: f64,
    pub mass_solar: f64,
    pub luminosity_w: f64,
    pub temperature_k: f64,
    pub fusion_rate: f64,
}

impl Sample {
    #[must_use]
    pub const fn value(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Radius => self.radius_solar,
            Quantity::Mass => self.mass_solar,
            Quantity::Luminosity => self.luminosity_w,
            Quantity::Temperature => self.temperature_k,
            Quantity::FusionRate => self.fusion_rate,
        }
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.time_years.is_finite() && Quantity::all().iter().all(|q| self.value(*q).is_finite())
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Termination {
    /// Every grid step produced a finite sample.
    Completed,
    /// Step `step` (1-based) produced a non-finite value; its sample was dropped.
    Diverged { step: usize, time_years: f64 },
}

impl Termination {
    #[must_use]
    pub const fn is_diverged(&self) -> bool {
        matches!(self, Termination::Diverged { .. })
    }

    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Termination::Completed => "Completed".to_string(),
            Termination::Diverged { step, time_years } => {
                format!("Diverged at step {step} (t = {time_years:.3e} years)")
            }
        }
    }
}

/// Min, max and final value of one quantity over a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantitySummary {
    pub min: f64,
    pub max: f64,
    pub last: f64,
}

/// The full output of one run: parameters, finite samples, and termination.
///
/// Invariant: every sample is finite and sample times are non-decreasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    params: SimulationParams,
    samples: Vec<Sample>,
    termination: Termination,
}

impl Trajectory {
    #[must_use]
    pub fn new(params: SimulationParams, samples: Vec<Sample>, termination: Termination) -> Self {
        debug_assert!(samples.iter().all(Sample::is_finite));
        Self {
            params,
            samples,
            termination,
        }
    }

    #[must_use]
    pub const fn params(&self) -> &SimulationParams {
        &self.params
    }

    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    #[must_use]
    pub const fn termination(&self) -> Termination {
        self.termination
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// `(time, value)` points for one quantity, restricted to the first `count` samples.
    #[must_use]
    pub fn series_prefix(&self, quantity: Quantity, count: usize) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .take(count)
            .map(|s| (s.time_years, s.value(quantity)))
            .collect()
    }

    #[must_use]
    pub fn series(&self, quantity: Quantity) -> Vec<(f64, f64)> {
        self.series_prefix(quantity, self.samples.len())
    }

    #[must_use]
    pub fn summary(&self, quantity: Quantity) -> Option<QuantitySummary> {
        let last = self.samples.last()?.value(quantity);
        let (min, max) = self
            .samples
            .iter()
            .map(|s| s.value(quantity))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        Some(QuantitySummary { min, max, last })
    }
}
