//! The toy stellar evolution model.
//!
//! The equations are deliberately simplistic and not physically meaningful:
//!
//! ```text
//! dr/dt = sqrt(L / (4 pi G M))
//! dM/dt = -L / (G M / r)
//! dL/dt = 4 pi r^2 T^4
//! dT/dt = -3 L / (16 pi G r^2)
//! ```
//!
//! All quantities are SI; time is the raw step value with no unit conversion.

use std::f64::consts::PI;

use stellar_types::constants::{GRAVITATIONAL_CONSTANT, SOLAR_MASS_KG, SOLAR_RADIUS_M};
use stellar_types::{FusionMode, InitialConditions, Sample};

use crate::integrator::{OdeSystem, Phase};

const FUSION_SCALE: f64 = 2.5e18;
const FUSION_REFERENCE_K: f64 = 1e6;
const FUSION_BARRIER_K: f64 = 1.34e8;

/// Integrated state. `fusion_total` only evolves under [`FusionMode::Accumulated`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StellarState {
    pub radius_m: f64,
    pub mass_kg: f64,
    pub luminosity_w: f64,
    pub temperature_k: f64,
    pub fusion_total: f64,
}

impl StellarState {
    #[must_use]
    pub fn from_initial(initial: &InitialConditions) -> Self {
        Self {
            radius_m: initial.radius_solar * SOLAR_RADIUS_M,
            mass_kg: initial.mass_solar * SOLAR_MASS_KG,
            luminosity_w: initial.luminosity_w,
            temperature_k: initial.temperature_k,
            fusion_total: 0.0,
        }
    }

    /// Report-unit sample at `time_years`.
    #[must_use]
    pub fn to_sample(&self, time_years: f64, fusion_mode: FusionMode) -> Sample {
        let fusion_rate = match fusion_mode {
            FusionMode::Instantaneous => fusion_rate(self.temperature_k),
            FusionMode::Accumulated => self.fusion_total,
        };
        Sample {
            time_years,
            radius_solar: self.radius_m / SOLAR_RADIUS_M,
            mass_solar: self.mass_kg / SOLAR_MASS_KG,
            luminosity_w: self.luminosity_w,
            temperature_k: self.temperature_k,
            fusion_rate,
        }
    }
}

impl Phase for StellarState {
    fn add(self, other: Self) -> Self {
        Self {
            radius_m: self.radius_m + other.radius_m,
            mass_kg: self.mass_kg + other.mass_kg,
            luminosity_w: self.luminosity_w + other.luminosity_w,
            temperature_k: self.temperature_k + other.temperature_k,
            fusion_total: self.fusion_total + other.fusion_total,
        }
    }

    fn scale(self, factor: f64) -> Self {
        Self {
            radius_m: self.radius_m * factor,
            mass_kg: self.mass_kg * factor,
            luminosity_w: self.luminosity_w * factor,
            temperature_k: self.temperature_k * factor,
            fusion_total: self.fusion_total * factor,
        }
    }

    fn is_finite(&self) -> bool {
        self.radius_m.is_finite()
            && self.mass_kg.is_finite()
            && self.luminosity_w.is_finite()
            && self.temperature_k.is_finite()
            && self.fusion_total.is_finite()
    }
}

/// Right-hand side of the four structure equations. `fusion_total` of the
/// result is zero.
#[must_use]
pub fn derivatives(state: &StellarState) -> StellarState {
    let StellarState {
        radius_m: r,
        mass_kg: m,
        luminosity_w: l,
        temperature_k: t,
        ..
    } = *state;
    let g = GRAVITATIONAL_CONSTANT;

    StellarState {
        radius_m: (l / (4.0 * PI * g * m)).sqrt(),
        mass_kg: -l / (g * m / r),
        luminosity_w: 4.0 * PI * r.powi(2) * t.powi(4),
        temperature_k: -3.0 * l / (16.0 * PI * g * r.powi(2)),
        fusion_total: 0.0,
    }
}

/// Toy nuclear fusion rate: `2.5e18 * (T / 1e6)^4 * exp(-1.34e8 / T)`.
#[must_use]
pub fn fusion_rate(temperature_k: f64) -> f64 {
    FUSION_SCALE
        * (temperature_k / FUSION_REFERENCE_K).powi(4)
        * (-FUSION_BARRIER_K / temperature_k).exp()
}

/// The model as an [`OdeSystem`]. Time does not enter the equations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ToyModel {
    fusion_mode: FusionMode,
}

impl ToyModel {
    #[must_use]
    pub const fn new(fusion_mode: FusionMode) -> Self {
        Self { fusion_mode }
    }
}

impl OdeSystem for ToyModel {
    type State = StellarState;

    fn derivative(&self, _t: f64, state: &StellarState) -> StellarState {
        let mut d = derivatives(state);
        if self.fusion_mode == FusionMode::Accumulated {
            d.fusion_total = fusion_rate(state.temperature_k);
        }
        d
    }
}
