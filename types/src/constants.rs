//! Physical constants and the default run shape, in SI units.

/// Solar mass in kilograms.
pub const SOLAR_MASS_KG: f64 = 1.989e30;

/// Solar radius in metres.
pub const SOLAR_RADIUS_M: f64 = 6.957e8;

/// Gravitational constant in m^3 kg^-1 s^-2.
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// Solar luminosity in watts.
pub const SOLAR_LUMINOSITY_W: f64 = 3.828e26;

/// Effective solar surface temperature in kelvin.
pub const SOLAR_TEMPERATURE_K: f64 = 5778.0;

pub const DEFAULT_DURATION_YEARS: f64 = 1e7;
pub const DEFAULT_STEP_YEARS: f64 = 1e4;

/// Largest grid a single run may request. Runs are held in memory whole.
pub const MAX_STEPS: usize = 1_000_000;

pub const DEFAULT_MASS_SOLAR: f64 = 10.0;
pub const DEFAULT_RADIUS_SOLAR: f64 = 1.0;
