//! Configuration for Stellar.
//!
//! The config file is optional TOML at `~/.stellar/config.toml`:
//!
//! ```toml
//! [app]
//! layout = "grid"          # or "single"
//! quantity = "radius"      # single-layout quantity
//! ascii_only = false
//! high_contrast = false
//! reduced_motion = false
//!
//! [simulation]
//! duration_years = 1e7
//! step_years = 1e4
//! step_mode = "continuous" # or "from-initial"
//! fusion_mode = "instantaneous" # or "accumulated"
//!
//! [initial]
//! mass_solar = 10.0
//! radius_solar = 1.0
//! luminosity_w = 3.828e26
//! temperature_k = 5778.0
//!
//! [animation]
//! frame_interval_ms = 20
//! speed = 1.0
//! repeat = true
//! ```
//!
//! [`resolve`] merges the file with command line overrides and the
//! `STELLAR_LAYOUT` environment variable into validated run settings.

use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use thiserror::Error;

use stellar_types::constants::MAX_STEPS;
use stellar_types::ui::{AnimationSettings, Layout, MAX_SPEED, MIN_SPEED, UiOptions};
use stellar_types::{
    EnumParseError, FusionMode, InitialConditions, Quantity, SimulationParams, StepMode,
};

/// Environment variable consulted for the layout when no flag is given.
pub const LAYOUT_ENV: &str = "STELLAR_LAYOUT";

const fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
pub struct StellarConfig {
    pub app: Option<AppConfig>,
    pub simulation: Option<SimulationConfig>,
    pub initial: Option<InitialConfig>,
    pub animation: Option<AnimationConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => Some(path),
            ConfigError::Invalid { .. } => None,
        }
    }

    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }

    fn from_enum(field: &'static str, err: EnumParseError) -> Self {
        Self::invalid(field, err.to_string())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// "grid" or "single".
    pub layout: Option<String>,
    /// Quantity shown by the single layout.
    pub quantity: Option<String>,
    /// Use ASCII-only glyphs and dot markers.
    #[serde(default)]
    pub ascii_only: bool,
    /// Enable a high-contrast color palette.
    #[serde(default)]
    pub high_contrast: bool,
    /// Start on the final frame instead of animating.
    #[serde(default)]
    pub reduced_motion: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimulationConfig {
    pub duration_years: Option<f64>,
    pub step_years: Option<f64>,
    pub step_mode: Option<String>,
    pub fusion_mode: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct InitialConfig {
    pub mass_solar: Option<f64>,
    pub radius_solar: Option<f64>,
    pub luminosity_w: Option<f64>,
    pub temperature_k: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct AnimationConfig {
    pub frame_interval_ms: Option<u64>,
    pub speed: Option<f64>,
    #[serde(default = "default_true")]
    pub repeat: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: None,
            speed: None,
            repeat: true,
        }
    }
}

impl StellarConfig {
    /// Load from the default location. `Ok(None)` when there is no home
    /// directory or no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded config");
                Ok(config)
            }
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".stellar").join("config.toml"))
}

/// Values supplied on the command line. `None`/`false` defers to the
/// environment, then the config file, then built-in defaults.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub layout: Option<Layout>,
    pub quantity: Option<Quantity>,
    pub step_mode: Option<StepMode>,
    pub fusion_mode: Option<FusionMode>,
    pub duration_years: Option<f64>,
    pub step_years: Option<f64>,
    pub mass_solar: Option<f64>,
    pub radius_solar: Option<f64>,
    pub luminosity_w: Option<f64>,
    pub temperature_k: Option<f64>,
    pub frame_interval_ms: Option<u64>,
    pub speed: Option<f64>,
    pub ascii_only: bool,
    pub high_contrast: bool,
    pub reduced_motion: bool,
    pub no_repeat: bool,
}

/// Validated settings for one run of the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub simulation: SimulationParams,
    pub animation: AnimationSettings,
    pub ui: UiOptions,
    pub layout: Layout,
    pub quantity: Quantity,
}

/// Resolve using the process environment for `STELLAR_LAYOUT`.
pub fn resolve(
    config: Option<&StellarConfig>,
    overrides: &Overrides,
) -> Result<Settings, ConfigError> {
    resolve_with_env(config, overrides, env::var(LAYOUT_ENV).ok().as_deref())
}

/// Precedence: override > `env_layout` (layout only) > config > default.
pub fn resolve_with_env(
    config: Option<&StellarConfig>,
    overrides: &Overrides,
    env_layout: Option<&str>,
) -> Result<Settings, ConfigError> {
    let app = config.and_then(|c| c.app.as_ref());
    let sim = config.and_then(|c| c.simulation.as_ref());
    let init = config.and_then(|c| c.initial.as_ref());
    let anim = config.and_then(|c| c.animation.as_ref());

    let layout = match overrides.layout {
        Some(layout) => layout,
        None => match env_layout.map(Layout::parse) {
            Some(Ok(layout)) => layout,
            Some(Err(err)) => {
                tracing::warn!("Ignoring {LAYOUT_ENV}: {err}");
                config_layout(app)?
            }
            None => config_layout(app)?,
        },
    };

    let quantity = match overrides.quantity {
        Some(q) => q,
        None => match app.and_then(|a| a.quantity.as_deref()) {
            Some(raw) => Quantity::parse(raw).map_err(|e| ConfigError::from_enum("app.quantity", e))?,
            None => Quantity::Radius,
        },
    };

    let step_mode = match overrides.step_mode {
        Some(mode) => mode,
        None => match sim.and_then(|s| s.step_mode.as_deref()) {
            Some(raw) => StepMode::parse(raw)
                .map_err(|e| ConfigError::from_enum("simulation.step_mode", e))?,
            None => StepMode::default(),
        },
    };

    let fusion_mode = match overrides.fusion_mode {
        Some(mode) => mode,
        None => match sim.and_then(|s| s.fusion_mode.as_deref()) {
            Some(raw) => FusionMode::parse(raw)
                .map_err(|e| ConfigError::from_enum("simulation.fusion_mode", e))?,
            None => FusionMode::default(),
        },
    };

    let defaults = SimulationParams::default();
    let duration_years = overrides
        .duration_years
        .or_else(|| sim.and_then(|s| s.duration_years))
        .unwrap_or(defaults.duration_years);
    let step_years = overrides
        .step_years
        .or_else(|| sim.and_then(|s| s.step_years))
        .unwrap_or(defaults.step_years);
    positive("simulation.duration_years", duration_years)?;
    positive("simulation.step_years", step_years)?;
    let grid = SimulationParams {
        duration_years,
        step_years,
        ..defaults
    };
    if !grid.fits_step_limit() {
        return Err(ConfigError::invalid(
            "simulation.step_years",
            format!(
                "{step_years} needs {:e} steps over {duration_years} years; at most {MAX_STEPS} are allowed",
                grid.requested_steps()
            ),
        ));
    }

    let initial_defaults = InitialConditions::default();
    let initial = InitialConditions {
        mass_solar: overrides
            .mass_solar
            .or_else(|| init.and_then(|i| i.mass_solar))
            .unwrap_or(initial_defaults.mass_solar),
        radius_solar: overrides
            .radius_solar
            .or_else(|| init.and_then(|i| i.radius_solar))
            .unwrap_or(initial_defaults.radius_solar),
        luminosity_w: overrides
            .luminosity_w
            .or_else(|| init.and_then(|i| i.luminosity_w))
            .unwrap_or(initial_defaults.luminosity_w),
        temperature_k: overrides
            .temperature_k
            .or_else(|| init.and_then(|i| i.temperature_k))
            .unwrap_or(initial_defaults.temperature_k),
    };
    positive("initial.mass_solar", initial.mass_solar)?;
    positive("initial.radius_solar", initial.radius_solar)?;
    finite("initial.luminosity_w", initial.luminosity_w)?;
    finite("initial.temperature_k", initial.temperature_k)?;

    let animation_defaults = AnimationSettings::default();
    let frame_interval = overrides
        .frame_interval_ms
        .or_else(|| anim.and_then(|a| a.frame_interval_ms))
        .map_or(animation_defaults.frame_interval, Duration::from_millis);
    let speed = overrides
        .speed
        .or_else(|| anim.and_then(|a| a.speed))
        .unwrap_or(animation_defaults.speed);
    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(ConfigError::invalid(
            "animation.speed",
            format!("{speed} is outside {MIN_SPEED}..={MAX_SPEED}"),
        ));
    }
    let repeat = !overrides.no_repeat && anim.map_or(animation_defaults.repeat, |a| a.repeat);

    let ui = UiOptions {
        ascii_only: overrides.ascii_only || app.is_some_and(|a| a.ascii_only),
        high_contrast: overrides.high_contrast || app.is_some_and(|a| a.high_contrast),
        reduced_motion: overrides.reduced_motion || app.is_some_and(|a| a.reduced_motion),
    };

    Ok(Settings {
        simulation: SimulationParams {
            initial,
            duration_years,
            step_years,
            step_mode,
            fusion_mode,
        },
        animation: AnimationSettings {
            frame_interval,
            speed,
            repeat,
        },
        ui,
        layout,
        quantity,
    })
}

fn config_layout(app: Option<&AppConfig>) -> Result<Layout, ConfigError> {
    match app.and_then(|a| a.layout.as_deref()) {
        Some(raw) => Layout::parse(raw).map_err(|e| ConfigError::from_enum("app.layout", e)),
        None => Ok(Layout::default()),
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{value} is not a positive finite number"),
        ))
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is not finite")))
    }
}
