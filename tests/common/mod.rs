//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use stellar_config::{Overrides, Settings, StellarConfig, resolve_with_env};

/// Step on an exact binary grid, small enough that the toy model stays finite.
pub const STABLE_STEP_YEARS: f64 = 1.0 / 73_786_976_294_838_206_464.0; // 2^-66

/// Overrides for a finite run of `steps` steps.
pub fn stable_overrides(steps: u32) -> Overrides {
    Overrides {
        step_years: Some(STABLE_STEP_YEARS),
        duration_years: Some(f64::from(steps) * STABLE_STEP_YEARS),
        frame_interval_ms: Some(10),
        ..Overrides::default()
    }
}

/// Resolve settings without consulting the process environment.
pub fn settings(config: Option<&StellarConfig>, overrides: &Overrides) -> Settings {
    resolve_with_env(config, overrides, None).expect("settings resolve")
}

/// Write `content` as a config file inside `dir` and load it.
pub fn load_config(dir: &Path, content: &str) -> (PathBuf, StellarConfig) {
    let path = dir.join("config.toml");
    fs::write(&path, content).expect("write config");
    let config = StellarConfig::load_from(&path).expect("load config");
    (path, config)
}
