//! Core domain types for Stellar.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application: the numerics in
//! `stellar-core`, the config resolver, the viewer engine and the exporters.

#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

pub mod constants;
mod params;
mod quantity;
mod trajectory;
pub mod ui;

pub use params::{FusionMode, InitialConditions, SimulationParams, StepMode};
pub use quantity::Quantity;
pub use trajectory::{QuantitySummary, Sample, Termination, Trajectory};

use std::fmt;

use thiserror::Error;

// ============================================================================
// Enum parsing
// ============================================================================

/// Which user-facing enum failed to parse. Used to build readable errors for
/// config values, environment variables and command line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumKind {
    Quantity,
    Layout,
    StepMode,
    FusionMode,
}

impl EnumKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EnumKind::Quantity => "quantity",
            EnumKind::Layout => "layout",
            EnumKind::StepMode => "step mode",
            EnumKind::FusionMode => "fusion mode",
        }
    }
}

impl fmt::Display for EnumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value '{raw}'; expected one of: {expected:?}")]
pub struct EnumParseError {
    kind: EnumKind,
    raw: String,
    expected: &'static [&'static str],
}

impl EnumParseError {
    #[must_use]
    pub fn new(kind: EnumKind, raw: impl Into<String>, expected: &'static [&'static str]) -> Self {
        Self {
            kind,
            raw: raw.into(),
            expected,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> EnumKind {
        self.kind
    }

    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn expected(&self) -> &'static [&'static str] {
        self.expected
    }
}

/// Normalize a user-supplied enum token: trim, lowercase, and treat `_` as `-`.
pub(crate) fn normalize_token(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace('_', "-")
}
