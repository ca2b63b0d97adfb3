//! The recorded quantities of a stellar trajectory.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EnumKind, EnumParseError, normalize_token};

/// One plotted/exported series of a trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Radius,
    Mass,
    Luminosity,
    Temperature,
    FusionRate,
}

const QUANTITY_PARSE_VALUES: &[&str] = &[
    "radius",
    "mass",
    "luminosity",
    "temperature",
    "fusion-rate",
];

impl Quantity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Quantity::Radius => "radius",
            Quantity::Mass => "mass",
            Quantity::Luminosity => "luminosity",
            Quantity::Temperature => "temperature",
            Quantity::FusionRate => "fusion_rate",
        }
    }

    /// Axis title, unit included.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Quantity::Radius => "Stellar Radius (solar radii)",
            Quantity::Mass => "Stellar Mass (solar masses)",
            Quantity::Luminosity => "Stellar Luminosity (W)",
            Quantity::Temperature => "Stellar Temperature (K)",
            Quantity::FusionRate => "Fusion Rate (arb.)",
        }
    }

    #[must_use]
    pub const fn short_label(self) -> &'static str {
        match self {
            Quantity::Radius => "Radius",
            Quantity::Mass => "Mass",
            Quantity::Luminosity => "Luminosity",
            Quantity::Temperature => "Temperature",
            Quantity::FusionRate => "Fusion rate",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Quantity] {
        &[
            Quantity::Radius,
            Quantity::Mass,
            Quantity::Luminosity,
            Quantity::Temperature,
            Quantity::FusionRate,
        ]
    }

    /// The four panels of the grid layout, in reading order.
    #[must_use]
    pub const fn grid() -> [Quantity; 4] {
        [
            Quantity::Radius,
            Quantity::Mass,
            Quantity::Luminosity,
            Quantity::Temperature,
        ]
    }

    /// Next quantity in [`Quantity::all`] order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|q| *q == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub fn parse(s: &str) -> Result<Self, EnumParseError> {
        match normalize_token(s).as_str() {
            "radius" | "r" => Ok(Quantity::Radius),
            "mass" | "m" => Ok(Quantity::Mass),
            "luminosity" | "l" => Ok(Quantity::Luminosity),
            "temperature" | "temp" | "t" => Ok(Quantity::Temperature),
            "fusion-rate" | "fusion" => Ok(Quantity::FusionRate),
            _ => Err(EnumParseError::new(
                EnumKind::Quantity,
                s.trim(),
                QUANTITY_PARSE_VALUES,
            )),
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Quantity;

    #[test]
    fn next_cycles_through_every_quantity() {
        let mut q = Quantity::Radius;
        let mut seen = vec![q];
        for _ in 0..Quantity::all().len() - 1 {
            q = q.next();
            seen.push(q);
        }
        assert_eq!(seen, Quantity::all());
        assert_eq!(q.next(), Quantity::Radius);
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(Quantity::parse("Fusion_Rate").unwrap(), Quantity::FusionRate);
        assert_eq!(Quantity::parse(" temp ").unwrap(), Quantity::Temperature);
        assert!(Quantity::parse("density").is_err());
    }

    #[test]
    fn grid_excludes_fusion_rate() {
        assert!(!Quantity::grid().contains(&Quantity::FusionRate));
    }
}
