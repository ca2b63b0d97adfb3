//! Axis bounds and tick labels for plotting trajectories.
//!
//! Bounds are computed once over the full trajectory so axes stay fixed while
//! the animated line grows.

use stellar_types::{Quantity, Trajectory};

/// Headroom applied to the data extremes.
pub const MARGIN: f64 = 1.1;

/// `[0, max(duration, grid end)]`, where the grid end is `step_count * h`.
///
/// The grid end exceeds the duration when the duration is not a whole number
/// of steps. A diverged run gets the same axis as a completed one.
#[must_use]
pub fn time_bounds(trajectory: &Trajectory) -> [f64; 2] {
    let params = trajectory.params();
    let grid_end = params.step_count() as f64 * params.step_years;
    let hi = params.duration_years.max(grid_end);
    if hi > 0.0 && hi.is_finite() {
        [0.0, hi]
    } else {
        [0.0, 1.0]
    }
}

/// Value bounds that always include zero, widened by [`MARGIN`].
///
/// Non-finite values are ignored. All-zero (or empty) input yields `[0, 1]`.
#[must_use]
pub fn value_bounds(values: impl IntoIterator<Item = f64>) -> [f64; 2] {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let lo = clamp_finite(lo * MARGIN);
    let hi = clamp_finite(hi * MARGIN);
    if lo == hi { [0.0, 1.0] } else { [lo, hi] }
}

#[must_use]
pub fn quantity_bounds(trajectory: &Trajectory, quantity: Quantity) -> [f64; 2] {
    value_bounds(trajectory.samples().iter().map(|s| s.value(quantity)))
}

fn clamp_finite(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else if v > 0.0 {
        f64::MAX
    } else {
        f64::MIN
    }
}

/// Compact tick label: plain notation in `[1e-3, 1e4)`, scientific otherwise.
#[must_use]
pub fn format_tick(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    if (1e-3..1e4).contains(&magnitude) {
        return trim_fraction(&format!("{value:.3}")).to_string();
    }

    let formatted = format!("{value:.2e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
        None => formatted,
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// Labels for the low end, midpoint and high end of `bounds`.
#[must_use]
pub fn tick_labels(bounds: [f64; 2]) -> [String; 3] {
    let [lo, hi] = bounds;
    let mid = lo + (hi - lo) / 2.0;
    [format_tick(lo), format_tick(mid), format_tick(hi)]
}

#[cfg(test)]
mod tests {
    use stellar_types::{Sample, SimulationParams, Termination, Trajectory};

    use super::{format_tick, tick_labels, time_bounds, value_bounds};

    #[test]
    fn positive_data_starts_at_zero_with_margin() {
        let [lo, hi] = value_bounds([1.0, 2.0, 10.0]);
        assert_eq!(lo, 0.0);
        assert!((hi - 11.0).abs() < 1e-12);
    }

    #[test]
    fn negative_data_extends_below_zero() {
        let [lo, hi] = value_bounds([-5.0, 2.0]);
        assert!((lo + 5.5).abs() < 1e-12);
        assert!((hi - 2.2).abs() < 1e-12);
    }

    #[test]
    fn degenerate_data_falls_back_to_unit_range() {
        assert_eq!(value_bounds([0.0, 0.0]), [0.0, 1.0]);
        assert_eq!(value_bounds(std::iter::empty()), [0.0, 1.0]);
        assert_eq!(value_bounds([f64::NAN]), [0.0, 1.0]);
    }

    #[test]
    fn huge_values_stay_finite() {
        let [_, hi] = value_bounds([f64::MAX]);
        assert_eq!(hi, f64::MAX);
    }

    fn sample_at(time_years: f64) -> Sample {
        Sample {
            time_years,
            radius_solar: 1.0,
            mass_solar: 1.0,
            luminosity_w: 1.0,
            temperature_k: 1.0,
            fusion_rate: 0.0,
        }
    }

    #[test]
    fn time_bounds_extend_to_the_last_grid_point() {
        let params = SimulationParams {
            duration_years: 10.5,
            step_years: 1.0,
            ..SimulationParams::default()
        };
        assert_eq!(params.step_count(), 11);
        let trajectory = Trajectory::new(params, vec![sample_at(11.0)], Termination::Completed);
        assert_eq!(time_bounds(&trajectory), [0.0, 11.0]);

        let diverged = Trajectory::new(
            params,
            vec![sample_at(0.0), sample_at(1.0)],
            Termination::Diverged {
                step: 2,
                time_years: 2.0,
            },
        );
        assert_eq!(time_bounds(&diverged), [0.0, 11.0]);
    }

    #[test]
    fn time_bounds_match_duration_on_whole_grids() {
        let params = SimulationParams::default();
        let trajectory = Trajectory::new(params, vec![sample_at(0.0)], Termination::Completed);
        assert_eq!(time_bounds(&trajectory), [0.0, 1e7]);
    }

    #[test]
    fn format_tick_plain_range() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(5778.0), "5778");
        assert_eq!(format_tick(1.1), "1.1");
        assert_eq!(format_tick(0.001), "0.001");
    }

    #[test]
    fn format_tick_scientific_range() {
        assert_eq!(format_tick(4.2108e26), "4.21e26");
        assert_eq!(format_tick(-7.07e21), "-7.07e21");
        assert_eq!(format_tick(1e4), "1e4");
        assert_eq!(format_tick(0.0001), "1e-4");
    }

    #[test]
    fn tick_labels_include_midpoint() {
        assert_eq!(tick_labels([0.0, 10.0]), ["0", "5", "10"]);
    }
}
