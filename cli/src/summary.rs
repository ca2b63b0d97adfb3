//! Plain-text run summary for `--headless`.

use std::fmt::Write as _;

use stellar_core::scaling::format_tick;
use stellar_engine::{Quantity, Trajectory};

pub fn render_summary(trajectory: &Trajectory) -> String {
    let params = trajectory.params();
    let mut out = String::new();
    let _ = writeln!(out, "Stellar Evolution");
    let _ = writeln!(
        out,
        "step {} yr, duration {} yr, {} steps, {}, {} fusion",
        format_tick(params.step_years),
        format_tick(params.duration_years),
        params.step_count(),
        params.step_mode,
        params.fusion_mode,
    );
    let _ = writeln!(
        out,
        "status: {} ({} samples)",
        trajectory.termination().describe(),
        trajectory.len()
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<12} {:>12} {:>12} {:>12}", "quantity", "min", "max", "final");

    for quantity in Quantity::all() {
        let Some(summary) = trajectory.summary(*quantity) else {
            continue;
        };
        let _ = writeln!(
            out,
            "{:<12} {:>12} {:>12} {:>12}",
            quantity.short_label(),
            format_tick(summary.min),
            format_tick(summary.max),
            format_tick(summary.last),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use stellar_engine::Trajectory;
    use stellar_types::{Sample, SimulationParams, Termination};

    use super::render_summary;

    #[test]
    fn summary_lists_every_quantity() {
        let samples = vec![
            Sample {
                time_years: 0.0,
                radius_solar: 1.0,
                mass_solar: 10.0,
                luminosity_w: 3.828e26,
                temperature_k: 5778.0,
                fusion_rate: 0.0,
            },
            Sample {
                time_years: 1e4,
                radius_solar: 2.0,
                mass_solar: 9.0,
                luminosity_w: 4e26,
                temperature_k: 5000.0,
                fusion_rate: 0.5,
            },
        ];
        let trajectory = Trajectory::new(
            SimulationParams::default(),
            samples,
            Termination::Completed,
        );
        let text = render_summary(&trajectory);
        assert!(text.starts_with("Stellar Evolution\n"));
        assert!(text.contains("status: Completed (2 samples)"));
        assert!(text.contains("1000 steps"));
        assert_eq!(text.lines().count(), 5 + 5);
    }

    #[test]
    fn empty_trajectory_has_header_only() {
        let trajectory =
            Trajectory::new(SimulationParams::default(), Vec::new(), Termination::Completed);
        let text = render_summary(&trajectory);
        assert_eq!(text.lines().count(), 5);
    }
}
