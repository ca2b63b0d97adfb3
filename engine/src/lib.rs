//! Core engine for Stellar - viewer state machine.
//!
//! This crate owns the simulated trajectory and everything the viewer needs to
//! animate it, without TUI dependencies. The TUI reads state through [`App`]
//! accessors and feeds user input back as [`Command`]s.

mod commands;
mod playback;

pub use commands::{Command, CommandSpec, command_specs};
pub use playback::Playback;
pub use stellar_config::Settings;
pub use stellar_types::ui::{Layout, UiOptions};
pub use stellar_types::{Quantity, Termination, Trajectory};

use std::time::{Duration, Instant};

use stellar_core::{SimulationError, scaling, simulate};

/// Axis bounds computed once over the full trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub time: [f64; 2],
    values: [[f64; 2]; 5],
}

impl ChartBounds {
    #[must_use]
    pub fn new(trajectory: &Trajectory) -> Self {
        let mut values = [[0.0, 1.0]; 5];
        for (slot, quantity) in values.iter_mut().zip(Quantity::all()) {
            *slot = scaling::quantity_bounds(trajectory, *quantity);
        }
        Self {
            time: scaling::time_bounds(trajectory),
            values,
        }
    }

    #[must_use]
    pub fn value(&self, quantity: Quantity) -> [f64; 2] {
        let idx = Quantity::all()
            .iter()
            .position(|q| *q == quantity)
            .unwrap_or(0);
        self.values[idx]
    }
}

pub struct App {
    trajectory: Trajectory,
    bounds: ChartBounds,
    playback: Playback,
    layout: Layout,
    quantity: Quantity,
    ui_options: UiOptions,
    show_help: bool,
    should_quit: bool,
    last_frame: Instant,
}

impl App {
    /// Run the simulation described by `settings` and wrap the result.
    pub fn from_settings(settings: &Settings) -> Result<Self, SimulationError> {
        let trajectory = simulate(&settings.simulation)?;
        Ok(Self::new(trajectory, settings))
    }

    #[must_use]
    pub fn new(trajectory: Trajectory, settings: &Settings) -> Self {
        let mut playback = Playback::new(trajectory.len(), settings.animation);
        if settings.ui.reduced_motion {
            playback.show_final();
        }
        if let Termination::Diverged { step, time_years } = trajectory.termination() {
            tracing::warn!(
                step,
                time_years,
                samples = trajectory.len(),
                "Showing truncated trajectory"
            );
        }

        Self {
            bounds: ChartBounds::new(&trajectory),
            trajectory,
            playback,
            layout: settings.layout,
            quantity: settings.quantity,
            ui_options: settings.ui,
            show_help: false,
            should_quit: false,
            last_frame: Instant::now(),
        }
    }

    #[must_use]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    #[must_use]
    pub fn bounds(&self) -> &ChartBounds {
        &self.bounds
    }

    #[must_use]
    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Quantity shown by the single layout.
    #[must_use]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// Quantities on screen for the current layout, in panel order.
    #[must_use]
    pub fn panels(&self) -> Vec<Quantity> {
        match self.layout {
            Layout::Grid => Quantity::grid().to_vec(),
            Layout::Single => vec![self.quantity],
        }
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.ui_options
    }

    #[must_use]
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Points revealed by the current frame.
    #[must_use]
    pub fn visible_series(&self, quantity: Quantity) -> Vec<(f64, f64)> {
        self.trajectory
            .series_prefix(quantity, self.playback.visible())
    }

    /// Time of the newest visible sample, if any.
    #[must_use]
    pub fn current_time(&self) -> Option<f64> {
        let visible = self.playback.visible();
        visible
            .checked_sub(1)
            .and_then(|idx| self.trajectory.samples().get(idx))
            .map(|s| s.time_years)
    }

    /// Advance playback by wall time elapsed since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(elapsed);
    }

    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.playback.advance(elapsed)
    }

    pub fn apply(&mut self, command: Command) {
        tracing::debug!(?command, "Applying command");
        match command {
            Command::TogglePause => self.playback.toggle_pause(),
            Command::Restart => self.playback.restart(),
            Command::StepForward => self.playback.step_forward(),
            Command::StepBack => self.playback.step_back(),
            Command::Faster => self.playback.faster(),
            Command::Slower => self.playback.slower(),
            Command::ToggleLayout => self.layout = self.layout.toggle(),
            Command::CycleQuantity => {
                if self.layout == Layout::Single {
                    self.quantity = self.quantity.next();
                }
            }
            Command::ToggleHelp => self.show_help = !self.show_help,
            Command::Quit => self.should_quit = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use stellar_config::{Overrides, resolve_with_env};
    use stellar_types::{Quantity, SimulationParams};

    use super::{App, Command, Layout, Settings};

    fn stable_settings() -> Settings {
        let step = 2.0_f64.powi(-66);
        let overrides = Overrides {
            step_years: Some(step),
            duration_years: Some(10.0 * step),
            frame_interval_ms: Some(10),
            ..Overrides::default()
        };
        resolve_with_env(None, &overrides, None).unwrap()
    }

    #[test]
    fn from_settings_runs_the_simulation() {
        let app = App::from_settings(&stable_settings()).unwrap();
        assert_eq!(app.trajectory().len(), 11);
        assert_eq!(app.playback().last_frame(), 11);
        assert_eq!(app.layout(), Layout::Grid);
        assert_eq!(app.panels(), Quantity::grid().to_vec());
    }

    #[test]
    fn visible_series_grows_with_playback() {
        let mut app = App::from_settings(&stable_settings()).unwrap();
        assert!(app.visible_series(Quantity::Radius).is_empty());
        assert_eq!(app.current_time(), None);

        app.advance(Duration::from_millis(30));
        assert_eq!(app.visible_series(Quantity::Mass).len(), 3);
        let expected = app.trajectory().samples()[2].time_years;
        assert_eq!(app.current_time(), Some(expected));
    }

    #[test]
    fn reduced_motion_starts_complete_and_paused() {
        let mut settings = stable_settings();
        settings.ui.reduced_motion = true;
        let app = App::from_settings(&settings).unwrap();
        assert!(app.playback().is_paused());
        assert_eq!(app.visible_series(Quantity::Temperature).len(), 11);
    }

    #[test]
    fn cycle_quantity_only_applies_to_single_layout() {
        let mut app = App::from_settings(&stable_settings()).unwrap();
        app.apply(Command::CycleQuantity);
        assert_eq!(app.quantity(), Quantity::Radius);

        app.apply(Command::ToggleLayout);
        assert_eq!(app.layout(), Layout::Single);
        app.apply(Command::CycleQuantity);
        assert_eq!(app.quantity(), Quantity::Mass);
        assert_eq!(app.panels(), vec![Quantity::Mass]);
    }

    #[test]
    fn quit_and_help_flags() {
        let mut app = App::from_settings(&stable_settings()).unwrap();
        app.apply(Command::ToggleHelp);
        assert!(app.show_help());
        app.apply(Command::Quit);
        assert!(app.should_quit());
    }

    #[test]
    fn diverged_run_keeps_bounds_usable() {
        let settings = Settings {
            simulation: SimulationParams::default(),
            ..stable_settings()
        };
        let app = App::from_settings(&settings).unwrap();
        assert!(app.trajectory().termination().is_diverged());
        let [lo, hi] = app.bounds().value(Quantity::Luminosity);
        assert!(lo < hi);
        assert_eq!(app.bounds().time, [0.0, 1e7]);
    }
}
