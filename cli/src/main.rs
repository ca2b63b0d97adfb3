//! Stellar CLI - Binary entry point and terminal session management.
//!
//! # Architecture
//!
//! The CLI resolves settings, runs the simulation through [`stellar_engine`] and
//! hands the result to [`stellar_tui`] for rendering, with RAII-based terminal
//! management that guarantees cleanup.
//!
//! ```text
//! main() -> resolve() -> App::from_settings() -> export? -> headless summary
//!                                                        \-> TerminalSession -> run_app()
//! ```
//!
//! # Event Loop
//!
//! The viewer renders on a fixed 16ms cadence:
//!
//! 1. Wait for frame tick
//! 2. Drain input queue (non-blocking via [`stellar_tui::InputPump`])
//! 3. Advance playback by elapsed wall time (`app.tick()`)
//! 4. Render frame

mod summary;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::{
    fs::{self, OpenOptions},
    io::{Stdout, stdout},
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use stellar_config::{Overrides, StellarConfig, resolve};
use stellar_engine::App;
use stellar_tui::{InputPump, draw, handle_events};
use stellar_types::ui::Layout as ChartLayout;
use stellar_types::{FusionMode, Quantity, StepMode};
use stellar_utils::{ExportFormat, export_trajectory};

#[derive(Parser, Debug)]
#[command(name = "stellar")]
#[command(about = "Integrate a toy stellar evolution model and animate the result", version)]
struct Cli {
    /// Config file (default: ~/.stellar/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chart layout: grid or single
    #[arg(long, value_parser = ChartLayout::parse)]
    layout: Option<ChartLayout>,

    /// Quantity shown by the single layout
    #[arg(long, value_parser = Quantity::parse)]
    quantity: Option<Quantity>,

    /// continuous or from-initial
    #[arg(long, value_parser = StepMode::parse)]
    step_mode: Option<StepMode>,

    /// instantaneous or accumulated
    #[arg(long = "fusion", value_parser = FusionMode::parse)]
    fusion_mode: Option<FusionMode>,

    /// Simulated time span in years
    #[arg(long = "duration")]
    duration_years: Option<f64>,

    /// Integration step in years
    #[arg(long = "step")]
    step_years: Option<f64>,

    /// Initial mass in solar masses
    #[arg(long = "mass")]
    mass_solar: Option<f64>,

    /// Initial radius in solar radii
    #[arg(long = "radius")]
    radius_solar: Option<f64>,

    /// Initial luminosity in watts
    #[arg(long = "luminosity")]
    luminosity_w: Option<f64>,

    /// Initial temperature in kelvin
    #[arg(long = "temperature")]
    temperature_k: Option<f64>,

    /// Wall time per animation frame at 1x speed
    #[arg(long)]
    frame_interval_ms: Option<u64>,

    /// Initial playback speed multiplier
    #[arg(long)]
    speed: Option<f64>,

    /// Stop on the last frame instead of looping
    #[arg(long)]
    no_repeat: bool,

    /// Write the trajectory to this file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Export format: json or csv (default: from the file extension)
    #[arg(long, value_parser = ExportFormat::parse, requires = "export")]
    format: Option<ExportFormat>,

    /// Print a summary instead of starting the viewer
    #[arg(long)]
    headless: bool,

    #[arg(long)]
    ascii: bool,

    #[arg(long)]
    high_contrast: bool,

    /// Start on the final frame, paused
    #[arg(long)]
    reduced_motion: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            layout: self.layout,
            quantity: self.quantity,
            step_mode: self.step_mode,
            fusion_mode: self.fusion_mode,
            duration_years: self.duration_years,
            step_years: self.step_years,
            mass_solar: self.mass_solar,
            radius_solar: self.radius_solar,
            luminosity_w: self.luminosity_w,
            temperature_k: self.temperature_k,
            frame_interval_ms: self.frame_interval_ms,
            speed: self.speed,
            ascii_only: self.ascii,
            high_contrast: self.high_contrast,
            reduced_motion: self.reduced_motion,
            no_repeat: self.no_repeat,
        }
    }

    fn load_config(&self) -> Result<Option<StellarConfig>> {
        match &self.config {
            Some(path) => StellarConfig::load_from(path)
                .map(Some)
                .with_context(|| format!("loading config {}", path.display())),
            None => StellarConfig::load().context("loading config"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogTarget {
    File,
    Stderr,
}

fn init_tracing(target: LogTarget) {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    if target == LogTarget::Stderr {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
        return;
    }

    let (log_file, init_warnings) = open_stellar_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // No log file: stay silent rather than draw over the TUI.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_stellar_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in stellar_log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn stellar_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.stellar/logs/stellar.log
    if let Some(config_path) = StellarConfig::path()
        && let Some(config_dir) = config_path.parent()
    {
        candidates.push(config_dir.join("logs").join("stellar.log"));
    }

    // Fallback: ./.stellar/logs/stellar.log
    candidates.push(PathBuf::from(".stellar").join("logs").join("stellar.log"));

    candidates
}

/// RAII wrapper for terminal state with guaranteed cleanup on drop.
///
/// Enables raw mode and the alternate screen. On drop both are restored, so
/// the terminal stays usable after panics or early returns.
struct TerminalSession {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self> {
        enable_raw_mode()?;

        let mut out = stdout();
        if let Err(err) = execute!(out, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }

        let terminal = match Terminal::new(CrosstermBackend::new(out)) {
            Ok(t) => t,
            Err(err) => {
                let _ = disable_raw_mode();
                let _ = execute!(stdout(), LeaveAlternateScreen);
                return Err(err.into());
            }
        };

        Ok(Self { terminal })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.headless {
        LogTarget::Stderr
    } else {
        LogTarget::File
    });

    let config = cli.load_config()?;
    let settings = resolve(config.as_ref(), &cli.overrides())?;
    let mut app = App::from_settings(&settings)?;

    if let Some(path) = &cli.export {
        let format = cli.format.unwrap_or_else(|| ExportFormat::from_path(path));
        export_trajectory(app.trajectory(), path, format)?;
    }

    if cli.headless {
        print!("{}", summary::render_summary(app.trajectory()));
        return Ok(());
    }

    let result = {
        let mut session = TerminalSession::new()?;
        run_app(&mut session.terminal, &mut app).await
    };

    if let Err(err) = &result {
        tracing::error!("Viewer exited with error: {err:?}");
    }
    result
}

const FRAME_DURATION: Duration = Duration::from_millis(16);

async fn run_app<B>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let mut input = InputPump::new();
    let mut frames = tokio::time::interval(FRAME_DURATION);
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let result: Result<()> = loop {
        frames.tick().await;

        // Non-blocking input (drain queue only)
        let quit_now = match handle_events(app, &mut input) {
            Ok(q) => q,
            Err(e) => break Err(e),
        };
        if quit_now {
            break Ok(());
        }

        app.tick();

        if let Err(e) = terminal.draw(|frame| draw(frame, app)) {
            break Err(e.into());
        }
    };

    input.shutdown().await;
    result
}
