//! Trajectory export to JSON or CSV.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use stellar_types::Trajectory;

use crate::atomic_write::{FileSyncPolicy, atomic_write};

const CSV_HEADER: &str = "time_years,radius_solar,mass_solar,luminosity_w,temperature_k,fusion_rate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    /// Infer from the file extension; anything but `.csv` is JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Json,
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!("unknown export format '{other}'; expected json or csv")),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to serialize trajectory: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Render the trajectory in `format`.
///
/// JSON carries parameters, termination and samples; CSV carries samples only.
pub fn render(trajectory: &Trajectory, format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Json => {
            let mut out = serde_json::to_string_pretty(trajectory)?;
            out.push('\n');
            Ok(out)
        }
        ExportFormat::Csv => Ok(render_csv(trajectory)),
    }
}

fn render_csv(trajectory: &Trajectory) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + trajectory.len() * 96);
    out.push_str(CSV_HEADER);
    out.push('\n');
    for s in trajectory.samples() {
        let _ = writeln!(
            out,
            "{:e},{:e},{:e},{:e},{:e},{:e}",
            s.time_years,
            s.radius_solar,
            s.mass_solar,
            s.luminosity_w,
            s.temperature_k,
            s.fusion_rate
        );
    }
    out
}

/// Write the trajectory to `path` atomically.
pub fn export_trajectory(
    trajectory: &Trajectory,
    path: &Path,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let body = render(trajectory, format)?;
    atomic_write(path, body.as_bytes(), FileSyncPolicy::SyncAll).map_err(|source| {
        ExportError::Write {
            path: path.to_path_buf(),
            source,
        }
    })?;
    tracing::info!(
        path = %path.display(),
        format = format.as_str(),
        samples = trajectory.len(),
        "Exported trajectory"
    );
    Ok(())
}
