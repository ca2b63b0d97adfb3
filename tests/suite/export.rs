//! Exported trajectories on disk.

use std::fs;

use stellar_core::simulate;
use stellar_types::Trajectory;
use stellar_utils::{ExportFormat, export_trajectory};
use tempfile::tempdir;

use crate::common::{settings, stable_overrides};

fn run(steps: u32) -> Trajectory {
    let settings = settings(None, &stable_overrides(steps));
    simulate(&settings.simulation).expect("simulate")
}

#[test]
fn json_export_reads_back() {
    let trajectory = run(12);
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("run.json");

    export_trajectory(&trajectory, &path, ExportFormat::Json).expect("export");

    let content = fs::read_to_string(&path).expect("read");
    let restored: Trajectory = serde_json::from_str(&content).expect("parse");
    assert_eq!(restored.len(), trajectory.len());
    assert_eq!(restored.termination(), trajectory.termination());
    assert_eq!(restored.params().step_mode, trajectory.params().step_mode);
    for (a, b) in restored.samples().iter().zip(trajectory.samples()) {
        let scale = b.luminosity_w.abs().max(f64::MIN_POSITIVE);
        assert!((a.luminosity_w - b.luminosity_w).abs() / scale < 1e-12);
    }
}

#[test]
fn csv_export_has_one_row_per_sample() {
    let trajectory = run(7);
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("run.csv");

    export_trajectory(&trajectory, &path, ExportFormat::from_path(&path)).expect("export");

    let content = fs::read_to_string(&path).expect("read");
    let mut lines = content.lines();
    let header = lines.next().expect("header");
    assert_eq!(header.split(',').count(), 6);
    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), trajectory.len());
    let first_time: f64 = rows[0].split(',').next().unwrap().parse().unwrap();
    assert_eq!(first_time, 0.0);
}

#[test]
fn export_overwrites_previous_file() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("run.csv");
    fs::write(&path, "stale").expect("seed");

    export_trajectory(&run(3), &path, ExportFormat::Csv).expect("export");

    let content = fs::read_to_string(&path).expect("read");
    assert!(content.starts_with("time_years,"));
    assert!(!path.with_extension("bak").exists());
}

#[test]
fn export_leaves_an_unrelated_bak_file_untouched() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("results.json");
    let user_bak = dir.path().join("results.bak");
    fs::write(&user_bak, "my notes").expect("seed");

    export_trajectory(&run(3), &path, ExportFormat::from_path(&path)).expect("export");
    export_trajectory(&run(4), &path, ExportFormat::Json).expect("re-export");

    assert_eq!(fs::read_to_string(&user_bak).expect("read bak"), "my notes");
    let restored: Trajectory =
        serde_json::from_str(&fs::read_to_string(&path).expect("read")).expect("parse");
    assert_eq!(restored.len(), 5);
}
