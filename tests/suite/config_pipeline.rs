//! Config file through to a simulated trajectory.

use stellar_config::{ConfigError, Overrides, StellarConfig, resolve_with_env};
use stellar_engine::App;
use stellar_types::ui::Layout;
use stellar_types::{FusionMode, Quantity, StepMode, Termination};
use tempfile::tempdir;

use crate::common::{STABLE_STEP_YEARS, load_config, settings, stable_overrides};

#[test]
fn config_file_drives_the_run() {
    let dir = tempdir().expect("tempdir");
    let duration = 40.0 * STABLE_STEP_YEARS;
    let (_, config) = load_config(
        dir.path(),
        &format!(
            "[app]\nlayout = \"single\"\nquantity = \"luminosity\"\n\n\
             [simulation]\nstep_years = {STABLE_STEP_YEARS:e}\nduration_years = {duration:e}\n\
             fusion_mode = \"accumulated\"\n"
        ),
    );

    let settings = settings(Some(&config), &Overrides::default());
    assert_eq!(settings.layout, Layout::Single);
    assert_eq!(settings.quantity, Quantity::Luminosity);
    assert_eq!(settings.simulation.fusion_mode, FusionMode::Accumulated);
    assert_eq!(settings.simulation.step_count(), 40);

    let app = App::from_settings(&settings).expect("simulate");
    assert_eq!(app.trajectory().termination(), Termination::Completed);
    assert_eq!(app.trajectory().len(), 41);
    assert_eq!(app.panels(), vec![Quantity::Luminosity]);
}

#[test]
fn command_line_overrides_win_over_file() {
    let dir = tempdir().expect("tempdir");
    let (_, config) = load_config(
        dir.path(),
        "[simulation]\nstep_mode = \"continuous\"\nstep_years = 5.0\n",
    );
    let overrides = Overrides {
        step_mode: Some(StepMode::FromInitial),
        ..stable_overrides(10)
    };

    let settings = settings(Some(&config), &overrides);
    assert_eq!(settings.simulation.step_mode, StepMode::FromInitial);
    assert_eq!(settings.simulation.step_years, STABLE_STEP_YEARS);
}

#[test]
fn empty_config_file_uses_defaults() {
    let dir = tempdir().expect("tempdir");
    let (_, config) = load_config(dir.path(), "");
    let settings = settings(Some(&config), &Overrides::default());
    assert_eq!(settings.simulation.step_count(), 1000);
    assert_eq!(settings.layout, Layout::Grid);
}

#[test]
fn malformed_config_reports_its_path() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[simulation\nstep_years = 1").expect("write");

    let err = StellarConfig::load_from(&path).expect_err("parse must fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert_eq!(err.path(), Some(path.as_path()));
}

#[test]
fn invalid_step_is_rejected_before_simulating() {
    let dir = tempdir().expect("tempdir");
    let (_, config) = load_config(dir.path(), "[simulation]\nstep_years = -1.0\n");
    let err = resolve_with_env(Some(&config), &Overrides::default(), None)
        .expect_err("negative step");
    assert!(matches!(
        err,
        ConfigError::Invalid {
            field: "simulation.step_years",
            ..
        }
    ));
}

#[test]
fn default_parameters_diverge_but_still_produce_a_viewer() {
    let settings = settings(None, &Overrides::default());
    let app = App::from_settings(&settings).expect("divergence is not an error");
    match app.trajectory().termination() {
        Termination::Diverged { step, time_years } => {
            assert_eq!(step, 1);
            assert_eq!(time_years, settings.simulation.step_years);
        }
        Termination::Completed => panic!("default toy model should overflow"),
    }
    assert_eq!(app.trajectory().len(), 1);
}
