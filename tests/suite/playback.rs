//! Viewer state driven by commands and elapsed time.

use std::time::Duration;

use stellar_config::Overrides;
use stellar_engine::{App, Command, Quantity};

use crate::common::{settings, stable_overrides};

fn app(overrides: &Overrides) -> App {
    App::from_settings(&settings(None, overrides)).expect("simulate")
}

#[test]
fn animation_reveals_samples_then_loops() {
    let mut app = app(&stable_overrides(4));
    assert_eq!(app.playback().last_frame(), 5);

    app.advance(Duration::from_millis(50));
    assert_eq!(app.visible_series(Quantity::Radius).len(), 5);

    app.advance(Duration::from_millis(10));
    assert_eq!(app.playback().frame(), 0);
}

#[test]
fn no_repeat_holds_the_final_frame() {
    let overrides = Overrides {
        no_repeat: true,
        ..stable_overrides(4)
    };
    let mut app = app(&overrides);
    app.advance(Duration::from_secs(1));
    assert!(app.playback().is_finished());
    assert_eq!(app.visible_series(Quantity::Temperature).len(), 5);

    app.apply(Command::TogglePause);
    assert_eq!(app.playback().frame(), 0);
}

#[test]
fn speed_scales_elapsed_time() {
    let mut app = app(&stable_overrides(100));
    app.apply(Command::Faster);
    app.apply(Command::Faster);
    app.advance(Duration::from_millis(10));
    assert_eq!(app.playback().frame(), 4);

    app.apply(Command::Slower);
    app.advance(Duration::from_millis(10));
    assert_eq!(app.playback().frame(), 6);
}

#[test]
fn stepping_pauses_playback() {
    let mut app = app(&stable_overrides(10));
    app.apply(Command::StepForward);
    app.apply(Command::StepForward);
    assert!(app.playback().is_paused());
    app.advance(Duration::from_secs(1));
    assert_eq!(app.playback().frame(), 2);

    app.apply(Command::Restart);
    assert!(!app.playback().is_paused());
    assert_eq!(app.playback().frame(), 0);
}

#[test]
fn reduced_motion_shows_whole_run() {
    let overrides = Overrides {
        reduced_motion: true,
        ..stable_overrides(6)
    };
    let app = app(&overrides);
    assert!(app.playback().is_paused());
    assert_eq!(app.visible_series(Quantity::FusionRate).len(), 7);
    let last_time = app.trajectory().last().map(|s| s.time_years);
    assert_eq!(app.current_time(), last_time);
}
