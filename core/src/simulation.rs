//! Simulation driver: runs the toy model over the fixed time grid.

use thiserror::Error;
use tracing::{debug, info, warn};

use stellar_types::constants::MAX_STEPS;
use stellar_types::{Sample, SimulationParams, StepMode, Termination, Trajectory};

use crate::integrator::{OdeSystem, Phase, rk4_step};
use crate::model::{StellarState, ToyModel};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("step must be a positive finite number of years, got {0}")]
    InvalidStep(f64),
    #[error("duration must be a positive finite number of years, got {0}")]
    InvalidDuration(f64),
    #[error("initial conditions must be finite")]
    NonFiniteInitial,
    #[error("grid needs {requested:e} steps; at most {max} are allowed (raise the step or shorten the duration)")]
    TooManySteps { requested: f64, max: usize },
}

/// Integrate `params` into a trajectory.
///
/// The first sample is the initial state at `t = 0`. Step `i` integrates from
/// `i * h` to `(i + 1) * h` and records its sample at the end time. The first
/// step that yields a non-finite value ends the run with
/// [`Termination::Diverged`]; the samples recorded so far are kept.
pub fn simulate(params: &SimulationParams) -> Result<Trajectory, SimulationError> {
    let h = params.step_years;
    if !h.is_finite() || h <= 0.0 {
        return Err(SimulationError::InvalidStep(h));
    }
    if !params.duration_years.is_finite() || params.duration_years <= 0.0 {
        return Err(SimulationError::InvalidDuration(params.duration_years));
    }

    if !params.fits_step_limit() {
        return Err(SimulationError::TooManySteps {
            requested: params.requested_steps(),
            max: MAX_STEPS,
        });
    }

    let model = ToyModel::new(params.fusion_mode);
    let initial = StellarState::from_initial(&params.initial);
    let first = initial.to_sample(0.0, params.fusion_mode);
    if !initial.is_finite() || !first.is_finite() {
        return Err(SimulationError::NonFiniteInitial);
    }

    let steps = params.step_count();
    debug!(
        steps,
        step_years = h,
        step_mode = %params.step_mode,
        fusion_mode = %params.fusion_mode,
        "Starting simulation"
    );

    let (samples, termination) = integrate(&model, params, initial, |state, time| {
        state.to_sample(time, params.fusion_mode)
    });

    info!(
        samples = samples.len(),
        diverged = termination.is_diverged(),
        "Simulation finished"
    );
    Ok(Trajectory::new(*params, samples, termination))
}

/// Step `system` across the grid of `params`, recording `record(state, end)`
/// after each step.
///
/// `params` must already be validated: `step_count()` is trusted as is.
fn integrate<S, F>(
    system: &S,
    params: &SimulationParams,
    initial: S::State,
    record: F,
) -> (Vec<Sample>, Termination)
where
    S: OdeSystem,
    F: Fn(&S::State, f64) -> Sample,
{
    let h = params.step_years;
    let steps = params.step_count();
    let mut samples = Vec::with_capacity(steps + 1);
    samples.push(record(&initial, 0.0));
    let mut state = initial;

    for index in 0..steps {
        let t = params.grid_time(index);
        let from = match params.step_mode {
            StepMode::Continuous => state,
            StepMode::FromInitial => initial,
        };
        let next = rk4_step(system, t, from, h);
        let end = t + h;
        let sample = record(&next, end);

        if !next.is_finite() || !sample.is_finite() {
            let step = index + 1;
            warn!(step, time_years = end, "Integration diverged; halting run");
            return (samples, Termination::Diverged { step, time_years: end });
        }

        samples.push(sample);
        state = next;
    }

    (samples, Termination::Completed)
}
