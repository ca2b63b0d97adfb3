//! Numerics for Stellar.
//!
//! - **`integrator`**: generic fixed-step fourth-order Runge-Kutta
//! - **`model`**: the toy stellar evolution equations and fusion rate
//! - **`simulation`**: drives the integrator over the time grid into a [`Trajectory`]
//! - **`scaling`**: axis bounds and tick labels for plotting a trajectory
//!
//! [`Trajectory`]: stellar_types::Trajectory

mod integrator;
mod model;
pub mod scaling;
mod simulation;

pub use integrator::{OdeSystem, Phase, rk4_step};
pub use model::{StellarState, ToyModel, derivatives, fusion_rate};
pub use simulation::{SimulationError, simulate};
