//! Box-constrained limited-memory quasi-Newton minimization.
//!
//! # Algorithm
//!
//! The numerical work happens inside a [`Stepper`], an opaque solver that
//! never calls the objective itself. This module is the driver around it:
//!
//! 1. Validate the initial point and encode the bounds into per-dimension
//!    control codes ([`BoundKind`]).
//! 2. Call the stepper repeatedly. After every call, classify its task token
//!    into a [`DriverState`] with [`interpret`].
//! 3. When the stepper asks for an evaluation, call the objective and then
//!    its gradient. When it reports a new iterate, notify the observer.
//! 4. Once a terminal state is reached (or a callback fails), translate the
//!    outcome into an [`ExitStatus`] and read the final [`Statistics`] from
//!    the stepper's own counters.
//!
//! # Failure handling
//!
//! Nothing unwinds out of [`minimize`]. Objective, gradient, and observer
//! errors or panics are caught at the dispatch boundary, end the run
//! immediately, and are reported as [`ExitCode::Failure`] with a zeroed
//! result. Invalid input is reported as [`ExitCode::UsageError`] before the
//! stepper is called.
//!
//! # Observer Events
//!
//! The observer receives one [`Event`] per accepted iterate, carrying the
//! point, its value and gradient, evaluation counts, and the stepper's
//! convergence distances. Returning [`Action::Abort`] ends the run as a
//! failure.
//!
//! [`Stepper`]: twine_core::Stepper
//! [`BoundKind`]: twine_core::BoundKind

mod action;
mod bounds;
mod config;
mod dispatch;
mod driver;
mod error;
mod event;
mod minimizer;
mod solution;
mod status;
mod task;


pub use action::Action;
pub use bounds::encode;
pub use config::{Config, ConfigError, Parameters};
pub use dispatch::CallbackFailure;
pub use error::Error;
pub use event::Event;
pub use minimizer::Minimizer;
pub use solution::{Point, Solution, Statistics};
pub use status::{ExitCode, ExitStatus};
pub use task::{DriverState, Interpretation, interpret};

use twine_core::{Bounds, Objective, Observer};
use twine_stepper::ProjectedLbfgs;

/// Minimizes `objective` from `initial` with the bundled [`ProjectedLbfgs`]
/// stepper.
///
/// `parameters` override the default [`Config`]; unset fields keep their
/// defaults. The observer receives an [`Event`] for every accepted iterate.
///
/// Every failure is reported through [`Solution::status`].
pub fn minimize<O, Obs>(
    objective: &O,
    initial: &[f64],
    bounds: Option<&Bounds>,
    parameters: &Parameters,
    observer: Obs,
) -> Solution
where
    O: Objective,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    driver::run(
        &ProjectedLbfgs::new(),
        objective,
        initial,
        bounds,
        &Config::default(),
        parameters,
        observer,
    )
}

/// Minimizes `objective` without observer support.
///
/// This is a convenience wrapper around [`minimize`] that uses a no-op observer.
pub fn minimize_unobserved<O>(
    objective: &O,
    initial: &[f64],
    bounds: Option<&Bounds>,
    parameters: &Parameters,
) -> Solution
where
    O: Objective,
{
    minimize(objective, initial, bounds, parameters, ())
}
