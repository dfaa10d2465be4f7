//! The boundary between the driver loop and caller code.
//!
//! Every call into the objective, its gradient, or the observer goes through
//! here. Errors and panics are both turned into a [`CallbackFailure`], so
//! nothing unwinds into the driver or the stepper's workspace.

use std::{
    any::Any,
    error::Error as StdError,
    panic::{AssertUnwindSafe, catch_unwind},
};

use twine_core::{Objective, Observer};

use super::{Action, Event};

/// A caller-supplied callback that ended the run.
#[derive(Debug, thiserror::Error)]
pub enum CallbackFailure {
    #[error("objective evaluation failed: {0}")]
    Objective(Box<dyn StdError + Send + Sync>),

    #[error("objective panicked: {0}")]
    ObjectivePanic(String),

    #[error("gradient evaluation failed: {0}")]
    Gradient(Box<dyn StdError + Send + Sync>),

    #[error("gradient panicked: {0}")]
    GradientPanic(String),

    #[error("gradient has {actual} entries but the point has {expected}")]
    GradientLength { expected: usize, actual: usize },

    #[error("logger aborted the run at iteration {iteration}")]
    LoggerAbort { iteration: usize },

    #[error("logger panicked: {0}")]
    LoggerPanic(String),
}

/// Evaluates the objective at `x`.
pub(super) fn value<O: Objective>(objective: &O, x: &[f64]) -> Result<f64, CallbackFailure> {
    match catch_unwind(AssertUnwindSafe(|| objective.value(x))) {
        Ok(Ok(f)) => Ok(f),
        Ok(Err(error)) => Err(CallbackFailure::Objective(Box::new(error))),
        Err(payload) => Err(CallbackFailure::ObjectivePanic(panic_message(&*payload))),
    }
}

/// Evaluates the gradient at `x` and checks its length.
pub(super) fn gradient<O: Objective>(
    objective: &O,
    x: &[f64],
) -> Result<Vec<f64>, CallbackFailure> {
    let g = match catch_unwind(AssertUnwindSafe(|| objective.gradient(x))) {
        Ok(Ok(g)) => g,
        Ok(Err(error)) => return Err(CallbackFailure::Gradient(Box::new(error))),
        Err(payload) => return Err(CallbackFailure::GradientPanic(panic_message(&*payload))),
    };

    if g.len() != x.len() {
        return Err(CallbackFailure::GradientLength {
            expected: x.len(),
            actual: g.len(),
        });
    }
    Ok(g)
}

/// Notifies the observer of a new iterate.
pub(super) fn log<Obs>(observer: &mut Obs, event: &Event<'_>) -> Result<(), CallbackFailure>
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    match catch_unwind(AssertUnwindSafe(|| observer.observe(event))) {
        Ok(None) => Ok(()),
        Ok(Some(Action::Abort)) => Err(CallbackFailure::LoggerAbort {
            iteration: event.iteration,
        }),
        Err(payload) => Err(CallbackFailure::LoggerPanic(panic_message(&*payload))),
    }
}

/// Extracts the text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
