use twine_core::{BoundsError, Side};

use super::ConfigError;

/// Invalid input detected before the stepper is first called.
///
/// These never escape [`minimize`](super::minimize); they are reported as
/// [`ExitCode::UsageError`](super::ExitCode::UsageError).
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum Error {
    #[error("initial point is empty")]
    EmptyPoint,

    #[error("initial point is not finite at index {index}: {value}")]
    NonFinitePoint { index: usize, value: f64 },

    #[error("Dimensionality disagreement: initial point: {point}, {side} bounds: {bounds}")]
    DimensionMismatch {
        point: usize,
        side: Side,
        bounds: usize,
    },

    #[error("workspace for {n} variables and {history_size} correction pairs cannot be allocated")]
    Workspace { n: usize, history_size: usize },

    #[error(transparent)]
    Bounds(#[from] BoundsError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Checks that the initial point is non-empty and finite.
pub(super) fn check_point(initial: &[f64]) -> Result<(), Error> {
    if initial.is_empty() {
        return Err(Error::EmptyPoint);
    }
    if let Some((index, &value)) = initial.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(Error::NonFinitePoint { index, value });
    }
    Ok(())
}
