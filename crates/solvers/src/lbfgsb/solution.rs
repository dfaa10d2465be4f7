use super::ExitStatus;

/// A point together with its objective value and gradient.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize))]
pub struct Point {
    /// Location of the point.
    pub x: Vec<f64>,
    /// Objective value at `x`.
    pub f: f64,
    /// Gradient at `x`.
    pub g: Vec<f64>,
}

impl Point {
    /// Returns an `n`-dimensional point with every field zero.
    #[must_use]
    pub fn zeroed(n: usize) -> Self {
        Self {
            x: vec![0.0; n],
            f: 0.0,
            g: vec![0.0; n],
        }
    }
}

/// Work done during a run, as counted by the stepper.
///
/// Objective and gradient calls are always paired, so the two evaluation
/// counts are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize))]
pub struct Statistics {
    /// Accepted iterates.
    pub iterations: usize,
    /// Completed objective calls.
    pub function_evaluations: usize,
    /// Completed gradient calls.
    pub gradient_evaluations: usize,
}

/// The result of a minimization run.
///
/// `minimum` holds the final point when [`ExitCode::has_result`] is true for
/// the status code, and is zeroed otherwise.
///
/// [`ExitCode::has_result`]: super::ExitCode::has_result
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize))]
pub struct Solution {
    /// Final point, or a zeroed point when the run produced none.
    pub minimum: Point,
    /// Severity and explanation of the outcome.
    pub status: ExitStatus,
    /// Work done by the stepper.
    pub stats: Statistics,
}

impl Solution {
    /// Returns the minimum if the run succeeded, otherwise its exit status.
    ///
    /// # Errors
    ///
    /// Returns the [`ExitStatus`] for every code other than
    /// [`ExitCode::Success`](super::ExitCode::Success), including
    /// approximate and warning outcomes.
    pub fn into_result(self) -> Result<Point, ExitStatus> {
        if self.status.is_success() {
            Ok(self.minimum)
        } else {
            Err(self.status)
        }
    }
}
