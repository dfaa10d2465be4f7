use std::fmt;

use super::{CallbackFailure, DriverState, Error, Interpretation};

/// Severity of a run's outcome, from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize))]
pub enum ExitCode {
    /// Converged normally.
    Success,
    /// Stopped without meeting the tolerances, but with a usable point.
    Approximate,
    /// The point may be fine, but the run hit numerical trouble on the way.
    Warning,
    /// A callback failed or the stepper could not continue.
    Failure,
    /// The caller's input was invalid.
    UsageError,
    /// The driver saw something it does not understand.
    InternalError,
}

impl ExitCode {
    /// Returns true if the run produced a point worth returning.
    #[must_use]
    pub fn has_result(self) -> bool {
        matches!(self, Self::Success | Self::Approximate | Self::Warning)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "SUCCESS",
            Self::Approximate => "APPROXIMATE",
            Self::Warning => "WARNING",
            Self::Failure => "FAILURE",
            Self::UsageError => "USAGE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        };
        f.write_str(name)
    }
}

/// The exit status of a run: a severity code and an explanation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde-derive", derive(serde::Serialize))]
pub struct ExitStatus {
    /// Severity of the outcome.
    pub code: ExitCode,
    /// Stepper or driver text explaining the outcome.
    pub message: String,
}

impl ExitStatus {
    /// Creates a status with the given code and message.
    #[must_use]
    pub fn new(code: ExitCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Returns true if the code is [`ExitCode::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == ExitCode::Success
    }
}

impl fmt::Display for ExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Exit status: {}; Message: {};", self.code, self.message)
    }
}

impl std::error::Error for ExitStatus {}

/// How the driver loop ended.
#[derive(Debug)]
pub(super) enum Outcome {
    /// Input was rejected before the stepper was called.
    Rejected(Error),
    /// A callback failed mid-run.
    CallbackFailed(CallbackFailure),
    /// The stepper reached a state that stopped the loop.
    Stopped(Interpretation),
}

/// Maps how a run ended to its exit status.
///
/// A warning seen during the run downgrades an otherwise successful or
/// approximate outcome to [`ExitCode::Warning`].
pub(super) fn translate(outcome: &Outcome, warning: Option<&str>) -> ExitStatus {
    let status = match outcome {
        Outcome::Rejected(error) => ExitStatus::new(ExitCode::UsageError, error.to_string()),
        Outcome::CallbackFailed(failure) => {
            ExitStatus::new(ExitCode::Failure, failure.to_string())
        }
        Outcome::Stopped(Interpretation { state, message }) => match state {
            DriverState::Converged => ExitStatus::new(ExitCode::Success, message.as_str()),
            DriverState::LineSearchFailed => {
                ExitStatus::new(ExitCode::Approximate, message.as_str())
            }
            DriverState::UsageError => ExitStatus::new(ExitCode::UsageError, message.as_str()),
            DriverState::InternalError => {
                ExitStatus::new(ExitCode::InternalError, message.as_str())
            }
            DriverState::Start
            | DriverState::NeedEvaluation
            | DriverState::NewIterate
            | DriverState::Warning => ExitStatus::new(
                ExitCode::InternalError,
                format!("driver stopped in non-terminal state: {state}"),
            ),
        },
    };

    if status.code == ExitCode::InternalError {
        tracing::error!(message = %status.message, "internal error");
    }

    match warning {
        Some(warning) if matches!(status.code, ExitCode::Success | ExitCode::Approximate) => {
            ExitStatus::new(
                ExitCode::Warning,
                format!("{}; after warning: {warning}", status.message),
            )
        }
        _ => status,
    }
}
