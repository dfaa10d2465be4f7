use std::fmt;

/// The driver's classification of a stepper task token.
///
/// [`DriverState::Start`] is the initial state. Terminal states end the
/// driver loop; all others are followed by another stepper call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverState {
    /// The stepper is (re)initializing.
    Start,
    /// The objective and gradient must be evaluated at the current point.
    NeedEvaluation,
    /// The stepper accepted a new iterate.
    NewIterate,
    /// A convergence criterion was met.
    Converged,
    /// The line search could not make progress.
    LineSearchFailed,
    /// A recoverable numerical problem; the stepper handles recovery.
    Warning,
    /// The stepper rejected its input.
    UsageError,
    /// The token was not recognized.
    InternalError,
}

impl DriverState {
    /// Returns true if the driver loop must stop in this state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Converged | Self::LineSearchFailed | Self::UsageError | Self::InternalError
        )
    }
}

impl fmt::Display for DriverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::NeedEvaluation => "need evaluation",
            Self::NewIterate => "new iterate",
            Self::Converged => "converged",
            Self::LineSearchFailed => "line search failed",
            Self::Warning => "warning",
            Self::UsageError => "usage error",
            Self::InternalError => "internal error",
        };
        f.write_str(name)
    }
}

/// A classified task token and the diagnostic text it carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    /// What the driver should do next.
    pub state: DriverState,
    /// Detail text after the token's keyword, or the whole token.
    pub message: String,
}

impl Interpretation {
    fn new(state: DriverState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: message.into(),
        }
    }
}

const LINE_SEARCH_FAILED: &str = "ABNORMAL_TERMINATION_IN_LNSRCH";

/// Classifies a raw task token.
///
/// A token has the form `KEYWORD` or `KEYWORD: detail`; trailing blanks and
/// NULs from fixed-size buffers are ignored. The classification is total:
/// any token that matches no known keyword yields
/// [`DriverState::InternalError`] with the token in the message.
#[must_use]
pub fn interpret(token: &str) -> Interpretation {
    let trimmed = token.trim_end_matches(['\0', ' ']).trim_start();
    let (keyword, detail) = match trimmed.split_once(':') {
        Some((keyword, detail)) => (keyword.trim_end(), detail.trim()),
        None => (trimmed, ""),
    };

    match keyword {
        "START" => Interpretation::new(DriverState::Start, detail),
        "FG" | "FG_START" | "FG_LNSRCH" => Interpretation::new(DriverState::NeedEvaluation, detail),
        "NEW_X" => Interpretation::new(DriverState::NewIterate, detail),
        _ if trimmed == LINE_SEARCH_FAILED => {
            Interpretation::new(DriverState::LineSearchFailed, trimmed)
        }
        k if k.starts_with("CONVERGENCE") => Interpretation::new(DriverState::Converged, detail),
        k if k.starts_with("WARNING") => Interpretation::new(DriverState::Warning, detail),
        k if k.starts_with("ERROR") => Interpretation::new(DriverState::UsageError, detail),
        _ => Interpretation::new(
            DriverState::InternalError,
            format!("unrecognized token: {token}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_transient_tokens() {
        assert_eq!(interpret("START").state, DriverState::Start);
        assert_eq!(interpret("FG").state, DriverState::NeedEvaluation);
        assert_eq!(interpret("FG_START").state, DriverState::NeedEvaluation);
        assert_eq!(interpret("FG_LNSRCH").state, DriverState::NeedEvaluation);
        assert_eq!(interpret("NEW_X").state, DriverState::NewIterate);

        for state in [
            DriverState::Start,
            DriverState::NeedEvaluation,
            DriverState::NewIterate,
            DriverState::Warning,
        ] {
            assert!(!state.is_terminal(), "{state} should be transient");
        }
    }

    #[test]
    fn convergence_carries_criterion() {
        let result = interpret("CONVERGENCE: NORM_OF_PROJECTED_GRADIENT_<=_PGTOL");
        assert_eq!(result.state, DriverState::Converged);
        assert_eq!(result.message, "NORM_OF_PROJECTED_GRADIENT_<=_PGTOL");
        assert!(result.state.is_terminal());

        let result = interpret("CONVERGENCE: REL_REDUCTION_OF_F_<=_FACTR*EPSMCH");
        assert_eq!(result.state, DriverState::Converged);
        assert_eq!(result.message, "REL_REDUCTION_OF_F_<=_FACTR*EPSMCH");
    }

    #[test]
    fn abnormal_termination_keeps_full_token() {
        let result = interpret("ABNORMAL_TERMINATION_IN_LNSRCH");
        assert_eq!(result.state, DriverState::LineSearchFailed);
        assert_eq!(result.message, "ABNORMAL_TERMINATION_IN_LNSRCH");
    }

    #[test]
    fn warning_and_error_carry_detail() {
        let warning = interpret("WARNING: ROUNDING ERRORS PREVENT PROGRESS");
        assert_eq!(warning.state, DriverState::Warning);
        assert_eq!(warning.message, "ROUNDING ERRORS PREVENT PROGRESS");

        let error = interpret("ERROR: N .LE. 0");
        assert_eq!(error.state, DriverState::UsageError);
        assert_eq!(error.message, "N .LE. 0");
    }

    #[test]
    fn ignores_buffer_padding() {
        let padded = format!("{:<60}", "FG_LNSRCH");
        assert_eq!(interpret(&padded).state, DriverState::NeedEvaluation);

        let result = interpret("CONVERGENCE: NORM_OF_PROJECTED_GRADIENT_<=_PGTOL   \0\0");
        assert_eq!(result.state, DriverState::Converged);
        assert_eq!(result.message, "NORM_OF_PROJECTED_GRADIENT_<=_PGTOL");
    }

    #[test]
    fn unrecognized_tokens_are_internal_errors() {
        for token in ["FOO", "", ":", ": detail", "NEW_XY", "ABNORMAL", "fg_start"] {
            let result = interpret(token);
            assert_eq!(result.state, DriverState::InternalError, "token {token:?}");
            assert_eq!(result.message, format!("unrecognized token: {token}"));
            assert!(result.state.is_terminal());
        }
    }
}
