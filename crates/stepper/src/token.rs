//! Task tokens written by [`ProjectedLbfgs`](crate::ProjectedLbfgs).

pub const START: &str = "START";
pub const FG_START: &str = "FG_START";
pub const FG_LNSRCH: &str = "FG_LNSRCH";
pub const NEW_X: &str = "NEW_X";

pub const CONVERGED_PGTOL: &str = "CONVERGENCE: NORM_OF_PROJECTED_GRADIENT_<=_PGTOL";
pub const CONVERGED_FTOL: &str = "CONVERGENCE: REL_REDUCTION_OF_F_<=_FTOL";
pub const ABNORMAL: &str = "ABNORMAL_TERMINATION_IN_LNSRCH";
pub const WARNING_ROUNDING: &str = "WARNING: ROUNDING ERRORS PREVENT PROGRESS";

pub const ERROR_N: &str = "ERROR: N .LE. 0";
pub const ERROR_M: &str = "ERROR: M .LE. 0";
pub const ERROR_FTOL: &str = "ERROR: FTOL .LT. 0";
pub const ERROR_PGTOL: &str = "ERROR: PGTOL .LT. 0";
pub const ERROR_INFEASIBLE: &str = "ERROR: NO FEASIBLE SOLUTION";
pub const ERROR_DIMENSION: &str = "ERROR: DIMENSION MISMATCH";
pub const ERROR_WORKSPACE: &str = "ERROR: WORKSPACE TOO SMALL";
pub const ERROR_TASK: &str = "ERROR: UNRECOGNIZED TASK";

/// Overwrites the token buffer.
pub(crate) fn set(task: &mut String, token: &str) {
    task.clear();
    task.push_str(token);
}

/// Returns true if the token ends a run and must be left untouched.
pub(crate) fn is_final(task: &str) -> bool {
    task.starts_with("CONVERGENCE")
        || task.starts_with("ABNORMAL")
        || task.starts_with("ERROR")
}
