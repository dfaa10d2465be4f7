use twine_core::Progress;

/// Information about one accepted iterate, passed to the observer.
///
/// The convergence distances come straight from the stepper: a run stops
/// when `g_norm <= g_norm_bound` or `f_delta <= f_delta_bound`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event<'a> {
    /// Iteration number, starting at 1.
    pub iteration: usize,

    /// Evaluations spent finding this iterate.
    ///
    /// Each evaluation is one objective call plus one gradient call.
    pub evaluations: usize,

    /// Evaluations since the run started.
    pub total_evaluations: usize,

    /// Step length accepted by the line search.
    pub step_length: f64,

    /// The new iterate.
    pub x: &'a [f64],

    /// Objective value at `x`.
    pub f: f64,

    /// Gradient at `x`.
    pub g: &'a [f64],

    /// Relative reduction of the objective in this iteration.
    pub f_delta: f64,

    /// Tolerance that `f_delta` is compared against.
    pub f_delta_bound: f64,

    /// Infinity norm of the projected gradient at `x`.
    pub g_norm: f64,

    /// Tolerance that `g_norm` is compared against.
    pub g_norm_bound: f64,
}

impl<'a> Event<'a> {
    pub(super) fn new(progress: &Progress, x: &'a [f64], f: f64, g: &'a [f64]) -> Self {
        Self {
            iteration: progress.iterations,
            evaluations: progress.iteration_evaluations,
            total_evaluations: progress.evaluations,
            step_length: progress.step_length,
            x,
            f,
            g,
            f_delta: progress.f_delta,
            f_delta_bound: progress.f_delta_bound,
            g_norm: progress.g_norm,
            g_norm_bound: progress.g_norm_bound,
        }
    }

    /// Returns `f_delta / f_delta_bound`; below 1 means the reduction test passes.
    #[must_use]
    pub fn f_ratio(&self) -> f64 {
        self.f_delta / self.f_delta_bound
    }

    /// Returns `g_norm / g_norm_bound`; below 1 means the gradient test passes.
    #[must_use]
    pub fn g_ratio(&self) -> f64 {
        self.g_norm / self.g_norm_bound
    }
}
