use twine_core::{EncodedBounds, Progress, Settings, Step, Stepper, Workspace, WorkspaceSize};

use crate::{
    arena::{self, Arena},
    memory::dot,
    projection::{clip_direction, project, projected_gradient_norm},
    token,
};

/// Sufficient-decrease constant of the Armijo condition.
const ARMIJO: f64 = 1e-4;

/// A projected limited-memory BFGS solver driven by task tokens.
///
/// The value itself holds only line-search constants; per-run state lives in
/// the [`Workspace`], so one `ProjectedLbfgs` can serve concurrent runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedLbfgs {
    max_trials: usize,
}

impl Default for ProjectedLbfgs {
    fn default() -> Self {
        Self { max_trials: 20 }
    }
}

impl ProjectedLbfgs {
    /// Creates a stepper with default line-search settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many trial points a line search may evaluate before giving up.
    ///
    /// Values below one are raised to one.
    #[must_use]
    pub fn with_max_trials(mut self, max_trials: usize) -> Self {
        self.max_trials = max_trials.max(1);
        self
    }

    /// Returns the line-search trial limit.
    #[must_use]
    pub fn max_trials(&self) -> usize {
        self.max_trials
    }
}

impl Stepper for ProjectedLbfgs {
    fn workspace_size(&self, n: usize, history_size: usize) -> Option<WorkspaceSize> {
        arena::size(n, history_size)
    }

    fn step(&self, step: Step<'_>) {
        let Step {
            x,
            f,
            g,
            bounds,
            settings,
            workspace,
            task,
        } = step;

        if token::is_final(task) {
            return;
        }

        if task.starts_with(token::START) {
            start(x, g, bounds, settings, workspace, task);
            return;
        }

        let (n, m) = (x.len(), settings.history_size);
        let carved = if arena::recorded_dims(workspace) == Some((n, m)) {
            Arena::carve(workspace, n, m)
        } else {
            None
        };
        let Some(ws) = carved else {
            token::set(task, token::ERROR_WORKSPACE);
            return;
        };

        let mut run = Run {
            x,
            f,
            g,
            bounds,
            settings,
            arena: ws,
            task,
            max_trials: self.max_trials,
        };

        match run.task.as_str() {
            token::FG_START => run.after_first_evaluation(),
            token::FG_LNSRCH => run.after_trial_evaluation(),
            token::NEW_X => run.after_new_iterate(),
            t if t.starts_with("WARNING") => {
                run.arena.memory.clear();
                run.begin_iteration();
            }
            _ => token::set(run.task, token::ERROR_TASK),
        }
    }

    fn progress(&self, workspace: &Workspace) -> Progress {
        if arena::recorded_dims(workspace).is_none() {
            return Progress::default();
        }
        Progress {
            iterations: arena::counter(workspace, arena::ITER),
            evaluations: arena::counter(workspace, arena::EVALS),
            iteration_evaluations: arena::counter(workspace, arena::ITER_EVALS),
            step_length: arena::scalar(workspace, arena::STEP_LENGTH),
            f_delta: arena::scalar(workspace, arena::F_DELTA),
            f_delta_bound: arena::scalar(workspace, arena::F_TOL),
            g_norm: arena::scalar(workspace, arena::G_NORM),
            g_norm_bound: arena::scalar(workspace, arena::G_TOL),
        }
    }
}

/// Validates inputs, resets the workspace, and requests the first evaluation.
fn start(
    x: &mut [f64],
    g: &[f64],
    bounds: &EncodedBounds,
    settings: &Settings,
    workspace: &mut Workspace,
    task: &mut String,
) {
    let n = x.len();
    let m = settings.history_size;

    let error = if n == 0 {
        Some(token::ERROR_N)
    } else if m == 0 {
        Some(token::ERROR_M)
    } else if settings.f_tolerance.is_nan() || settings.f_tolerance < 0.0 {
        Some(token::ERROR_FTOL)
    } else if settings.g_tolerance.is_nan() || settings.g_tolerance < 0.0 {
        Some(token::ERROR_PGTOL)
    } else if g.len() != n || bounds.len() != n {
        Some(token::ERROR_DIMENSION)
    } else if (0..n).any(|i| {
        bounds.kinds[i].has_lower()
            && bounds.kinds[i].has_upper()
            && bounds.lower[i] > bounds.upper[i]
    }) {
        Some(token::ERROR_INFEASIBLE)
    } else {
        None
    };
    if let Some(error) = error {
        token::set(task, error);
        return;
    }

    let Some(mut ws) = Arena::carve(workspace, n, m) else {
        token::set(task, token::ERROR_WORKSPACE);
        return;
    };

    ws.counters.fill(0);
    ws.scalars.fill(0.0);
    ws.counters[arena::N] = i64::try_from(n).unwrap_or(i64::MAX);
    ws.counters[arena::M] = i64::try_from(m).unwrap_or(i64::MAX);
    ws.scalars[arena::F_TOL] = settings.f_tolerance;
    ws.scalars[arena::G_TOL] = settings.g_tolerance;
    ws.memory.clear();

    project(x, bounds);
    token::set(task, token::FG_START);
}

/// One resumed step with every region of the workspace borrowed.
struct Run<'a> {
    x: &'a mut [f64],
    f: &'a mut f64,
    g: &'a mut [f64],
    bounds: &'a EncodedBounds,
    settings: &'a Settings,
    arena: Arena<'a>,
    task: &'a mut String,
    max_trials: usize,
}

impl Run<'_> {
    fn after_first_evaluation(&mut self) {
        self.arena.bump(arena::EVALS);
        self.arena.bump(arena::ITER_EVALS);

        let g_norm = projected_gradient_norm(self.x, self.g, self.bounds);
        self.arena.scalars[arena::G_NORM] = g_norm;

        if g_norm <= self.settings.g_tolerance {
            token::set(self.task, token::CONVERGED_PGTOL);
            return;
        }
        self.begin_iteration();
    }

    fn after_new_iterate(&mut self) {
        if self.arena.scalars[arena::G_NORM] <= self.settings.g_tolerance {
            token::set(self.task, token::CONVERGED_PGTOL);
        } else if self.arena.scalars[arena::F_DELTA] <= self.settings.f_tolerance {
            token::set(self.task, token::CONVERGED_FTOL);
        } else {
            self.begin_iteration();
        }
    }

    /// Saves the current iterate, picks a descent direction, and requests the
    /// first trial point.
    fn begin_iteration(&mut self) {
        let ws = &mut self.arena;
        ws.x0.copy_from_slice(self.x);
        ws.g0.copy_from_slice(self.g);
        ws.scalars[arena::F0] = *self.f;
        ws.counters[arena::ITER_EVALS] = 0;
        ws.counters[arena::TRIALS] = 0;

        ws.memory.direction(self.g, ws.d);
        clip_direction(self.x, ws.d, self.bounds);
        let mut dg = dot(self.g, ws.d);

        if (dg.is_nan() || dg >= 0.0) && ws.memory.len() > 0 {
            ws.memory.clear();
            ws.memory.direction(self.g, ws.d);
            clip_direction(self.x, ws.d, self.bounds);
            dg = dot(self.g, ws.d);
        }
        if dg.is_nan() || dg >= 0.0 {
            token::set(self.task, token::ABNORMAL);
            return;
        }

        let stp = if ws.memory.len() == 0 {
            let norm = dot(ws.d, ws.d).sqrt();
            (1.0 / norm).min(1.0)
        } else {
            1.0
        };
        ws.scalars[arena::DG] = dg;
        self.try_step(stp);
    }

    /// Moves `x` to the projected trial point at step length `stp`.
    fn try_step(&mut self, stp: f64) {
        self.arena.scalars[arena::STP] = stp;
        for ((xi, x0), d) in self.x.iter_mut().zip(&*self.arena.x0).zip(&*self.arena.d) {
            *xi = x0 + stp * d;
        }
        project(self.x, self.bounds);

        // A step lost to rounding would pass the Armijo test with no decrease.
        if *self.x == *self.arena.x0 {
            if self.settings.verbosity >= 1 {
                tracing::debug!(stp, "trial point equals the current iterate");
            }
            self.abandon_line_search();
            return;
        }

        if self.settings.verbosity >= 2 {
            tracing::trace!(
                stp,
                trial = self.arena.count(arena::TRIALS),
                "requesting line-search evaluation"
            );
        }
        token::set(self.task, token::FG_LNSRCH);
    }

    fn after_trial_evaluation(&mut self) {
        self.arena.bump(arena::EVALS);
        self.arena.bump(arena::ITER_EVALS);

        let f0 = self.arena.scalars[arena::F0];
        let decrease: f64 = self
            .x
            .iter()
            .zip(&*self.arena.x0)
            .zip(&*self.arena.g0)
            .map(|((x, x0), g0)| g0 * (x - x0))
            .sum();

        let f = *self.f;
        if f.is_finite() && f <= f0 + ARMIJO * decrease {
            self.complete_iteration();
            return;
        }

        self.arena.bump(arena::TRIALS);
        if self.arena.count(arena::TRIALS) >= self.max_trials {
            self.abandon_line_search();
            return;
        }

        let stp = self.arena.scalars[arena::STP];
        let dg = self.arena.scalars[arena::DG];
        let next = if f.is_finite() {
            let curvature = 2.0 * (f - f0 - dg * stp);
            (-dg * stp * stp / curvature).clamp(0.1 * stp, 0.5 * stp)
        } else {
            0.1 * stp
        };
        self.try_step(next);
    }

    /// Restores the last iterate after an exhausted line search.
    fn abandon_line_search(&mut self) {
        self.x.copy_from_slice(self.arena.x0);
        self.g.copy_from_slice(self.arena.g0);
        *self.f = self.arena.scalars[arena::F0];

        if self.arena.memory.len() > 0 {
            token::set(self.task, token::WARNING_ROUNDING);
        } else {
            token::set(self.task, token::ABNORMAL);
        }
    }

    /// Accepts the trial point, updates the correction memory, and reports
    /// the new iterate.
    fn complete_iteration(&mut self) {
        let ws = &mut self.arena;
        ws.bump(arena::ITER);
        let stp = ws.scalars[arena::STP];
        ws.scalars[arena::STEP_LENGTH] = stp;

        // Reuse `d` for s = x - x0 and `g0` for y = g - g0.
        for (s, (x, x0)) in ws.d.iter_mut().zip(self.x.iter().zip(&*ws.x0)) {
            *s = x - x0;
        }
        for (y, g) in ws.g0.iter_mut().zip(&*self.g) {
            *y = g - *y;
        }
        if !ws.memory.push(ws.d, ws.g0) && self.settings.verbosity >= 2 {
            tracing::trace!(
                iteration = ws.count(arena::ITER),
                "skipped correction pair without positive curvature"
            );
        }

        let f0 = ws.scalars[arena::F0];
        let f = *self.f;
        let scale = f0.abs().max(f.abs()).max(1.0);
        ws.scalars[arena::F_DELTA] = (f0 - f) / scale;

        let g_norm = projected_gradient_norm(self.x, self.g, self.bounds);
        ws.scalars[arena::G_NORM] = g_norm;

        if self.settings.verbosity >= 1 {
            tracing::debug!(
                iteration = ws.count(arena::ITER),
                f,
                stp,
                g_norm,
                "accepted iterate"
            );
        }
        token::set(self.task, token::NEW_X);
    }
}
