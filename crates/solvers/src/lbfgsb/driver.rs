use tracing::{debug, trace, warn};
use twine_core::{Bounds, Objective, Observer, Settings, Step, Stepper, Workspace};

use super::{
    Action, CallbackFailure, Config, DriverState, Error, Event, Parameters, Point, Solution,
    Statistics,
    bounds::encode,
    dispatch,
    error::check_point,
    status::{Outcome, translate},
    task::interpret,
};

/// Token that seeds every run.
const START: &str = "START";

/// Runs one minimization from start to finish.
///
/// The workspace and iterate are owned by this call, so concurrent calls
/// with a shared stepper never alias.
pub(super) fn run<S, O, Obs>(
    stepper: &S,
    objective: &O,
    initial: &[f64],
    bounds: Option<&Bounds>,
    base: &Config,
    parameters: &Parameters,
    mut observer: Obs,
) -> Solution
where
    S: Stepper,
    O: Objective,
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let n = initial.len();

    let prepared = base
        .apply(parameters)
        .map_err(Error::from)
        .and_then(|config| check_point(initial).map(|()| config))
        .and_then(|config| encode(bounds, n).map(|encoded| (config, encoded)));
    let (config, encoded) = match prepared {
        Ok(prepared) => prepared,
        Err(error) => {
            debug!(%error, "rejected input");
            return finish(&Outcome::Rejected(error), None, n, None, Statistics::default());
        }
    };

    let settings = Settings {
        history_size: config.history_size(),
        f_tolerance: config.f_tolerance(),
        g_tolerance: config.g_tolerance(),
        verbosity: config.verbosity(),
    };
    let Some(mut workspace) = stepper
        .workspace_size(n, settings.history_size)
        .and_then(Workspace::try_new)
    else {
        let error = Error::Workspace {
            n,
            history_size: settings.history_size,
        };
        debug!(%error, "rejected input");
        return finish(&Outcome::Rejected(error), None, n, None, Statistics::default());
    };
    debug!(n, ?config, "starting minimization");

    let mut x = initial.to_vec();
    let mut f = 0.0;
    let mut g = vec![0.0; n];
    let mut task = String::from(START);
    let mut warning = None;

    let outcome = loop {
        stepper.step(Step {
            x: &mut x,
            f: &mut f,
            g: &mut g,
            bounds: &encoded,
            settings: &settings,
            workspace: &mut workspace,
            task: &mut task,
        });
        trace!(token = %task, "stepper returned");

        let interpretation = interpret(&task);
        match interpretation.state {
            DriverState::Start => {}
            DriverState::NeedEvaluation => {
                if let Err(failure) = evaluate(objective, &x, &mut f, &mut g) {
                    break Outcome::CallbackFailed(failure);
                }
            }
            DriverState::NewIterate => {
                let progress = stepper.progress(&workspace);
                let event = Event::new(&progress, &x, f, &g);
                if let Err(failure) = dispatch::log(&mut observer, &event) {
                    break Outcome::CallbackFailed(failure);
                }
            }
            DriverState::Warning => {
                warn!(message = %interpretation.message, "stepper warning");
                warning = Some(interpretation.message);
            }
            DriverState::Converged
            | DriverState::LineSearchFailed
            | DriverState::UsageError
            | DriverState::InternalError => break Outcome::Stopped(interpretation),
        }
    };

    if let Outcome::CallbackFailed(failure) = &outcome {
        warn!(%failure, "callback failed");
    }

    let progress = stepper.progress(&workspace);
    let stats = Statistics {
        iterations: progress.iterations,
        function_evaluations: progress.evaluations,
        gradient_evaluations: progress.evaluations,
    };

    finish(&outcome, warning.as_deref(), n, Some(Point { x, f, g }), stats)
}

/// Evaluates the objective, then its gradient, at `x`.
///
/// The gradient is not requested if the objective fails.
fn evaluate<O: Objective>(
    objective: &O,
    x: &[f64],
    f: &mut f64,
    g: &mut [f64],
) -> Result<(), CallbackFailure> {
    *f = dispatch::value(objective, x)?;
    let gradient = dispatch::gradient(objective, x)?;
    g.copy_from_slice(&gradient);
    Ok(())
}

/// Builds the solution, zeroing the point unless the outcome produced one.
fn finish(
    outcome: &Outcome,
    warning: Option<&str>,
    n: usize,
    point: Option<Point>,
    stats: Statistics,
) -> Solution {
    let status = translate(outcome, warning);
    let minimum = match point {
        Some(point) if status.code.has_result() => point,
        _ => Point::zeroed(n),
    };

    debug!(
        code = %status.code,
        message = %status.message,
        iterations = stats.iterations,
        evaluations = stats.function_evaluations,
        "minimization finished"
    );

    Solution {
        minimum,
        status,
        stats,
    }
}
