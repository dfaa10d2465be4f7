use twine_core::{Bounds, Objective, Observer, Stepper};
use twine_stepper::ProjectedLbfgs;

use super::{Action, Config, Event, Parameters, Solution, driver};

/// A reusable solver instance: a stepper, optional bounds, and default config.
///
/// Bounds fix the dimensionality of every point the instance minimizes
/// from. Each call to [`Minimizer::minimize`] allocates its own workspace,
/// so a `&Minimizer` can be shared across threads when the stepper allows
/// it.
///
/// # Example
///
/// ```
/// use twine_core::{Bounds, Functions};
/// use twine_solvers::lbfgsb::{ExitCode, Minimizer, Parameters};
///
/// let sphere = Functions::new(
///     |x: &[f64]| x.iter().map(|v| v * v).sum(),
///     |x: &[f64]| x.iter().map(|v| 2.0 * v).collect(),
/// );
///
/// let minimizer = Minimizer::new()
///     .with_bounds(Bounds::from_intervals([(1.0, 5.0), (-5.0, 5.0)]).unwrap());
///
/// let solution = minimizer.minimize_unobserved(&sphere, &[3.0, 3.0], &Parameters::new());
///
/// assert_eq!(solution.status.code, ExitCode::Success);
/// assert!((solution.minimum.x[0] - 1.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Minimizer<S = ProjectedLbfgs> {
    stepper: S,
    bounds: Option<Bounds>,
    config: Config,
}

impl Minimizer {
    /// Creates an unbounded instance using the bundled stepper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: Stepper> Minimizer<S> {
    /// Creates an unbounded instance around a custom stepper.
    #[must_use]
    pub fn with_stepper(stepper: S) -> Self {
        Self {
            stepper,
            bounds: None,
            config: Config::default(),
        }
    }

    /// Sets the bounds, fixing the instance's dimensionality.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Sets the default config that per-call parameters override.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn stepper(&self) -> &S {
        &self.stepper
    }

    #[must_use]
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the dimensionality fixed by the bounds, if any.
    #[must_use]
    pub fn dim(&self) -> Option<usize> {
        self.bounds.as_ref().and_then(Bounds::dim)
    }

    /// Minimizes `objective` starting from `initial`.
    ///
    /// `parameters` override this instance's config for this call only.
    /// The observer receives an [`Event`] for every accepted iterate.
    pub fn minimize<O, Obs>(
        &self,
        objective: &O,
        initial: &[f64],
        parameters: &Parameters,
        observer: Obs,
    ) -> Solution
    where
        O: Objective,
        Obs: for<'a> Observer<Event<'a>, Action>,
    {
        driver::run(
            &self.stepper,
            objective,
            initial,
            self.bounds.as_ref(),
            &self.config,
            parameters,
            observer,
        )
    }

    /// Minimizes `objective` without observer support.
    pub fn minimize_unobserved<O>(
        &self,
        objective: &O,
        initial: &[f64],
        parameters: &Parameters,
    ) -> Solution
    where
        O: Objective,
    {
        self.minimize(objective, initial, parameters, ())
    }
}
