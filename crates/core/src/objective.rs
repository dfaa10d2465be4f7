use std::convert::Infallible;

/// A scalar objective function `f: Rⁿ → R` together with its gradient.
///
/// Both methods receive the same point; the driver always calls `value`
/// first and only calls `gradient` if `value` succeeded.
pub trait Objective {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the objective at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the value cannot be computed.
    fn value(&self, x: &[f64]) -> Result<f64, Self::Error>;

    /// Evaluates the gradient of the objective at `x`.
    ///
    /// The returned vector must have the same length as `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Self::Error`] if the gradient cannot be computed.
    fn gradient(&self, x: &[f64]) -> Result<Vec<f64>, Self::Error>;
}

/// Combines a value closure and a gradient closure into an [`Objective`].
///
/// Use this when neither closure can fail. A closure that panics is still
/// handled: the driver catches the panic and reports a failed run.
#[derive(Debug, Clone, Copy)]
pub struct Functions<F, G> {
    value: F,
    gradient: G,
}

impl<F, G> Functions<F, G>
where
    F: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
{
    /// Creates an objective from a value closure and a gradient closure.
    pub fn new(value: F, gradient: G) -> Self {
        Self { value, gradient }
    }
}

impl<F, G> Objective for Functions<F, G>
where
    F: Fn(&[f64]) -> f64,
    G: Fn(&[f64]) -> Vec<f64>,
{
    type Error = Infallible;

    fn value(&self, x: &[f64]) -> Result<f64, Self::Error> {
        Ok((self.value)(x))
    }

    fn gradient(&self, x: &[f64]) -> Result<Vec<f64>, Self::Error> {
        Ok((self.gradient)(x))
    }
}
