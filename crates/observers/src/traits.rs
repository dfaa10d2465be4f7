//! Capability traits for reusable observers.
//!
//! These traits abstract over driver-specific event and action types, so an
//! observer can be written once against the capabilities it needs.
//!
//! # Event traits
//!
//! - [`HasIteration`] — events tied to a numbered iteration
//! - [`HasObjective`] — events that carry an objective value
//! - [`HasGradientNorm`] — events that carry a gradient norm and its tolerance
//!
//! # Action traits
//!
//! - [`CanAbort`] — actions that can end a run
//!
//! # Example
//!
//! ```rust
//! use twine_core::Observer;
//! use twine_observers::traits::{CanAbort, HasIteration};
//!
//! /// Gives up after a fixed number of iterations.
//! struct IterationBudget(usize);
//!
//! impl<E: HasIteration, A: CanAbort> Observer<E, A> for IterationBudget {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         (event.iteration() >= self.0).then(A::abort)
//!     }
//! }
//! ```

use twine_solvers::lbfgsb;

/// An event tied to a numbered iteration.
pub trait HasIteration {
    /// Returns the iteration number, starting at 1.
    fn iteration(&self) -> usize;
}

/// An event that carries an objective value.
pub trait HasObjective {
    /// Returns the objective for this event.
    fn objective(&self) -> f64;
}

/// An event that carries a gradient norm and the tolerance it is tested against.
pub trait HasGradientNorm {
    /// Returns the gradient norm for this event.
    fn gradient_norm(&self) -> f64;

    /// Returns the tolerance the norm is tested against.
    fn gradient_tolerance(&self) -> f64;
}

/// An action type that can end a run.
pub trait CanAbort {
    /// Returns the action that ends the run.
    fn abort() -> Self;
}

impl HasIteration for lbfgsb::Event<'_> {
    fn iteration(&self) -> usize {
        self.iteration
    }
}

impl HasObjective for lbfgsb::Event<'_> {
    fn objective(&self) -> f64 {
        self.f
    }
}

impl HasGradientNorm for lbfgsb::Event<'_> {
    fn gradient_norm(&self) -> f64 {
        self.g_norm
    }

    fn gradient_tolerance(&self) -> f64 {
        self.g_norm_bound
    }
}

impl CanAbort for lbfgsb::Action {
    fn abort() -> Self {
        Self::Abort
    }
}
