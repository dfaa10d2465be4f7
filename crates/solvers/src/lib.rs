//! Solvers for the Twine framework.
//!
//! # Modules
//!
//! - [`lbfgsb`] — drives a box-constrained limited-memory quasi-Newton
//!   stepper through its task-token protocol, dispatching to caller
//!   callbacks and translating the outcome into an exit status

pub mod lbfgsb;
