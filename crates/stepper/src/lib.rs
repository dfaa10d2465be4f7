//! A reverse-communication projected L-BFGS stepper.
//!
//! [`ProjectedLbfgs`] implements [`twine_core::Stepper`]: it never calls the
//! objective itself, keeps every bit of state in the caller's
//! [`twine_core::Workspace`], and communicates through task tokens.
//!
//! # Tokens
//!
//! | token | meaning |
//! |---|---|
//! | [`token::FG_START`] | evaluate `f` and `g` at the (projected) starting point |
//! | [`token::FG_LNSRCH`] | evaluate `f` and `g` at a line-search trial point |
//! | [`token::NEW_X`] | a new iterate was accepted |
//! | `CONVERGENCE: ...` | a tolerance was met |
//! | [`token::ABNORMAL`] | the line search failed from a steepest-descent start |
//! | `WARNING: ...` | the line search failed; memory is refreshed on the next call |
//! | `ERROR: ...` | invalid input, nothing was evaluated |
//!
//! # Algorithm
//!
//! Directions come from the two-loop limited-memory recursion, with
//! components that would leave an active bound zeroed. Trial points are
//! projected onto the box and accepted by a backtracking Armijo search.

mod arena;
mod memory;
mod projected_lbfgs;
mod projection;

pub mod token;

pub use projected_lbfgs::ProjectedLbfgs;
