//! Core traits and types for the Twine minimization framework.
//!
//! This crate defines the shared abstractions that the driver, the bundled
//! solver, and observers build on:
//!
//! - [`Objective`] — a scalar function and its gradient supplied by the caller
//! - [`Observer`] — receives driver events and optionally returns control actions
//! - [`Bounds`] — validated per-dimension box constraints
//! - [`Stepper`] — the reverse-communication contract with an opaque
//!   quasi-Newton solver, together with the [`Workspace`] arena it owns

mod bounds;
mod objective;
mod observer;
mod stepper;

pub use bounds::{Bounds, BoundsError, Side};
pub use objective::{Functions, Objective};
pub use observer::Observer;
pub use stepper::{
    BoundKind, EncodedBounds, Progress, Settings, Step, Stepper, Workspace, WorkspaceSize,
};
