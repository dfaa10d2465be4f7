//! Reusable observers for the Twine framework.
//!
//! This crate provides [`Observer`] implementations and capability traits
//! for watching a minimization run.
//!
//! # Observers
//!
//! - [`ProgressTable`] — writes a header and one row per iterate to any
//!   [`std::io::Write`]; a failed write aborts the run
//! - [`TraceProgress`] — emits one `tracing` event per iterate
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for reusable observers
//!   ([`HasIteration`], [`HasObjective`], [`HasGradientNorm`], [`CanAbort`])
//!
//! [`Observer`]: twine_core::Observer
//! [`HasIteration`]: traits::HasIteration
//! [`HasObjective`]: traits::HasObjective
//! [`HasGradientNorm`]: traits::HasGradientNorm
//! [`CanAbort`]: traits::CanAbort

pub mod traits;

mod table;
mod trace;

pub use table::ProgressTable;
pub use trace::TraceProgress;
