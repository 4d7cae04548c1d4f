//! The atomic-operation execution pipeline.
//!
//! Work is described by [`Step`]s. A step lazily yields [`RuntimeClosure`]s,
//! each of which carries a preview message, an inferred result and a
//! single-use action producing an [`Outcome`]. The [`Runner`] decides whether
//! to run each action (it never does under dry run), aggregates failures and
//! stops early when an abort-on-failure closure fails.
//!
//! - [`ScratchDirectory`] - one temporary directory per run
//! - [`SharedState`] - queue of template modifications requested by earlier closures

pub mod closure;
pub mod outcome;
pub mod runner;
pub mod scratch;
pub mod state;
pub mod step;

pub use closure::RuntimeClosure;
pub use outcome::{Outcome, Payload};
pub use runner::{
    ClosureReport, PipelineAbort, RunOptions, RunReport, Runner, AGGREGATE_FAILURE_MESSAGE,
};
pub use scratch::ScratchDirectory;
pub use state::{ModificationRequests, SharedState};
pub use step::{Closures, Step, StepContext};
