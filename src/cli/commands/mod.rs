//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Most commands
//! build a list of [`steps`](crate::steps) and hand it to the
//! [`Runner`](crate::control::Runner) through [`pipeline::run_pipeline`].

pub mod archive;
pub mod completions;
pub mod config;
pub mod dispatcher;
pub mod git;
pub mod import;
pub mod init;
pub mod list;
pub mod pipeline;
pub mod template;
pub mod util;
pub mod validate;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
