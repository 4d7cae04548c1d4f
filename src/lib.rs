//! texproject - create, manage and export LaTeX projects from reusable templates.
//!
//! Every `tpr` subcommand is a pipeline: a list of [`steps`] whose closures
//! are previewed, executed and reported by the [`control::Runner`].
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Layered configuration and project paths
//! - [`control`] - Closures, outcomes, shared state and the runner
//! - [`error`] - Error types and result aliases
//! - [`shell`] - External process execution
//! - [`steps`] - Concrete pipeline steps
//! - [`template`] - Resource library, template dictionaries and rendering
//! - [`ui`] - Terminal output, prompts and message formatting
//!
//! # Example
//!
//! ```
//! use texproject::control::{Outcome, RuntimeClosure};
//!
//! let closure = RuntimeClosure::new("Say hello", true, || Outcome::success().with_payload("hello"));
//! assert_eq!(closure.message(), "Say hello");
//! let outcome = closure.run();
//! assert!(outcome.is_success());
//! ```

pub mod cli;
pub mod config;
pub mod control;
pub mod error;
pub mod resources;
pub mod shell;
pub mod steps;
pub mod template;
pub mod ui;

pub use error::{Result, TexprojectError};
