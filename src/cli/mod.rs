//! Command-line interface for texproject.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    ArchiveArgs, Cli, Commands, ConfigArgs, GitArgs, ImportArgs, InitArgs, ListArgs,
    TemplateArgs, UtilArgs, ValidateArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
