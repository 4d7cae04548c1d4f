//! External process execution.

pub mod command;
pub mod platform;

pub use command::{execute, execute_check, execute_shell, CommandOptions, CommandResult};
pub use platform::{editor_command, is_ci, system_shell};
