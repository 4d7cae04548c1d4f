//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

/// Exit code for errors found before any pipeline runs.
pub const USAGE_EXIT_CODE: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Usage errors (not a project, unknown resource, ...) are reported here
    /// and turned into exit code 2. Any other error is returned.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.route(cli, ui) {
            Err(e) if e.is_usage_error() => {
                ui.error(&format!("Error: {}", e));
                Ok(CommandResult::failure(USAGE_EXIT_CODE))
            }
            other => other,
        }
    }

    fn route(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let root = &self.project_root;
        let dry_run = cli.dry_run;
        match &cli.command {
            Commands::Init(args) => {
                super::init::InitCommand::new(root, args.clone(), dry_run).execute(ui)
            }
            Commands::Import(args) => {
                super::import::ImportCommand::new(root, args.clone(), dry_run).execute(ui)
            }
            Commands::Template(args) => {
                super::template::TemplateCommand::new(root, args.clone(), dry_run).execute(ui)
            }
            Commands::Config(args) => {
                super::config::ConfigCommand::new(root, args.clone(), dry_run).execute(ui)
            }
            Commands::Validate(args) => {
                super::validate::ValidateCommand::new(root, args.clone(), dry_run).execute(ui)
            }
            Commands::Archive(args) => {
                super::archive::ArchiveCommand::new(root, args.clone(), dry_run).execute(ui)
            }
            Commands::Git(args) => {
                super::git::GitCommand::new(root, args.clone(), dry_run).execute(ui)
            }
            Commands::List(args) => super::list::ListCommand::new(args.clone()).execute(ui),
            Commands::Util(args) => {
                super::util::UtilCommand::new(root, args.clone(), dry_run).execute(ui)
            }
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn missing_project_is_a_usage_error() {
        let temp = TempDir::new().unwrap();
        let cli = Cli::try_parse_from(["tpr", "util", "refresh"]).unwrap();
        let mut ui = MockUI::new();

        let result = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&cli, &mut ui)
            .unwrap();

        assert_eq!(result.exit_code, USAGE_EXIT_CODE);
        assert!(ui.has_error("No texproject project found"));
    }
}
