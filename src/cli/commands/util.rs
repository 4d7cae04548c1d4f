//! Util command implementation.
//!
//! Maintenance pipelines: `tpr util refresh` re-links declared resources and
//! re-renders generated files, `tpr util clean` removes stale links.

use std::path::{Path, PathBuf};

use crate::cli::args::{UtilAction, UtilArgs};
use crate::error::Result;
use crate::steps::{CleanProject, InfoFileWriter, TemplateDictLinker, TemplateDictWriter};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::pipeline::{open_initialized, run_pipeline};

/// The util command implementation.
pub struct UtilCommand {
    project_root: PathBuf,
    args: UtilArgs,
    dry_run: bool,
}

impl UtilCommand {
    /// Create a new util command.
    pub fn new(project_root: &Path, args: UtilArgs, dry_run: bool) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            dry_run,
        }
    }
}

impl Command for UtilCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (project, template) = open_initialized(&self.project_root)?;
        let steps = match &self.args.action {
            UtilAction::Refresh(args) => crate::steps![
                TemplateDictLinker::new(args.force),
                InfoFileWriter,
                TemplateDictWriter,
            ],
            UtilAction::Clean(args) => crate::steps![CleanProject {
                remove_git_files: args.remove_git_files,
                data_dir: None,
            }],
        };
        run_pipeline(ui, self.dry_run, &project, &template, &steps)
    }
}
