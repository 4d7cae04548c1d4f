//! Init command implementation.
//!
//! The `tpr init` command creates a project from a template in the library.

use std::path::{Path, PathBuf};

use crate::cli::args::InitArgs;
use crate::config::Project;
use crate::error::{Result, TexprojectError};
use crate::steps::{InfoFileWriter, OutputFolderCreator, TemplateDictLinker};
use crate::template::TemplateState;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::pipeline::run_pipeline;

/// The init command implementation.
pub struct InitCommand {
    project_root: PathBuf,
    args: InitArgs,
    dry_run: bool,
}

impl InitCommand {
    /// Create a new init command.
    pub fn new(project_root: &Path, args: InitArgs, dry_run: bool) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            dry_run,
        }
    }
}

impl Command for InitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let project = Project::open(&self.project_root)?;
        if project.is_initialized() {
            return Err(TexprojectError::ProjectExists {
                path: self.project_root.clone(),
            });
        }
        let dict = project.library().load_template(&self.args.template)?;
        let template = TemplateState::new(dict, project.template_file());

        let steps = crate::steps![
            OutputFolderCreator {
                template: self.args.template.clone(),
            },
            TemplateDictLinker::new(false),
            InfoFileWriter,
        ];
        run_pipeline(ui, self.dry_run, &project, &template, &steps)
    }
}
