//! Import command implementation.
//!
//! The `tpr import` command copies resources into the project, by name from
//! the library or from explicit paths, replacing existing copies.

use std::path::{Path, PathBuf};

use crate::cli::args::ImportArgs;
use crate::control::Step;
use crate::error::{Result, TexprojectError};
use crate::steps::{
    GitignoreWriter, InfoFileWriter, NameSequenceLinker, PathSequenceLinker, PrecommitWriter,
    TemplateDictWriter,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::pipeline::{check_installed, open_initialized, run_pipeline};

/// The import command implementation.
pub struct ImportCommand {
    project_root: PathBuf,
    args: ImportArgs,
    dry_run: bool,
}

impl ImportCommand {
    /// Create a new import command.
    pub fn new(project_root: &Path, args: ImportArgs, dry_run: bool) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            dry_run,
        }
    }

    fn nothing_requested(&self) -> bool {
        self.args.resources.is_empty()
            && self.args.paths_by_kind().iter().all(|(_, p)| p.is_empty())
            && !self.args.gitignore
            && !self.args.pre_commit
    }
}

impl Command for ImportCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if self.nothing_requested() {
            return Err(TexprojectError::InvalidArgument {
                message: "Nothing to import.".to_string(),
            });
        }
        let (project, template) = open_initialized(&self.project_root)?;
        let library = project.library();

        let mut steps: Vec<Box<dyn Step>> = Vec::new();
        for (kind, names) in self.args.resources.by_kind() {
            check_installed(&library, kind, names)?;
            if !names.is_empty() {
                steps.push(Box::new(NameSequenceLinker::new(kind, names.to_vec(), true)));
            }
        }
        for (kind, paths) in self.args.paths_by_kind() {
            if !paths.is_empty() {
                steps.push(Box::new(PathSequenceLinker {
                    kind,
                    paths: paths.iter().map(|p| self.project_root.join(p)).collect(),
                    force: true,
                }));
            }
        }
        steps.push(Box::new(InfoFileWriter));
        steps.push(Box::new(TemplateDictWriter));
        if self.args.gitignore {
            steps.push(Box::new(GitignoreWriter { force: true }));
        }
        if self.args.pre_commit {
            steps.push(Box::new(PrecommitWriter { force: true }));
        }

        run_pipeline(ui, self.dry_run, &project, &template, &steps)
    }
}
