//! Template command implementation.
//!
//! `tpr template add` and `tpr template remove` change which resources the
//! project declares, then re-link and re-render.

use std::path::{Path, PathBuf};

use crate::cli::args::{TemplateAction, TemplateArgs};
use crate::error::{Result, TexprojectError};
use crate::steps::{
    ApplyModificationSequence, InfoFileWriter, TemplateDictLinker, TemplateDictWriter,
};
use crate::template::Modification;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::pipeline::{check_installed, open_initialized, run_pipeline};

/// The template command implementation.
pub struct TemplateCommand {
    project_root: PathBuf,
    args: TemplateArgs,
    dry_run: bool,
}

impl TemplateCommand {
    /// Create a new template command.
    pub fn new(project_root: &Path, args: TemplateArgs, dry_run: bool) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            dry_run,
        }
    }
}

impl Command for TemplateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let resources = match &self.args.action {
            TemplateAction::Add(args) => &args.resources,
            TemplateAction::Remove(args) => &args.resources,
        };
        if resources.is_empty() {
            return Err(TexprojectError::InvalidArgument {
                message: "No resources given.".to_string(),
            });
        }

        let (project, template) = open_initialized(&self.project_root)?;
        let library = project.library();

        let mut modifications = Vec::new();
        for (kind, names) in resources.by_kind() {
            match &self.args.action {
                TemplateAction::Add(args) => {
                    check_installed(&library, kind, names)?;
                    // Insert in the given order starting at the requested index.
                    modifications.extend(
                        names
                            .iter()
                            .enumerate()
                            .map(|(i, name)| Modification::add(kind, name.clone(), args.index + i)),
                    );
                }
                TemplateAction::Remove(_) => {
                    modifications.extend(names.iter().map(|name| Modification::remove(kind, name.clone())));
                }
            }
        }

        let steps = crate::steps![
            ApplyModificationSequence::new(modifications),
            TemplateDictLinker::new(false),
            InfoFileWriter,
            TemplateDictWriter,
        ];
        run_pipeline(ui, self.dry_run, &project, &template, &steps)
    }
}
