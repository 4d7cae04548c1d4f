//! Validate command implementation.
//!
//! The `tpr validate` command compiles the project in a scratch directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::cli::args::ValidateArgs;
use crate::error::Result;
use crate::steps::LatexCompiler;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::pipeline::{open_initialized, run_pipeline};

/// The validate command implementation.
pub struct ValidateCommand {
    project_root: PathBuf,
    args: ValidateArgs,
    dry_run: bool,
}

impl ValidateCommand {
    /// Create a new validate command.
    pub fn new(project_root: &Path, args: ValidateArgs, dry_run: bool) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            dry_run,
        }
    }

    fn outputs(&self) -> BTreeMap<String, PathBuf> {
        [(".pdf", &self.args.pdf), (".log", &self.args.logfile)]
            .into_iter()
            .filter_map(|(suffix, path)| {
                path.as_ref()
                    .map(|p| (suffix.to_string(), self.project_root.join(p)))
            })
            .collect()
    }
}

impl Command for ValidateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (project, template) = open_initialized(&self.project_root)?;
        let steps = crate::steps![LatexCompiler {
            outputs: self.outputs(),
        }];
        run_pipeline(ui, self.dry_run, &project, &template, &steps)
    }
}
