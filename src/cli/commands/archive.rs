//! Archive command implementation.
//!
//! The `tpr archive` command exports the project as a compressed archive.

use std::path::{Path, PathBuf};

use crate::cli::args::ArchiveArgs;
use crate::error::{Result, TexprojectError};
use crate::steps::{ArchiveFormat, ArchiveWriter};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::pipeline::{open_initialized, run_pipeline};

/// The archive command implementation.
pub struct ArchiveCommand {
    project_root: PathBuf,
    args: ArchiveArgs,
    dry_run: bool,
}

impl ArchiveCommand {
    /// Create a new archive command.
    pub fn new(project_root: &Path, args: ArchiveArgs, dry_run: bool) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            dry_run,
        }
    }

    /// Refuse to replace an existing archive without `--force`.
    fn check_output(&self) -> Result<()> {
        let (_, output) =
            ArchiveFormat::resolve(&self.project_root.join(&self.args.output), self.args.format);
        if output.exists() && !self.args.force {
            return Err(TexprojectError::InvalidArgument {
                message: format!(
                    "'{}' exists. Use -f / --force to overwrite.",
                    output.display()
                ),
            });
        }
        Ok(())
    }
}

impl Command for ArchiveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let (project, template) = open_initialized(&self.project_root)?;
        self.check_output()?;
        let steps = crate::steps![ArchiveWriter {
            output: self.args.output.clone(),
            format: self.args.format,
            mode: self.args.mode,
        }];
        run_pipeline(ui, self.dry_run, &project, &template, &steps)
    }
}
