//! Concrete pipeline steps.
//!
//! Every `tpr` subcommand is a list of these handed to the
//! [`Runner`](crate::control::Runner):
//!
//! - [`link`] - copy library resources into the project
//! - [`modify`] - change the template dictionary
//! - [`render`] - render support files and project templates
//! - [`fs`] - file operations and cleanup of stale links
//! - [`process`] - external commands and LaTeX compilation
//! - [`git`] - repository setup
//! - [`export`] - archives for sharing or arXiv submission
//! - [`edit`] - open files in the user's editor
//!
//! # Example
//!
//! ```no_run
//! use texproject::config::Project;
//! use texproject::control::{RunOptions, Runner};
//! use texproject::steps::{InfoFileWriter, TemplateDictLinker};
//! use texproject::template::TemplateState;
//! use texproject::ui::NonInteractiveUI;
//! use texproject::steps;
//! use std::path::Path;
//!
//! let project = Project::open(Path::new(".")).unwrap();
//! let template = TemplateState::load(&project.template_file()).unwrap();
//! let mut ui = NonInteractiveUI::new(Default::default());
//! let report = Runner::new(&mut ui, RunOptions { dry_run: true })
//!     .execute(&project, &template, &steps![TemplateDictLinker::new(false), InfoFileWriter])
//!     .unwrap();
//! println!("exit code {}", report.exit_code());
//! ```

pub mod edit;
pub mod export;
pub mod fs;
pub mod git;
pub mod link;
pub mod modify;
pub mod process;
pub mod render;

pub use edit::{EditTarget, FileEditor};
pub use export::{ArchiveFormat, ArchiveWriter, ExportMode, ModifyArxiv};
pub use fs::{copy_directory, remove_path, rename_path, CleanProject, IgnorePatterns};
pub use git::{CreateGithubRepo, InitializeGitRepo, RepoSettings, Visibility};
pub use link::{linked_path, NameSequenceLinker, PathSequenceLinker, TemplateDictLinker};
pub use modify::{ApplyModificationSequence, ApplyQueuedModifications};
pub use process::{compile_latex, copy_output, run_command, LatexCompiler, RunCommand};
pub use render::{
    GitFileWriter, GitignoreWriter, InfoFileWriter, LatexBuildWriter, OutputFolderCreator,
    PrecommitWriter, TemplateDictWriter, TemplateWriter,
};
