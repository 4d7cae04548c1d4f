//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::steps::{ArchiveFormat, ExportMode, Visibility};
use crate::template::ResourceKind;

/// tpr - Create, manage and export LaTeX projects from reusable templates.
#[derive(Debug, Parser)]
#[command(name = "tpr")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Run as if tpr was started in DIR
    #[arg(short = 'C', long = "dir", global = true, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Show what would be done without changing anything
    #[arg(short = 'n', long, global = true)]
    pub dry_run: bool,

    /// Also show the output of external commands
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only report failures
    #[arg(short = 'q', long, global = true)]
    pub silent: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project from a template
    Init(InitArgs),

    /// Copy resources into the project without declaring them
    Import(ImportArgs),

    /// Change the resources declared by the project
    Template(TemplateArgs),

    /// Edit the project template or a configuration file
    Config(ConfigArgs),

    /// Compile the project to check that it builds
    Validate(ValidateArgs),

    /// Export the project as a compressed archive
    Archive(ArchiveArgs),

    /// Manage the git repository of the project
    Git(GitArgs),

    /// List installed resources or templates
    List(ListArgs),

    /// Maintenance utilities
    Util(UtilArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Resource names grouped by kind.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ResourceArgs {
    /// Macro file name (repeatable)
    #[arg(long = "macro", value_name = "NAME")]
    pub macros: Vec<String>,

    /// Citation file name (repeatable)
    #[arg(long = "citation", value_name = "NAME")]
    pub citations: Vec<String>,

    /// Style file name (repeatable)
    #[arg(long = "style", value_name = "NAME")]
    pub styles: Vec<String>,
}

impl ResourceArgs {
    pub fn by_kind(&self) -> [(ResourceKind, &[String]); 3] {
        [
            (ResourceKind::Macro, &self.macros),
            (ResourceKind::Citation, &self.citations),
            (ResourceKind::Style, &self.styles),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.by_kind().iter().all(|(_, names)| names.is_empty())
    }
}

/// Arguments for the `init` command.
#[derive(Debug, Clone, clap::Args)]
pub struct InitArgs {
    /// Template to create the project from
    pub template: String,
}

/// Arguments for the `import` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub resources: ResourceArgs,

    /// Macro file to import by path (repeatable)
    #[arg(long, value_name = "PATH")]
    pub macro_path: Vec<PathBuf>,

    /// Citation file to import by path (repeatable)
    #[arg(long, value_name = "PATH")]
    pub citation_path: Vec<PathBuf>,

    /// Style file to import by path (repeatable)
    #[arg(long, value_name = "PATH")]
    pub style_path: Vec<PathBuf>,

    /// Rewrite the .gitignore file
    #[arg(long)]
    pub gitignore: bool,

    /// Rewrite the pre-commit hook
    #[arg(long)]
    pub pre_commit: bool,
}

impl ImportArgs {
    pub fn paths_by_kind(&self) -> [(ResourceKind, &[PathBuf]); 3] {
        [
            (ResourceKind::Macro, &self.macro_path),
            (ResourceKind::Citation, &self.citation_path),
            (ResourceKind::Style, &self.style_path),
        ]
    }
}

/// Arguments for the `template` command.
#[derive(Debug, Clone, clap::Args)]
pub struct TemplateArgs {
    #[command(subcommand)]
    pub action: TemplateAction,
}

#[derive(Debug, Clone, Subcommand)]
pub enum TemplateAction {
    /// Declare resources and link them
    Add(TemplateAddArgs),

    /// Stop declaring resources
    Remove(TemplateRemoveArgs),
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct TemplateAddArgs {
    #[command(flatten)]
    pub resources: ResourceArgs,

    /// Position to insert the new names at
    #[arg(long, default_value_t = 0)]
    pub index: usize,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct TemplateRemoveArgs {
    #[command(flatten)]
    pub resources: ResourceArgs,
}

/// Arguments for the `config` command.
#[derive(Debug, Clone, clap::Args)]
#[command(group(ArgGroup::new("target").args(["template", "local", "global"])))]
pub struct ConfigArgs {
    /// Edit the project template dictionary (default)
    #[arg(long)]
    pub template: bool,

    /// Edit the project configuration
    #[arg(long)]
    pub local: bool,

    /// Edit the user configuration
    #[arg(long)]
    pub global: bool,
}

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ValidateArgs {
    /// Keep the compiled PDF at this path
    #[arg(long, value_name = "PATH")]
    pub pdf: Option<PathBuf>,

    /// Keep the LaTeX log at this path
    #[arg(long, value_name = "PATH")]
    pub logfile: Option<PathBuf>,
}

/// Arguments for the `archive` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ArchiveArgs {
    /// Archive to write; the suffix selects the compression unless --format is given
    pub output: PathBuf,

    /// Compression, overriding the output suffix
    #[arg(long, value_enum)]
    pub format: Option<ArchiveFormat>,

    /// Overwrite an existing archive
    #[arg(short, long)]
    pub force: bool,

    /// What to include
    #[arg(long, value_enum, default_value_t = ExportMode::Source)]
    pub mode: ExportMode,
}

/// Arguments for the `git` command.
#[derive(Debug, Clone, clap::Args)]
pub struct GitArgs {
    #[command(subcommand)]
    pub action: GitAction,
}

#[derive(Debug, Clone, Subcommand)]
pub enum GitAction {
    /// Create a repository with support files and a GitHub remote
    Init(GitInitArgs),
}

/// Arguments for `git init`. Missing values are asked for.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct GitInitArgs {
    /// Repository name, `owner/name` or a name under `github.org`
    #[arg(long)]
    pub repo_name: Option<String>,

    /// Repository description
    #[arg(long)]
    pub repo_description: Option<String>,

    /// Repository visibility
    #[arg(long, value_enum)]
    pub repo_visibility: Option<Visibility>,

    /// Enable the repository wiki
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub wiki: Option<bool>,

    /// Enable repository issues
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub issues: Option<bool>,
}

/// What `list` shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListKind {
    Macro,
    Citation,
    Style,
    Template,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ListArgs {
    /// What to list
    #[arg(value_enum)]
    pub kind: ListKind,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `util` command.
#[derive(Debug, Clone, clap::Args)]
pub struct UtilArgs {
    #[command(subcommand)]
    pub action: UtilAction,
}

#[derive(Debug, Clone, Subcommand)]
pub enum UtilAction {
    /// Re-link declared resources and re-render generated files
    Refresh(RefreshArgs),

    /// Remove linked resources that are no longer declared
    Clean(CleanArgs),
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct RefreshArgs {
    /// Overwrite existing linked files
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct CleanArgs {
    /// Also remove .gitignore, the build workflow and the pre-commit hook
    #[arg(long)]
    pub remove_git_files: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
