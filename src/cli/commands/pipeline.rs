//! Shared plumbing for commands that run a step pipeline.

use std::path::Path;

use crate::config::Project;
use crate::control::{RunOptions, Runner, Step};
use crate::error::{Result, TexprojectError};
use crate::template::{Library, ResourceKind, TemplateDict, TemplateState};
use crate::ui::UserInterface;

use super::dispatcher::CommandResult;

/// Open the initialized project at `root` with its template dictionary.
pub fn open_initialized(root: &Path) -> Result<(Project, TemplateState)> {
    let project = Project::open(root)?;
    if !project.is_initialized() {
        return Err(TexprojectError::ProjectNotFound {
            path: root.to_path_buf(),
        });
    }
    let template = TemplateState::load(&project.template_file())?;
    Ok((project, template))
}

/// Open `root`, with an empty dictionary if it is not a project.
pub fn open_any(root: &Path) -> Result<(Project, TemplateState)> {
    let project = Project::open(root)?;
    let template = if project.is_initialized() {
        TemplateState::load(&project.template_file())?
    } else {
        TemplateState::new(TemplateDict::default(), project.template_file())
    };
    Ok((project, template))
}

/// Fail with `UnknownResource` unless every name is installed.
pub fn check_installed(library: &Library, kind: ResourceKind, names: &[String]) -> Result<()> {
    if names.is_empty() {
        return Ok(());
    }
    let available = library.list(kind)?;
    match names.iter().find(|name| !available.contains(name)) {
        Some(name) => Err(TexprojectError::UnknownResource {
            kind: kind.as_str().to_string(),
            name: name.clone(),
            available: if available.is_empty() {
                "(none)".to_string()
            } else {
                available.join(", ")
            },
        }),
        None => Ok(()),
    }
}

/// Run `steps` once and turn the report into a command result.
pub fn run_pipeline(
    ui: &mut dyn UserInterface,
    dry_run: bool,
    project: &Project,
    template: &TemplateState,
    steps: &[Box<dyn Step>],
) -> Result<CommandResult> {
    let report = Runner::new(ui, RunOptions { dry_run }).execute(project, template, steps)?;
    if report.success() {
        Ok(CommandResult::success())
    } else {
        Ok(CommandResult::failure(report.exit_code()))
    }
}
