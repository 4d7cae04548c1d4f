//! Git command implementation.
//!
//! `tpr git init` writes the git support files, creates a local repository
//! and publishes it on GitHub with the `gh` CLI.

use std::path::{Path, PathBuf};

use crate::cli::args::{GitAction, GitArgs, GitInitArgs};
use crate::error::Result;
use crate::steps::{
    CreateGithubRepo, GitignoreWriter, InitializeGitRepo, LatexBuildWriter, PrecommitWriter,
    RepoSettings, Visibility,
};
use crate::ui::{Prompt, UserInterface};

use super::dispatcher::{Command, CommandResult};
use super::pipeline::{open_initialized, run_pipeline};

/// The git command implementation.
pub struct GitCommand {
    project_root: PathBuf,
    args: GitArgs,
    dry_run: bool,
}

impl GitCommand {
    /// Create a new git command.
    pub fn new(project_root: &Path, args: GitArgs, dry_run: bool) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            dry_run,
        }
    }
}

/// Fill in every setting missing from `args` by asking the user.
fn repo_settings(
    args: &GitInitArgs,
    default_name: &str,
    ui: &mut dyn UserInterface,
) -> Result<RepoSettings> {
    let name = match &args.repo_name {
        Some(name) => name.clone(),
        None => ui
            .prompt(&Prompt::input("repo_name", "Repository name", Some(default_name)))?
            .as_string(),
    };
    let description = match &args.repo_description {
        Some(description) => description.clone(),
        None => ui
            .prompt(&Prompt::input("repo_description", "Repository description", Some("")))?
            .as_string(),
    };
    let visibility = match args.repo_visibility {
        Some(visibility) => visibility,
        None => {
            let answer = ui.prompt(&Prompt::select(
                "repo_visibility",
                "Repository visibility",
                &["public", "private"],
                "private",
            ))?;
            if answer.as_string() == "public" {
                Visibility::Public
            } else {
                Visibility::Private
            }
        }
    };
    let mut confirm = |key: &str, question: &str, given: Option<bool>| -> Result<bool> {
        match given {
            Some(value) => Ok(value),
            None => Ok(ui
                .prompt(&Prompt::confirm(key, question, false))?
                .as_bool()
                .unwrap_or(false)),
        }
    };
    let wiki = confirm("wiki", "Enable the wiki?", args.wiki)?;
    let issues = confirm("issues", "Enable issues?", args.issues)?;

    Ok(RepoSettings {
        name,
        description,
        visibility,
        wiki,
        issues,
    })
}

impl Command for GitCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let GitAction::Init(args) = &self.args.action;
        let (project, template) = open_initialized(&self.project_root)?;

        let default_name = project
            .root()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let settings = repo_settings(args, &default_name, ui)?;
        tracing::debug!(?settings, "Resolved repository settings");

        let steps = crate::steps![
            GitignoreWriter { force: false },
            LatexBuildWriter { force: false },
            InitializeGitRepo,
            PrecommitWriter { force: false },
            CreateGithubRepo { settings },
        ];
        run_pipeline(ui, self.dry_run, &project, &template, &steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn given_values_are_not_prompted() {
        let mut ui = MockUI::new();
        let args = GitInitArgs {
            repo_name: Some("me/paper".into()),
            repo_description: Some("A paper".into()),
            repo_visibility: Some(Visibility::Public),
            wiki: Some(true),
            issues: Some(false),
        };
        let settings = repo_settings(&args, "paper", &mut ui).unwrap();

        assert!(ui.prompts_shown().is_empty());
        assert_eq!(settings.name, "me/paper");
        assert_eq!(settings.visibility, Visibility::Public);
        assert!(settings.wiki);
        assert!(!settings.issues);
    }

    #[test]
    fn missing_values_are_prompted_with_defaults() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("repo_visibility", "public");
        ui.set_prompt_response("issues", "yes");
        let settings = repo_settings(&GitInitArgs::default(), "paper", &mut ui).unwrap();

        assert_eq!(
            ui.prompts_shown(),
            ["repo_name", "repo_description", "repo_visibility", "wiki", "issues"]
        );
        assert_eq!(settings.name, "paper");
        assert_eq!(settings.description, "");
        assert_eq!(settings.visibility, Visibility::Public);
        assert!(!settings.wiki);
        assert!(settings.issues);
    }
}
