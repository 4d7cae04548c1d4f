//! Git repository setup and GitHub repository creation.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::control::{Closures, RuntimeClosure, Step, StepContext};

use super::process::run_command;

/// The `.git` directory governing `path`, searching upwards.
pub fn find_git_dir(path: &Path) -> Option<PathBuf> {
    path.ancestors()
        .map(|dir| dir.join(".git"))
        .find(|git| git.exists())
}

pub fn is_git_repo(path: &Path) -> bool {
    find_git_dir(path).is_some()
}

/// Whether the repository at `path` has a remote called `origin`.
pub fn has_remote(path: &Path) -> bool {
    let Some(git_dir) = find_git_dir(path) else {
        return false;
    };
    fs::read_to_string(git_dir.join("config"))
        .map(|config| {
            config
                .lines()
                .any(|line| line.trim() == "[remote \"origin\"]")
        })
        .unwrap_or(false)
}

/// Create a local repository with an initial commit.
///
/// Nothing happens if the project is already inside a repository.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitializeGitRepo;

impl Step for InitializeGitRepo {
    fn name(&self) -> &'static str {
        "git-init"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        let root = ctx.project.root();
        if is_git_repo(root) {
            return Box::new(std::iter::once(RuntimeClosure::success(
                ctx.fmt.info("Using existing git repository"),
            )));
        }
        let commands = [
            vec!["git", "init"],
            vec!["git", "add", "-A"],
            vec!["git", "commit", "-m", "Initialize new texproject repository."],
        ];
        Box::new(commands.into_iter().map(move |argv| {
            run_command(
                ctx.fmt,
                argv.into_iter().map(String::from).collect(),
                root,
            )
        }))
    }

    fn abort_on_failure(&self) -> bool {
        true
    }
}

/// Visibility of a new GitHub repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => f.write_str("public"),
            Self::Private => f.write_str("private"),
        }
    }
}

/// Settings for `gh repo create`.
#[derive(Debug, Clone, Default)]
pub struct RepoSettings {
    /// `owner/name`, or a bare name resolved against `github.org`.
    pub name: String,
    pub description: String,
    pub visibility: Visibility,
    pub wiki: bool,
    pub issues: bool,
}

/// Create a GitHub repository for the project and push to it.
#[derive(Debug, Clone)]
pub struct CreateGithubRepo {
    pub settings: RepoSettings,
}

impl CreateGithubRepo {
    /// Fully qualified repository name, if `name` can be resolved.
    pub fn resolve_name(name: &str, org: Option<&str>) -> Option<String> {
        match name.split('/').collect::<Vec<_>>().as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => Some(name.to_string()),
            [repo] if !repo.is_empty() => org
                .filter(|org| !org.is_empty())
                .map(|org| format!("{}/{}", org, repo)),
            _ => None,
        }
    }

    fn argv(&self, root: &Path, name: String) -> Vec<String> {
        let settings = &self.settings;
        let mut argv: Vec<String> = vec![
            "gh".into(),
            "repo".into(),
            "create".into(),
            "--description".into(),
            settings.description.clone(),
            "--source".into(),
            root.display().to_string(),
            "--remote".into(),
            "origin".into(),
            "--push".into(),
            name,
            format!("--{}", settings.visibility),
        ];
        if !settings.wiki {
            argv.push("--disable-wiki".into());
        }
        if !settings.issues {
            argv.push("--disable-issues".into());
        }
        argv
    }
}

impl Step for CreateGithubRepo {
    fn name(&self) -> &'static str {
        "github-create"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        Box::new(std::iter::once_with(move || {
            let root = ctx.project.root();
            if has_remote(root) {
                return RuntimeClosure::fail(ctx.fmt.error("Remote repository already exists!"));
            }
            let org = ctx.project.config().github.org.as_deref();
            match Self::resolve_name(&self.settings.name, org) {
                Some(name) => run_command(ctx.fmt, self.argv(root, name), root),
                None => RuntimeClosure::fail(ctx.fmt.error("Invalid remote repository name!")),
            }
        }))
    }

    fn abort_on_failure(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps;
    use crate::steps::testing::Fixture;

    #[test]
    fn repository_name_resolution() {
        assert_eq!(
            CreateGithubRepo::resolve_name("me/paper", None).as_deref(),
            Some("me/paper")
        );
        assert_eq!(
            CreateGithubRepo::resolve_name("paper", Some("lab")).as_deref(),
            Some("lab/paper")
        );
        assert_eq!(CreateGithubRepo::resolve_name("paper", None), None);
        assert_eq!(CreateGithubRepo::resolve_name("a/b/c", Some("lab")), None);
        assert_eq!(CreateGithubRepo::resolve_name("/paper", None), None);
    }

    #[test]
    fn gh_argv_reflects_settings() {
        let step = CreateGithubRepo {
            settings: RepoSettings {
                name: "me/paper".into(),
                description: "A paper".into(),
                visibility: Visibility::Public,
                wiki: true,
                issues: false,
            },
        };
        let argv = step.argv(Path::new("/p"), "me/paper".into());
        assert_eq!(
            argv,
            [
                "gh", "repo", "create", "--description", "A paper", "--source", "/p", "--remote",
                "origin", "--push", "me/paper", "--public", "--disable-issues"
            ]
        );
    }

    #[test]
    fn remote_detection_reads_git_config() {
        let fx = Fixture::new();
        let git = fx.project.root().join(".git");
        fs::create_dir_all(&git).unwrap();
        assert!(is_git_repo(&fx.project.root().join("sub")));
        assert!(!has_remote(fx.project.root()));

        fs::write(git.join("config"), "[core]\n[remote \"origin\"]\n\turl = x\n").unwrap();
        assert!(has_remote(fx.project.root()));
    }

    #[test]
    fn existing_repo_is_reused() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.project.root().join(".git")).unwrap();

        let (report, ui) = fx.run(&steps![InitializeGitRepo], true);

        assert_eq!(report.results.len(), 1);
        assert!(ui.has_message("Using existing git repository"));
    }

    #[test]
    fn invalid_name_aborts_before_later_steps() {
        let fx = Fixture::new();
        fs::create_dir_all(fx.project.root().join(".git")).unwrap();
        let steps = steps![
            CreateGithubRepo {
                settings: RepoSettings {
                    name: "paper".into(),
                    ..Default::default()
                },
            },
            InitializeGitRepo,
        ];

        let (report, ui) = fx.run(&steps, false);

        assert_eq!(report.results.len(), 1);
        assert!(report.aborted.is_some());
        assert!(ui.has_message("Invalid remote repository name!"));
    }

    #[test]
    fn dry_run_previews_git_commands() {
        let fx = Fixture::new();
        // The temporary root must not sit inside another repository.
        if is_git_repo(fx.project.root()) {
            return;
        }

        let (report, ui) = fx.run(&steps![InitializeGitRepo], true);

        assert_eq!(report.results.len(), 3);
        assert!(ui.has_message("git commit -m 'Initialize new texproject repository.'"));
    }
}
