//! A project directory and the paths derived from its configuration.

use std::path::{Path, PathBuf};

use crate::config::loader::{load_merged_config, local_config_path, AppDirs};
use crate::config::schema::Config;
use crate::error::Result;
use crate::template::Library;

/// Name of the template dictionary inside the data folder.
pub const TEMPLATE_FILE: &str = "template.yml";

/// Root directory of a (possibly not yet initialized) project plus its
/// merged configuration.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    dirs: AppDirs,
    config: Config,
}

impl Project {
    /// Open the project at `root` using directories from the environment.
    pub fn open(root: &Path) -> Result<Self> {
        Self::open_with(root, AppDirs::from_env())
    }

    pub fn open_with(root: &Path, dirs: AppDirs) -> Result<Self> {
        let config = load_merged_config(root, &dirs)?;
        Ok(Self {
            root: root.to_path_buf(),
            dirs,
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dirs(&self) -> &AppDirs {
        &self.dirs
    }

    /// The user's resource library.
    pub fn library(&self) -> Library {
        Library::new(self.dirs.data_home.clone())
    }

    pub fn local_config_path(&self) -> Result<PathBuf> {
        local_config_path(&self.root, &self.dirs)
    }

    pub fn global_config_path(&self) -> PathBuf {
        self.dirs.global_config()
    }

    /// Name of the project data folder, relative to the root.
    pub fn data_folder(&self) -> &str {
        &self.config.render.project_data_folder
    }

    pub fn data_dir(&self) -> PathBuf {
        self.root.join(self.data_folder())
    }

    pub fn template_file(&self) -> PathBuf {
        self.data_dir().join(TEMPLATE_FILE)
    }

    pub fn classinfo(&self) -> PathBuf {
        self.data_dir()
            .join(format!("{}.tex", self.config.render.classinfo_file))
    }

    pub fn bibinfo(&self) -> PathBuf {
        self.data_dir()
            .join(format!("{}.tex", self.config.render.bibinfo_file))
    }

    /// Main document file name, e.g. `main.tex`.
    pub fn main_tex_name(&self) -> String {
        format!("{}.tex", self.config.render.default_tex_name)
    }

    pub fn main_tex(&self) -> PathBuf {
        self.root.join(self.main_tex_name())
    }

    pub fn project_macro(&self) -> PathBuf {
        self.root
            .join(format!("{}.sty", self.config.render.project_macro_file))
    }

    pub fn gitignore(&self) -> PathBuf {
        self.root.join(".gitignore")
    }

    pub fn build_latex(&self) -> PathBuf {
        self.root
            .join(".github")
            .join("workflows")
            .join("build_latex.yml")
    }

    pub fn pre_commit(&self) -> PathBuf {
        self.root.join(".git").join("hooks").join("pre-commit")
    }

    /// Support files written by `tpr git init`.
    pub fn git_files(&self) -> [PathBuf; 3] {
        [self.gitignore(), self.build_latex(), self.pre_commit()]
    }

    /// Whether `tpr init` has been run here.
    pub fn is_initialized(&self) -> bool {
        self.template_file().is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project(temp: &TempDir) -> Project {
        let dirs = AppDirs::new(temp.path().join("config"), temp.path().join("data"));
        Project::open_with(&temp.path().join("paper"), dirs).unwrap()
    }

    #[test]
    fn paths_follow_render_config() {
        let temp = TempDir::new().unwrap();
        let p = project(&temp);
        let root = temp.path().join("paper");

        assert_eq!(p.template_file(), root.join(".texproject/template.yml"));
        assert_eq!(p.classinfo(), root.join(".texproject/classinfo.tex"));
        assert_eq!(p.bibinfo(), root.join(".texproject/bibinfo.tex"));
        assert_eq!(p.main_tex(), root.join("main.tex"));
        assert_eq!(p.project_macro(), root.join("project-macros.sty"));
        assert_eq!(
            p.build_latex(),
            root.join(".github/workflows/build_latex.yml")
        );
    }

    #[test]
    fn local_config_renames_files() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("paper");
        fs::create_dir_all(root.join(".texproject")).unwrap();
        fs::write(
            root.join(".texproject/config.yml"),
            "render:\n  default_tex_name: draft\n",
        )
        .unwrap();

        assert_eq!(project(&temp).main_tex(), root.join("draft.tex"));
    }

    #[test]
    fn initialized_once_template_file_exists() {
        let temp = TempDir::new().unwrap();
        let p = project(&temp);
        assert!(!p.is_initialized());

        fs::create_dir_all(p.data_dir()).unwrap();
        fs::write(p.template_file(), "macros: []\n").unwrap();

        assert!(p.is_initialized());
    }
}
