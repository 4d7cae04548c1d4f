//! Configuration file discovery and loading.
//!
//! Merge order (later overrides earlier):
//! 1. Embedded defaults
//! 2. Global user config (`<config dir>/texproject/config.yml`)
//! 3. Project config (`<project>/<project_data_folder>/config.yml`)

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;

use crate::config::merger::merge_layers;
use crate::config::schema::Config;
use crate::error::{Result, TexprojectError};
use crate::resources;

/// Environment variable overriding the global configuration directory.
pub const CONFIG_DIR_ENV: &str = "TEXPROJECT_CONFIG_DIR";
/// Environment variable overriding the user data directory.
pub const DATA_DIR_ENV: &str = "TEXPROJECT_DATA_DIR";

/// Per-user directories used by texproject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppDirs {
    /// Holds the global `config.yml`.
    pub config_home: PathBuf,
    /// Holds the resource library, templates and support file overrides.
    pub data_home: PathBuf,
}

impl AppDirs {
    pub fn new(config_home: impl Into<PathBuf>, data_home: impl Into<PathBuf>) -> Self {
        Self {
            config_home: config_home.into(),
            data_home: data_home.into(),
        }
    }

    /// Resolve directories from the environment, falling back to the
    /// platform config and data directories.
    pub fn from_env() -> Self {
        let config_home = std::env::var_os(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| platform_dir(dirs::config_dir()));
        let data_home = std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| platform_dir(dirs::data_dir()));
        Self::new(config_home, data_home)
    }

    /// Path of the global configuration file.
    pub fn global_config(&self) -> PathBuf {
        self.config_home.join("config.yml")
    }
}

fn platform_dir(base: Option<PathBuf>) -> PathBuf {
    base.unwrap_or_else(|| PathBuf::from(".")).join("texproject")
}

/// Parse YAML content into a raw value, reporting `source` on failure.
pub fn parse_value(content: &str, source: &Path) -> Result<Value> {
    serde_yaml::from_str(content).map_err(|e| TexprojectError::ConfigParseError {
        path: source.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as a raw value. Missing files load as `Null`.
pub fn load_config_value(path: &Path) -> Result<Value> {
    match fs::read_to_string(path) {
        Ok(content) => parse_value(&content, path),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Value::Null),
        Err(e) => Err(TexprojectError::Io(e)),
    }
}

fn embedded_defaults() -> Result<Value> {
    parse_value(resources::default_config()?, Path::new("resources/config.yml"))
}

fn into_config(value: Value, source: &Path) -> Result<Config> {
    serde_yaml::from_value(value).map_err(|e| TexprojectError::ConfigParseError {
        path: source.to_path_buf(),
        message: format!("Failed to parse merged config: {}", e),
    })
}

/// Path of the project-local config file for `root`.
///
/// The data folder name itself is configurable, so it is read from the
/// defaults and global layers before the local layer is located.
pub fn local_config_path(root: &Path, dirs: &AppDirs) -> Result<PathBuf> {
    let base = merge_layers(&[embedded_defaults()?, load_config_value(&dirs.global_config())?]);
    let folder = base["render"]["project_data_folder"]
        .as_str()
        .unwrap_or(".texproject");
    Ok(root.join(folder).join("config.yml"))
}

/// Load and merge all configuration layers for the project at `root`.
pub fn load_merged_config(root: &Path, dirs: &AppDirs) -> Result<Config> {
    let global_path = dirs.global_config();
    let local_path = local_config_path(root, dirs)?;
    debug!(
        "Loading config layers: {} then {}",
        global_path.display(),
        local_path.display()
    );

    let merged = merge_layers(&[
        embedded_defaults()?,
        load_config_value(&global_path)?,
        load_config_value(&local_path)?,
    ]);
    into_config(merged, &local_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dirs_in(temp: &TempDir) -> AppDirs {
        AppDirs::new(temp.path().join("config"), temp.path().join("data"))
    }

    #[test]
    fn defaults_load_without_any_files() {
        let temp = TempDir::new().unwrap();
        let config = load_merged_config(&temp.path().join("project"), &dirs_in(&temp)).unwrap();

        assert_eq!(config.render.default_tex_name, "main");
        assert_eq!(config.render.project_data_folder, ".texproject");
        assert!(config
            .process
            .ignore_patterns
            .iter()
            .any(|p| p == "*.aux"));
        assert!(config.github.org.is_none());
    }

    #[test]
    fn global_overrides_defaults_and_local_overrides_global() {
        let temp = TempDir::new().unwrap();
        let dirs = dirs_in(&temp);
        let root = temp.path().join("project");

        fs::create_dir_all(&dirs.config_home).unwrap();
        fs::write(
            dirs.global_config(),
            "render:\n  default_tex_name: paper\ngithub:\n  org: acme\n",
        )
        .unwrap();
        fs::create_dir_all(root.join(".texproject")).unwrap();
        fs::write(
            root.join(".texproject/config.yml"),
            "render:\n  default_tex_name: thesis\n",
        )
        .unwrap();

        let config = load_merged_config(&root, &dirs).unwrap();

        assert_eq!(config.render.default_tex_name, "thesis");
        assert_eq!(config.render.classinfo_file, "classinfo");
        assert_eq!(config.github.org.as_deref(), Some("acme"));
    }

    #[test]
    fn global_data_folder_moves_local_config() {
        let temp = TempDir::new().unwrap();
        let dirs = dirs_in(&temp);
        fs::create_dir_all(&dirs.config_home).unwrap();
        fs::write(
            dirs.global_config(),
            "render:\n  project_data_folder: tpr-data\n",
        )
        .unwrap();

        let path = local_config_path(Path::new("/p"), &dirs).unwrap();

        assert_eq!(path, Path::new("/p/tpr-data/config.yml"));
    }

    #[test]
    fn invalid_global_config_reports_path() {
        let temp = TempDir::new().unwrap();
        let dirs = dirs_in(&temp);
        fs::create_dir_all(&dirs.config_home).unwrap();
        fs::write(dirs.global_config(), "render: [").unwrap();

        let err = load_merged_config(temp.path(), &dirs).unwrap_err();

        assert!(matches!(err, TexprojectError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.yml"));
    }

    #[test]
    fn missing_file_loads_as_null() {
        let value = load_config_value(Path::new("/nonexistent/config.yml")).unwrap();
        assert!(value.is_null());
    }
}
