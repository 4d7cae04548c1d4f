//! Layered configuration and project paths.
//!
//! Configuration is YAML, merged in this order:
//! 1. Embedded defaults
//! 2. Global user config (`<config dir>/texproject/config.yml`)
//! 3. Project config (`<project_data_folder>/config.yml`)
//!
//! # Example
//!
//! ```
//! use texproject::config::{AppDirs, Project};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let dirs = AppDirs::new(temp.path().join("config"), temp.path().join("data"));
//! let project = Project::open_with(temp.path(), dirs).unwrap();
//! assert_eq!(project.config().render.default_tex_name, "main");
//! assert!(!project.is_initialized());
//! ```

pub mod loader;
pub mod merger;
pub mod project;
pub mod schema;

pub use loader::{
    load_config_value, load_merged_config, local_config_path, AppDirs, CONFIG_DIR_ENV,
    DATA_DIR_ENV,
};
pub use merger::{deep_merge, merge_layers};
pub use project::{Project, TEMPLATE_FILE};
pub use schema::{Config, GithubConfig, ProcessConfig, RenderConfig};
