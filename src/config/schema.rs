//! Typed configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fully merged texproject configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Free-form user information (name, email, affiliation, ...) for templates.
    #[serde(default)]
    pub user: serde_yaml::Mapping,

    pub render: RenderConfig,

    pub process: ProcessConfig,

    #[serde(default)]
    pub github: GithubConfig,
}

/// File naming used when rendering a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Main document name without `.tex`.
    pub default_tex_name: String,
    /// Folder holding project data, relative to the project root.
    pub project_data_folder: String,
    /// Rendered document class file, without `.tex`.
    pub classinfo_file: String,
    /// Rendered bibliography file, without `.tex`.
    pub bibinfo_file: String,
    /// Project macro package, without `.sty`.
    pub project_macro_file: String,
    /// Text substitutions exposed to templates as `replace`.
    #[serde(default)]
    pub replace_text: BTreeMap<String, String>,
}

/// External process settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessConfig {
    /// Extra `latexmk` options.
    #[serde(default)]
    pub latexmk_compile_options: Vec<String>,
    /// File name patterns skipped when copying a project for export.
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Default owner for repositories given without `owner/`.
    pub org: Option<String>,
    /// Repository receiving build artifacts from CI.
    pub archive: Option<String>,
}
