//! The project's template dictionary.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TexprojectError};

use super::kind::ResourceKind;

/// Declared resources of a project, persisted as `template.yml`.
///
/// Besides the three ordered resource lists a template may carry arbitrary
/// keys (document class, bibliography style, ...) that are passed through to
/// rendering untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateDict {
    #[serde(default)]
    pub macros: Vec<String>,
    #[serde(default)]
    pub citations: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl TemplateDict {
    /// Declared names of one kind, in order.
    pub fn names(&self, kind: ResourceKind) -> &[String] {
        match kind {
            ResourceKind::Macro => &self.macros,
            ResourceKind::Citation => &self.citations,
            ResourceKind::Style => &self.styles,
        }
    }

    pub(crate) fn names_mut(&mut self, kind: ResourceKind) -> &mut Vec<String> {
        match kind {
            ResourceKind::Macro => &mut self.macros,
            ResourceKind::Citation => &mut self.citations,
            ResourceKind::Style => &mut self.styles,
        }
    }

    pub fn declares(&self, kind: ResourceKind, name: &str) -> bool {
        self.names(kind).iter().any(|n| n == name)
    }

    /// Parse a template dictionary from YAML.
    pub fn parse(content: &str, source: &Path) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| TexprojectError::ConfigParseError {
            path: source.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a template dictionary from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TexprojectError::ConfigNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                TexprojectError::Io(e)
            }
        })?;
        Self::parse(&content, path)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| TexprojectError::Other(e.into()))
    }
}
