//! The user's library of reusable resources and project templates.
//!
//! Layout under the data directory:
//!
//! ```text
//! resources/macros/<name>.sty
//! resources/citations/<name>.bib
//! resources/styles/<name>.sty
//! templates/<name>/document.tex
//! templates/<name>/template.yml
//! support/<file>                  (optional overrides of built-in support files)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TexprojectError};
use crate::resources;

use super::dict::TemplateDict;
use super::kind::ResourceKind;

/// Document body of a project template.
pub const TEMPLATE_DOCUMENT: &str = "document.tex";
/// Template dictionary of a project template.
pub const TEMPLATE_DICT: &str = "template.yml";

/// Support files rendered into projects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportFile {
    Classinfo,
    Bibinfo,
    ProjectMacro,
    Gitignore,
    PreCommit,
    BuildLatex,
    ArxivAutotex,
}

impl SupportFile {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Classinfo => "classinfo.tex",
            Self::Bibinfo => "bibinfo.tex",
            Self::ProjectMacro => "project_macro_file.tex",
            Self::Gitignore => "gitignore",
            Self::PreCommit => "pre-commit",
            Self::BuildLatex => "build_latex.yml",
            Self::ArxivAutotex => "arxiv_autotex.txt",
        }
    }
}

/// Where a rendered file's template comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Support(SupportFile),
    /// The `document.tex` of a named project template.
    Document(String),
}

impl TemplateSource {
    /// Short name used in messages and render errors.
    pub fn label(&self) -> String {
        match self {
            Self::Support(file) => format!("support/{}", file.file_name()),
            Self::Document(name) => format!("templates/{}/{}", name, TEMPLATE_DOCUMENT),
        }
    }
}

/// Read access to the resource library rooted at the user data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Library {
    root: PathBuf,
}

impl Library {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resource_dir(&self, kind: ResourceKind) -> PathBuf {
        self.root.join("resources").join(kind.dir_name())
    }

    pub fn resource_path(&self, kind: ResourceKind, name: &str) -> PathBuf {
        self.resource_dir(kind)
            .join(format!("{}{}", name, kind.suffix()))
    }

    /// Installed resource names of one kind, sorted.
    pub fn list(&self, kind: ResourceKind) -> Result<Vec<String>> {
        let dir = self.resource_dir(kind);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry?;
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                continue;
            };
            if let Some(stem) = file_name.strip_suffix(kind.suffix()) {
                if !stem.is_empty() && entry.path().is_file() {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn template_dir(&self, name: &str) -> PathBuf {
        self.root.join("templates").join(name)
    }

    /// Complete templates (those with both a document and a dictionary), sorted.
    pub fn list_templates(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(self.root.join("templates")) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.join(TEMPLATE_DOCUMENT).is_file() && path.join(TEMPLATE_DICT).is_file() {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Load the template dictionary of template `name`.
    pub fn load_template(&self, name: &str) -> Result<TemplateDict> {
        let dir = self.template_dir(name);
        if !dir.join(TEMPLATE_DOCUMENT).is_file() || !dir.join(TEMPLATE_DICT).is_file() {
            return Err(TexprojectError::TemplateMissing {
                name: name.to_string(),
                path: dir,
            });
        }
        TemplateDict::load(&dir.join(TEMPLATE_DICT))
    }

    /// Text of a template source. User overrides in `support/` win over the
    /// built-in support files.
    pub fn read_source(&self, source: &TemplateSource) -> Result<String> {
        match source {
            TemplateSource::Support(file) => {
                let user = self.root.join("support").join(file.file_name());
                if user.is_file() {
                    return Ok(fs::read_to_string(user)?);
                }
                Ok(resources::support_file(file.file_name())?.to_string())
            }
            TemplateSource::Document(name) => {
                let path = self.template_dir(name).join(TEMPLATE_DOCUMENT);
                fs::read_to_string(&path).map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        TexprojectError::TemplateMissing {
                            name: name.clone(),
                            path,
                        }
                    } else {
                        TexprojectError::Io(e)
                    }
                })
            }
        }
    }
}
