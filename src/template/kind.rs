//! Categories of linkable resources.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A category of reusable resource files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Macro,
    Citation,
    Style,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::Macro, Self::Citation, Self::Style];

    /// Directory name in both the resource library and the project data folder.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Macro => "macros",
            Self::Citation => "citations",
            Self::Style => "styles",
        }
    }

    /// File suffix of resources of this kind.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Macro | Self::Style => ".sty",
            Self::Citation => ".bib",
        }
    }

    /// Human readable description used in messages.
    pub fn user_str(self) -> &'static str {
        match self {
            Self::Macro => "macro file",
            Self::Citation => "citation file",
            Self::Style => "style file",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Macro => "macro",
            Self::Citation => "citation",
            Self::Style => "style",
        }
    }

    /// Path of a linked resource relative to the project data folder.
    pub fn data_name(self, name: &str) -> String {
        format!("{}/local-{}", self.dir_name(), name)
    }

    /// Recover a resource name from a linked file name such as `local-foo.sty`.
    pub fn linked_name(self, file_name: &str) -> Option<&str> {
        file_name
            .strip_prefix("local-")?
            .strip_suffix(self.suffix())
            .filter(|name| !name.is_empty())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "macro" | "macros" => Ok(Self::Macro),
            "citation" | "citations" => Ok(Self::Citation),
            "style" | "styles" => Ok(Self::Style),
            _ => Err(format!("unknown resource kind: {}", s)),
        }
    }
}
