//! Requested changes to the template dictionary.

use std::fmt;

use super::dict::TemplateDict;
use super::kind::ResourceKind;

/// One change to a [`TemplateDict`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modification {
    /// Insert `name` at `index` (clamped to the list length) unless it is
    /// already declared.
    Add {
        kind: ResourceKind,
        name: String,
        index: usize,
    },
    /// Remove the first occurrence of `name`.
    Remove { kind: ResourceKind, name: String },
    /// Replace every occurrence of `from` with `to`.
    Update {
        kind: ResourceKind,
        from: String,
        to: String,
    },
    /// Re-read the dictionary from disk.
    Reload,
}

impl Modification {
    pub fn add(kind: ResourceKind, name: impl Into<String>, index: usize) -> Self {
        Self::Add {
            kind,
            name: name.into(),
            index,
        }
    }

    pub fn remove(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self::Remove {
            kind,
            name: name.into(),
        }
    }

    pub fn update(kind: ResourceKind, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Update {
            kind,
            from: from.into(),
            to: to.into(),
        }
    }

    /// Whether applying to `dict` would leave it unchanged. Names are never
    /// declared twice, so adding a declared name does nothing.
    pub(crate) fn is_noop(&self, dict: &TemplateDict) -> bool {
        match self {
            Self::Add { kind, name, .. } => dict.declares(*kind, name),
            _ => false,
        }
    }

    /// Whether applying to `dict` is expected to succeed.
    pub(crate) fn applies_to(&self, dict: &TemplateDict) -> bool {
        match self {
            Self::Remove { kind, name } => dict.declares(*kind, name),
            _ => true,
        }
    }

    /// Apply an in-memory change. `Reload` is handled by the caller.
    pub(crate) fn apply(&self, dict: &mut TemplateDict) -> Result<(), String> {
        match self {
            Self::Add { kind, name, index } => {
                let names = dict.names_mut(*kind);
                if !names.contains(name) {
                    let at = (*index).min(names.len());
                    names.insert(at, name.clone());
                }
                Ok(())
            }
            Self::Remove { kind, name } => {
                let names = dict.names_mut(*kind);
                match names.iter().position(|n| n == name) {
                    Some(pos) => {
                        names.remove(pos);
                        Ok(())
                    }
                    None => Err(format!("{} '{}' is not in the template dict", kind, name)),
                }
            }
            Self::Update { kind, from, to } => {
                for n in dict.names_mut(*kind).iter_mut() {
                    if *n == *from {
                        *n = to.clone();
                    }
                }
                Ok(())
            }
            Self::Reload => Ok(()),
        }
    }
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add { kind, name, index } => write!(
                f,
                "Add {} '{}' to template dict in position {}.",
                kind, name, index
            ),
            Self::Remove { kind, name } => {
                write!(f, "Remove {} '{}' from template dict.", kind, name)
            }
            Self::Update { kind, from, to } => {
                write!(f, "Update {} '{}' to '{}' in template dict.", kind, from, to)
            }
            Self::Reload => write!(f, "Reload template dict from disk."),
        }
    }
}
