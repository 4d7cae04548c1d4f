//! Shared handle to the template dictionary of one run.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::control::{Outcome, RuntimeClosure};
use crate::error::Result;
use crate::ui::MessageFormatter;

use super::dict::TemplateDict;
use super::kind::ResourceKind;
use super::modification::Modification;

/// The declarative state of a project during a pipeline run.
///
/// Steps read it freely. The only way to change it is
/// [`TemplateState::modification`], which wraps the change in a closure so
/// it happens inside an action and is previewed under dry run like any other
/// side effect.
#[derive(Debug, Clone)]
pub struct TemplateState {
    dict: Rc<RefCell<TemplateDict>>,
    path: PathBuf,
}

impl TemplateState {
    /// Wrap `dict`, persisted at `path`.
    pub fn new(dict: TemplateDict, path: PathBuf) -> Self {
        Self {
            dict: Rc::new(RefCell::new(dict)),
            path,
        }
    }

    /// Load the dictionary stored at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::new(TemplateDict::load(path)?, path.to_path_buf()))
    }

    /// File the dictionary is saved to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copy of the current dictionary.
    pub fn snapshot(&self) -> TemplateDict {
        self.dict.borrow().clone()
    }

    pub fn names(&self, kind: ResourceKind) -> Vec<String> {
        self.dict.borrow().names(kind).to_vec()
    }

    pub fn declares(&self, kind: ResourceKind, name: &str) -> bool {
        self.dict.borrow().declares(kind, name)
    }

    /// Write the current dictionary to its file, creating parent directories.
    pub fn save(&self) -> Result<()> {
        let yaml = self.dict.borrow().to_yaml()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, yaml)?;
        debug!("Saved template dict to {}", self.path.display());
        Ok(())
    }

    /// A closure that applies `modification` when run.
    pub fn modification(&self, modification: Modification, fmt: &MessageFormatter) -> RuntimeClosure {
        let dict = self.dict.borrow();
        let inferred = modification.applies_to(&dict);
        let message = if modification.is_noop(&dict) {
            fmt.info(&format!("{} Already declared, nothing to do.", modification))
        } else {
            fmt.info(&modification.to_string())
        };
        drop(dict);
        let state = self.clone();
        RuntimeClosure::new(message, inferred, move || state.apply(&modification))
    }

    fn apply(&self, modification: &Modification) -> Outcome {
        if let Modification::Reload = modification {
            return match TemplateDict::load(&self.path) {
                Ok(dict) => {
                    *self.dict.borrow_mut() = dict;
                    Outcome::success()
                }
                Err(e) => Outcome::from_error(e),
            };
        }
        match modification.apply(&mut self.dict.borrow_mut()) {
            Ok(()) => Outcome::success(),
            Err(message) => Outcome::failure().with_payload(message),
        }
    }
}
