//! List command implementation.
//!
//! The `tpr list` command shows what is installed in the user's library.

use crate::cli::args::{ListArgs, ListKind};
use crate::config::AppDirs;
use crate::error::{Result, TexprojectError};
use crate::template::{Library, ResourceKind};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    library: Library,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command over the user's library.
    pub fn new(args: ListArgs) -> Self {
        Self::with_library(Library::new(AppDirs::from_env().data_home), args)
    }

    pub fn with_library(library: Library, args: ListArgs) -> Self {
        Self { library, args }
    }

    fn names(&self) -> Result<Vec<String>> {
        match self.args.kind {
            ListKind::Macro => self.library.list(ResourceKind::Macro),
            ListKind::Citation => self.library.list(ResourceKind::Citation),
            ListKind::Style => self.library.list(ResourceKind::Style),
            ListKind::Template => self.library.list_templates(),
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let names = self.names()?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&names)
                .map_err(|e| TexprojectError::Other(e.into()))?;
            println!("{}", json);
            return Ok(CommandResult::success());
        }

        for name in &names {
            ui.message(name);
        }
        Ok(CommandResult::success())
    }
}
