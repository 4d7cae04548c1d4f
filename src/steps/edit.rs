//! Interactive editing of project files.

use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use crate::control::{Closures, Outcome, RuntimeClosure, Step, StepContext};
use crate::shell::{editor_command, execute_shell, CommandOptions};
use crate::template::Modification;

/// Which file to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    /// The project's template dictionary.
    Template,
    /// The project configuration file.
    Local,
    /// The user configuration file.
    Global,
}

/// Open a file in the user's editor.
///
/// After the template dictionary is edited a reload is queued, so later
/// steps in the same run see the new contents.
#[derive(Debug, Clone)]
pub struct FileEditor {
    pub target: EditTarget,
    /// Editor command; `$VISUAL`, then `$EDITOR` by default.
    pub editor: Option<String>,
}

impl FileEditor {
    pub fn new(target: EditTarget) -> Self {
        Self {
            target,
            editor: None,
        }
    }

    fn path(&self, ctx: &StepContext<'_>) -> crate::error::Result<PathBuf> {
        match self.target {
            EditTarget::Template => Ok(ctx.project.template_file()),
            EditTarget::Local => ctx.project.local_config_path(),
            EditTarget::Global => Ok(ctx.project.global_config_path()),
        }
    }
}

impl Step for FileEditor {
    fn name(&self) -> &'static str {
        "edit-file"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        let path = match self.path(ctx) {
            Ok(path) => path,
            Err(e) => return Box::new(std::iter::once(RuntimeClosure::fail(ctx.fmt.error(&e.to_string())))),
        };

        let editor = self.editor.clone().unwrap_or_else(editor_command);
        let reload = (self.target == EditTarget::Template).then(|| ctx.state.requests());
        let cwd = ctx.project.root().to_path_buf();
        let message = ctx.fmt.edit(&path);
        let error = ctx.fmt.error("Could not open file for editing!");

        Box::new(std::iter::once(RuntimeClosure::new(message, true, move || {
            if let Some(parent) = path.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    return Outcome::from_error(e);
                }
            }
            let options = CommandOptions {
                cwd: Some(cwd),
                ..Default::default()
            };
            let command = format!("{} \"$1\"", editor);
            match execute_shell(&command, &[OsStr::new(&path)], &options) {
                Ok(result) if result.success => {
                    if let Some(requests) = reload {
                        requests.enqueue(Modification::Reload);
                    }
                    Outcome::success()
                }
                _ => Outcome::failure().with_payload(error),
            }
        })))
    }
}
