//! Config command implementation.
//!
//! The `tpr config` command opens the project template or a configuration
//! file in the user's editor.

use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::control::Step;
use crate::error::Result;
use crate::steps::{
    ApplyQueuedModifications, EditTarget, FileEditor, InfoFileWriter, TemplateDictLinker,
    TemplateDictWriter,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::pipeline::{open_any, open_initialized, run_pipeline};

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    args: ConfigArgs,
    dry_run: bool,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, args: ConfigArgs, dry_run: bool) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            dry_run,
        }
    }

    fn target(&self) -> EditTarget {
        if self.args.local {
            EditTarget::Local
        } else if self.args.global {
            EditTarget::Global
        } else {
            EditTarget::Template
        }
    }
}

/// Steps for editing with `editor`. After the template is edited the
/// declared resources are linked and every generated file is rewritten, so
/// the saved dictionary agrees with the rendered info files.
fn pipeline(editor: FileEditor) -> Vec<Box<dyn Step>> {
    let refresh = editor.target == EditTarget::Template;
    let mut steps: Vec<Box<dyn Step>> = vec![Box::new(editor)];
    if refresh {
        steps.push(Box::new(ApplyQueuedModifications));
        steps.push(Box::new(TemplateDictLinker::new(false)));
        steps.push(Box::new(InfoFileWriter));
        steps.push(Box::new(TemplateDictWriter));
    }
    steps
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let target = self.target();
        let (project, template) = match target {
            EditTarget::Global => open_any(&self.project_root)?,
            EditTarget::Template | EditTarget::Local => open_initialized(&self.project_root)?,
        };

        let steps = pipeline(FileEditor::new(target));
        run_pipeline(ui, self.dry_run, &project, &template, &steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{RunOptions, Runner};
    use crate::steps::testing::Fixture;
    use crate::template::{ResourceKind, TemplateDict};
    use crate::ui::{MessageFormatter, MockUI};
    use std::fs;

    fn command(template: bool, local: bool, global: bool) -> ConfigCommand {
        ConfigCommand::new(
            Path::new("."),
            ConfigArgs {
                template,
                local,
                global,
            },
            true,
        )
    }

    #[test]
    fn template_is_the_default_target() {
        assert_eq!(command(false, false, false).target(), EditTarget::Template);
    }

    #[test]
    fn explicit_targets() {
        assert_eq!(command(true, false, false).target(), EditTarget::Template);
        assert_eq!(command(false, true, false).target(), EditTarget::Local);
        assert_eq!(command(false, false, true).target(), EditTarget::Global);
    }

    #[test]
    fn only_template_edits_refresh_the_project() {
        assert_eq!(pipeline(FileEditor::new(EditTarget::Template)).len(), 5);
        assert_eq!(pipeline(FileEditor::new(EditTarget::Local)).len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn unlinkable_names_are_dropped_from_saved_template() {
        let fx = Fixture::new().with_dict(TemplateDict {
            macros: vec!["ghost".into()],
            ..Default::default()
        });
        fs::create_dir_all(fx.project.data_dir()).unwrap();
        fs::write(fx.project.template_file(), "macros: [ghost]\n").unwrap();

        let steps = pipeline(FileEditor {
            target: EditTarget::Template,
            editor: Some("true".into()),
        });
        let mut ui = MockUI::new();
        let report = Runner::new(&mut ui, RunOptions::default())
            .with_formatter(MessageFormatter::plain())
            .execute(&fx.project, &fx.template, &steps)
            .unwrap();

        assert_eq!(report.exit_code(), 1);
        assert!(!fx.template.declares(ResourceKind::Macro, "ghost"));
        let saved = fs::read_to_string(fx.project.template_file()).unwrap();
        assert!(!saved.contains("ghost"), "{}", saved);
        let classinfo = fs::read_to_string(fx.project.classinfo()).unwrap();
        assert!(!classinfo.contains("ghost"));
    }
}
