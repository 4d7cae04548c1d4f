//! Integration tests for the pipeline runner public API.

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

use tempfile::TempDir;
use texproject::config::{AppDirs, Project};
use texproject::control::{
    Closures, Outcome, RunOptions, RunReport, Runner, RuntimeClosure, Step, StepContext,
};
use texproject::steps::{NameSequenceLinker, RunCommand};
use texproject::template::{ResourceKind, TemplateDict, TemplateState};
use texproject::ui::{MessageFormatter, MockUI};

struct Env {
    temp: TempDir,
    project: Project,
    template: TemplateState,
}

impl Env {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("paper");
        fs::create_dir_all(&root).unwrap();
        let dirs = AppDirs::new(temp.path().join("config"), temp.path().join("data"));
        let project = Project::open_with(&root, dirs).unwrap();
        let template = TemplateState::new(TemplateDict::default(), project.template_file());
        Self {
            temp,
            project,
            template,
        }
    }

    fn install_macro(&self, name: &str) {
        let dir = self.temp.path().join("data/resources/macros");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.sty", name)), "% macros").unwrap();
    }

    fn run(&self, steps: &[Box<dyn Step>], dry_run: bool) -> (RunReport, MockUI) {
        let mut ui = MockUI::new();
        let report = Runner::new(&mut ui, RunOptions { dry_run })
            .with_formatter(MessageFormatter::plain())
            .execute(&self.project, &self.template, steps)
            .unwrap();
        (report, ui)
    }
}

fn abort_pipeline(marker: &std::path::Path) -> Vec<Box<dyn Step>> {
    texproject::steps![
        RunCommand::new(["touch", marker.to_str().unwrap()]),
        RunCommand::new(["sh", "-c", "echo boom >&2; exit 1"]).aborting(),
        RunCommand::new(["echo", "never"]),
    ]
}

#[test]
fn missing_resource_fails_without_stopping_the_run() {
    let env = Env::new();
    env.install_macro("pkgA");
    let steps = texproject::steps![NameSequenceLinker::new(
        ResourceKind::Macro,
        vec!["pkgA".into(), "pkgB".into()],
        false,
    )];

    let (report, ui) = env.run(&steps, false);

    assert_eq!(report.results.len(), 2);
    assert!(report.results[0].success);
    assert!(!report.results[1].success);
    assert!(report.results[1].message.contains("Could not import"));
    assert!(report.results.iter().all(|r| r.executed));
    assert!(report.aborted.is_none());
    assert_eq!(report.exit_code(), 1);
    assert!(ui.has_error("one of the commands failed"));
}

#[cfg(unix)]
#[test]
fn abort_stops_production_and_carries_stderr() {
    let env = Env::new();
    let marker = env.temp.path().join("marker");

    let (report, ui) = env.run(&abort_pipeline(&marker), false);

    assert!(marker.exists());
    assert_eq!(report.results.len(), 2);
    let abort = report.aborted.as_ref().unwrap();
    assert!(abort.message.contains("exit 1"));
    assert_eq!(abort.payload.as_ref().unwrap().as_text().trim(), "boom");
    assert_eq!(report.exit_code(), 1);
    assert!(ui.has_error("Runner aborted"));
}

#[cfg(unix)]
#[test]
fn dry_run_previews_everything_and_spawns_nothing() {
    let env = Env::new();
    let marker = env.temp.path().join("marker");

    let (report, ui) = env.run(&abort_pipeline(&marker), true);

    assert!(!marker.exists());
    assert_eq!(report.results.len(), 3);
    assert!(report.results.iter().all(|r| !r.executed && r.success));
    assert!(report.aborted.is_none());
    assert_eq!(ui.messages().len(), 3);
    assert!(ui.messages()[2].contains("echo never"));
}

#[test]
fn dry_run_leaves_project_untouched() {
    let env = Env::new();
    env.install_macro("pkgA");
    let steps = texproject::steps![NameSequenceLinker::new(
        ResourceKind::Macro,
        vec!["pkgA".into()],
        false,
    )];

    let (report, _) = env.run(&steps, true);

    assert!(report.success());
    assert_eq!(fs::read_dir(env.project.root()).unwrap().count(), 0);
}

/// Creates a scratch path, then fails and aborts.
struct ScratchUser {
    seen: Rc<RefCell<Option<PathBuf>>>,
}

impl Step for ScratchUser {
    fn name(&self) -> &'static str {
        "scratch-user"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        let path = ctx.scratch.provision();
        *self.seen.borrow_mut() = Some(path.clone());
        Box::new(std::iter::once(
            RuntimeClosure::new("Use scratch space", true, move || {
                fs::create_dir_all(path.join("nested")).unwrap();
                Outcome::failure()
            })
            .abort_on_failure(true),
        ))
    }
}

#[test]
fn scratch_space_is_removed_after_abort() {
    let env = Env::new();
    let seen = Rc::new(RefCell::new(None));
    let steps = texproject::steps![ScratchUser {
        seen: Rc::clone(&seen),
    }];

    let (report, _) = env.run(&steps, false);

    assert!(report.aborted.is_some());
    let path = seen.borrow().clone().unwrap();
    assert!(!path.exists());
    assert!(!path.parent().unwrap().exists());
}
