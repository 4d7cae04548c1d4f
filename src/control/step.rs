//! The step interface.

use crate::config::Project;
use crate::template::TemplateState;
use crate::ui::MessageFormatter;

use super::closure::RuntimeClosure;
use super::scratch::ScratchDirectory;
use super::state::SharedState;

/// Lazily produced closures of one step.
pub type Closures<'a> = Box<dyn Iterator<Item = RuntimeClosure> + 'a>;

/// Everything a step may look at while producing closures.
#[derive(Clone, Copy)]
pub struct StepContext<'a> {
    pub project: &'a Project,
    pub template: &'a TemplateState,
    pub state: &'a SharedState,
    pub scratch: &'a ScratchDirectory,
    pub fmt: &'a MessageFormatter,
}

/// A unit of declared work.
///
/// Producing closures must not touch the filesystem beyond reading it, and
/// must not spawn processes: every side effect belongs in a closure action.
/// The runner pulls closures one at a time and executes each before asking
/// for the next, so a step may read state left behind by earlier closures.
pub trait Step {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Lazily yield this step's closures.
    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a>;

    /// Stop the run on the first failing closure of this step.
    fn abort_on_failure(&self) -> bool {
        false
    }
}

/// Make a boxed step list from concrete steps.
#[macro_export]
macro_rules! steps {
    ($($step:expr),* $(,)?) => {
        vec![$(Box::new($step) as Box<dyn $crate::control::Step>),*]
    };
}
