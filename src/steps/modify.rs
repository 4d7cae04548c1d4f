//! Steps that change the template dictionary.

use crate::control::{Closures, Step, StepContext};
use crate::template::Modification;

/// Apply a fixed list of modifications, one closure each.
#[derive(Debug, Clone)]
pub struct ApplyModificationSequence {
    pub modifications: Vec<Modification>,
}

impl ApplyModificationSequence {
    pub fn new(modifications: Vec<Modification>) -> Self {
        Self { modifications }
    }
}

impl Step for ApplyModificationSequence {
    fn name(&self) -> &'static str {
        "apply-modifications"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        Box::new(
            self.modifications
                .iter()
                .map(move |m| ctx.template.modification(m.clone(), ctx.fmt)),
        )
    }
}

/// Apply every modification queued by earlier closures of this run.
///
/// This is the only step that drains the shared queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyQueuedModifications;

impl Step for ApplyQueuedModifications {
    fn name(&self) -> &'static str {
        "apply-queued"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        let queued = ctx.state.drain_all();
        Box::new(
            queued
                .into_iter()
                .map(move |m| ctx.template.modification(m, ctx.fmt)),
        )
    }
}
