//! Run-scoped queue of deferred template modifications.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::debug;

use crate::template::Modification;

/// Shared state threaded through a single pipeline run.
///
/// Closure actions that need to change the template dictionary cannot do so
/// directly. They take a [`ModificationRequests`] handle and enqueue a request;
/// the queue is drained only by the modification-consuming step
/// ([`ApplyQueuedModifications`](crate::steps::ApplyQueuedModifications)),
/// which turns each request into its own previewable closure.
#[derive(Debug, Default)]
pub struct SharedState {
    queue: Rc<RefCell<VecDeque<Modification>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue-only handle, cheap to clone into closure actions.
    pub fn requests(&self) -> ModificationRequests {
        ModificationRequests {
            queue: Rc::clone(&self.queue),
        }
    }

    /// Number of requests waiting to be applied.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub(crate) fn drain_all(&self) -> Vec<Modification> {
        let drained: Vec<_> = self.queue.borrow_mut().drain(..).collect();
        if !drained.is_empty() {
            debug!("Draining {} queued template modification(s)", drained.len());
        }
        drained
    }
}

/// Handle that can only add requests to a [`SharedState`] queue.
#[derive(Debug, Clone)]
pub struct ModificationRequests {
    queue: Rc<RefCell<VecDeque<Modification>>>,
}

impl ModificationRequests {
    pub fn enqueue(&self, modification: Modification) {
        debug!("Queued template modification: {}", modification);
        self.queue.borrow_mut().push_back(modification);
    }
}
