//! Planned actions: preview text, an inferred result, and a deferred side effect.

use std::fmt;

use super::outcome::Outcome;

type Action = Box<dyn FnOnce() -> Outcome>;

/// A planned action produced by a [`Step`](super::Step).
///
/// The preview message and `inferred_success` are computed up front without
/// touching the filesystem or spawning processes, so a dry run can report
/// them as-is. The action itself runs at most once: [`RuntimeClosure::run`]
/// takes the closure by value.
///
/// ```compile_fail
/// use texproject::control::{Outcome, RuntimeClosure};
///
/// let closure = RuntimeClosure::new("touch file", true, Outcome::success);
/// closure.run();
/// closure.run(); // use of moved value
/// ```
pub struct RuntimeClosure {
    message: String,
    inferred_success: bool,
    action: Action,
    abort_on_failure: bool,
}

impl RuntimeClosure {
    /// Create a closure.
    ///
    /// # Panics
    ///
    /// Panics if `message` is empty: every attempted closure must be previewable.
    pub fn new<F>(message: impl Into<String>, inferred_success: bool, action: F) -> Self
    where
        F: FnOnce() -> Outcome + 'static,
    {
        let message = message.into();
        assert!(
            !message.is_empty(),
            "runtime closure built without a preview message"
        );
        Self {
            message,
            inferred_success,
            action: Box::new(action),
            abort_on_failure: false,
        }
    }

    /// A closure that is already known to succeed and has nothing to do.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, true, Outcome::success)
    }

    /// A closure that is already known to fail and has nothing to do.
    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(message, false, Outcome::failure)
    }

    /// Stop the whole run if this closure fails.
    pub fn abort_on_failure(mut self, abort: bool) -> Self {
        self.abort_on_failure = abort;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn inferred_success(&self) -> bool {
        self.inferred_success
    }

    pub fn aborts_on_failure(&self) -> bool {
        self.abort_on_failure
    }

    /// Perform the side effect. Consumes the closure.
    pub fn run(self) -> Outcome {
        (self.action)()
    }
}

impl fmt::Debug for RuntimeClosure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeClosure")
            .field("message", &self.message)
            .field("inferred_success", &self.inferred_success)
            .field("abort_on_failure", &self.abort_on_failure)
            .finish_non_exhaustive()
    }
}
