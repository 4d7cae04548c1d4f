//! Pipeline execution.
//!
//! The [`Runner`] drives an ordered list of [`Step`]s. For every closure it
//! prints the preview, then either reports the inferred result (dry run) or
//! performs the action. Failures of independent steps are recorded and the run
//! continues; a failure on an abort-on-failure closure or step stops the run
//! immediately, before any later step is produced.
//!
//! Under dry run the abort check never fires: no real outcome exists, so every
//! step is previewed using its inferred results only.

use tracing::debug;

use crate::config::Project;
use crate::error::Result;
use crate::template::TemplateState;
use crate::ui::{MessageFormatter, UserInterface};

use super::closure::RuntimeClosure;
use super::outcome::Payload;
use super::scratch::ScratchDirectory;
use super::state::SharedState;
use super::step::{Step, StepContext};

/// Message printed when at least one closure failed.
pub const AGGREGATE_FAILURE_MESSAGE: &str = "Runner completed, but one of the commands failed!";

/// Options the runner interprets itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Preview only; never invoke an action.
    pub dry_run: bool,
}

/// Result of processing one closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureReport {
    /// Preview message without styling.
    pub message: String,
    /// Reported result: the inferred result under dry run, otherwise the real one.
    pub success: bool,
    /// Whether the action was invoked.
    pub executed: bool,
}

/// Why a run stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineAbort {
    pub message: String,
    pub payload: Option<Payload>,
}

/// Aggregate result of one [`Runner::execute`] call.
#[derive(Debug, Default)]
pub struct RunReport {
    pub results: Vec<ClosureReport>,
    pub aborted: Option<PipelineAbort>,
}

impl RunReport {
    /// True if no closure failed and the run was not aborted.
    pub fn success(&self) -> bool {
        self.aborted.is_none() && self.results.iter().all(|r| r.success)
    }

    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| !r.success).count()
    }

    /// Process exit code: 0 on full success, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.success() {
            0
        } else {
            1
        }
    }
}

/// Drives steps to completion.
pub struct Runner<'u> {
    ui: &'u mut dyn UserInterface,
    options: RunOptions,
    fmt: MessageFormatter,
}

impl<'u> Runner<'u> {
    /// Create a runner with a formatter matching the terminal.
    pub fn new(ui: &'u mut dyn UserInterface, options: RunOptions) -> Self {
        Self {
            ui,
            options,
            fmt: MessageFormatter::new(),
        }
    }

    /// Use a specific formatter for preview messages.
    pub fn with_formatter(mut self, fmt: MessageFormatter) -> Self {
        self.fmt = fmt;
        self
    }

    /// Run `steps` in order against a fresh shared state.
    pub fn execute(
        &mut self,
        project: &Project,
        template: &TemplateState,
        steps: &[Box<dyn Step>],
    ) -> Result<RunReport> {
        self.execute_with(project, template, steps, SharedState::new)
    }

    /// Run `steps` in order against the shared state built by `state_factory`.
    ///
    /// The scratch directory is opened before the first step and removed on
    /// every exit path.
    pub fn execute_with<F>(
        &mut self,
        project: &Project,
        template: &TemplateState,
        steps: &[Box<dyn Step>],
        state_factory: F,
    ) -> Result<RunReport>
    where
        F: FnOnce() -> SharedState,
    {
        let state = state_factory();
        let scratch = ScratchDirectory::open()?;
        let fmt = self.fmt.clone();
        let ctx = StepContext {
            project,
            template,
            state: &state,
            scratch: &scratch,
            fmt: &fmt,
        };

        let mut report = RunReport::default();

        'steps: for step in steps {
            debug!(
                "Producing step '{}' (abort on failure: {})",
                step.name(),
                step.abort_on_failure()
            );
            for closure in step.produce(&ctx) {
                let abort = closure.aborts_on_failure() || step.abort_on_failure();
                let (result, payload) = self.process(closure);
                let failed = !result.success;
                let message = result.message.clone();
                report.results.push(result);

                if failed && abort && !self.options.dry_run {
                    report.aborted = Some(PipelineAbort { message, payload });
                    break 'steps;
                }
            }
        }

        scratch.close();
        self.summarize(&report);
        Ok(report)
    }

    /// Preview and, unless dry run, execute one closure.
    fn process(&mut self, closure: RuntimeClosure) -> (ClosureReport, Option<Payload>) {
        let mode = self.ui.output_mode();
        let message = console::strip_ansi_codes(closure.message()).into_owned();
        let inferred = closure.inferred_success();

        if mode.shows_status() {
            self.ui.message(closure.message());
        }

        if self.options.dry_run {
            return (
                ClosureReport {
                    message,
                    success: inferred,
                    executed: false,
                },
                None,
            );
        }

        let outcome = closure.run();
        let success = outcome.is_success() && inferred;

        if !success {
            self.ui.error(&format!("Failed: {}", message));
        }
        if let Some(payload) = outcome.payload() {
            if !success {
                self.ui.command_output(&payload.as_text(), true);
            } else if mode.shows_command_output() {
                self.ui.command_output(&payload.as_text(), false);
            }
        }

        (
            ClosureReport {
                message,
                success,
                executed: true,
            },
            outcome.into_payload(),
        )
    }

    fn summarize(&mut self, report: &RunReport) {
        if let Some(abort) = &report.aborted {
            self.ui.error(&format!(
                "Runner aborted with error message '{}'. Dumping stderr:",
                abort.message
            ));
            if let Some(payload) = &abort.payload {
                self.ui.command_output(&payload.as_text(), true);
            }
        } else if !report.success() {
            self.ui.error(AGGREGATE_FAILURE_MESSAGE);
        }
    }
}
