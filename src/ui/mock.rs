//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use texproject::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("repo_name", "paper");
//!
//! ui.message("> Write template dictionary");
//! ui.command_output("latexmk: error", true);
//!
//! assert!(ui.has_message("template dictionary"));
//! assert_eq!(ui.outputs(), &[("latexmk: error".to_string(), true)]);
//! ```

use std::collections::HashMap;

use crate::error::Result;

use super::{OutputMode, Prompt, PromptResult, PromptType, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    outputs: Vec<(String, bool)>,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::with_mode(OutputMode::Normal)
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Captured tool output as `(text, on_stderr)`.
    pub fn outputs(&self) -> &[(String, bool)] {
        &self.outputs
    }

    /// Keys of all prompts that were shown.
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Clear all captured interactions.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.successes.clear();
        self.warnings.clear();
        self.errors.clear();
        self.outputs.clear();
        self.prompts_shown.clear();
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn command_output(&mut self, text: &str, stderr: bool) {
        self.outputs.push((text.to_string(), stderr));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            return Ok(prompt.answer(response));
        }
        if let Some(default) = &prompt.default {
            return Ok(prompt.answer(default));
        }

        // Type-appropriate empty answer as a last resort.
        match prompt.prompt_type {
            PromptType::Confirm => Ok(PromptResult::Bool(false)),
            _ => Ok(PromptResult::String(String::new())),
        }
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages_and_errors() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.error("boom");
        ui.success("done");
        ui.warning("careful");

        assert!(ui.has_message("hello"));
        assert!(ui.has_error("boom"));
        assert!(ui.has_success("done"));
        assert!(ui.has_warning("careful"));
    }

    #[test]
    fn configured_response_wins_over_default() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("repo_name", "paper");

        let answer = ui
            .prompt(&Prompt::input("repo_name", "Repository name", Some("other")))
            .unwrap();

        assert_eq!(answer.as_string(), "paper");
        assert_eq!(ui.prompts_shown(), ["repo_name"]);
    }

    #[test]
    fn confirm_falls_back_to_default() {
        let mut ui = MockUI::new();
        let answer = ui
            .prompt(&Prompt::confirm("wiki", "Enable wiki?", true))
            .unwrap();
        assert_eq!(answer.as_bool(), Some(true));
    }

    #[test]
    fn records_output_stream() {
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        ui.command_output("out", false);
        ui.command_output("err", true);

        assert_eq!(ui.output_mode(), OutputMode::Verbose);
        assert_eq!(
            ui.outputs(),
            &[("out".to_string(), false), ("err".to_string(), true)]
        );
    }

    #[test]
    fn clear_resets_captures() {
        let mut ui = MockUI::new();
        ui.message("x");
        ui.command_output("y", false);
        ui.clear();
        assert!(ui.messages().is_empty());
        assert!(ui.outputs().is_empty());
    }
}
