//! Non-interactive UI for scripts and CI.

use std::collections::HashMap;
use std::io::Write;

use crate::error::{Result, TexprojectError};

use super::{OutputMode, Prompt, PromptResult, UserInterface};

/// Prefix of environment variables answering prompts non-interactively.
pub const PROMPT_ENV_PREFIX: &str = "TEXPROJECT_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `TEXPROJECT_PROMPT_<KEY>` environment
/// variables, falling back to the prompt's default.
pub struct NonInteractiveUI {
    mode: OutputMode,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self {
            mode,
            env_overrides,
        }
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            env_overrides: overrides,
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {}", msg);
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {}", msg);
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn command_output(&mut self, text: &str, stderr: bool) {
        if stderr {
            eprint!("{}", text);
            let _ = std::io::stderr().flush();
        } else {
            print!("{}", text);
            let _ = std::io::stdout().flush();
        }
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            return Ok(prompt.answer(value));
        }

        if let Some(default) = &prompt.default {
            return Ok(prompt.answer(default));
        }

        Err(TexprojectError::InvalidArgument {
            message: format!(
                "Cannot prompt for '{}' in non-interactive mode (no default value)",
                prompt.key
            ),
        })
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_override_answers_prompt() {
        let mut overrides = HashMap::new();
        overrides.insert("TEXPROJECT_PROMPT_REPO_NAME".to_string(), "paper".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);

        let answer = ui
            .prompt(&Prompt::input("repo_name", "Repository name", None))
            .unwrap();

        assert_eq!(answer, PromptResult::String("paper".into()));
    }

    #[test]
    fn default_used_without_override() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let answer = ui
            .prompt(&Prompt::confirm("issues", "Enable issues?", false))
            .unwrap();
        assert_eq!(answer, PromptResult::Bool(false));
    }

    #[test]
    fn missing_default_is_an_error() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, HashMap::new());
        let err = ui
            .prompt(&Prompt::input("repo_name", "Repository name", None))
            .unwrap_err();
        assert!(err.to_string().contains("repo_name"));
    }

    #[test]
    fn is_never_interactive() {
        let ui = NonInteractiveUI::with_overrides(OutputMode::Silent, HashMap::new());
        assert!(!ui.is_interactive());
        assert_eq!(ui.output_mode(), OutputMode::Silent);
    }
}
