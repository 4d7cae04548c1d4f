//! External command execution.
//!
//! Commands are run from an argument vector, blocking, without a timeout.

use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{Result, TexprojectError};

use super::platform::system_shell;

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Captured standard output.
    pub stdout: Vec<u8>,

    /// Captured standard error.
    pub stderr: Vec<u8>,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout and stderr (if false, both are inherited).
    pub capture: bool,
}

impl CommandOptions {
    /// Capture output, running in `cwd`.
    pub fn captured(cwd: &Path) -> Self {
        Self {
            cwd: Some(cwd.to_path_buf()),
            capture: true,
            ..Default::default()
        }
    }
}

fn run(mut cmd: Command, program: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }
    for (key, value) in &options.env {
        cmd.env(key, value);
    }
    if options.capture {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
    } else {
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
    }

    let output = cmd.output().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TexprojectError::CommandNotFound {
                command: program.to_string(),
            }
        } else {
            TexprojectError::Io(e)
        }
    })?;

    let duration = start.elapsed();
    debug!(
        "'{}' exited with {:?} after {:?}",
        program,
        output.status.code(),
        duration
    );

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout: output.stdout,
        stderr: output.stderr,
        duration,
        success: output.status.success(),
    })
}

/// Execute `argv[0]` with the remaining arguments.
///
/// # Errors
///
/// Returns `CommandNotFound` if the program cannot be started and
/// `InvalidArgument` for an empty argument vector. A non-zero exit is not an
/// error; check [`CommandResult::success`].
pub fn execute<S: AsRef<OsStr>>(argv: &[S], options: &CommandOptions) -> Result<CommandResult> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| TexprojectError::InvalidArgument {
            message: "empty command".to_string(),
        })?;

    let mut cmd = Command::new(program);
    cmd.args(args);
    run(cmd, &program.as_ref().to_string_lossy(), options)
}

/// Execute a command line through the system shell.
///
/// Extra `args` are passed as positional parameters, so `"$EDITOR \"$1\""`
/// with one argument opens that file without further quoting.
pub fn execute_shell(
    command: &str,
    args: &[&OsStr],
    options: &CommandOptions,
) -> Result<CommandResult> {
    let (shell, flag) = system_shell();
    let mut cmd = Command::new(shell);
    cmd.arg(flag).arg(command);
    if !args.is_empty() {
        cmd.arg(shell).args(args);
    }
    run(cmd, command, options)
}

/// Execute a command and return success/failure.
pub fn execute_check<S: AsRef<OsStr>>(argv: &[S], cwd: Option<&Path>) -> bool {
    let options = CommandOptions {
        cwd: cwd.map(|p| p.to_path_buf()),
        capture: true,
        ..Default::default()
    };

    execute(argv, &options)
        .map(|r| r.success)
        .unwrap_or(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn captures_stdout_of_successful_command() {
        let result = execute(&["echo", "hello"], &CommandOptions::captured(Path::new("."))).unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert_eq!(result.stdout, b"hello\n");
    }

    #[test]
    fn failure_keeps_stderr_bytes() {
        let result = execute(
            &["sh", "-c", "echo broken >&2; exit 3"],
            &CommandOptions::captured(Path::new(".")),
        )
        .unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(result.stderr, b"broken\n");
    }

    #[test]
    fn missing_program_is_command_not_found() {
        let err = execute(
            &["texproject-definitely-missing"],
            &CommandOptions::captured(Path::new(".")),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "could not find command 'texproject-definitely-missing'"
        );
    }

    #[test]
    fn empty_argv_is_rejected() {
        let argv: [&str; 0] = [];
        assert!(execute(&argv, &CommandOptions::default()).is_err());
    }

    #[test]
    fn runs_in_working_directory() {
        let temp = TempDir::new().unwrap();
        let result = execute(&["pwd"], &CommandOptions::captured(temp.path())).unwrap();
        let printed = String::from_utf8(result.stdout).unwrap();
        let expected = temp.path().canonicalize().unwrap();
        assert_eq!(Path::new(printed.trim()).canonicalize().unwrap(), expected);
    }

    #[test]
    fn shell_positional_arguments_are_not_reinterpreted() {
        let result = execute_shell(
            "printf '%s' \"$1\"",
            &[OsStr::new("a b; c")],
            &CommandOptions::captured(Path::new(".")),
        )
        .unwrap();
        assert_eq!(result.stdout, b"a b; c");
    }

    #[test]
    fn execute_check_reports_status() {
        assert!(execute_check(&["true"], None));
        assert!(!execute_check(&["false"], None));
    }
}
