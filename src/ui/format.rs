//! Preview messages of pipeline closures.
//!
//! Every message starts with a prefix naming what kind of change it
//! previews: `$ ` for external commands, `> ` for files, `% ` for edits and
//! informational lines, `! ` for failures.

use std::fmt::Display;
use std::path::Path;

use console::Style;

use super::theme::should_use_colors;

/// How a resource link will be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Copy into a directory that does not have it yet.
    New,
    /// Keep the copy already in place.
    Exists,
    /// Replace the copy already in place.
    Overwrite,
    /// Neither a source nor an existing copy.
    Fail,
}

#[derive(Debug, Clone, Copy)]
enum Prefix {
    Cmd,
    File,
    Edit,
    Err,
}

impl Prefix {
    fn as_str(self) -> &'static str {
        match self {
            Self::Cmd => "$ ",
            Self::File => "> ",
            Self::Edit => "% ",
            Self::Err => "! ",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Info,
    Ok,
    Warn,
    Err,
}

/// Builds styled preview messages.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    colors: bool,
}

impl Default for MessageFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageFormatter {
    /// Colored when the terminal supports it.
    pub fn new() -> Self {
        Self {
            colors: should_use_colors(),
        }
    }

    /// Never colored.
    pub fn plain() -> Self {
        Self { colors: false }
    }

    fn style(&self, msg: &str, prefix: Prefix, tone: Tone) -> String {
        let text = format!("{}{}", prefix.as_str(), msg);
        if !self.colors {
            return text;
        }
        let style = match tone {
            Tone::Info => Style::new().blue(),
            Tone::Ok => Style::new().green(),
            Tone::Warn => Style::new().yellow(),
            Tone::Err => Style::new().red(),
        };
        style.force_styling(true).apply_to(text).to_string()
    }

    pub fn render(&self, template: &str, target: &Path, overwrite: bool) -> String {
        let base = format!(
            " file '{}' from template at '{}'",
            target.display(),
            template
        );
        if overwrite {
            self.style(&format!("Re-render{}", base), Prefix::File, Tone::Warn)
        } else {
            self.style(&format!("Render{}", base), Prefix::File, Tone::Info)
        }
    }

    pub fn link(&self, user_str: &str, name: &str, target_dir: &Path, kind: LinkKind) -> String {
        let helper = |prop: &str| {
            format!(
                "{} '{}' {} directory '{}'",
                user_str,
                name,
                prop,
                target_dir.display()
            )
        };
        match kind {
            LinkKind::Overwrite => {
                self.style(&format!("Replace {}", helper("in")), Prefix::File, Tone::Warn)
            }
            LinkKind::Exists => {
                self.style(&format!("Use existing {}", helper("in")), Prefix::File, Tone::Info)
            }
            LinkKind::New => self.style(&format!("Copy {}", helper("to")), Prefix::File, Tone::Info),
            LinkKind::Fail => self.style(
                &format!("Could not import {}", helper("to")),
                Prefix::Err,
                Tone::Err,
            ),
        }
    }

    pub fn template_dict(&self, target_dir: &Path, overwrite: bool) -> String {
        let base = format!(" template dictionary in directory '{}'", target_dir.display());
        if overwrite {
            self.style(&format!("Replace{}", base), Prefix::File, Tone::Warn)
        } else {
            self.style(&format!("Write{}", base), Prefix::File, Tone::Info)
        }
    }

    pub fn copy(&self, source: &Path, target: &Path) -> String {
        self.style(
            &format!("Copying '{}' to '{}'", source.display(), target.display()),
            Prefix::File,
            Tone::Info,
        )
    }

    pub fn rename(&self, source: &Path, target: &Path) -> String {
        self.style(
            &format!("Rename '{}' to '{}'", source.display(), target.display()),
            Prefix::File,
            Tone::Info,
        )
    }

    pub fn remove(&self, target: &Path) -> String {
        self.style(
            &format!("Removing file '{}'", target.display()),
            Prefix::File,
            Tone::Info,
        )
    }

    pub fn edit(&self, path: &Path) -> String {
        self.style(
            &format!("Editing file at '{}'", path.display()),
            Prefix::Edit,
            Tone::Ok,
        )
    }

    /// An external command, quoted so it can be pasted into a shell.
    pub fn cmd<S: AsRef<str>>(&self, argv: &[S]) -> String {
        self.style(&shell_join(argv), Prefix::Cmd, Tone::Ok)
    }

    pub fn archive(&self, output: &Path, format: impl Display) -> String {
        self.style(
            &format!(
                "Create compressed archive '{}' with compression '{}'.",
                output.display(),
                format
            ),
            Prefix::Edit,
            Tone::Ok,
        )
    }

    pub fn info(&self, message: &str) -> String {
        self.style(message, Prefix::Edit, Tone::Ok)
    }

    pub fn error(&self, message: &str) -> String {
        self.style(message, Prefix::Err, Tone::Err)
    }
}

fn shell_quote(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@%+=:,./_-".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', "'\"'\"'"))
    }
}

/// Join `argv` into a single shell-safe command line.
pub fn shell_join<S: AsRef<str>>(argv: &[S]) -> String {
    argv.iter()
        .map(|a| shell_quote(a.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn link_messages() {
        let fmt = MessageFormatter::plain();
        let dir = Path::new(".texproject/macros");

        assert_snapshot!(
            fmt.link("macro file", "general", dir, LinkKind::New),
            @"> Copy macro file 'general' to directory '.texproject/macros'"
        );
        assert_snapshot!(
            fmt.link("macro file", "general", dir, LinkKind::Exists),
            @"> Use existing macro file 'general' in directory '.texproject/macros'"
        );
        assert_snapshot!(
            fmt.link("macro file", "general", dir, LinkKind::Overwrite),
            @"> Replace macro file 'general' in directory '.texproject/macros'"
        );
        assert_snapshot!(
            fmt.link("macro file", "ghost", dir, LinkKind::Fail),
            @"! Could not import macro file 'ghost' to directory '.texproject/macros'"
        );
    }

    #[test]
    fn cmd_quotes_arguments() {
        let fmt = MessageFormatter::plain();
        assert_snapshot!(
            fmt.cmd(&["git", "commit", "-m", "Initialize new texproject repository."]),
            @"$ git commit -m 'Initialize new texproject repository.'"
        );
        assert_snapshot!(fmt.cmd(&["echo", "it's"]), @r#"$ echo 'it'"'"'s'"#);
        assert_snapshot!(fmt.cmd(&["printf", ""]), @"$ printf ''");
    }

    #[test]
    fn render_marks_overwrite() {
        let fmt = MessageFormatter::plain();
        assert_snapshot!(
            fmt.render("support/gitignore", Path::new(".gitignore"), false),
            @"> Render file '.gitignore' from template at 'support/gitignore'"
        );
        assert_snapshot!(
            fmt.render("support/gitignore", Path::new(".gitignore"), true),
            @"> Re-render file '.gitignore' from template at 'support/gitignore'"
        );
    }

    #[test]
    fn colored_output_strips_to_plain() {
        let colored = MessageFormatter { colors: true }.error("boom");
        assert_ne!(colored, "! boom");
        assert_eq!(console::strip_ansi_codes(&colored), "! boom");
    }

    #[test]
    fn info_and_archive_share_prefix() {
        let fmt = MessageFormatter::plain();
        assert_eq!(fmt.info("Modifying main tex file."), "% Modifying main tex file.");
        assert_eq!(
            fmt.archive(Path::new("out.tar.gz"), "gztar"),
            "% Create compressed archive 'out.tar.gz' with compression 'gztar'."
        );
    }
}
