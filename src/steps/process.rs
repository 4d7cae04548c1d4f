//! External tool invocation: arbitrary commands and LaTeX compilation.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::control::{Closures, Outcome, RuntimeClosure, Step, StepContext};
use crate::shell::{execute, CommandOptions};
use crate::ui::{shell_join, MessageFormatter};

/// Run `argv` in `cwd`, capturing output.
///
/// Standard output becomes the payload on success, standard error on
/// failure. A program that cannot be found fails with that message.
pub fn run_command(fmt: &MessageFormatter, argv: Vec<String>, cwd: &Path) -> RuntimeClosure {
    let message = fmt.cmd(&argv);
    let options = CommandOptions::captured(cwd);
    RuntimeClosure::new(message, true, move || match execute(&argv, &options) {
        Ok(result) if result.success => Outcome::success().with_payload(result.stdout),
        Ok(result) => Outcome::failure().with_payload(result.stderr),
        Err(e) => Outcome::from_error(e),
    })
}

/// Run a fixed command as its own step.
#[derive(Debug, Clone)]
pub struct RunCommand {
    pub argv: Vec<String>,
    /// Working directory; the project root by default.
    pub cwd: Option<PathBuf>,
    pub abort: bool,
}

impl RunCommand {
    pub fn new<S: Into<String>>(argv: impl IntoIterator<Item = S>) -> Self {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            cwd: None,
            abort: false,
        }
    }

    pub fn aborting(mut self) -> Self {
        self.abort = true;
        self
    }
}

impl Step for RunCommand {
    fn name(&self) -> &'static str {
        "run-command"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        Box::new(std::iter::once_with(move || {
            let cwd = self.cwd.as_deref().unwrap_or(ctx.project.root());
            run_command(ctx.fmt, self.argv.clone(), cwd)
        }))
    }

    fn abort_on_failure(&self) -> bool {
        self.abort
    }
}

/// `latexmk` invocation compiling `<main>.tex` in `cwd` into `build_dir`.
pub fn latexmk_argv(options: &[String], build_dir: &Path, main: &str) -> Vec<String> {
    let mut argv = vec![
        "latexmk".to_string(),
        "-pdf".to_string(),
        "-interaction=nonstopmode".to_string(),
    ];
    argv.extend(options.iter().cloned());
    argv.push(format!("-outdir={}", build_dir.display()));
    argv.push(format!("{}.tex", main));
    argv
}

/// Compile the main document found in `cwd` into `build_dir`.
///
/// With `check` set a compilation failure aborts the run.
pub fn compile_latex(
    ctx: &StepContext<'_>,
    cwd: &Path,
    build_dir: &Path,
    check: bool,
) -> RuntimeClosure {
    let render = &ctx.project.config().render;
    let options = &ctx.project.config().process.latexmk_compile_options;
    let message = ctx.fmt.info(&format!(
        "Compiling LaTeX file '{}' with command '{}'",
        cwd.join(format!("{}.tex", render.default_tex_name)).display(),
        shell_join(&latexmk_argv(options, build_dir, &render.default_tex_name))
    ));
    let argv = latexmk_argv(options, build_dir, &render.default_tex_name);
    let command_options = CommandOptions::captured(cwd);
    RuntimeClosure::new(message, true, move || match execute(&argv, &command_options) {
        Ok(result) if result.success => Outcome::success().with_payload(result.stdout),
        Ok(result) => {
            let mut payload = result.stdout;
            payload.extend_from_slice(&result.stderr);
            Outcome::failure().with_payload(payload)
        }
        Err(e) => Outcome::from_error(e),
    })
    .abort_on_failure(check)
}

/// Move build outputs `<build_dir>/<main><suffix>` to their targets.
///
/// Outputs the build did not produce are skipped.
pub fn copy_output(
    ctx: &StepContext<'_>,
    build_dir: &Path,
    outputs: &BTreeMap<String, PathBuf>,
) -> RuntimeClosure {
    let listed = outputs
        .values()
        .map(|p| format!("'{}'", p.display()))
        .collect::<Vec<_>>()
        .join(", ");
    let message = ctx.fmt.info(&format!("Creating output files: {}", listed));
    let main = ctx.project.config().render.default_tex_name.clone();
    let moves: Vec<(PathBuf, PathBuf)> = outputs
        .iter()
        .map(|(suffix, target)| (build_dir.join(format!("{}{}", main, suffix)), target.clone()))
        .collect();
    RuntimeClosure::new(message, true, move || {
        Outcome::from(moves.iter().try_for_each(|(from, to)| move_file(from, to)))
    })
}

fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    if !from.exists() {
        return Ok(());
    }
    if let Some(parent) = to.parent() {
        fs::create_dir_all(parent)?;
    }
    // Fall back to copying when the scratch tree is on another filesystem.
    fs::rename(from, to).or_else(|_| fs::copy(from, to).map(|_| ()))
}

/// Compile the project in a scratch directory and keep selected outputs.
///
/// Keys of `outputs` are file suffixes such as `.pdf` or `.log`.
#[derive(Debug, Clone, Default)]
pub struct LatexCompiler {
    pub outputs: BTreeMap<String, PathBuf>,
}

impl Step for LatexCompiler {
    fn name(&self) -> &'static str {
        "compile-latex"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        let build_dir = ctx.scratch.provision();
        let compile = compile_latex(ctx, ctx.project.root(), &build_dir, false);
        let copy = (!self.outputs.is_empty()).then(|| copy_output(ctx, &build_dir, &self.outputs));
        Box::new(std::iter::once(compile).chain(copy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps;
    use crate::steps::testing::Fixture;

    #[test]
    fn latexmk_argv_places_options_before_outdir() {
        let argv = latexmk_argv(&["-shell-escape".into()], Path::new("/tmp/b"), "main");
        assert_eq!(
            argv,
            [
                "latexmk",
                "-pdf",
                "-interaction=nonstopmode",
                "-shell-escape",
                "-outdir=/tmp/b",
                "main.tex"
            ]
        );
    }

    #[test]
    fn missing_program_fails_with_message() {
        let fx = Fixture::new();
        let steps = steps![RunCommand::new(["texproject-no-such-tool"])];

        let (report, ui) = fx.run(&steps, false);

        assert_eq!(report.exit_code(), 1);
        assert!(ui
            .outputs()
            .iter()
            .any(|(text, stderr)| *stderr && text.contains("could not find command")));
    }

    #[cfg(unix)]
    #[test]
    fn command_runs_in_project_root() {
        let fx = Fixture::new();
        std::fs::write(fx.project.root().join("marker"), "").unwrap();
        let steps = steps![RunCommand::new(["ls"])];

        let mut ui = crate::ui::MockUI::with_mode(crate::ui::OutputMode::Verbose);
        let report = fx.run_with_ui(&steps, false, &mut ui);

        assert!(report.success());
        assert!(ui.outputs().iter().any(|(text, _)| text.contains("marker")));
    }

    #[test]
    fn copy_output_moves_existing_files_only() {
        let fx = Fixture::new();
        let build = fx.temp.path().join("build");
        std::fs::create_dir_all(&build).unwrap();
        std::fs::write(build.join("main.pdf"), "pdf").unwrap();
        let outputs = BTreeMap::from([
            (".pdf".to_string(), fx.temp.path().join("out/paper.pdf")),
            (".log".to_string(), fx.temp.path().join("out/paper.log")),
        ]);

        struct Copy(PathBuf, BTreeMap<String, PathBuf>);
        impl Step for Copy {
            fn name(&self) -> &'static str {
                "copy"
            }
            fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
                Box::new(std::iter::once(copy_output(ctx, &self.0, &self.1)))
            }
        }

        let (report, ui) = fx.run(&steps![Copy(build, outputs)], false);

        assert!(report.success());
        assert!(ui.has_message("Creating output files:"));
        assert_eq!(
            std::fs::read_to_string(fx.temp.path().join("out/paper.pdf")).unwrap(),
            "pdf"
        );
        assert!(!fx.temp.path().join("out/paper.log").exists());
    }

    #[test]
    fn compiler_previews_latexmk_under_dry_run() {
        let fx = Fixture::new();
        let steps = steps![LatexCompiler {
            outputs: BTreeMap::from([(".pdf".to_string(), PathBuf::from("out.pdf"))]),
        }];

        let (report, ui) = fx.run(&steps, true);

        assert_eq!(report.results.len(), 2);
        assert!(report.results.iter().all(|r| !r.executed));
        assert!(ui.has_message("with command 'latexmk -pdf -interaction=nonstopmode"));
    }
}
