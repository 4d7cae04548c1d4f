//! Steps that render templates into the project.
//!
//! Text is rendered while the closure is produced, from the dictionary as it
//! stands at that moment; the action only writes it.

use std::fs;
use std::iter;
use std::path::{Path, PathBuf};

use crate::control::{Closures, Outcome, RuntimeClosure, Step, StepContext};
use crate::error::{Result, TexprojectError};
use crate::template::{RenderContext, Renderer, ResourceKind, SupportFile, TemplateSource};

/// Renders one template to one file.
#[derive(Debug, Clone)]
pub struct TemplateWriter {
    source: TemplateSource,
    target: PathBuf,
    force: bool,
    executable: bool,
    data_folder: Option<String>,
}

impl TemplateWriter {
    pub fn new(source: TemplateSource, target: PathBuf) -> Self {
        Self {
            source,
            target,
            force: false,
            executable: false,
            data_folder: None,
        }
    }

    pub fn support(file: SupportFile, target: PathBuf) -> Self {
        Self::new(TemplateSource::Support(file), target)
    }

    /// Overwrite an existing target.
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Make the written file executable by its owner.
    pub fn executable(mut self, executable: bool) -> Self {
        self.executable = executable;
        self
    }

    /// Render as if the data folder had another name.
    pub fn data_folder(mut self, folder: impl Into<String>) -> Self {
        self.data_folder = Some(folder.into());
        self
    }

    /// Render the template text.
    pub fn render(&self, ctx: &StepContext<'_>) -> Result<String> {
        let source = ctx.project.library().read_source(&self.source)?;
        let dict = ctx.template.snapshot();
        let mut render_ctx = RenderContext::new(ctx.project, &dict);
        if let Some(folder) = &self.data_folder {
            render_ctx = render_ctx.with_data_folder(folder);
        }
        Renderer::new()?.render(&self.source.label(), &source, &render_ctx)
    }

    pub fn closure(&self, ctx: &StepContext<'_>) -> RuntimeClosure {
        let exists = self.target.exists();
        if exists && !self.force {
            return RuntimeClosure::success(ctx.fmt.info(&format!(
                "Using existing rendered template at '{}'.",
                self.target.display()
            )));
        }

        match self.render(ctx) {
            Ok(text) => {
                let message = ctx.fmt.render(&self.source.label(), &self.target, exists);
                let target = self.target.clone();
                let executable = self.executable;
                RuntimeClosure::new(message, true, move || {
                    Outcome::from(write_file(&target, &text, executable))
                })
            }
            Err(e) => RuntimeClosure::fail(ctx.fmt.error(&e.to_string())),
        }
    }

    /// A lazily produced single closure.
    fn once<'a>(self, ctx: &'a StepContext<'a>) -> impl Iterator<Item = RuntimeClosure> + 'a {
        iter::once_with(move || self.closure(ctx))
    }
}

fn write_file(target: &Path, text: &str, executable: bool) -> std::io::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(target, text)?;
    if executable {
        set_executable(target)?;
    }
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o700))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Save the template dictionary and create the data folder layout.
fn template_dict_closure(ctx: &StepContext<'_>) -> RuntimeClosure {
    let data_dir = ctx.project.data_dir();
    let message = ctx
        .fmt
        .template_dict(&data_dir, ctx.template.path().exists());
    let state = ctx.template.clone();
    RuntimeClosure::new(message, true, move || {
        let result = ResourceKind::ALL
            .iter()
            .try_for_each(|kind| fs::create_dir_all(data_dir.join(kind.dir_name())))
            .map_err(TexprojectError::from)
            .and_then(|()| state.save());
        Outcome::from(result)
    })
}

/// Write the template dictionary to disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateDictWriter;

impl Step for TemplateDictWriter {
    fn name(&self) -> &'static str {
        "write-template-dict"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        Box::new(iter::once_with(move || template_dict_closure(ctx)))
    }
}

/// Scaffold a new project from a named template.
#[derive(Debug, Clone)]
pub struct OutputFolderCreator {
    pub template: String,
}

impl Step for OutputFolderCreator {
    fn name(&self) -> &'static str {
        "create-project"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        let document = TemplateWriter::new(
            TemplateSource::Document(self.template.clone()),
            ctx.project.main_tex(),
        );
        let macros = TemplateWriter::support(SupportFile::ProjectMacro, ctx.project.project_macro());
        Box::new(
            iter::once_with(move || template_dict_closure(ctx))
                .chain(document.once(ctx))
                .chain(macros.once(ctx)),
        )
    }
}

/// Re-render the class and bibliography info files.
///
/// Queued modifications are applied first so the files reflect them.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoFileWriter;

impl Step for InfoFileWriter {
    fn name(&self) -> &'static str {
        "write-info-files"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        let queued = ctx.state.drain_all();
        let classinfo = TemplateWriter::support(SupportFile::Classinfo, ctx.project.classinfo()).force(true);
        let bibinfo = TemplateWriter::support(SupportFile::Bibinfo, ctx.project.bibinfo()).force(true);
        Box::new(
            queued
                .into_iter()
                .map(move |m| ctx.template.modification(m, ctx.fmt))
                .chain(classinfo.once(ctx))
                .chain(bibinfo.once(ctx)),
        )
    }
}

/// Write `.gitignore`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitignoreWriter {
    pub force: bool,
}

impl Step for GitignoreWriter {
    fn name(&self) -> &'static str {
        "write-gitignore"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        Box::new(
            TemplateWriter::support(SupportFile::Gitignore, ctx.project.gitignore())
                .force(self.force)
                .once(ctx),
        )
    }
}

/// Install the pre-commit hook that validates the project.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecommitWriter {
    pub force: bool,
}

impl Step for PrecommitWriter {
    fn name(&self) -> &'static str {
        "write-pre-commit"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        Box::new(
            TemplateWriter::support(SupportFile::PreCommit, ctx.project.pre_commit())
                .force(self.force)
                .executable(true)
                .once(ctx),
        )
    }
}

/// Write the GitHub Actions workflow that builds the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct LatexBuildWriter {
    pub force: bool,
}

impl Step for LatexBuildWriter {
    fn name(&self) -> &'static str {
        "write-build-workflow"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        Box::new(
            TemplateWriter::support(SupportFile::BuildLatex, ctx.project.build_latex())
                .force(self.force)
                .once(ctx),
        )
    }
}

/// All git support files: ignore list, build workflow and pre-commit hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitFileWriter {
    pub force: bool,
}

impl Step for GitFileWriter {
    fn name(&self) -> &'static str {
        "write-git-files"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        let force = self.force;
        Box::new(
            TemplateWriter::support(SupportFile::Gitignore, ctx.project.gitignore())
                .force(force)
                .once(ctx)
                .chain(
                    TemplateWriter::support(SupportFile::BuildLatex, ctx.project.build_latex())
                        .force(force)
                        .once(ctx),
                )
                .chain(
                    TemplateWriter::support(SupportFile::PreCommit, ctx.project.pre_commit())
                        .force(force)
                        .executable(true)
                        .once(ctx),
                ),
        )
    }
}
