//! Exporting the project as a compressed archive.
//!
//! The project is copied into the scratch directory first, so the working
//! tree is never touched. In arXiv mode the copy is then rewritten to be
//! self-contained: the data folder loses its leading dot, the info files are
//! inlined into the main document and the compiled bibliography is shipped.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::iter;
use std::path::{Path, PathBuf};

use crate::control::{Closures, Outcome, RuntimeClosure, Step, StepContext};
use crate::error::Result;
use crate::shell::{execute, CommandOptions};
use crate::template::{Modification, ResourceKind, SupportFile};

use super::fs::{clean_closures, copy_directory, remove_path, rename_path};
use super::link::template_links;
use super::process::{compile_latex, copy_output};
use super::render::TemplateWriter;

/// Compression used for an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ArchiveFormat {
    Tar,
    #[value(name = "gztar")]
    GzTar,
    #[value(name = "bztar")]
    BzTar,
    #[value(name = "xztar")]
    XzTar,
    Zip,
}

impl ArchiveFormat {
    const SUFFIXES: [(&'static str, ArchiveFormat); 6] = [
        (".tar.gz", Self::GzTar),
        (".tar.bz2", Self::BzTar),
        (".tar.bz", Self::BzTar),
        (".tar.xz", Self::XzTar),
        (".tar", Self::Tar),
        (".zip", Self::Zip),
    ];

    /// Format implied by `path`, and the path to write.
    ///
    /// Unrecognized names get a `.tar` suffix appended.
    pub fn from_path(path: &Path) -> (Self, PathBuf) {
        let name = path.to_string_lossy();
        for (suffix, format) in Self::SUFFIXES {
            if name.ends_with(suffix) {
                return (format, path.to_path_buf());
            }
        }
        (Self::Tar, PathBuf::from(format!("{}.tar", name)))
    }

    /// Like [`from_path`](Self::from_path), but an explicit `format` wins.
    ///
    /// Its suffix is appended unless `path` already carries it.
    pub fn resolve(path: &Path, format: Option<Self>) -> (Self, PathBuf) {
        let Some(format) = format else {
            return Self::from_path(path);
        };
        let name = path.to_string_lossy();
        let has_suffix = Self::SUFFIXES
            .iter()
            .any(|(suffix, f)| *f == format && name.ends_with(suffix));
        if has_suffix {
            (format, path.to_path_buf())
        } else {
            (format, PathBuf::from(format!("{}{}", name, format.suffix())))
        }
    }

    /// Canonical file suffix.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Tar => ".tar",
            Self::GzTar => ".tar.gz",
            Self::BzTar => ".tar.bz2",
            Self::XzTar => ".tar.xz",
            Self::Zip => ".zip",
        }
    }

    /// Command archiving the current directory into `output`.
    pub fn argv(self, output: &Path) -> Vec<String> {
        let output = output.display().to_string();
        let tar = |flags: &str| vec!["tar".to_string(), flags.to_string(), output.clone(), ".".to_string()];
        match self {
            Self::Tar => tar("-cf"),
            Self::GzTar => tar("-czf"),
            Self::BzTar => tar("-cjf"),
            Self::XzTar => tar("-cJf"),
            Self::Zip => vec!["zip".into(), "-r".into(), "-q".into(), output.clone(), ".".into()],
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Tar => "tar",
            Self::GzTar => "gztar",
            Self::BzTar => "bztar",
            Self::XzTar => "xztar",
            Self::Zip => "zip",
        })
    }
}

/// What goes into an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportMode {
    /// Source files only.
    #[default]
    Source,
    /// Source files and the compiled PDF.
    Build,
    /// A self-contained tree ready for arXiv submission.
    Arxiv,
}

/// Write the project to a compressed archive.
#[derive(Debug, Clone)]
pub struct ArchiveWriter {
    /// Archive path; relative paths are resolved against the project root.
    pub output: PathBuf,
    /// Compression; taken from the output suffix when unset.
    pub format: Option<ArchiveFormat>,
    pub mode: ExportMode,
}

impl ArchiveWriter {
    fn archive_closure(
        ctx: &StepContext<'_>,
        format: ArchiveFormat,
        output: &Path,
        archive_dir: &Path,
    ) -> RuntimeClosure {
        let argv = format.argv(output);
        let options = CommandOptions::captured(archive_dir);
        RuntimeClosure::new(ctx.fmt.archive(output, format), true, move || {
            match execute(&argv, &options) {
                Ok(result) if result.success => Outcome::success(),
                Ok(result) => Outcome::failure().with_payload(result.stderr),
                Err(e) => Outcome::from_error(e),
            }
        })
    }
}

impl Step for ArchiveWriter {
    fn name(&self) -> &'static str {
        "write-archive"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        let (format, output) = ArchiveFormat::resolve(&ctx.project.root().join(&self.output), self.format);
        let archive_dir = ctx.scratch.provision();
        let build_dir = ctx.scratch.provision();
        let root = ctx.project.root();

        let copy = {
            let archive_dir = archive_dir.clone();
            iter::once_with(move || {
                copy_directory(
                    ctx.fmt,
                    root,
                    &archive_dir,
                    &ctx.project.config().process.ignore_patterns,
                )
            })
        };

        let arxiv: Closures<'a> = if self.mode == ExportMode::Arxiv {
            let archive_dir = archive_dir.clone();
            Box::new(iter::once_with(move || arxiv_closures(ctx, archive_dir)).flatten())
        } else {
            Box::new(iter::empty())
        };

        let compiled: Closures<'a> = match self.mode {
            ExportMode::Source => Box::new(iter::empty()),
            ExportMode::Build | ExportMode::Arxiv => {
                let suffix = if self.mode == ExportMode::Arxiv { ".bbl" } else { ".pdf" };
                let main = &ctx.project.config().render.default_tex_name;
                let outputs = BTreeMap::from([(
                    suffix.to_string(),
                    archive_dir.join(format!("{}{}", main, suffix)),
                )]);
                let (dir, build) = (archive_dir.clone(), build_dir.clone());
                Box::new(
                    iter::once_with(move || compile_latex(ctx, &dir, &build, true))
                        .chain(iter::once_with(move || copy_output(ctx, &build_dir, &outputs))),
                )
            }
        };

        let archive = iter::once_with(move || {
            Self::archive_closure(ctx, format, &output, &archive_dir)
        });

        Box::new(copy.chain(arxiv).chain(compiled).chain(archive))
    }
}

/// Rewrite a copied project in `working_dir` for arXiv.
#[derive(Debug, Clone)]
pub struct ModifyArxiv {
    pub working_dir: PathBuf,
}

impl Step for ModifyArxiv {
    fn name(&self) -> &'static str {
        "modify-arxiv"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        arxiv_closures(ctx, self.working_dir.clone())
    }
}

/// Name for the data folder without dots, unique inside `working_dir`.
pub fn arxiv_data_folder(data_folder: &str, working_dir: &Path) -> String {
    let mut name: String = data_folder.chars().filter(|&c| c != '.').collect();
    if name.is_empty() {
        name.push_str("texproject");
    }
    while working_dir.join(&name).exists() {
        name.push('X');
    }
    name
}

fn arxiv_closures<'a>(ctx: &'a StepContext<'a>, working_dir: PathBuf) -> Closures<'a> {
    let render = &ctx.project.config().render;
    let old_dir = working_dir.join(ctx.project.data_folder());
    let new_folder = arxiv_data_folder(ctx.project.data_folder(), &working_dir);
    let new_dir = working_dir.join(&new_folder);

    let moves = [
        rename_path(ctx.fmt, &old_dir, &new_dir),
        remove_path(ctx.fmt, &new_dir.join(format!("{}.tex", render.classinfo_file))),
        remove_path(ctx.fmt, &new_dir.join(format!("{}.tex", render.bibinfo_file))),
    ];

    let typesetting = iter::once_with(move || {
        ctx.template.modification(
            Modification::update(ResourceKind::Macro, "typesetting", "arxiv-typesetting"),
            ctx.fmt,
        )
    });

    let links = template_links(ctx, false, Some(new_dir.clone()));
    let clean = iter::once_with({
        let new_dir = new_dir.clone();
        move || clean_closures(ctx, new_dir, false)
    })
    .flatten();

    let main_tex = {
        let (working_dir, new_folder) = (working_dir.clone(), new_folder.clone());
        iter::once_with(move || main_tex_closure(ctx, &working_dir, &new_folder))
    };

    let readme = iter::once_with(move || {
        TemplateWriter::support(SupportFile::ArxivAutotex, working_dir.join("000README.XXX"))
            .data_folder(new_folder)
            .force(true)
            .closure(ctx)
    });

    Box::new(
        moves
            .into_iter()
            .chain(typesetting)
            .chain(links)
            .chain(clean)
            .chain(main_tex)
            .chain(readme),
    )
}

/// Replace the `\input` lines of the info files with their rendered text.
fn main_tex_closure(ctx: &StepContext<'_>, working_dir: &Path, new_folder: &str) -> RuntimeClosure {
    let render = &ctx.project.config().render;
    let folder = ctx.project.data_folder();
    let replacements: Result<Vec<(String, String)>> = [
        (SupportFile::Classinfo, &render.classinfo_file),
        (SupportFile::Bibinfo, &render.bibinfo_file),
    ]
    .into_iter()
    .map(|(file, name)| {
        let needle = format!("\\input{{{}/{}}}\n", folder, name);
        let text = TemplateWriter::support(file, PathBuf::new())
            .data_folder(new_folder)
            .render(ctx)?;
        Ok((needle, text))
    })
    .collect();

    let replacements = match replacements {
        Ok(replacements) => replacements,
        Err(e) => return RuntimeClosure::fail(ctx.fmt.error(&e.to_string())),
    };
    let main_tex = working_dir.join(ctx.project.main_tex_name());
    RuntimeClosure::new(ctx.fmt.info("Modifying main tex file."), true, move || {
        let result = fs::read_to_string(&main_tex).and_then(|mut contents| {
            for (needle, text) in &replacements {
                contents = contents.replace(needle.as_str(), text);
            }
            fs::write(&main_tex, contents)
        });
        Outcome::from(result)
    })
}
