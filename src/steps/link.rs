//! Copying resources from the library into the project data folder.

use std::fs;
use std::path::{Path, PathBuf};

use crate::control::{Closures, Outcome, RuntimeClosure, Step, StepContext};
use crate::template::{Modification, ResourceKind};
use crate::ui::LinkKind;

/// Where a resource called `name` is linked inside `base`.
pub fn linked_path(base: &Path, kind: ResourceKind, name: &str) -> PathBuf {
    base.join(format!("{}{}", kind.data_name(name), kind.suffix()))
}

/// A closure that copies `source` to `target`.
///
/// An existing target is kept unless `force` is set. If neither exists the
/// closure fails and asks for `name` to be removed from the template
/// dictionary.
pub(crate) fn link_closure(
    ctx: &StepContext<'_>,
    kind: ResourceKind,
    name: &str,
    source: PathBuf,
    target: PathBuf,
    force: bool,
) -> RuntimeClosure {
    let target_dir = target
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let exists = target.exists();

    if !exists && !source.is_file() {
        let requests = ctx.state.requests();
        let name = name.to_string();
        let message = ctx.fmt.link(kind.user_str(), &name, &target_dir, LinkKind::Fail);
        return RuntimeClosure::new(message, false, move || {
            requests.enqueue(Modification::remove(kind, name));
            Outcome::failure()
        });
    }

    if exists && !force {
        return RuntimeClosure::success(ctx.fmt.link(
            kind.user_str(),
            name,
            &target_dir,
            LinkKind::Exists,
        ));
    }

    let link_kind = if exists {
        LinkKind::Overwrite
    } else {
        LinkKind::New
    };
    let message = ctx.fmt.link(kind.user_str(), name, &target_dir, link_kind);
    RuntimeClosure::new(message, true, move || copy_file(&source, &target))
}

fn copy_file(source: &Path, target: &Path) -> Outcome {
    let result = target
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| fs::copy(source, target).map(|_| ()));
    Outcome::from(result)
}

fn name_links<'a, I>(
    ctx: &'a StepContext<'a>,
    kind: ResourceKind,
    names: I,
    force: bool,
    base: PathBuf,
) -> impl Iterator<Item = RuntimeClosure> + 'a
where
    I: IntoIterator<Item = String> + 'a,
{
    let library = ctx.project.library();
    names.into_iter().map(move |name| {
        link_closure(
            ctx,
            kind,
            &name,
            library.resource_path(kind, &name),
            linked_path(&base, kind, &name),
            force,
        )
    })
}

/// Links for everything the template dictionary declares, read lazily per kind.
pub(crate) fn template_links<'a>(
    ctx: &'a StepContext<'a>,
    force: bool,
    target_dir: Option<PathBuf>,
) -> impl Iterator<Item = RuntimeClosure> + 'a {
    ResourceKind::ALL.into_iter().flat_map(move |kind| {
        let base = target_dir
            .clone()
            .unwrap_or_else(|| ctx.project.data_dir());
        name_links(ctx, kind, ctx.template.names(kind), force, base)
    })
}

/// Link library resources of one kind by name.
#[derive(Debug, Clone)]
pub struct NameSequenceLinker {
    pub kind: ResourceKind,
    pub names: Vec<String>,
    pub force: bool,
    /// Data folder to link into; the project's own by default.
    pub target_dir: Option<PathBuf>,
}

impl NameSequenceLinker {
    pub fn new(kind: ResourceKind, names: Vec<String>, force: bool) -> Self {
        Self {
            kind,
            names,
            force,
            target_dir: None,
        }
    }
}

impl Step for NameSequenceLinker {
    fn name(&self) -> &'static str {
        "link-names"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        let base = self
            .target_dir
            .clone()
            .unwrap_or_else(|| ctx.project.data_dir());
        Box::new(name_links(
            ctx,
            self.kind,
            self.names.iter().cloned(),
            self.force,
            base,
        ))
    }
}

/// Link arbitrary files into the project as resources of one kind.
///
/// The resource name is the file stem. Files with the wrong suffix fail.
#[derive(Debug, Clone)]
pub struct PathSequenceLinker {
    pub kind: ResourceKind,
    pub paths: Vec<PathBuf>,
    pub force: bool,
}

impl Step for PathSequenceLinker {
    fn name(&self) -> &'static str {
        "link-paths"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        let base = ctx.project.data_dir();
        Box::new(self.paths.iter().map(move |path| {
            let suffix = path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default();
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            if suffix != self.kind.suffix() || stem.is_empty() {
                return RuntimeClosure::fail(
                    ctx.fmt.error(&format!("Filetype '{}' is invalid!", suffix)),
                );
            }
            link_closure(
                ctx,
                self.kind,
                &stem,
                path.clone(),
                linked_path(&base, self.kind, &stem),
                self.force,
            )
        }))
    }
}

/// Link every resource the template dictionary declares.
///
/// Names are read when each kind is reached, so modifications applied by
/// earlier closures of the same run are visible.
#[derive(Debug, Clone, Default)]
pub struct TemplateDictLinker {
    pub force: bool,
    pub target_dir: Option<PathBuf>,
}

impl TemplateDictLinker {
    pub fn new(force: bool) -> Self {
        Self {
            force,
            target_dir: None,
        }
    }
}

impl Step for TemplateDictLinker {
    fn name(&self) -> &'static str {
        "link-template"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        Box::new(template_links(ctx, self.force, self.target_dir.clone()))
    }
}
