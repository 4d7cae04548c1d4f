//! Filesystem closures and the project cleanup step.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::RegexSet;

use crate::control::{Closures, Outcome, RuntimeClosure, Step, StepContext};
use crate::template::ResourceKind;
use crate::ui::MessageFormatter;

/// Remove a file. A file that is already gone counts as removed.
pub fn remove_path(fmt: &MessageFormatter, target: &Path) -> RuntimeClosure {
    let target = target.to_path_buf();
    RuntimeClosure::new(fmt.remove(&target), true, move || {
        match fs::remove_file(&target) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Outcome::from_error(e),
            _ => Outcome::success(),
        }
    })
}

/// Rename (move) a file or directory.
pub fn rename_path(fmt: &MessageFormatter, source: &Path, target: &Path) -> RuntimeClosure {
    let (source, target) = (source.to_path_buf(), target.to_path_buf());
    RuntimeClosure::new(fmt.rename(&source, &target), true, move || {
        Outcome::from(fs::rename(&source, &target))
    })
}

/// Shell-style glob patterns matched against file names.
#[derive(Debug, Clone)]
pub struct IgnorePatterns {
    set: RegexSet,
}

impl IgnorePatterns {
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, regex::Error> {
        let set = RegexSet::new(patterns.iter().map(|p| glob_to_regex(p.as_ref())))?;
        Ok(Self { set })
    }

    pub fn is_match(&self, file_name: &str) -> bool {
        self.set.is_match(file_name)
    }
}

/// Translate `*`, `?` and `[...]` into an anchored regex.
fn glob_to_regex(pattern: &str) -> String {
    let mut out = String::from("^");
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                let mut class = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' && !class.is_empty() {
                        closed = true;
                        break;
                    }
                    class.push(c);
                }
                if closed {
                    out.push('[');
                    if let Some(rest) = class.strip_prefix('!') {
                        out.push('^');
                        out.push_str(&rest.replace('\\', "\\\\"));
                    } else {
                        out.push_str(&class.replace('\\', "\\\\"));
                    }
                    out.push(']');
                } else {
                    out.push_str(&regex::escape(&format!("[{}", class)));
                }
            }
            c => out.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }
    out.push('$');
    out
}

fn copy_tree(source: &Path, target: &Path, ignore: &IgnorePatterns) -> io::Result<()> {
    fs::create_dir_all(target)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let name = entry.file_name();
        if ignore.is_match(&name.to_string_lossy()) {
            continue;
        }
        // Follows symlinks, so a dangling link fails the copy.
        let dest = target.join(&name);
        if fs::metadata(entry.path())?.is_dir() {
            copy_tree(&entry.path(), &dest, ignore)?;
        } else {
            fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(())
}

/// Recursively copy `source` to `target`, skipping names matching `ignore_patterns`.
///
/// Later steps depend on the copy, so a failure aborts the run.
pub fn copy_directory<S: AsRef<str>>(
    fmt: &MessageFormatter,
    source: &Path,
    target: &Path,
    ignore_patterns: &[S],
) -> RuntimeClosure {
    let message = fmt.copy(source, target);
    let ignore = match IgnorePatterns::new(ignore_patterns) {
        Ok(ignore) => ignore,
        Err(e) => {
            let text = format!("Invalid ignore pattern: {}", e);
            return RuntimeClosure::new(message, false, move || {
                Outcome::failure().with_payload(text)
            })
            .abort_on_failure(true);
        }
    };
    let (source, target) = (source.to_path_buf(), target.to_path_buf());
    RuntimeClosure::new(message, true, move || match copy_tree(&source, &target, &ignore) {
        Ok(()) => Outcome::success(),
        Err(e) => Outcome::failure().with_payload(format!(
            "Directory copying failed. You may have broken symlinks?\n{}",
            e
        )),
    })
    .abort_on_failure(true)
}

/// Linked resource files in `dir` that `keep` does not want.
fn stale_links(dir: &Path, kind: ResourceKind, keep: &[String]) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut stale: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            let file_name = entry.file_name();
            match kind.linked_name(&file_name.to_string_lossy()) {
                Some(name) => !keep.iter().any(|k| k == name),
                None => false,
            }
        })
        .map(|entry| entry.path())
        .collect();
    stale.sort();
    stale
}

/// Remove linked resources the template dictionary no longer declares.
#[derive(Debug, Clone, Default)]
pub struct CleanProject {
    /// Also remove the files written by `tpr git init`.
    pub remove_git_files: bool,
    /// Data folder to clean; the project's own by default.
    pub data_dir: Option<PathBuf>,
}

impl Step for CleanProject {
    fn name(&self) -> &'static str {
        "clean-project"
    }

    fn produce<'a>(&'a self, ctx: &'a StepContext<'a>) -> Closures<'a> {
        let data_dir = self
            .data_dir
            .clone()
            .unwrap_or_else(|| ctx.project.data_dir());
        Box::new(clean_closures(ctx, data_dir, self.remove_git_files))
    }
}

pub(crate) fn clean_closures<'a>(
    ctx: &'a StepContext<'a>,
    data_dir: PathBuf,
    remove_git_files: bool,
) -> impl Iterator<Item = RuntimeClosure> + 'a {
    let links = ResourceKind::ALL.into_iter().flat_map(move |kind| {
        stale_links(&data_dir.join(kind.dir_name()), kind, &ctx.template.names(kind))
            .into_iter()
            .map(move |path| remove_path(ctx.fmt, &path))
    });

    let git_files: Vec<PathBuf> = if remove_git_files {
        ctx.project.git_files().into_iter().collect()
    } else {
        Vec::new()
    };
    let git = git_files
        .into_iter()
        .filter(|path| path.exists())
        .map(move |path| remove_path(ctx.fmt, &path));

    links.chain(git)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps;
    use crate::steps::link::linked_path;
    use crate::steps::testing::Fixture;
    use crate::template::TemplateDict;
    use tempfile::TempDir;

    #[test]
    fn glob_translation() {
        let ignore = IgnorePatterns::new(&["*.aux", ".git", "file?.log", "[ab].txt"]).unwrap();
        assert!(ignore.is_match("main.aux"));
        assert!(ignore.is_match(".git"));
        assert!(ignore.is_match("file1.log"));
        assert!(ignore.is_match("a.txt"));
        assert!(!ignore.is_match("main.tex"));
        assert!(!ignore.is_match(".gitignore"));
        assert!(!ignore.is_match("c.txt"));
        assert!(!ignore.is_match("mainXaux"));
    }

    #[test]
    fn copy_skips_ignored_names() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        fs::create_dir_all(source.join(".git/objects")).unwrap();
        fs::create_dir_all(source.join("sections")).unwrap();
        fs::write(source.join("main.tex"), "x").unwrap();
        fs::write(source.join("main.aux"), "x").unwrap();
        fs::write(source.join("sections/intro.tex"), "x").unwrap();
        let target = temp.path().join("out");

        let closure = copy_directory(&MessageFormatter::plain(), &source, &target, &[".git", "*.aux"]);
        assert!(closure.aborts_on_failure());
        assert!(closure.run().is_success());

        assert!(target.join("main.tex").is_file());
        assert!(target.join("sections/intro.tex").is_file());
        assert!(!target.join("main.aux").exists());
        assert!(!target.join(".git").exists());
    }

    #[test]
    fn copy_of_missing_source_fails() {
        let temp = TempDir::new().unwrap();
        let closure = copy_directory::<&str>(
            &MessageFormatter::plain(),
            &temp.path().join("missing"),
            &temp.path().join("out"),
            &[],
        );
        let outcome = closure.run();
        assert!(!outcome.is_success());
        assert!(outcome.payload().unwrap().as_text().contains("broken symlinks"));
    }

    #[test]
    fn remove_of_missing_file_succeeds() {
        let temp = TempDir::new().unwrap();
        let closure = remove_path(&MessageFormatter::plain(), &temp.path().join("gone"));
        assert!(closure.run().is_success());
    }

    #[test]
    fn clean_removes_undeclared_links_only() {
        let fx = Fixture::new().with_dict(TemplateDict {
            macros: vec!["kept".into()],
            ..Default::default()
        });
        let data_dir = fx.project.data_dir();
        let kept = linked_path(&data_dir, ResourceKind::Macro, "kept");
        let stale = linked_path(&data_dir, ResourceKind::Macro, "stale");
        let foreign = data_dir.join("macros/notes.sty");
        fs::create_dir_all(kept.parent().unwrap()).unwrap();
        for path in [&kept, &stale, &foreign] {
            fs::write(path, "").unwrap();
        }
        fs::write(fx.project.gitignore(), "").unwrap();

        let (report, _) = fx.run(&steps![CleanProject::default()], false);

        assert_eq!(report.results.len(), 1);
        assert!(kept.exists());
        assert!(!stale.exists());
        assert!(foreign.exists());
        assert!(fx.project.gitignore().exists());
    }

    #[test]
    fn clean_can_remove_git_files() {
        let fx = Fixture::new();
        fs::write(fx.project.gitignore(), "").unwrap();

        let steps = steps![CleanProject {
            remove_git_files: true,
            data_dir: None,
        }];
        let (report, _) = fx.run(&steps, false);

        assert_eq!(report.results.len(), 1);
        assert!(!fx.project.gitignore().exists());
    }
}
