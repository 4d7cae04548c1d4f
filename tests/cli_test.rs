//! Integration tests for the `tpr` binary.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A user library under `<temp>/data` and an empty project directory.
struct Workspace {
    temp: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("paper")).unwrap();
        fs::create_dir_all(temp.path().join("config")).unwrap();

        let data = temp.path().join("data");
        let template = data.join("templates/article");
        fs::create_dir_all(&template).unwrap();
        fs::write(template.join("document.tex"), "\\documentclass{article}\n").unwrap();
        fs::write(template.join("template.yml"), "macros: [general]\n").unwrap();
        let macros = data.join("resources/macros");
        fs::create_dir_all(&macros).unwrap();
        fs::write(macros.join("general.sty"), "% general\n").unwrap();
        fs::write(macros.join("extra.sty"), "% extra\n").unwrap();

        Self { temp }
    }

    fn root(&self) -> PathBuf {
        self.temp.path().join("paper")
    }

    fn tpr(&self) -> Command {
        let mut cmd = Command::new(cargo_bin("tpr"));
        cmd.env("TEXPROJECT_CONFIG_DIR", self.temp.path().join("config"))
            .env("TEXPROJECT_DATA_DIR", self.temp.path().join("data"))
            .env("CI", "true")
            .env("NO_COLOR", "1")
            .arg("-C")
            .arg(self.root());
        cmd
    }
}

fn is_empty_dir(path: &Path) -> bool {
    fs::read_dir(path).unwrap().next().is_none()
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tpr"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("LaTeX projects"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tpr"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_rejects_unknown_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tpr"));
    cmd.arg("frobnicate");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn init_dry_run_touches_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();
    ws.tpr()
        .args(["--dry-run", "init", "article"])
        .assert()
        .success()
        .stdout(predicate::str::contains("template dictionary"));
    assert!(is_empty_dir(&ws.root()));
    Ok(())
}

#[test]
fn init_creates_project() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();
    ws.tpr().args(["init", "article"]).assert().success();

    let data_dir = ws.root().join(".texproject");
    assert!(data_dir.join("template.yml").is_file());
    assert!(ws.root().join("main.tex").is_file());
    assert!(data_dir.join("macros/local-general.sty").is_file());

    ws.tpr()
        .args(["init", "article"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
    Ok(())
}

#[test]
fn template_add_links_and_declares() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();
    ws.tpr().args(["init", "article"]).assert().success();
    ws.tpr()
        .args(["template", "add", "--macro", "extra"])
        .assert()
        .success();

    let data_dir = ws.root().join(".texproject");
    let dict = fs::read_to_string(data_dir.join("template.yml"))?;
    assert!(dict.contains("extra"));
    assert!(data_dir.join("macros/local-extra.sty").is_file());
    Ok(())
}

#[test]
fn unknown_resource_is_a_usage_error() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();
    ws.tpr().args(["init", "article"]).assert().success();
    ws.tpr()
        .args(["template", "add", "--macro", "ghost"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown macro 'ghost'"));
    Ok(())
}

#[test]
fn commands_outside_a_project_exit_with_usage_code() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();
    ws.tpr()
        .args(["util", "refresh"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No texproject project found"));
    Ok(())
}

#[test]
fn list_prints_installed_names() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();
    ws.tpr()
        .args(["list", "macro"])
        .assert()
        .success()
        .stdout(predicate::str::contains("general").and(predicate::str::contains("extra")));

    ws.tpr()
        .args(["list", "template", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"article\""));
    Ok(())
}

#[test]
fn completions_are_generated() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("tpr"));
    cmd.args(["completions", "bash"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("tpr"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn config_edits_template_by_default() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();
    ws.tpr().args(["init", "article"]).assert().success();
    let opened = ws.temp.path().join("opened");

    ws.tpr()
        .env("VISUAL", format!("printf %s > '{}'", opened.display()))
        .arg("config")
        .assert()
        .success();

    let path = fs::read_to_string(&opened)?;
    assert!(path.ends_with(".texproject/template.yml"), "{}", path);
    Ok(())
}

#[test]
fn archive_format_flag_overrides_suffix() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();
    ws.tpr().args(["init", "article"]).assert().success();
    ws.tpr()
        .args(["--dry-run", "archive", "paper.tar", "--format", "zip"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("paper.tar.zip")
                .and(predicate::str::contains("compression 'zip'")),
        );
    Ok(())
}

#[test]
fn archive_refuses_to_overwrite_without_force() -> Result<(), Box<dyn std::error::Error>> {
    let ws = Workspace::new();
    ws.tpr().args(["init", "article"]).assert().success();
    fs::write(ws.root().join("paper.zip"), "")?;

    ws.tpr()
        .args(["--dry-run", "archive", "paper.zip"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));
    ws.tpr()
        .args(["--dry-run", "archive", "paper.zip", "--force"])
        .assert()
        .success();
    Ok(())
}
