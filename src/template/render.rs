//! Template rendering with LaTeX-friendly delimiters.
//!
//! Jinja's default `{{ }}` / `{% %}` clash with TeX braces, so templates use
//! `<+ variable +>`, `<* block *>` and `<# comment #>`.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{Datelike, Local};
use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, ErrorKind};
use serde::Serialize;

use crate::config::{GithubConfig, ProcessConfig, Project, RenderConfig};
use crate::error::{Result, TexprojectError};

use super::dict::TemplateDict;
use super::kind::ResourceKind;

/// Values visible to a template.
#[derive(Debug, Clone, Serialize)]
pub struct RenderContext<'a> {
    user: &'a serde_yaml::Mapping,
    template: &'a TemplateDict,
    config: RenderConfig,
    github: &'a GithubConfig,
    process: &'a ProcessConfig,
    bibliography: String,
    replace: BTreeMap<String, String>,
    date: DateContext,
}

#[derive(Debug, Clone, Serialize)]
struct DateContext {
    year: i32,
    month: u32,
    day: u32,
    iso: String,
}

impl<'a> RenderContext<'a> {
    pub fn new(project: &'a Project, template: &'a TemplateDict) -> Self {
        let config = project.config();
        let today = Local::now().date_naive();
        let mut ctx = Self {
            user: &config.user,
            template,
            config: config.render.clone(),
            github: &config.github,
            process: &config.process,
            bibliography: String::new(),
            replace: config.render.replace_text.clone(),
            date: DateContext {
                year: today.year(),
                month: today.month(),
                day: today.day(),
                iso: today.format("%Y-%m-%d").to_string(),
            },
        };
        ctx.update_bibliography();
        ctx
    }

    /// Render as if the project data folder were called `folder`.
    pub fn with_data_folder(mut self, folder: &str) -> Self {
        self.config.project_data_folder = folder.to_string();
        self.update_bibliography();
        self
    }

    fn update_bibliography(&mut self) {
        self.bibliography = format!(
            "\\input{{{}/{}}}",
            self.config.project_data_folder, self.config.bibinfo_file
        );
    }
}

fn data_name(name: String, kind: String) -> std::result::Result<String, minijinja::Error> {
    let kind = ResourceKind::from_str(&kind)
        .map_err(|e| minijinja::Error::new(ErrorKind::InvalidOperation, e))?;
    Ok(kind.data_name(&name))
}

/// Renders templates with the project's delimiters and filters.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new() -> Result<Self> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters("<*", "*>")
            .variable_delimiters("<+", "+>")
            .comment_delimiters("<#", "#>")
            .build()
            .map_err(|e| TexprojectError::Other(e.into()))?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_trim_blocks(true);
        env.set_keep_trailing_newline(true);
        env.add_filter("data_name", data_name);
        Ok(Self { env })
    }

    /// Render `source`. `name` identifies the template in errors.
    pub fn render(&self, name: &str, source: &str, ctx: &RenderContext<'_>) -> Result<String> {
        self.env
            .render_named_str(name, source, ctx)
            .map_err(|e| TexprojectError::RenderError {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}
