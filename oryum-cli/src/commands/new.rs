//! Project scaffolding command

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ScaffoldError;
use crate::project::{ProjectSettings, MARKER_FILE};
use crate::scaffold::{write_new, TemplateHelpers};
use crate::templates::{EmbeddedTemplates, TemplateRenderer};

use super::{CommandContext, Outcome};

/// Prefix of the embedded project skeleton templates
const PROJECT_PREFIX: &str = "project/";
const TEMPLATE_SUFFIX: &str = ".jinja2";

/// Create a new Oryum project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCommand {
    path: PathBuf,
}

#[derive(Debug, Serialize)]
struct ProjectContext<'a> {
    project_name: &'a str,
    project_name_snake: String,
}

impl NewCommand {
    /// Create a command for the project at `path`
    ///
    /// The project name is the last component of `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Execute the command
    pub fn execute(&self, ctx: &CommandContext<'_>) -> Outcome {
        let target = ctx.workdir.join(&self.path);
        let name = project_name(&target).unwrap_or_default();
        ctx.reporter.progress(
            &ctx.translator
                .text("Creating project {name}...", &[("name", &name)]),
        );

        match Self::create(&target) {
            Ok(name) => {
                ctx.reporter.success(
                    &ctx.translator.text(
                        "Created project {name} in {path}",
                        &[("name", &name), ("path", &target.display().to_string())],
                    ),
                    &next_steps(ctx, &self.path),
                );
                Outcome::Success { path: target }
            }
            Err(err) => ctx.fail(&err),
        }
    }

    fn create(target: &Path) -> Result<String, ScaffoldError> {
        let name = project_name(target)
            .filter(|name| is_valid_project_name(name))
            .ok_or_else(|| ScaffoldError::InvalidProjectName(target.display().to_string()))?;

        if target.exists() {
            return Err(ScaffoldError::AlreadyExists {
                path: target.to_path_buf(),
            });
        }
        fs::create_dir_all(target).map_err(|e| ScaffoldError::io(target, e))?;

        let manifest = serde_json::to_string_pretty(&ProjectSettings::named(&name))
            .map_err(|e| ScaffoldError::Config(e.to_string()))?;
        write_new(&target.join(MARKER_FILE), &format!("{manifest}\n"))?;

        let renderer = TemplateRenderer::embedded();
        let context = ProjectContext {
            project_name: &name,
            project_name_snake: TemplateHelpers::to_snake_case(&name),
        };

        for template in EmbeddedTemplates::names().filter(|t| t.starts_with(PROJECT_PREFIX)) {
            let relative = template
                .strip_prefix(PROJECT_PREFIX)
                .and_then(|t| t.strip_suffix(TEMPLATE_SUFFIX))
                .unwrap_or(template);
            let path = target.join(relative);

            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| ScaffoldError::io(parent, e))?;
            }
            let content = renderer.render(template, &context)?;
            write_new(&path, &content)?;
            tracing::debug!(path = %path.display(), "generated");
        }

        tracing::info!(project = %name, path = %target.display(), "project created");
        Ok(name)
    }
}

/// Final path component, if it is valid UTF-8
fn project_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

/// Validate a project name
///
/// Must start with an ASCII letter or underscore and contain only ASCII
/// alphanumerics, underscores and hyphens.
fn is_valid_project_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn next_steps(ctx: &CommandContext<'_>, path: &Path) -> Vec<String> {
    let steps = [
        format!("cd {}", path.display()),
        "pip install -r requirements.txt".to_string(),
        "oryum make-model Produto --fields nome:string,preco:float".to_string(),
        "python init_db.py".to_string(),
        "python app.py".to_string(),
    ];

    std::iter::once(ctx.translator.lookup("Next steps:").to_string())
        .chain(steps.into_iter().map(|step| format!("  {step}")))
        .collect()
}
