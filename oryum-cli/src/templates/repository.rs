//! Template sources
//!
//! Templates ship inside the binary. A project can override any of them by
//! pointing `generator.templates_dir` in `oryum.json` at a directory that
//! mirrors the embedded layout (`snippets/model.py.jinja2`, ...). Templates
//! missing from that directory fall back to the embedded copies.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Model snippet template name
pub const MODEL_TEMPLATE: &str = "snippets/model.py.jinja2";
/// Controller snippet template name
pub const CONTROLLER_TEMPLATE: &str = "snippets/controller.py.jinja2";

/// Embedded template files, keyed by name
const EMBEDDED: &[(&str, &str)] = &[
    (MODEL_TEMPLATE, include_str!("../../templates/snippets/model.py.jinja2")),
    (CONTROLLER_TEMPLATE, include_str!("../../templates/snippets/controller.py.jinja2")),
    ("project/app.py.jinja2", include_str!("../../templates/project/app.py.jinja2")),
    ("project/config.py.jinja2", include_str!("../../templates/project/config.py.jinja2")),
    ("project/init_db.py.jinja2", include_str!("../../templates/project/init_db.py.jinja2")),
    (
        "project/requirements.txt.jinja2",
        include_str!("../../templates/project/requirements.txt.jinja2"),
    ),
    (
        "project/models/__init__.py.jinja2",
        include_str!("../../templates/project/models/__init__.py.jinja2"),
    ),
    (
        "project/models/base.py.jinja2",
        include_str!("../../templates/project/models/base.py.jinja2"),
    ),
    (
        "project/controllers/__init__.py.jinja2",
        include_str!("../../templates/project/controllers/__init__.py.jinja2"),
    ),
    (
        "project/routes/__init__.py.jinja2",
        include_str!("../../templates/project/routes/__init__.py.jinja2"),
    ),
    (
        "project/templates/index.html.jinja2",
        include_str!("../../templates/project/templates/index.html.jinja2"),
    ),
];

/// A source of named templates
pub trait TemplateRepository: Send + Sync {
    /// Load the source of template `name`
    ///
    /// Returns `Ok(None)` when the repository has no such template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template exists but cannot be read.
    fn load(&self, name: &str) -> io::Result<Option<String>>;
}

/// Templates compiled into the binary
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    /// Names of every embedded template
    pub fn names() -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(name, _)| *name)
    }
}

impl TemplateRepository for EmbeddedTemplates {
    fn load(&self, name: &str) -> io::Result<Option<String>> {
        Ok(EMBEDDED
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, source)| (*source).to_string()))
    }
}

/// User-customized templates in a directory, over the embedded set
#[derive(Debug, Clone)]
pub struct DirectoryTemplates {
    root: PathBuf,
}

impl DirectoryTemplates {
    /// Create a repository reading from `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Override directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `name` under the root, refusing to leave it
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
            .then(|| self.root.join(relative))
    }
}

impl TemplateRepository for DirectoryTemplates {
    fn load(&self, name: &str) -> io::Result<Option<String>> {
        let Some(path) = self.resolve(name) else {
            return Ok(None);
        };

        match fs::read_to_string(&path) {
            Ok(source) => {
                tracing::debug!(template = name, path = %path.display(), "using template override");
                Ok(Some(source))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => EmbeddedTemplates.load(name),
            Err(err) => Err(err),
        }
    }
}
