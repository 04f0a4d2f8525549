//! Template rendering
//!
//! Uses minijinja (Jinja2-compatible, the same syntax the generated Flask
//! projects use) with auto-escaping disabled since we're generating code.
//! Undefined variables are errors, not empty strings.

use std::sync::Arc;

use minijinja::{Environment, ErrorKind, UndefinedBehavior};
use serde::Serialize;

use crate::error::ScaffoldError;

pub mod repository;

pub use repository::{
    DirectoryTemplates, EmbeddedTemplates, TemplateRepository, CONTROLLER_TEMPLATE, MODEL_TEMPLATE,
};

/// Renders named templates from a [`TemplateRepository`]
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Create a renderer loading templates from `repository`
    #[must_use]
    pub fn new(repository: Arc<dyn TemplateRepository>) -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);
        env.set_loader(move |name| {
            repository.load(name).map_err(|err| {
                minijinja::Error::new(
                    ErrorKind::InvalidOperation,
                    format!("could not read template {name}"),
                )
                .with_source(err)
            })
        });

        Self { env }
    }

    /// Renderer over the embedded templates only
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(Arc::new(EmbeddedTemplates))
    }

    /// Render template `name` with `context`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::TemplateNotFound`] if the repository has no
    /// such template and [`ScaffoldError::TemplateRender`] for syntax errors,
    /// undefined variables or any other engine failure.
    pub fn render<S: Serialize>(&self, name: &str, context: S) -> Result<String, ScaffoldError> {
        let template = self.env.get_template(name).map_err(|source| {
            if source.kind() == ErrorKind::TemplateNotFound {
                ScaffoldError::TemplateNotFound {
                    name: name.to_string(),
                }
            } else {
                ScaffoldError::TemplateRender {
                    name: name.to_string(),
                    source,
                }
            }
        })?;

        template
            .render(context)
            .map_err(|source| ScaffoldError::TemplateRender {
                name: name.to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;
    use serde_json::json;

    struct Fixed(&'static [(&'static str, &'static str)]);

    impl TemplateRepository for Fixed {
        fn load(&self, name: &str) -> io::Result<Option<String>> {
            Ok(self
                .0
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, s)| (*s).to_string()))
        }
    }

    fn renderer(templates: &'static [(&'static str, &'static str)]) -> TemplateRenderer {
        TemplateRenderer::new(Arc::new(Fixed(templates)))
    }

    #[test]
    fn test_render_binds_variables() {
        let r = renderer(&[("hello", "Hello {{ name }}!")]);
        assert_eq!(r.render("hello", json!({ "name": "Produto" })).unwrap(), "Hello Produto!");
    }

    #[test]
    fn test_missing_template() {
        let r = renderer(&[]);
        let err = r.render("nope.jinja2", json!({})).unwrap_err();
        assert!(matches!(err, ScaffoldError::TemplateNotFound { ref name } if name == "nope.jinja2"));
    }

    #[test]
    fn test_undefined_variable_is_an_error() {
        let r = renderer(&[("t", "{{ missing }}")]);
        assert!(matches!(
            r.render("t", json!({})),
            Err(ScaffoldError::TemplateRender { .. })
        ));
    }

    #[test]
    fn test_syntax_error_is_an_error() {
        let r = renderer(&[("t", "{% for x in %}")]);
        assert!(matches!(
            r.render("t", json!({})),
            Err(ScaffoldError::TemplateRender { .. })
        ));
    }

    #[test]
    fn test_no_html_escaping() {
        let r = renderer(&[("t", "{{ code }}")]);
        let out = r.render("t", json!({ "code": "a < b && 'c'" })).unwrap();
        assert_eq!(out, "a < b && 'c'");
    }

    #[test]
    fn test_io_failure_is_reported() {
        struct Broken;
        impl TemplateRepository for Broken {
            fn load(&self, _name: &str) -> io::Result<Option<String>> {
                Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
            }
        }
        let r = TemplateRenderer::new(Arc::new(Broken));
        assert!(matches!(
            r.render("t", json!({})),
            Err(ScaffoldError::TemplateRender { .. })
        ));
    }
}
