//! Project detection and settings
//!
//! A directory is an Oryum project when it, or one of its ancestors, holds
//! an `oryum.json` marker. The same file carries the project settings,
//! layered over [`ProjectSettings::default`] with figment.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use figment::{
    providers::{Format, Json, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::ScaffoldError;
use crate::templates::{DirectoryTemplates, TemplateRenderer};

/// Marker file identifying a project root
pub const MARKER_FILE: &str = "oryum.json";

/// Finds the project root for a working directory
pub trait ProjectLocator {
    /// Return the root of the project containing `start`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::NotAProject`] if no root is found.
    fn locate(&self, start: &Path) -> Result<PathBuf, ScaffoldError>;
}

/// Walks up from the start directory looking for [`MARKER_FILE`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkerLocator;

impl ProjectLocator for MarkerLocator {
    fn locate(&self, start: &Path) -> Result<PathBuf, ScaffoldError> {
        start
            .ancestors()
            .find(|dir| dir.join(MARKER_FILE).is_file())
            .map(Path::to_path_buf)
            .ok_or_else(|| ScaffoldError::NotAProject {
                start: start.to_path_buf(),
            })
    }
}

/// Contents of `oryum.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSettings {
    /// Project name
    pub name: String,
    /// Project version
    pub version: String,
    /// Generator options
    pub generator: GeneratorSettings,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            version: "0.1.0".to_string(),
            generator: GeneratorSettings::default(),
        }
    }
}

impl ProjectSettings {
    /// Settings for a freshly created project
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Options for `make-*` commands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Add `created_at`/`updated_at` columns unless overridden on the command line
    pub timestamps: bool,
    /// Directory of template overrides, relative to the project root
    #[serde(skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            timestamps: true,
            templates_dir: None,
        }
    }
}

/// A located project and its settings
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    settings: ProjectSettings,
}

impl Project {
    /// Locate the project containing `start` and load its settings
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::NotAProject`] outside a project and
    /// [`ScaffoldError::Config`] if `oryum.json` is invalid.
    pub fn discover(locator: &dyn ProjectLocator, start: &Path) -> Result<Self, ScaffoldError> {
        let root = locator.locate(start)?;
        Self::load(root)
    }

    /// Load the settings of the project rooted at `root`
    ///
    /// An empty marker file is accepted and yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Config`] if `oryum.json` is invalid.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self, ScaffoldError> {
        let root = root.into();
        let marker = root.join(MARKER_FILE);

        let mut figment = Figment::new().merge(Serialized::defaults(ProjectSettings::default()));
        let contents = fs::read_to_string(&marker).map_err(|e| ScaffoldError::io(&marker, e))?;
        if !contents.trim().is_empty() {
            figment = figment.merge(Json::file(&marker));
        }

        let settings: ProjectSettings = figment
            .extract()
            .map_err(|e| ScaffoldError::Config(e.to_string()))?;
        tracing::debug!(root = %root.display(), ?settings, "loaded project settings");

        Ok(Self { root, settings })
    }

    /// Project root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loaded settings
    #[must_use]
    pub const fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    /// Renderer honoring the project's template overrides
    #[must_use]
    pub fn renderer(&self) -> TemplateRenderer {
        match &self.settings.generator.templates_dir {
            Some(dir) => {
                let dir = self.root.join(dir);
                tracing::debug!(dir = %dir.display(), "template overrides enabled");
                TemplateRenderer::new(Arc::new(DirectoryTemplates::new(dir)))
            }
            None => TemplateRenderer::embedded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_locate_from_nested_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MARKER_FILE), "{}").unwrap();
        let nested = dir.path().join("models").join("deep");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(MarkerLocator.locate(&nested).unwrap(), dir.path());
    }

    #[test]
    fn test_locate_outside_project() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            MarkerLocator.locate(dir.path()),
            Err(ScaffoldError::NotAProject { .. })
        ));
    }

    #[test]
    fn test_marker_directory_is_not_a_project() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(MARKER_FILE)).unwrap();
        assert!(MarkerLocator.locate(dir.path()).is_err());
    }

    #[test]
    fn test_defaults_for_empty_marker() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MARKER_FILE), "").unwrap();

        let project = Project::load(dir.path()).unwrap();
        assert_eq!(project.settings(), &ProjectSettings::default());
        assert!(project.settings().generator.timestamps);
    }

    #[test]
    fn test_partial_settings_merge_with_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MARKER_FILE),
            r#"{ "name": "loja", "generator": { "timestamps": false } }"#,
        )
        .unwrap();

        let settings = Project::load(dir.path()).unwrap().settings;
        assert_eq!(settings.name, "loja");
        assert_eq!(settings.version, "0.1.0");
        assert!(!settings.generator.timestamps);
        assert_eq!(settings.generator.templates_dir, None);
    }

    #[test]
    fn test_invalid_settings() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MARKER_FILE), r#"{ "generator": { "timestamps": "sim" } }"#).unwrap();

        assert!(matches!(
            Project::load(dir.path()),
            Err(ScaffoldError::Config(_))
        ));
    }

    #[test]
    fn test_renderer_uses_overrides() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(MARKER_FILE),
            r#"{ "generator": { "templates_dir": "custom" } }"#,
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("custom/snippets")).unwrap();
        fs::write(
            dir.path().join("custom/snippets/model.py.jinja2"),
            "# {{ model_name }}\n",
        )
        .unwrap();

        let project = Project::load(dir.path()).unwrap();
        let out = project
            .renderer()
            .render(crate::templates::MODEL_TEMPLATE, serde_json::json!({ "model_name": "Produto" }))
            .unwrap();
        assert_eq!(out, "# Produto\n");
    }
}
