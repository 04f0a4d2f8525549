//! Error types and error handling
//!
//! Parse failures live in [`SpecError`] so the DSL parsers stay independent of
//! the filesystem. Everything the pipeline can fail with is a
//! [`ScaffoldError`], and each variant maps onto one [`FailureKind`] reported
//! back to the user.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Malformed field, relationship or entity-name input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// An entry between two commas was blank
    #[error("entry #{position} is empty")]
    EmptyEntry {
        /// 1-based position of the entry in the list
        position: usize,
    },

    /// Field entry without a `:type` part
    #[error("invalid field definition '{entry}': missing type (expected name:type[:modifier...])")]
    MissingType {
        /// Raw entry text
        entry: String,
    },

    /// Entry whose name part is blank
    #[error("invalid definition '{entry}': name cannot be empty")]
    EmptyName {
        /// Raw entry text
        entry: String,
    },

    /// Entry whose name is not identifier-shaped
    #[error("invalid name '{name}' in '{entry}': use letters, digits and underscores, starting with a letter")]
    InvalidName {
        /// Raw entry text
        entry: String,
        /// Offending name
        name: String,
    },

    /// Type token outside the recognized vocabulary
    #[error("unknown type '{token}' for field '{field}'. Supported types: {supported}")]
    UnknownType {
        /// Field name of the failing entry
        field: String,
        /// Invalid type token
        token: String,
        /// Comma-separated list of accepted types
        supported: &'static str,
    },

    /// Modifier token outside the recognized vocabulary
    #[error("unknown modifier '{token}' for field '{field}'. Valid modifiers: nullable, unique, index, default[=value]")]
    UnknownModifier {
        /// Field name of the failing entry
        field: String,
        /// Invalid modifier token
        token: String,
    },

    /// `default=<value>` literal that does not fit the field type
    #[error("invalid default '{value}' for {field_type} field '{field}'")]
    InvalidDefault {
        /// Field name of the failing entry
        field: String,
        /// Declared type of the field
        field_type: String,
        /// Rejected literal
        value: String,
    },

    /// Relationship entry without exactly three parts
    #[error("invalid relationship definition '{entry}': expected name:Target:cardinality")]
    MalformedRelationship {
        /// Raw entry text
        entry: String,
    },

    /// Cardinality token other than `one` or `many`
    #[error("unknown cardinality '{token}' for relationship '{relationship}'. Expected 'one' or 'many'")]
    UnknownCardinality {
        /// Relationship name of the failing entry
        relationship: String,
        /// Invalid cardinality token
        token: String,
    },

    /// Model or target name the normalizer refuses to guess at
    #[error("invalid entity name '{name}': must start with a letter and contain only letters, digits and underscores")]
    InvalidEntityName {
        /// Raw name as given
        name: String,
    },
}

/// Scaffolding pipeline error type
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Working directory is not inside a scaffolded project
    #[error("no oryum.json found in {} or any parent directory", start.display())]
    NotAProject {
        /// Directory the search started from
        start: PathBuf,
    },

    /// Malformed DSL input
    #[error(transparent)]
    Parse(#[from] SpecError),

    /// Target file is already present
    #[error("{} already exists", path.display())]
    AlreadyExists {
        /// Conflicting path
        path: PathBuf,
    },

    /// Template repository has no template by this name
    #[error("template not found: {name}")]
    TemplateNotFound {
        /// Requested template name
        name: String,
    },

    /// Template failed to compile or render
    #[error("failed to render template {name}: {source}")]
    TemplateRender {
        /// Template being rendered
        name: String,
        /// Underlying engine error
        #[source]
        source: minijinja::Error,
    },

    /// Filesystem failure
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// `oryum.json` could not be read as project settings
    #[error("invalid project configuration: {0}")]
    Config(String),

    /// Name given to `oryum new` is not usable as a project directory
    #[error("invalid project name '{0}': use letters, digits, hyphens and underscores, starting with a letter or underscore")]
    InvalidProjectName(String),
}

impl ScaffoldError {
    /// Build an [`ScaffoldError::Io`] for `path`
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Failure category used for reporting
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::NotAProject { .. } => FailureKind::NotAProject,
            Self::Parse(_) | Self::InvalidProjectName(_) => FailureKind::Parse,
            Self::AlreadyExists { .. } => FailureKind::AlreadyExists,
            Self::TemplateNotFound { .. } => FailureKind::TemplateNotFound,
            Self::TemplateRender { .. } => FailureKind::TemplateRender,
            Self::Io { .. } => FailureKind::Io,
            Self::Config(_) => FailureKind::Config,
        }
    }
}

/// Category of a failed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Not inside a project root
    NotAProject,
    /// Malformed input
    Parse,
    /// Refused to overwrite
    AlreadyExists,
    /// Missing template
    TemplateNotFound,
    /// Template engine error
    TemplateRender,
    /// Filesystem error
    Io,
    /// Invalid project settings
    Config,
}

impl FailureKind {
    /// Short label shown ahead of the error detail
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotAProject => "Not a project",
            Self::Parse => "Invalid input",
            Self::AlreadyExists => "Already exists",
            Self::TemplateNotFound => "Template not found",
            Self::TemplateRender => "Template error",
            Self::Io => "I/O error",
            Self::Config => "Configuration error",
        }
    }
}
