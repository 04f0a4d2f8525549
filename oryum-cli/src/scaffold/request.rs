//! Generation request and artifact kinds

use std::path::PathBuf;

use super::field_type::FieldDescriptor;
use super::naming::EntityName;
use super::relationship::RelationshipDescriptor;
use crate::templates::{CONTROLLER_TEMPLATE, MODEL_TEMPLATE};

/// Everything the renderer needs for one entity
///
/// Built once from a single parse and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    entity: EntityName,
    fields: Vec<FieldDescriptor>,
    relationships: Vec<RelationshipDescriptor>,
    timestamps: bool,
}

impl GenerationRequest {
    /// Assemble a request from parsed parts
    #[must_use]
    pub const fn new(
        entity: EntityName,
        fields: Vec<FieldDescriptor>,
        relationships: Vec<RelationshipDescriptor>,
        timestamps: bool,
    ) -> Self {
        Self {
            entity,
            fields,
            relationships,
            timestamps,
        }
    }

    /// Entity names
    #[must_use]
    pub const fn entity(&self) -> &EntityName {
        &self.entity
    }

    /// Fields in input order
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Relationships in input order
    #[must_use]
    pub fn relationships(&self) -> &[RelationshipDescriptor] {
        &self.relationships
    }

    /// Whether `created_at`/`updated_at` columns are generated
    #[must_use]
    pub const fn timestamps(&self) -> bool {
        self.timestamps
    }
}

/// Kind of source file generated for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// SQLAlchemy model under `models/`
    Model,
    /// Flask controller under `controllers/`
    Controller,
}

impl ArtifactKind {
    /// Template rendered for this kind
    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::Model => MODEL_TEMPLATE,
            Self::Controller => CONTROLLER_TEMPLATE,
        }
    }

    /// Project subdirectory holding files of this kind
    #[must_use]
    pub const fn directory(self) -> &'static str {
        match self {
            Self::Model => "models",
            Self::Controller => "controllers",
        }
    }

    /// Python module name for an entity
    #[must_use]
    pub fn module_name(self, entity: &EntityName) -> String {
        match self {
            Self::Model => entity.file_stem.clone(),
            Self::Controller => format!("{}_controller", entity.file_stem),
        }
    }

    /// Class name exported by the module
    #[must_use]
    pub fn class_name(self, entity: &EntityName) -> String {
        match self {
            Self::Model => entity.type_name.clone(),
            Self::Controller => format!("{}Controller", entity.type_name),
        }
    }

    /// Path of the generated file, relative to the project root
    #[must_use]
    pub fn relative_path(self, entity: &EntityName) -> PathBuf {
        PathBuf::from(self.directory()).join(format!("{}.py", self.module_name(entity)))
    }

    /// Path of the aggregator file, relative to the project root
    #[must_use]
    pub fn aggregator_path(self) -> PathBuf {
        PathBuf::from(self.directory()).join("__init__.py")
    }

    /// Import line registering an entity in the aggregator
    #[must_use]
    pub fn registration_line(self, entity: &EntityName) -> String {
        format!(
            "from .{} import {}",
            self.module_name(entity),
            self.class_name(entity)
        )
    }

    /// Human-readable name used in messages
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Controller => "controller",
        }
    }
}

/// A rendered file that has not been written yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Path relative to the project root
    pub path: PathBuf,
    /// Full file contents
    pub content: String,
    /// Aggregator file receiving the registration line
    pub aggregator: PathBuf,
    /// Import line appended to the aggregator
    pub registration: String,
}
