//! Scaffold generator
//!
//! Binds a [`GenerationRequest`] into the template for an [`ArtifactKind`]
//! and produces a [`GeneratedArtifact`]. Nothing here touches the
//! filesystem, and the output depends only on the request: no timestamps,
//! random identifiers or hash-map ordering.

use serde::Serialize;

use super::field_type::{DefaultValue, FieldContext, FieldType};
use super::relationship::{Cardinality, RelationshipContext};
use super::request::{ArtifactKind, GeneratedArtifact, GenerationRequest};
use crate::error::ScaffoldError;
use crate::templates::TemplateRenderer;

/// Names imported from `sqlalchemy`, in emission order
const IMPORT_ORDER: &[&str] = &[
    "Column",
    "Integer",
    "String",
    "Text",
    "Float",
    "Numeric",
    "Boolean",
    "DateTime",
    "Date",
    "JSON",
    "ForeignKey",
];

/// Model/controller scaffold generator
pub struct ScaffoldGenerator {
    renderer: TemplateRenderer,
}

/// Variables bound into snippet templates
#[derive(Debug, Serialize)]
struct TemplateContext<'a> {
    model_name: &'a str,
    file_stem: &'a str,
    table_name: String,
    fields: Vec<FieldContext<'a>>,
    relationships: Vec<RelationshipContext<'a>>,
    timestamps: bool,
    imports: Vec<&'static str>,
    needs_datetime: bool,
    needs_date: bool,
}

impl ScaffoldGenerator {
    /// Create a generator rendering through `renderer`
    #[must_use]
    pub const fn new(renderer: TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Render the artifact of `kind` for `request`
    ///
    /// # Errors
    ///
    /// Returns an error if the template is missing or fails to render.
    pub fn generate(
        &self,
        kind: ArtifactKind,
        request: &GenerationRequest,
    ) -> Result<GeneratedArtifact, ScaffoldError> {
        let entity = request.entity();
        let context = Self::context(request);

        tracing::debug!(
            template = kind.template(),
            entity = %entity.type_name,
            fields = request.fields().len(),
            relationships = request.relationships().len(),
            "rendering template"
        );
        let content = self.renderer.render(kind.template(), &context)?;

        Ok(GeneratedArtifact {
            path: kind.relative_path(entity),
            content,
            aggregator: kind.aggregator_path(),
            registration: kind.registration_line(entity),
        })
    }

    fn context(request: &GenerationRequest) -> TemplateContext<'_> {
        let entity = request.entity();
        TemplateContext {
            model_name: &entity.type_name,
            file_stem: &entity.file_stem,
            table_name: entity.table_name(),
            fields: request.fields().iter().map(FieldContext::from).collect(),
            relationships: request
                .relationships()
                .iter()
                .map(RelationshipContext::from)
                .collect(),
            timestamps: request.timestamps(),
            imports: Self::collect_imports(request),
            needs_datetime: request.timestamps()
                || Self::defaults_to_now(request, FieldType::DateTime),
            needs_date: Self::defaults_to_now(request, FieldType::Date),
        }
    }

    /// `sqlalchemy` names the model uses, deduplicated, in [`IMPORT_ORDER`]
    fn collect_imports(request: &GenerationRequest) -> Vec<&'static str> {
        let mut used = vec!["Column", "Integer"];
        used.extend(
            request
                .fields()
                .iter()
                .map(|f| f.field_type.sqlalchemy_import()),
        );
        if request.timestamps() {
            used.push("DateTime");
        }
        if request
            .relationships()
            .iter()
            .any(|r| r.cardinality == Cardinality::One)
        {
            used.push("ForeignKey");
        }

        IMPORT_ORDER
            .iter()
            .copied()
            .filter(|name| used.contains(name))
            .collect()
    }

    /// Whether some field of `field_type` defaults to the current time
    fn defaults_to_now(request: &GenerationRequest, field_type: FieldType) -> bool {
        request.fields().iter().any(|f| {
            f.field_type == field_type
                && matches!(
                    f.modifiers.default,
                    Some(DefaultValue::Implicit | DefaultValue::Now)
                )
        })
    }
}

impl Default for ScaffoldGenerator {
    fn default() -> Self {
        Self::new(TemplateRenderer::embedded())
    }
}
