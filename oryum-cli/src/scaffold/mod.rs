//! Model and controller scaffolding
//!
//! The pipeline is leaf-first:
//!
//! 1. [`parse_fields`] / [`parse_relationships`] turn the DSL strings into
//!    descriptors
//! 2. [`EntityName::parse`] normalizes the entity name
//! 3. [`ScaffoldGenerator`] renders a [`GenerationRequest`] into a
//!    [`GeneratedArtifact`]
//! 4. [`materialize`] writes it and registers it in the aggregator
//!
//! # Field Syntax
//!
//! ```text
//! nome:string,preco:float,ativo:bool:default=true,descricao:text:nullable
//! ```
//!
//! # Relationship Syntax
//!
//! ```text
//! categorias:Categoria:many,fornecedor:Fornecedor:one
//! ```

mod field_type;
mod generator;
mod materializer;
mod naming;
mod relationship;
mod request;

pub use field_type::{parse_fields, DefaultValue, FieldDescriptor, FieldType, Modifiers};
pub use generator::ScaffoldGenerator;
pub use materializer::{materialize, Materialized};
pub(crate) use materializer::write_new;
pub use naming::{EntityName, TemplateHelpers};
pub use relationship::{parse_relationships, Cardinality, RelationshipDescriptor};
pub use request::{ArtifactKind, GeneratedArtifact, GenerationRequest};
