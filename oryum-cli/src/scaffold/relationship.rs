//! Relationship definitions and parser
//!
//! Format: comma-separated `name:Target:cardinality` entries, e.g.
//! `categorias:Categoria:many,fornecedor:Fornecedor:one`.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::field_type::validate_name;
use super::naming::{EntityName, TemplateHelpers};
use crate::error::SpecError;

/// A relationship definition parsed from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDescriptor {
    /// Attribute name on the generated model
    pub name: String,
    /// Normalized type name of the related entity
    pub target: String,
    /// How many related rows one instance holds
    pub cardinality: Cardinality,
}

/// Relationship cardinality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Many-to-one: a foreign key column on this model
    One,
    /// One-to-many collection
    Many,
}

impl RelationshipDescriptor {
    /// Parse a single relationship definition
    ///
    /// # Examples
    ///
    /// ```
    /// # use oryum_cli::scaffold::{Cardinality, RelationshipDescriptor};
    /// let rel = RelationshipDescriptor::parse("categorias:categoria:MANY").unwrap();
    /// assert_eq!(rel.target, "Categoria");
    /// assert_eq!(rel.cardinality, Cardinality::Many);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the entry does not have exactly three parts, the
    /// name or target is invalid, or the cardinality is not `one`/`many`.
    pub fn parse(entry: &str) -> Result<Self, SpecError> {
        let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
        let [name, target, cardinality] = parts.as_slice() else {
            return Err(SpecError::MalformedRelationship {
                entry: entry.to_string(),
            });
        };

        if name.is_empty() {
            return Err(SpecError::EmptyName {
                entry: entry.to_string(),
            });
        }
        validate_name(entry, name)?;

        if target.is_empty() {
            return Err(SpecError::MalformedRelationship {
                entry: entry.to_string(),
            });
        }
        let target = EntityName::parse(target)?.type_name;

        let cardinality =
            Cardinality::parse(cardinality).ok_or_else(|| SpecError::UnknownCardinality {
                relationship: (*name).to_string(),
                token: (*cardinality).to_string(),
            })?;

        Ok(Self {
            name: (*name).to_string(),
            target,
            cardinality,
        })
    }
}

impl Cardinality {
    /// Parse a cardinality token (case-insensitive)
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "one" => Some(Self::One),
            "many" => Some(Self::Many),
            _ => None,
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => f.write_str("one"),
            Self::Many => f.write_str("many"),
        }
    }
}

/// Parse a comma-separated relationship list
///
/// A missing or blank spec yields no relationships. Duplicate names are
/// passed through.
///
/// # Errors
///
/// Returns the first entry that fails to parse.
pub fn parse_relationships(spec: Option<&str>) -> Result<Vec<RelationshipDescriptor>, SpecError> {
    let Some(spec) = spec.filter(|s| !s.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    let relationships = spec
        .split(',')
        .enumerate()
        .map(|(idx, entry)| {
            if entry.trim().is_empty() {
                return Err(SpecError::EmptyEntry { position: idx + 1 });
            }
            RelationshipDescriptor::parse(entry.trim())
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    for rel in &relationships {
        if !seen.insert(rel.name.as_str()) {
            tracing::warn!(relationship = %rel.name, "duplicate relationship name passed through");
        }
    }

    Ok(relationships)
}

/// Template-facing view of a relationship
#[derive(Debug, Serialize)]
pub struct RelationshipContext<'a> {
    pub name: &'a str,
    pub target: &'a str,
    pub cardinality: Cardinality,
    pub target_table: String,
    pub foreign_key: String,
}

impl<'a> From<&'a RelationshipDescriptor> for RelationshipContext<'a> {
    fn from(rel: &'a RelationshipDescriptor) -> Self {
        Self {
            name: &rel.name,
            target: &rel.target,
            cardinality: rel.cardinality,
            target_table: TemplateHelpers::to_table_name(&rel.target),
            foreign_key: format!("{}_id", rel.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let rels =
            parse_relationships(Some("categorias:Categoria:many,fornecedor:Fornecedor:one")).unwrap();
        assert_eq!(rels.len(), 2);
        assert_eq!(rels[0].name, "categorias");
        assert_eq!(rels[0].cardinality, Cardinality::Many);
        assert_eq!(rels[1].name, "fornecedor");
        assert_eq!(rels[1].target, "Fornecedor");
        assert_eq!(rels[1].cardinality, Cardinality::One);
    }

    #[test]
    fn test_parse_empty_spec() {
        assert!(parse_relationships(None).unwrap().is_empty());
        assert!(parse_relationships(Some(" ")).unwrap().is_empty());
    }

    #[test]
    fn test_cardinality_is_case_insensitive() {
        let rel = RelationshipDescriptor::parse("dono:Usuario:One").unwrap();
        assert_eq!(rel.cardinality, Cardinality::One);
        assert_eq!(rel.cardinality.to_string(), "one");
    }

    #[test]
    fn test_target_is_normalized() {
        let rel = RelationshipDescriptor::parse("dono:usuario:one").unwrap();
        assert_eq!(rel.target, "Usuario");
    }

    #[test]
    fn test_unknown_cardinality() {
        let err = RelationshipDescriptor::parse("tags:Tag:several").unwrap_err();
        assert_eq!(
            err,
            SpecError::UnknownCardinality {
                relationship: "tags".to_string(),
                token: "several".to_string(),
            }
        );
    }

    #[test]
    fn test_malformed_entries() {
        for entry in ["tags", "tags:Tag", "tags:Tag:many:extra", "tags::many"] {
            assert!(
                matches!(
                    RelationshipDescriptor::parse(entry),
                    Err(SpecError::MalformedRelationship { .. })
                ),
                "{entry}"
            );
        }
    }

    #[test]
    fn test_invalid_target() {
        assert!(matches!(
            RelationshipDescriptor::parse("tags:1Tag:many"),
            Err(SpecError::InvalidEntityName { .. })
        ));
    }

    #[test]
    fn test_context_derives_foreign_key() {
        let rel = RelationshipDescriptor::parse("fornecedor:Fornecedor:one").unwrap();
        let ctx = RelationshipContext::from(&rel);
        assert_eq!(ctx.foreign_key, "fornecedor_id");
        assert_eq!(ctx.target_table, "fornecedors");
    }
}
