//! Entity name normalization and naming helpers
//!
//! [`EntityName`] applies a single-character case transform and nothing
//! else, so generated identifiers stay predictable from what the user typed.
//! [`TemplateHelpers`] holds the derived spellings the templates need
//! (table names, snake case).

use inflector::Inflector;
use serde::Serialize;

use crate::error::SpecError;

/// Canonical names for one generated entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityName {
    /// Class name, first character upper-cased (e.g. `Produto`)
    pub type_name: String,
    /// Module / file stem, fully lower-cased (e.g. `produto`)
    pub file_stem: String,
}

impl EntityName {
    /// Normalize a raw entity name
    ///
    /// Surrounding whitespace is trimmed, the first character is upper-cased
    /// and the rest is kept as typed. The file stem is the lower-cased type
    /// name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oryum_cli::scaffold::EntityName;
    /// let name = EntityName::parse("produto").unwrap();
    /// assert_eq!(name.type_name, "Produto");
    /// assert_eq!(name.file_stem, "produto");
    ///
    /// let name = EntityName::parse("ItemPedido").unwrap();
    /// assert_eq!(name.file_stem, "itempedido");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::InvalidEntityName`] if the name is empty, does not
    /// start with a letter, or contains anything other than letters, digits
    /// and underscores.
    pub fn parse(raw: &str) -> Result<Self, SpecError> {
        let trimmed = raw.trim();
        let invalid = || SpecError::InvalidEntityName {
            name: raw.to_string(),
        };

        let mut chars = trimmed.chars();
        let first = chars.next().ok_or_else(invalid)?;
        if !first.is_alphabetic() || !is_identifier_tail(chars.as_str()) {
            return Err(invalid());
        }

        let type_name: String = first.to_uppercase().chain(chars).collect();
        // Caseless scripts have no uppercase form to start a class name with
        if !type_name.chars().next().is_some_and(char::is_uppercase) {
            return Err(invalid());
        }

        let file_stem = type_name.to_lowercase();
        Ok(Self {
            type_name,
            file_stem,
        })
    }

    /// SQL table name for this entity
    #[must_use]
    pub fn table_name(&self) -> String {
        TemplateHelpers::to_table_name(&self.type_name)
    }
}

/// `true` when every character is alphanumeric or `_`
pub fn is_identifier_tail(rest: &str) -> bool {
    rest.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// Template helpers for naming conventions
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Convert string to `snake_case`
    ///
    /// # Examples
    ///
    /// ```
    /// # use oryum_cli::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_snake_case("ItemPedido"), "item_pedido");
    /// ```
    #[must_use]
    pub fn to_snake_case(input: &str) -> String {
        input.to_snake_case()
    }

    /// Pluralize a word
    ///
    /// The inflector rules are English. Portuguese regular nouns (`produto`,
    /// `usuario`) pluralize correctly; irregular ones may not.
    #[must_use]
    pub fn pluralize(input: &str) -> String {
        input.to_plural()
    }

    /// Convert a type name to a table name (`snake_case` plural)
    ///
    /// # Examples
    ///
    /// ```
    /// # use oryum_cli::scaffold::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_table_name("Produto"), "produtos");
    /// assert_eq!(TemplateHelpers::to_table_name("ItemPedido"), "item_pedidos");
    /// ```
    #[must_use]
    pub fn to_table_name(model: &str) -> String {
        Self::pluralize(&Self::to_snake_case(model))
    }
}
