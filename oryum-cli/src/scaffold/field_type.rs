//! Field type definitions and parser for model scaffolding
//!
//! A field list is a comma-separated sequence of `name:type[:modifier]*`
//! entries. Splitting is strict: `,` between entries and `:` inside one, with
//! no escaping.
//!
//! # Supported Field Types
//!
//! - `string` / `str` - `String(255)`
//! - `text` - `Text`
//! - `int` / `integer` - `Integer`
//! - `float` - `Float`
//! - `decimal` / `numeric` - `Numeric(10, 2)`
//! - `bool` / `boolean` - `Boolean`
//! - `datetime` - `DateTime`
//! - `date` - `Date`
//! - `json` - `JSON`
//!
//! ## Modifiers
//! - `:nullable` (alias `:optional`) - column accepts NULL
//! - `:unique` - unique constraint
//! - `:index` (alias `:indexed`) - database index
//! - `:default` - the type's natural default
//! - `:default=<literal>` - explicit default, checked against the type
//!
//! # Examples
//!
//! ```text
//! titulo:string:nullable        → Column(String(255), nullable=True)
//! preco:float                   → Column(Float, nullable=False)
//! email:string:unique:index     → Column(String(255), nullable=False, unique=True, index=True)
//! ativo:bool:default=true       → Column(Boolean, nullable=False, default=True)
//! criado_em:datetime:default    → Column(DateTime, nullable=False, default=datetime.utcnow)
//! ```

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use super::naming::is_identifier_tail;
use crate::error::SpecError;

const SUPPORTED_TYPES: &str = "string, text, int, float, decimal, bool, datetime, date, json";

/// A field definition parsed from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Column/attribute name (e.g. `preco`)
    pub name: String,
    /// Field type
    pub field_type: FieldType,
    /// Column modifiers
    pub modifiers: Modifiers,
}

/// Recognized field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Bounded string (VARCHAR)
    String,
    /// Unbounded text
    Text,
    /// Integer
    Integer,
    /// Floating point
    Float,
    /// Fixed-point number
    Decimal,
    /// Boolean
    Boolean,
    /// Date and time
    DateTime,
    /// Date only
    Date,
    /// JSON document
    Json,
}

/// Column modifiers of a field
///
/// Modifiers form a set: order does not matter and repeats collapse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Column accepts NULL
    pub nullable: bool,
    /// Unique constraint
    pub unique: bool,
    /// Database index
    pub index: bool,
    /// Column default
    pub default: Option<DefaultValue>,
}

/// Default value of a column, already checked against the field type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// Bare `default`: the type's natural default
    Implicit,
    /// String literal
    Text(String),
    /// Numeric literal, kept as typed
    Number(String),
    /// Boolean literal
    Boolean(bool),
    /// Current date/time at insert
    Now,
}

impl FieldDescriptor {
    /// Parse a single field definition
    ///
    /// Format: `name:type[:modifier]*`
    ///
    /// # Examples
    ///
    /// ```
    /// # use oryum_cli::scaffold::{FieldDescriptor, FieldType};
    /// let field = FieldDescriptor::parse("titulo:string:nullable").unwrap();
    /// assert_eq!(field.name, "titulo");
    /// assert_eq!(field.field_type, FieldType::String);
    /// assert!(field.modifiers.nullable);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the entry has no type part
    /// - the name is empty or not identifier-shaped
    /// - the type is not in the recognized vocabulary
    /// - a modifier is unknown or its default literal does not fit the type
    pub fn parse(entry: &str) -> Result<Self, SpecError> {
        let mut parts = entry.split(':').map(str::trim);

        let name = parts.next().unwrap_or_default();
        if name.is_empty() {
            return Err(SpecError::EmptyName {
                entry: entry.to_string(),
            });
        }
        validate_name(entry, name)?;

        let type_token = parts.next().filter(|t| !t.is_empty()).ok_or_else(|| {
            SpecError::MissingType {
                entry: entry.to_string(),
            }
        })?;
        let field_type = FieldType::parse(type_token).ok_or_else(|| SpecError::UnknownType {
            field: name.to_string(),
            token: type_token.to_string(),
            supported: SUPPORTED_TYPES,
        })?;

        let mut modifiers = Modifiers::default();
        for token in parts {
            modifiers.apply(name, field_type, token)?;
        }

        Ok(Self {
            name: name.to_string(),
            field_type,
            modifiers,
        })
    }

    /// SQLAlchemy column type expression
    #[must_use]
    pub const fn column_type(&self) -> &'static str {
        self.field_type.column_type()
    }

    /// Python expression for the column default, if any
    #[must_use]
    pub fn python_default(&self) -> Option<String> {
        self.modifiers
            .default
            .as_ref()
            .map(|default| default.python_expr(self.field_type))
    }
}

/// Parse a comma-separated field list
///
/// A missing or blank spec yields no fields. Duplicate names are passed
/// through; the target language reports them.
///
/// # Errors
///
/// Returns the first entry that fails to parse.
pub fn parse_fields(spec: Option<&str>) -> Result<Vec<FieldDescriptor>, SpecError> {
    let Some(spec) = spec.filter(|s| !s.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    let fields = spec
        .split(',')
        .enumerate()
        .map(|(idx, entry)| {
            if entry.trim().is_empty() {
                return Err(SpecError::EmptyEntry { position: idx + 1 });
            }
            FieldDescriptor::parse(entry.trim())
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    for field in &fields {
        if !seen.insert(field.name.as_str()) {
            tracing::warn!(field = %field.name, "duplicate field name passed through");
        }
    }

    Ok(fields)
}

/// Check that `name` starts with a letter or `_` and is identifier-shaped
pub fn validate_name(entry: &str, name: &str) -> Result<(), SpecError> {
    let mut chars = name.chars();
    let starts_ok = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_');
    if starts_ok && is_identifier_tail(chars.as_str()) {
        Ok(())
    } else {
        Err(SpecError::InvalidName {
            entry: entry.to_string(),
            name: name.to_string(),
        })
    }
}

impl Modifiers {
    fn apply(&mut self, field: &str, field_type: FieldType, token: &str) -> Result<(), SpecError> {
        let (keyword, value) = match token.split_once('=') {
            Some((keyword, value)) => (keyword.trim(), Some(value.trim())),
            None => (token, None),
        };

        match (keyword.to_lowercase().as_str(), value) {
            ("nullable" | "optional", None) => self.nullable = true,
            ("unique", None) => self.unique = true,
            ("index" | "indexed", None) => self.index = true,
            ("default", None) => self.default = Some(DefaultValue::Implicit),
            ("default", Some(value)) => {
                self.default = Some(DefaultValue::parse(field, field_type, value)?);
            }
            _ => {
                return Err(SpecError::UnknownModifier {
                    field: field.to_string(),
                    token: token.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl DefaultValue {
    fn parse(field: &str, field_type: FieldType, value: &str) -> Result<Self, SpecError> {
        let invalid = || SpecError::InvalidDefault {
            field: field.to_string(),
            field_type: field_type.to_string(),
            value: value.to_string(),
        };

        match field_type {
            FieldType::String | FieldType::Text => Ok(Self::Text(value.to_string())),
            FieldType::Integer => value
                .parse::<i64>()
                .map(|_| Self::Number(value.to_string()))
                .map_err(|_| invalid()),
            FieldType::Float | FieldType::Decimal => value
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(|_| Self::Number(value.to_string()))
                .ok_or_else(invalid),
            FieldType::Boolean => match value.to_lowercase().as_str() {
                "true" | "1" => Ok(Self::Boolean(true)),
                "false" | "0" => Ok(Self::Boolean(false)),
                _ => Err(invalid()),
            },
            FieldType::DateTime | FieldType::Date if value.eq_ignore_ascii_case("now") => Ok(Self::Now),
            FieldType::DateTime | FieldType::Date | FieldType::Json => Err(invalid()),
        }
    }

    fn python_expr(&self, field_type: FieldType) -> String {
        match self {
            Self::Implicit => field_type.implicit_default().to_string(),
            Self::Text(text) => python_string(text),
            Self::Number(number) => number.clone(),
            Self::Boolean(true) => "True".to_string(),
            Self::Boolean(false) => "False".to_string(),
            Self::Now => FieldType::now_expr(field_type).to_string(),
        }
    }
}

/// Single-quoted Python string literal
fn python_string(text: &str) -> String {
    let mut literal = String::with_capacity(text.len() + 2);
    literal.push('\'');
    for c in text.chars() {
        match c {
            '\\' => literal.push_str("\\\\"),
            '\'' => literal.push_str("\\'"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            // Unicode control characters all fall below U+0100
            c if c.is_control() => literal.push_str(&format!("\\x{:02x}", u32::from(c))),
            c => literal.push(c),
        }
    }
    literal.push('\'');
    literal
}

impl FieldType {
    /// Parse a type token (case-insensitive)
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "string" | "str" => Some(Self::String),
            "text" => Some(Self::Text),
            "int" | "integer" => Some(Self::Integer),
            "float" => Some(Self::Float),
            "decimal" | "numeric" => Some(Self::Decimal),
            "bool" | "boolean" => Some(Self::Boolean),
            "datetime" => Some(Self::DateTime),
            "date" => Some(Self::Date),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// SQLAlchemy column type expression
    #[must_use]
    pub const fn column_type(self) -> &'static str {
        match self {
            Self::String => "String(255)",
            Self::Text => "Text",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Decimal => "Numeric(10, 2)",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::Date => "Date",
            Self::Json => "JSON",
        }
    }

    /// Name imported from `sqlalchemy` for this type
    #[must_use]
    pub const fn sqlalchemy_import(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Text => "Text",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Decimal => "Numeric",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::Date => "Date",
            Self::Json => "JSON",
        }
    }

    const fn implicit_default(self) -> &'static str {
        match self {
            Self::String | Self::Text => "''",
            Self::Integer => "0",
            Self::Float | Self::Decimal => "0.0",
            Self::Boolean => "False",
            Self::DateTime | Self::Date => Self::now_expr(self),
            Self::Json => "dict",
        }
    }

    const fn now_expr(self) -> &'static str {
        match self {
            Self::Date => "date.today",
            _ => "datetime.utcnow",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Integer => "int",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Boolean => "bool",
            Self::DateTime => "datetime",
            Self::Date => "date",
            Self::Json => "json",
        };
        f.write_str(name)
    }
}

impl fmt::Display for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = &self.name;
        let field_type = &self.field_type;
        write!(f, "{name}:{field_type}")?;
        if self.modifiers.nullable {
            write!(f, ":nullable")?;
        }
        if self.modifiers.unique {
            write!(f, ":unique")?;
        }
        if self.modifiers.index {
            write!(f, ":index")?;
        }
        if self.modifiers.default.is_some() {
            write!(f, ":default")?;
        }
        Ok(())
    }
}

/// Template-facing view of a field
#[derive(Debug, Serialize)]
pub struct FieldContext<'a> {
    pub name: &'a str,
    #[serde(rename = "type")]
    pub type_name: String,
    pub column_type: &'static str,
    pub nullable: bool,
    pub unique: bool,
    pub index: bool,
    pub default: Option<String>,
}

impl<'a> From<&'a FieldDescriptor> for FieldContext<'a> {
    fn from(field: &'a FieldDescriptor) -> Self {
        Self {
            name: &field.name,
            type_name: field.field_type.to_string(),
            column_type: field.column_type(),
            nullable: field.modifiers.nullable,
            unique: field.modifiers.unique,
            index: field.modifiers.index,
            default: field.python_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_and_types(fields: &[FieldDescriptor]) -> Vec<(&str, FieldType)> {
        fields.iter().map(|f| (f.name.as_str(), f.field_type)).collect()
    }

    #[test]
    fn test_parse_preserves_order() {
        let fields = parse_fields(Some("a:string,b:float")).unwrap();
        assert_eq!(
            names_and_types(&fields),
            vec![("a", FieldType::String), ("b", FieldType::Float)]
        );
        assert!(fields.iter().all(|f| f.modifiers == Modifiers::default()));
    }

    #[test]
    fn test_parse_empty_spec() {
        assert!(parse_fields(None).unwrap().is_empty());
        assert!(parse_fields(Some("")).unwrap().is_empty());
        assert!(parse_fields(Some("   ")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let err = parse_fields(Some("a:unknowntype")).unwrap_err();
        assert!(matches!(
            &err,
            SpecError::UnknownType { field, token, .. } if field == "a" && token == "unknowntype"
        ));
    }

    #[test]
    fn test_parse_missing_type() {
        for entry in ["nome", "nome:", "nome: "] {
            assert!(matches!(
                FieldDescriptor::parse(entry),
                Err(SpecError::MissingType { .. })
            ));
        }
    }

    #[test]
    fn test_parse_empty_name() {
        assert!(matches!(
            FieldDescriptor::parse(":string"),
            Err(SpecError::EmptyName { .. })
        ));
    }

    #[test]
    fn test_parse_invalid_name() {
        assert!(matches!(
            FieldDescriptor::parse("1nome:string"),
            Err(SpecError::InvalidName { .. })
        ));
        assert!(matches!(
            FieldDescriptor::parse("meu-nome:string"),
            Err(SpecError::InvalidName { .. })
        ));
    }

    #[test]
    fn test_parse_empty_entry_reports_position() {
        assert_eq!(
            parse_fields(Some("a:string,,b:int")).unwrap_err(),
            SpecError::EmptyEntry { position: 2 }
        );
        assert_eq!(
            parse_fields(Some("a:string,")).unwrap_err(),
            SpecError::EmptyEntry { position: 2 }
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let fields = parse_fields(Some(" nome : string , preco:float ")).unwrap();
        assert_eq!(
            names_and_types(&fields),
            vec![("nome", FieldType::String), ("preco", FieldType::Float)]
        );
    }

    #[test]
    fn test_parse_type_aliases_case_insensitive() {
        let cases = [
            ("a:STRING", FieldType::String),
            ("a:str", FieldType::String),
            ("a:Integer", FieldType::Integer),
            ("a:int", FieldType::Integer),
            ("a:boolean", FieldType::Boolean),
            ("a:numeric", FieldType::Decimal),
            ("a:DateTime", FieldType::DateTime),
        ];
        for (input, expected) in cases {
            assert_eq!(FieldDescriptor::parse(input).unwrap().field_type, expected);
        }
    }

    #[test]
    fn test_modifiers_are_order_independent() {
        let a = FieldDescriptor::parse("email:string:unique:index:nullable").unwrap();
        let b = FieldDescriptor::parse("email:string:nullable:index:unique").unwrap();
        let c = FieldDescriptor::parse("email:string:unique:unique:index:nullable").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert!(a.modifiers.nullable && a.modifiers.unique && a.modifiers.index);
    }

    #[test]
    fn test_modifier_aliases() {
        let field = FieldDescriptor::parse("idade:int:optional:indexed").unwrap();
        assert!(field.modifiers.nullable);
        assert!(field.modifiers.index);
    }

    #[test]
    fn test_unknown_modifier() {
        let err = FieldDescriptor::parse("nome:string:primary").unwrap_err();
        assert!(matches!(
            err,
            SpecError::UnknownModifier { ref field, ref token } if field == "nome" && token == "primary"
        ));
        assert!(FieldDescriptor::parse("nome:string:unique=yes").is_err());
    }

    #[test]
    fn test_defaults() {
        let cases = [
            ("perfil:string:default=usuario", "'usuario'"),
            ("nota:string:default=it's", "'it\\'s'"),
            ("txt:string:default=a\nb", "'a\\nb'"),
            ("txt:text:default=a\tb\rc", "'a\\tb\\rc'"),
            ("txt:string:default=dir\\tmp\u{1}x", "'dir\\\\tmp\\x01x'"),
            ("estoque:int:default=10", "10"),
            ("preco:float:default=9.5", "9.5"),
            ("ativo:bool:default=TRUE", "True"),
            ("ativo:bool:default", "False"),
            ("nome:text:default", "''"),
            ("criado_em:datetime:default", "datetime.utcnow"),
            ("dia:date:default=now", "date.today"),
            ("extra:json:default", "dict"),
        ];
        for (input, expected) in cases {
            let field = FieldDescriptor::parse(input).unwrap();
            assert_eq!(field.python_default().as_deref(), Some(expected), "{input}");
        }
    }

    #[test]
    fn test_invalid_defaults() {
        for input in [
            "estoque:int:default=dez",
            "preco:float:default=abc",
            "preco:float:default=inf",
            "ativo:bool:default=talvez",
            "criado_em:datetime:default=2024-01-01",
            "extra:json:default={}",
        ] {
            assert!(
                matches!(FieldDescriptor::parse(input), Err(SpecError::InvalidDefault { .. })),
                "{input}"
            );
        }
    }

    #[test]
    fn test_duplicate_names_pass_through() {
        let fields = parse_fields(Some("nome:string,nome:text")).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field_type, FieldType::String);
        assert_eq!(fields[1].field_type, FieldType::Text);
    }

    #[test]
    fn test_display() {
        let field = FieldDescriptor::parse("email:string:index:unique:nullable").unwrap();
        assert_eq!(field.to_string(), "email:string:nullable:unique:index");
    }
}
