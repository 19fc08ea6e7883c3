//! Attribute (column) definitions
//!
//! Attributes are collected interactively or parsed from `--field`
//! definitions. Their insertion order is the field order of every generated
//! file.
//!
//! # Field definition syntax
//!
//! ```text
//! title:string                         → string column
//! body:text:nullable                   → nullable text column
//! author_id:foreignId                  → constrained foreign key to `authors`
//! status:enum:draft,published          → enum column
//! views:integer:default=0:unique       → integer with default and unique index
//! ```

use std::fmt;

use serde::Serialize;

use super::naming::TemplateHelpers;
use super::validator::NameValidator;
use crate::error::{Result, ScaffoldError};

/// Column type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    /// VARCHAR
    String,
    /// INTEGER
    Integer,
    /// TEXT
    Text,
    /// BOOLEAN
    Boolean,
    /// DATE
    Date,
    /// DATETIME
    DateTime,
    /// TIMESTAMP
    Timestamp,
    /// FLOAT
    Float,
    /// DECIMAL
    Decimal,
    /// Unsigned big integer constrained to another table
    ForeignId,
    /// Enumeration with a fixed list of values
    Enum,
}

impl ColumnType {
    /// Every supported type, in prompt order
    pub const ALL: [Self; 11] = [
        Self::String,
        Self::Integer,
        Self::Text,
        Self::Boolean,
        Self::Date,
        Self::DateTime,
        Self::Timestamp,
        Self::Float,
        Self::Decimal,
        Self::ForeignId,
        Self::Enum,
    ];

    /// Keyword used in prompts and field definitions
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Text => "text",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Timestamp => "timestamp",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::ForeignId => "foreignId",
            Self::Enum => "enum",
        }
    }

    /// Schema builder method emitting this column
    #[must_use]
    pub const fn blueprint_method(self) -> &'static str {
        match self {
            Self::DateTime => "dateTime",
            other => other.keyword(),
        }
    }

    /// Whether request validation treats the column as a date
    #[must_use]
    pub const fn is_date_like(self) -> bool {
        matches!(self, Self::Date | Self::DateTime | Self::Timestamp)
    }

    /// Parse a type keyword (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::attribute::ColumnType;
    /// assert_eq!(ColumnType::parse("foreignId"), Some(ColumnType::ForeignId));
    /// assert_eq!(ColumnType::parse("DATETIME"), Some(ColumnType::DateTime));
    /// assert_eq!(ColumnType::parse("blob"), None);
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|ty| ty.keyword().eq_ignore_ascii_case(input))
    }

    /// Keywords of every type, in prompt order
    #[must_use]
    pub fn keywords() -> Vec<&'static str> {
        Self::ALL.iter().map(|ty| ty.keyword()).collect()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Default value of a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DefaultValue {
    /// Numeric literal, kept verbatim
    Number(String),
    /// `true` / `false`
    Boolean(bool),
    /// Anything else, emitted quoted
    Text(String),
}

impl DefaultValue {
    /// Interpret raw user input
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::attribute::DefaultValue;
    /// assert_eq!(DefaultValue::parse("0").to_php(), "0");
    /// assert_eq!(DefaultValue::parse("TRUE").to_php(), "true");
    /// assert_eq!(DefaultValue::parse("draft").to_php(), "'draft'");
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("true") {
            return Self::Boolean(true);
        }
        if raw.eq_ignore_ascii_case("false") {
            return Self::Boolean(false);
        }
        if Self::is_numeric(raw) {
            return Self::Number(raw.to_string());
        }
        Self::Text(raw.to_string())
    }

    /// PHP literal for the value
    #[must_use]
    pub fn to_php(&self) -> String {
        match self {
            Self::Number(number) => number.clone(),
            Self::Boolean(value) => value.to_string(),
            Self::Text(text) => format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'")),
        }
    }

    fn is_numeric(raw: &str) -> bool {
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        let mut parts = digits.splitn(2, '.');
        let whole = parts.next().unwrap_or_default();
        let fraction = parts.next();

        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        match fraction {
            None => all_digits(whole),
            Some(fraction) => all_digits(whole) && all_digits(fraction),
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => f.write_str(number),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// A single column of the generated entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// Column name
    pub name: String,
    /// Column type
    pub column_type: ColumnType,
    /// Whether the column accepts NULL
    pub nullable: bool,
    /// Whether the column carries a unique index
    pub unique: bool,
    /// Optional default value
    pub default: Option<DefaultValue>,
    /// Allowed values for enum columns
    pub enum_values: Vec<String>,
}

impl Attribute {
    /// Create a plain attribute without modifiers
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            unique: false,
            default: None,
            enum_values: Vec::new(),
        }
    }

    /// Mark the column nullable
    #[must_use]
    pub const fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column unique
    #[must_use]
    pub const fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Set the default value
    #[must_use]
    pub fn with_default(mut self, value: DefaultValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Set the allowed values of an enum column
    #[must_use]
    pub fn with_enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the column is a foreign key
    #[must_use]
    pub const fn is_foreign_key(&self) -> bool {
        matches!(self.column_type, ColumnType::ForeignId)
    }

    /// Whether the column name passes identifier validation
    #[must_use]
    pub fn has_valid_name(&self) -> bool {
        NameValidator::is_valid_identifier(&self.name)
    }

    /// Table referenced by a foreign key column
    #[must_use]
    pub fn referenced_table(&self) -> String {
        TemplateHelpers::to_referenced_table(&self.name)
    }

    /// Parse a field definition
    ///
    /// Format: `name:type[:values][:modifier]*` where enum columns take a
    /// comma separated value list right after the type, and modifiers are
    /// `nullable`, `unique` and `default=<value>`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::attribute::{Attribute, ColumnType};
    /// let attr = Attribute::parse("author_id:foreignId").unwrap();
    /// assert_eq!(attr.column_type, ColumnType::ForeignId);
    ///
    /// let attr = Attribute::parse("status:enum:draft,published:default=draft").unwrap();
    /// assert_eq!(attr.enum_values, vec!["draft", "published"]);
    /// assert!(attr.default.is_some());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidAttribute`] if:
    /// - the definition has fewer than 2 parts
    /// - the column name is not a valid identifier
    /// - the type is unknown
    /// - an enum has no values
    /// - a modifier is unknown or a default is empty
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: String| ScaffoldError::InvalidAttribute {
            input: input.to_string(),
            reason,
        };

        let mut parts = input.split(':').map(str::trim);
        let name = parts.next().unwrap_or_default();
        let Some(type_str) = parts.next() else {
            return Err(invalid(
                "expected format name:type[:modifiers]".to_string(),
            ));
        };

        if let Err(err) = NameValidator::column(name) {
            return Err(invalid(err.to_string()));
        }

        let column_type = ColumnType::parse(type_str).ok_or_else(|| {
            invalid(format!(
                "unknown type '{type_str}', expected one of: {}",
                ColumnType::keywords().join(", ")
            ))
        })?;

        let mut attribute = Self::new(name, column_type);

        if column_type == ColumnType::Enum {
            let values = parts.next().map(split_values).unwrap_or_default();
            if values.is_empty() {
                return Err(invalid("enum columns need at least one value".to_string()));
            }
            attribute.enum_values = values;
        }

        for modifier in parts {
            if let Some(value) = modifier.strip_prefix("default=") {
                if value.trim().is_empty() {
                    return Err(invalid("default value cannot be empty".to_string()));
                }
                attribute.default = Some(DefaultValue::parse(value));
                continue;
            }
            match modifier.to_lowercase().as_str() {
                "nullable" | "optional" => attribute.nullable = true,
                "unique" => attribute.unique = true,
                unknown => {
                    return Err(invalid(format!(
                        "unknown modifier '{unknown}', expected nullable, unique or default=<value>"
                    )));
                }
            }
        }

        Ok(attribute)
    }
}

/// Split a comma separated value list, dropping blanks
#[must_use]
pub fn split_values(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Ordered attribute map with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    /// Empty set
    #[must_use]
    pub const fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Parse a list of field definitions
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidAttribute`] for the first definition that
    /// fails to parse or repeats an earlier name.
    pub fn parse_all<S: AsRef<str>>(definitions: &[S]) -> Result<Self> {
        let mut set = Self::new();
        for definition in definitions {
            set.insert(Attribute::parse(definition.as_ref())?)?;
        }
        Ok(set)
    }

    /// Append an attribute
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidAttribute`] when the name is already present.
    pub fn insert(&mut self, attribute: Attribute) -> Result<()> {
        if self.contains(&attribute.name) {
            return Err(ScaffoldError::InvalidAttribute {
                input: attribute.name,
                reason: "column has already been added".to_string(),
            });
        }
        self.attributes.push(attribute);
        Ok(())
    }

    /// Whether a column with this name exists
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr.name == name)
    }

    /// Look up a column by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Column names in insertion order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.attributes.iter().map(|attr| attr.name.as_str()).collect()
    }

    /// Iterate in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    /// Foreign key columns in insertion order
    pub fn foreign_keys(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|attr| attr.is_foreign_key())
    }

    /// First column whose name appears in `vocabulary`, searched in vocabulary order
    #[must_use]
    pub fn first_named_in(&self, vocabulary: &[String]) -> Option<&Attribute> {
        vocabulary.iter().find_map(|word| self.get(word))
    }

    /// Number of columns
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether no columns were collected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_field() {
        let attr = Attribute::parse("title:string").unwrap();
        assert_eq!(attr.name, "title");
        assert_eq!(attr.column_type, ColumnType::String);
        assert!(!attr.nullable);
        assert!(!attr.unique);
        assert!(attr.default.is_none());
    }

    #[test]
    fn test_parse_modifiers() {
        let attr = Attribute::parse("email:string:nullable:unique").unwrap();
        assert!(attr.nullable);
        assert!(attr.unique);

        let attr = Attribute::parse("views:integer:default=0").unwrap();
        assert_eq!(attr.default, Some(DefaultValue::Number("0".to_string())));
    }

    #[test]
    fn test_parse_enum() {
        let attr = Attribute::parse("status:enum:draft, published ,archived").unwrap();
        assert_eq!(attr.column_type, ColumnType::Enum);
        assert_eq!(attr.enum_values, vec!["draft", "published", "archived"]);
    }

    #[test]
    fn test_parse_enum_without_values() {
        assert!(Attribute::parse("status:enum").is_err());
        assert!(Attribute::parse("status:enum: , ").is_err());
    }

    #[test]
    fn test_parse_errors() {
        assert!(Attribute::parse("title").is_err());
        assert!(Attribute::parse("1title:string").is_err());
        assert!(Attribute::parse("title:blob").is_err());
        assert!(Attribute::parse("title:string:indexed").is_err());
        assert!(Attribute::parse("title:string:default=").is_err());
    }

    #[test]
    fn test_default_value_literals() {
        assert_eq!(DefaultValue::parse("42").to_php(), "42");
        assert_eq!(DefaultValue::parse("-1.5").to_php(), "-1.5");
        assert_eq!(DefaultValue::parse("false").to_php(), "false");
        assert_eq!(DefaultValue::parse("1.2.3").to_php(), "'1.2.3'");
        assert_eq!(DefaultValue::parse("it's").to_php(), "'it\\'s'");
        assert_eq!(DefaultValue::parse(".5").to_php(), "'.5'");
    }

    #[test]
    fn test_blueprint_methods() {
        assert_eq!(ColumnType::DateTime.blueprint_method(), "dateTime");
        assert_eq!(ColumnType::String.blueprint_method(), "string");
        assert_eq!(ColumnType::ForeignId.blueprint_method(), "foreignId");
    }

    #[test]
    fn test_attribute_set_preserves_order() {
        let set = AttributeSet::parse_all(&["title:string", "body:text", "author_id:foreignId"])
            .unwrap();
        assert_eq!(set.names(), vec!["title", "body", "author_id"]);
        assert_eq!(set.foreign_keys().count(), 1);
    }

    #[test]
    fn test_attribute_set_rejects_duplicates() {
        let result = AttributeSet::parse_all(&["title:string", "title:text"]);
        assert!(matches!(result, Err(ScaffoldError::InvalidAttribute { .. })));
    }

    #[test]
    fn test_first_named_in_follows_vocabulary_order() {
        let set = AttributeSet::parse_all(&["photo:string", "image:string"]).unwrap();
        let vocabulary = vec!["image".to_string(), "photo".to_string()];
        assert_eq!(set.first_named_in(&vocabulary).unwrap().name, "image");
    }
}
