//! Custom repository / service method definitions

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static PARAMETER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\??[A-Za-z_\\][A-Za-z0-9_\\]*\s+\$[A-Za-z_][A-Za-z0-9_]*$")
        .expect("parameter pattern is valid")
});

/// Declared return type of a custom method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReturnType {
    /// `mixed`
    Mixed,
    /// `void`
    Void,
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `string`
    String,
    /// `array`
    Array,
    /// Eloquent model (nullable, since a lookup may find nothing)
    Model,
    /// Eloquent collection
    Collection,
}

impl ReturnType {
    /// Every return type, in prompt order; `mixed` is the default
    pub const ALL: [Self; 8] = [
        Self::Mixed,
        Self::Void,
        Self::Bool,
        Self::Int,
        Self::String,
        Self::Array,
        Self::Model,
        Self::Collection,
    ];

    /// Keyword shown in prompts
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Mixed => "mixed",
            Self::Void => "void",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::String => "string",
            Self::Array => "array",
            Self::Model => "Model",
            Self::Collection => "Collection",
        }
    }

    /// Return type declaration in a PHP signature
    #[must_use]
    pub const fn declaration(self) -> &'static str {
        match self {
            Self::Model => "?Model",
            other => other.keyword(),
        }
    }

    /// Class that must be imported for the declaration to resolve
    #[must_use]
    pub const fn import(self) -> Option<&'static str> {
        match self {
            Self::Model => Some("Illuminate\\Database\\Eloquent\\Model"),
            Self::Collection => Some("Illuminate\\Database\\Eloquent\\Collection"),
            _ => None,
        }
    }

    /// Stub body inside a repository implementation
    #[must_use]
    pub const fn repository_stub(self) -> &'static str {
        match self {
            Self::Model => "return $this->model->first();",
            Self::Collection => "return $this->model->get();",
            other => other.scalar_stub(),
        }
    }

    /// Stub body inside a service implementation
    #[must_use]
    pub fn service_stub(self, model_class: &str) -> String {
        match self {
            Self::Model => format!("return {model_class}::first();"),
            Self::Collection => format!("return {model_class}::all();"),
            other => other.scalar_stub().to_string(),
        }
    }

    /// Whether the service stub refers to the entity model
    #[must_use]
    pub const fn needs_model(self) -> bool {
        matches!(self, Self::Model | Self::Collection)
    }

    /// Parse a keyword (case-insensitive)
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|ty| ty.keyword().eq_ignore_ascii_case(input))
    }

    /// Keywords of every return type, in prompt order
    #[must_use]
    pub fn keywords() -> Vec<&'static str> {
        Self::ALL.iter().map(|ty| ty.keyword()).collect()
    }

    const fn scalar_stub(self) -> &'static str {
        match self {
            Self::Bool => "return false;",
            Self::Int => "return 0;",
            Self::String => "return '';",
            Self::Array => "return [];",
            Self::Void => "return;",
            _ => "return null;",
        }
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Extra method added to the repository and optionally the service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomMethod {
    /// Method name
    pub name: String,
    /// Declared return type
    pub return_type: ReturnType,
    /// Raw parameter list (`string $email, int $id`), possibly empty
    pub params: String,
    /// Whether the service layer exposes the method too
    pub implement_in_service: bool,
}

impl CustomMethod {
    /// Create a method definition
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        return_type: ReturnType,
        params: impl Into<String>,
        implement_in_service: bool,
    ) -> Self {
        Self {
            name: name.into(),
            return_type,
            params: params.into(),
            implement_in_service,
        }
    }

    /// PHP signature without trailing `;` or body
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::method::{CustomMethod, ReturnType};
    /// let method = CustomMethod::new("findByEmail", ReturnType::Model, "string $email", true);
    /// assert_eq!(method.signature(), "public function findByEmail(string $email): ?Model");
    /// ```
    #[must_use]
    pub fn signature(&self) -> String {
        format!(
            "public function {}({}): {}",
            self.name,
            self.params,
            self.return_type.declaration()
        )
    }
}

/// Whether a raw parameter list is empty or `type $name[, type $name]*`
///
/// # Examples
///
/// ```
/// # use oneclick_cli_lib::scaffold::method::is_valid_parameter_list;
/// assert!(is_valid_parameter_list(""));
/// assert!(is_valid_parameter_list("string $email, int $id"));
/// assert!(!is_valid_parameter_list("email"));
/// ```
#[must_use]
pub fn is_valid_parameter_list(params: &str) -> bool {
    let params = params.trim();
    params.is_empty() || params.split(',').all(|piece| PARAMETER.is_match(piece.trim()))
}
