//! Lexical validation of entity, column and method identifiers

use std::fmt;

use crate::error::{Result, ScaffoldError};

/// What an identifier names; decides which character set applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// Entity (model class) name: letters and digits only
    Entity,
    /// Database column / attribute name
    Column,
    /// Custom repository or service method name
    Method,
}

impl NameKind {
    const fn allows_underscore(self) -> bool {
        !matches!(self, Self::Entity)
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Column => "column",
            Self::Method => "method",
        }
    }

    const fn rule(self) -> &'static str {
        if self.allows_underscore() {
            "use letters, digits and underscores, starting with a letter"
        } else {
            "use letters and digits only, starting with a letter"
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Framework classes imported next to the entity model in generated files
const FRAMEWORK_CLASSES: [&str; 6] = [
    "Collection",
    "HasFactory",
    "JsonResponse",
    "Log",
    "Model",
    "Request",
];

/// Words PHP does not accept as a class name
const PHP_RESERVED: [&str; 84] = [
    "abstract", "and", "array", "as", "bool", "break", "callable", "case", "catch", "class",
    "clone", "const", "continue", "declare", "default", "do", "echo", "else", "elseif", "empty",
    "enddeclare", "endfor", "endforeach", "endif", "endswitch", "endwhile", "enum", "eval",
    "exit", "extends", "false", "final", "finally", "float", "fn", "for", "foreach", "function",
    "global", "goto", "if", "implements", "include", "instanceof", "insteadof", "int",
    "interface", "isset", "iterable", "list", "match", "mixed", "namespace", "never", "new",
    "null", "object", "or", "parent", "print", "private", "protected", "public", "readonly",
    "require", "resource", "return", "self", "static", "string", "switch", "throw", "trait",
    "true", "try", "unset", "use", "var", "void", "while", "xor", "yield", "numeric", "die",
];

/// Identifier validation
pub struct NameValidator;

impl NameValidator {
    /// `^[A-Za-z][A-Za-z0-9_]*$`
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::validator::NameValidator;
    /// assert!(NameValidator::is_valid_identifier("author_id"));
    /// assert!(!NameValidator::is_valid_identifier("123abc"));
    /// assert!(!NameValidator::is_valid_identifier(""));
    /// ```
    #[must_use]
    pub fn is_valid_identifier(text: &str) -> bool {
        Self::matches(text, true)
    }

    /// `^[A-Za-z][A-Za-z0-9]*$`
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::validator::NameValidator;
    /// assert!(NameValidator::is_valid_entity_name("UserProfile"));
    /// assert!(!NameValidator::is_valid_entity_name("user_profile"));
    /// ```
    #[must_use]
    pub fn is_valid_entity_name(text: &str) -> bool {
        Self::matches(text, false)
    }

    /// Validate an identifier of the given kind
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] describing the broken rule.
    pub fn validate(kind: NameKind, text: &str) -> Result<()> {
        if Self::matches(text, kind.allows_underscore()) {
            Ok(())
        } else {
            Err(ScaffoldError::InvalidName {
                kind: kind.label(),
                value: text.to_string(),
                rule: kind.rule(),
            })
        }
    }

    /// Validate an entity name
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] for invalid names, PHP reserved
    /// words and framework classes the generated files already import.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::validator::NameValidator;
    /// assert!(NameValidator::entity("Post").is_ok());
    /// assert!(NameValidator::entity("request").is_err());
    /// assert!(NameValidator::entity("List").is_err());
    /// ```
    pub fn entity(text: &str) -> Result<()> {
        Self::validate(NameKind::Entity, text)?;

        // PHP class names are case-insensitive
        let rejected = |rule: &'static str| ScaffoldError::InvalidName {
            kind: NameKind::Entity.label(),
            value: text.to_string(),
            rule,
        };
        if PHP_RESERVED.iter().any(|word| word.eq_ignore_ascii_case(text)) {
            return Err(rejected("reserved word in PHP"));
        }
        if FRAMEWORK_CLASSES.iter().any(|class| class.eq_ignore_ascii_case(text)) {
            return Err(rejected(
                "clashes with a framework class imported by the generated code",
            ));
        }
        Ok(())
    }

    /// Validate a column name
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] for invalid names.
    pub fn column(text: &str) -> Result<()> {
        Self::validate(NameKind::Column, text)
    }

    /// Validate a custom method name
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] for invalid names.
    pub fn method(text: &str) -> Result<()> {
        Self::validate(NameKind::Method, text)
    }

    fn matches(text: &str, allow_underscore: bool) -> bool {
        let mut chars = text.chars();
        chars.next().is_some_and(|first| first.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || (allow_underscore && c == '_'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_entity_names() {
        assert!(NameValidator::entity("Post").is_ok());
        assert!(NameValidator::entity("post2").is_ok());
        assert!(NameValidator::entity("123abc").is_err());
        assert!(NameValidator::entity("blog_post").is_err());
        assert!(NameValidator::entity("Blog-Post").is_err());
        assert!(NameValidator::entity("").is_err());
    }

    #[test]
    fn test_framework_class_names_rejected() {
        for name in ["Request", "Model", "Collection", "Log", "jsonresponse", "HasFactory"] {
            let err = NameValidator::entity(name).unwrap_err();
            assert!(
                err.to_string().contains("clashes with a framework class"),
                "{name}: {err}"
            );
        }
        assert!(NameValidator::entity("Requests").is_ok());
        assert!(NameValidator::entity("LogEntry").is_ok());
    }

    #[test]
    fn test_php_reserved_words_rejected() {
        for name in ["Class", "list", "Function", "Enum", "String"] {
            let err = NameValidator::entity(name).unwrap_err();
            assert!(err.to_string().contains("reserved word"), "{name}: {err}");
        }
        assert!(NameValidator::entity("Classroom").is_ok());
    }

    #[test]
    fn test_column_names_allow_underscores() {
        assert!(NameValidator::column("author_id").is_ok());
        assert!(NameValidator::column("plan_image").is_ok());
        assert!(NameValidator::column("_hidden").is_err());
        assert!(NameValidator::column("first name").is_err());
    }

    #[test]
    fn test_non_ascii_rejected() {
        assert!(!NameValidator::is_valid_identifier("título"));
        assert!(!NameValidator::is_valid_entity_name("Ünit"));
    }

    #[test]
    fn test_error_message() {
        let err = NameValidator::entity("123abc").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid entity name '123abc': use letters and digits only, starting with a letter"
        );
    }

    proptest! {
        #[test]
        fn prop_identifier_accepts_pattern(name in "[A-Za-z][A-Za-z0-9_]{0,20}") {
            prop_assert!(NameValidator::is_valid_identifier(&name));
        }

        #[test]
        fn prop_leading_digit_rejected(name in "[0-9][A-Za-z0-9_]{0,20}") {
            prop_assert!(!NameValidator::is_valid_identifier(&name));
            prop_assert!(!NameValidator::is_valid_entity_name(&name));
        }
    }
}
