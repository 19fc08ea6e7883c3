//! Naming conventions for generated code
//!
//! Every class, variable, table, route and file name derived from an entity
//! or column name goes through this module so that the generated layers
//! agree with each other.

use inflector::Inflector;
use serde::Serialize;

use super::validator::NameValidator;
use crate::error::Result;

/// Naming helpers shared by every generator and template context
pub struct TemplateHelpers;

impl TemplateHelpers {
    /// Convert string to `PascalCase`
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_pascal_case("user_profile"), "UserProfile");
    /// assert_eq!(TemplateHelpers::to_pascal_case("post"), "Post");
    /// ```
    #[must_use]
    pub fn to_pascal_case(input: &str) -> String {
        input.to_pascal_case()
    }

    /// Convert string to camelCase
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_camel_case("user_profile"), "userProfile");
    /// assert_eq!(TemplateHelpers::to_camel_case("UserProfile"), "userProfile");
    /// ```
    #[must_use]
    pub fn to_camel_case(input: &str) -> String {
        input.to_camel_case()
    }

    /// Pluralize a word
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::pluralize("post"), "posts");
    /// assert_eq!(TemplateHelpers::pluralize("category"), "categories");
    /// ```
    ///
    /// # Note
    ///
    /// The inflector library has known limitations with some irregular plurals.
    #[must_use]
    pub fn pluralize(input: &str) -> String {
        input.to_plural()
    }

    /// Uppercase the first letter, keep the rest as typed
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_class_name("HTTPRequest"), "HTTPRequest");
    /// assert_eq!(TemplateHelpers::to_class_name("iPhone"), "IPhone");
    /// ```
    #[must_use]
    pub fn to_class_name(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Lowercase the first letter, keep the rest as typed
    #[must_use]
    pub fn to_variable_name(input: &str) -> String {
        let mut chars = input.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_lowercase().chain(chars).collect()
        })
    }

    /// Split a class name before every capital, lowercasing the result
    ///
    /// Runs of capitals are split letter by letter and digits stay attached
    /// to the preceding word, which is how Eloquent derives table names.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_delimited("BlogPost", '_'), "blog_post");
    /// assert_eq!(TemplateHelpers::to_delimited("Post2", '_'), "post2");
    /// assert_eq!(TemplateHelpers::to_delimited("HTTPRequest", '-'), "h-t-t-p-request");
    /// ```
    #[must_use]
    pub fn to_delimited(input: &str, delimiter: char) -> String {
        let mut out = String::with_capacity(input.len() + 4);
        for (index, ch) in input.chars().enumerate() {
            if index > 0 && ch.is_uppercase() {
                out.push(delimiter);
            }
            out.extend(ch.to_lowercase());
        }
        out
    }

    /// Pluralize the last word of a class name, keeping its case
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::pluralize_studly("BlogCategory"), "BlogCategories");
    /// assert_eq!(TemplateHelpers::pluralize_studly("HTTPRequest"), "HTTPRequests");
    /// assert_eq!(TemplateHelpers::pluralize_studly("Post2"), "Post2s");
    /// ```
    #[must_use]
    pub fn pluralize_studly(input: &str) -> String {
        let split = input
            .char_indices()
            .skip(1)
            .filter(|(_, ch)| ch.is_uppercase())
            .map(|(index, _)| index)
            .last()
            .unwrap_or(0);
        let (head, last) = input.split_at(split);
        let plural = Self::pluralize(&last.to_lowercase());
        let plural = if last.starts_with(char::is_uppercase) {
            Self::to_class_name(&plural)
        } else {
            plural
        };
        format!("{head}{plural}")
    }

    /// Convert an entity name to the table Eloquent expects for it
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_table_name("Post"), "posts");
    /// assert_eq!(TemplateHelpers::to_table_name("UserProfile"), "user_profiles");
    /// assert_eq!(TemplateHelpers::to_table_name("Category"), "categories");
    /// assert_eq!(TemplateHelpers::to_table_name("Post2"), "post2s");
    /// ```
    #[must_use]
    pub fn to_table_name(model: &str) -> String {
        Self::to_delimited(&Self::pluralize_studly(model), '_')
    }

    /// Convert an entity name to its route URI (kebab-case plural, no leading slash)
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_route_uri("Post"), "posts");
    /// assert_eq!(TemplateHelpers::to_route_uri("UserProfile"), "user-profiles");
    /// ```
    #[must_use]
    pub fn to_route_uri(model: &str) -> String {
        Self::to_delimited(&Self::pluralize_studly(model), '-')
    }

    /// Strip the `_id` suffix from a foreign key column
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::foreign_key_stem("author_id"), "author");
    /// assert_eq!(TemplateHelpers::foreign_key_stem("parent"), "parent");
    /// ```
    #[must_use]
    pub fn foreign_key_stem(column: &str) -> &str {
        column
            .strip_suffix("_id")
            .filter(|stem| !stem.is_empty())
            .unwrap_or(column)
    }

    /// Table referenced by a foreign key column
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_referenced_table("author_id"), "authors");
    /// assert_eq!(TemplateHelpers::to_referenced_table("blog_category_id"), "blog_categories");
    /// assert_eq!(TemplateHelpers::to_referenced_table("post2_id"), "post2s");
    /// ```
    #[must_use]
    pub fn to_referenced_table(column: &str) -> String {
        Self::pluralize(Self::foreign_key_stem(column))
    }

    /// Relationship method name for a foreign key column
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_relation_method("author_id"), "author");
    /// assert_eq!(TemplateHelpers::to_relation_method("blog_category_id"), "blogCategory");
    /// ```
    #[must_use]
    pub fn to_relation_method(column: &str) -> String {
        Self::to_camel_case(Self::foreign_key_stem(column))
    }

    /// Related model class for a foreign key column
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::TemplateHelpers;
    /// assert_eq!(TemplateHelpers::to_related_model("author_id"), "Author");
    /// assert_eq!(TemplateHelpers::to_related_model("blog_category_id"), "BlogCategory");
    /// ```
    #[must_use]
    pub fn to_related_model(column: &str) -> String {
        Self::to_pascal_case(Self::foreign_key_stem(column))
    }

    /// Human readable phrase for a column (`plan_image` becomes `plan image`)
    #[must_use]
    pub fn to_phrase(column: &str) -> String {
        column.replace('_', " ").to_lowercase()
    }
}

/// Every name derived from a validated entity name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityNames {
    /// Class name (`Post`, `UserProfile`)
    pub class: String,
    /// Variable name (`post`, `userProfile`)
    pub variable: String,
    /// Plural variable name (`posts`, `userProfiles`)
    pub plural_variable: String,
    /// `snake_case` name (`post`, `user_profile`)
    pub snake: String,
    /// Database table (`posts`, `user_profiles`)
    pub table: String,
    /// Route URI segment (`posts`, `user-profiles`)
    pub route_uri: String,
    /// Route parameter; matches the controller argument for implicit binding
    pub route_param: String,
    /// Translation key namespace (`messages.<key>.*`)
    pub message_key: String,
}

impl EntityNames {
    /// Derive all names from an entity name
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScaffoldError::InvalidName`] when the name does not start
    /// with a letter or contains anything other than ASCII letters and digits.
    ///
    /// The class keeps the name as typed apart from its first letter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use oneclick_cli_lib::scaffold::naming::EntityNames;
    /// let names = EntityNames::new("UserProfile").unwrap();
    /// assert_eq!(names.class, "UserProfile");
    /// assert_eq!(names.table, "user_profiles");
    /// assert_eq!(names.route_param, "userProfile");
    ///
    /// assert!(EntityNames::new("123abc").is_err());
    /// ```
    pub fn new(name: &str) -> Result<Self> {
        NameValidator::entity(name)?;

        let class = TemplateHelpers::to_class_name(name);
        let snake = TemplateHelpers::to_delimited(&class, '_');
        let variable = TemplateHelpers::to_variable_name(&class);
        let table = TemplateHelpers::to_table_name(&class);

        Ok(Self {
            plural_variable: TemplateHelpers::to_variable_name(&TemplateHelpers::pluralize_studly(
                &class,
            )),
            route_uri: TemplateHelpers::to_route_uri(&class),
            route_param: variable.clone(),
            message_key: snake.clone(),
            class,
            variable,
            snake,
            table,
        })
    }
}
