use crate::error::Result;
use crate::prompt::Prompter;
use crate::scaffold::attribute::{split_values, Attribute, AttributeSet, ColumnType, DefaultValue};
use crate::scaffold::validator::NameValidator;

const DONE: &str = "done";

const NULLABLE: usize = 0;
const UNIQUE: usize = 1;
const DEFAULT: usize = 2;
const NONE: usize = 3;
const MODIFIERS: [&str; 4] = ["nullable", "unique", "default", "none"];

/// Asks for columns until the user types `done`
pub struct AttributeCollector;

impl AttributeCollector {
    /// Run the collection loop
    ///
    /// Invalid, empty and duplicate names are rejected and asked again. The
    /// result may be empty.
    ///
    /// # Errors
    ///
    /// Fails only when the prompter cannot provide an answer.
    pub fn collect(prompter: &mut dyn Prompter) -> Result<AttributeSet> {
        let mut attributes = AttributeSet::new();
        let types = ColumnType::keywords();

        loop {
            let answer = prompter.input("Enter column name (or \"done\" to finish)")?;
            let name = answer.trim();

            if name.eq_ignore_ascii_case(DONE) {
                break;
            }
            if name.is_empty() {
                prompter.invalid("Column name cannot be empty.");
                continue;
            }
            if let Err(err) = NameValidator::column(name) {
                prompter.invalid(&err.to_string());
                continue;
            }
            if attributes.contains(name) {
                prompter.invalid(&format!("Column '{name}' has already been added."));
                continue;
            }

            let column_type = super::pick(
                prompter,
                &format!("Select type for '{name}'"),
                &ColumnType::ALL,
                &types,
                0,
            )?;
            let mut attribute = Attribute::new(name, column_type);

            let modifiers = prompter.multi_select("Select modifiers", &MODIFIERS)?;
            if !modifiers.contains(&NONE) {
                attribute.nullable = modifiers.contains(&NULLABLE);
                attribute.unique = modifiers.contains(&UNIQUE);
                if modifiers.contains(&DEFAULT) {
                    attribute.default = Some(Self::ask_default(prompter, name)?);
                }
            }

            if column_type == ColumnType::Enum {
                attribute.enum_values = Self::ask_enum_values(prompter, name)?;
            }

            tracing::debug!(column = name, column_type = %column_type, "attribute collected");
            attributes.insert(attribute)?;
        }

        Ok(attributes)
    }

    fn ask_default(prompter: &mut dyn Prompter, name: &str) -> Result<DefaultValue> {
        loop {
            let raw = prompter.input(&format!("Default value for '{name}'"))?;
            if raw.trim().is_empty() {
                prompter.invalid("Default value cannot be empty.");
                continue;
            }
            return Ok(DefaultValue::parse(&raw));
        }
    }

    fn ask_enum_values(prompter: &mut dyn Prompter, name: &str) -> Result<Vec<String>> {
        loop {
            let raw = prompter.input(&format!("Allowed values for '{name}' (comma separated)"))?;
            let values = split_values(&raw);
            if values.is_empty() {
                prompter.invalid("Enum columns need at least one value.");
                continue;
            }
            return Ok(values);
        }
    }
}
