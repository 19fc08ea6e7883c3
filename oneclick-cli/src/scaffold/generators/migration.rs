//! Timestamped schema migration

use std::path::{Path, PathBuf};

use rand::Rng;
use serde::Serialize;
use walkdir::WalkDir;

use super::Generator;
use crate::error::Result;
use crate::prompt::Prompter;
use crate::scaffold::attribute::{Attribute, ColumnType};
use crate::scaffold::fsutil;
use crate::scaffold::naming::EntityNames;
use crate::scaffold::report::{Step, StepReport};
use crate::scaffold::run::GenerationRun;
use crate::scaffold::workspace::{GeneratedFile, Workspace};
use crate::templates::migration::CREATE_NAME;

const OVERWRITE: usize = 0;
const RENAME: usize = 1;
const COLLISION_CHOICES: [&str; 3] = ["overwrite", "rename", "skip"];

#[derive(Serialize)]
struct MigrationContext<'a> {
    table: &'a str,
    columns: Vec<String>,
    recreate: bool,
}

/// Schema builder line for one attribute, plus a warning when it was degraded
///
/// # Examples
///
/// ```
/// # use oneclick_cli_lib::scaffold::attribute::Attribute;
/// # use oneclick_cli_lib::scaffold::generators::migration::column_line;
/// let (line, warning) = column_line(&Attribute::parse("author_id:foreignId:nullable").unwrap());
/// assert_eq!(
///     line,
///     "$table->foreignId('author_id')->nullable()->constrained('authors')->cascadeOnDelete()->cascadeOnUpdate();"
/// );
/// assert!(warning.is_none());
/// ```
#[must_use]
pub fn column_line(attribute: &Attribute) -> (String, Option<String>) {
    let name = &attribute.name;
    let mut warning = None;

    let mut line = match attribute.column_type {
        ColumnType::Enum if attribute.enum_values.is_empty() => {
            warning = Some(format!(
                "Enum column '{name}' has no values; created as a string column"
            ));
            format!("$table->string('{name}')")
        }
        ColumnType::Enum => {
            let values = attribute
                .enum_values
                .iter()
                .map(|value| format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'")))
                .collect::<Vec<_>>()
                .join(", ");
            format!("$table->enum('{name}', [{values}])")
        }
        other => format!("$table->{}('{name}')", other.blueprint_method()),
    };

    if attribute.nullable {
        line.push_str("->nullable()");
    }
    if let Some(default) = &attribute.default {
        line.push_str(&format!("->default({})", default.to_php()));
    }
    if attribute.unique {
        line.push_str("->unique()");
    }
    if attribute.is_foreign_key() {
        line.push_str(&format!(
            "->constrained('{}')->cascadeOnDelete()->cascadeOnUpdate()",
            attribute.referenced_table()
        ));
    }
    line.push(';');

    (line, warning)
}

/// Writes `YYYY_MM_DD_HHMMSS_create_<table>_table.php`
pub struct MigrationGenerator;

impl MigrationGenerator {
    /// Existing migrations creating `table`, recreations included
    fn existing(workspace: &Workspace, table: &str) -> Vec<PathBuf> {
        let suffix = format!("create_{table}_table.php");
        let dir = workspace.layout().migrations_dir();
        if !dir.is_dir() {
            return Vec::new();
        }

        let mut found: Vec<PathBuf> = WalkDir::new(dir)
            .max_depth(1)
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(&suffix))
            .map(walkdir::DirEntry::into_path)
            .collect();
        found.sort();
        found
    }

    fn target_path(dir: &Path, table: &str, recreate: bool) -> PathBuf {
        let timestamp = chrono::Utc::now().format("%Y_%m_%d_%H%M%S").to_string();
        let action = if recreate { "recreate" } else { "create" };
        let path = dir.join(format!("{timestamp}_{action}_{table}_table.php"));
        if !path.exists() {
            return path;
        }
        let suffix: u16 = rand::thread_rng().gen_range(1000..=9999);
        dir.join(format!("{timestamp}_{suffix}_{action}_{table}_table.php"))
    }

    fn ask_new_name(prompter: &mut dyn Prompter) -> Result<EntityNames> {
        loop {
            let answer = prompter.input("Enter a new entity name for the migration")?;
            match EntityNames::new(answer.trim()) {
                Ok(entity) => return Ok(entity),
                Err(err) => prompter.invalid(&err.to_string()),
            }
        }
    }

    fn write(
        workspace: &Workspace,
        run: &GenerationRun,
        recreate: bool,
        report: &mut StepReport,
    ) -> Result<()> {
        let table = &run.entity().table;

        let mut columns = Vec::new();
        for attribute in run.attributes() {
            if !attribute.has_valid_name() {
                report.error(format!("Invalid column name '{}' skipped", attribute.name));
                continue;
            }
            let (line, warning) = column_line(attribute);
            if let Some(warning) = warning {
                report.warn(warning);
            }
            columns.push(line);
        }
        if run.attributes().is_empty() {
            report.warn(format!(
                "No attributes given; '{table}' only gets an id and timestamps"
            ));
        }

        let content = workspace.render(
            CREATE_NAME,
            MigrationContext {
                table,
                columns,
                recreate,
            },
        )?;
        let path = Self::target_path(&workspace.layout().migrations_dir(), table, recreate);
        let description = if recreate {
            format!("migration recreating {table}")
        } else {
            format!("migration creating {table}")
        };
        workspace.create(&GeneratedFile::new(path, content, description), report)
    }
}

impl Generator for MigrationGenerator {
    fn step(&self) -> Step {
        Step::Migration
    }

    fn generate(
        &self,
        workspace: &Workspace,
        run: &GenerationRun,
        prompter: &mut dyn Prompter,
        report: &mut StepReport,
    ) -> Result<()> {
        let table = &run.entity().table;
        let existing = Self::existing(workspace, table);
        if existing.is_empty() {
            return Self::write(workspace, run, false, report);
        }

        let choice = prompter.select(
            &format!("A migration for '{table}' already exists"),
            &COLLISION_CHOICES,
            COLLISION_CHOICES.len() - 1,
        )?;
        match choice {
            OVERWRITE => {
                for path in &existing {
                    fsutil::remove(path)?;
                    report.removed(workspace.display(path));
                }
                Self::write(workspace, run, true, report)
            }
            RENAME => {
                let entity = Self::ask_new_name(prompter)?;
                tracing::info!(from = %table, to = %entity.table, "migration renamed");
                self.generate(workspace, &run.renamed(entity), prompter, report)
            }
            _ => {
                report.skipped(format!("Migration for '{table}' left as it is"));
                Ok(())
            }
        }
    }
}
