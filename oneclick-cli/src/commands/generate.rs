//! Entity generation command

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::{style, Emoji};
use oneclick_cli_lib::scaffold::attribute::AttributeSet;
use oneclick_cli_lib::scaffold::report::ConsoleReporter;
use oneclick_cli_lib::scaffold::MethodSource;
use oneclick_cli_lib::{
    AttributeSource, EntityNames, Pipeline, RunSummary, TerminalPrompter, Workspace,
};

use super::Project;

static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠ ", "! ");

/// Generate the full API layer for one entity
pub struct GenerateCommand {
    name: String,
    fields: Vec<String>,
    ask_methods: bool,
    show_diffs: bool,
    root: PathBuf,
    config: Option<PathBuf>,
}

impl GenerateCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `name` - Entity name (`PascalCase`, e.g. `Post`, `BlogPost`)
    /// * `fields` - Field definitions; empty means ask interactively
    pub const fn new(
        name: String,
        fields: Vec<String>,
        ask_methods: bool,
        show_diffs: bool,
        root: PathBuf,
        config: Option<PathBuf>,
    ) -> Self {
        Self {
            name,
            fields,
            ask_methods,
            show_diffs,
            root,
            config,
        }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        println!(
            "\n{} {} {}",
            style("Generating API layer for").cyan().bold(),
            style(&self.name).green().bold(),
            style("...").cyan().bold()
        );

        let project = Project::open(&self.root, self.config.as_deref())?;
        let workspace = Workspace::new(&project.root, &project.config)
            .context("Failed to load templates")?;

        let attributes = if self.fields.is_empty() {
            AttributeSource::Interactive
        } else {
            AttributeSource::Provided(
                AttributeSet::parse_all(&self.fields).context("Invalid --field definition")?,
            )
        };
        let methods = if self.ask_methods {
            MethodSource::Interactive
        } else {
            MethodSource::Provided(Vec::new())
        };

        let mut prompter = TerminalPrompter::new();
        let mut reporter = ConsoleReporter::new(self.show_diffs);
        let summary = Pipeline::new(&workspace, &mut prompter, &mut reporter)
            .run(&self.name, attributes, methods)
            .with_context(|| format!("Failed to generate {}", self.name))?;

        let entity = EntityNames::new(&self.name)?;
        Self::print_summary(&entity, &summary, &project.config.generator.route_prefix);
        Ok(())
    }

    fn print_summary(entity: &EntityNames, summary: &RunSummary, route_prefix: &str) {
        let failed = summary.failed_steps();
        if failed.is_empty() {
            println!(
                "\n{}API layer for {} is ready!",
                style(SPARKLE).green().bold(),
                style(&entity.class).green().bold()
            );
        } else {
            let steps: Vec<String> = failed.iter().map(ToString::to_string).collect();
            println!(
                "\n{}{} generated with problems in: {}",
                style(WARNING).yellow().bold(),
                style(&entity.class).yellow().bold(),
                style(steps.join(", ")).yellow()
            );
        }

        println!("\n{}", style("Next steps:").cyan().bold());
        let mut steps = vec![format!(
            "Run the migration: {}",
            style("php artisan migrate").yellow()
        )];
        steps.extend(summary.follow_ups().into_iter().map(ToString::to_string));
        steps.push(format!(
            "Add translations for {}",
            style(format!("messages.{}.*", entity.message_key)).yellow()
        ));
        steps.push(format!(
            "Try it: {}",
            style(format!("GET /api/{route_prefix}{}", entity.route_uri)).yellow()
        ));

        for (index, step) in steps.iter().enumerate() {
            println!("  {}. {step}", index + 1);
        }
    }
}
