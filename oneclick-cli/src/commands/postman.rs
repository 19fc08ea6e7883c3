//! Postman collection export command

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::{style, Emoji};
use oneclick_cli_lib::postman::PostmanExporter;
use oneclick_cli_lib::scaffold::layout::ProjectLayout;

use super::Project;

static SUCCESS: Emoji<'_, '_> = Emoji("✓ ", "√ ");

/// Export the generated routes as a Postman collection
pub struct PostmanCommand {
    name: Option<String>,
    root: PathBuf,
    config: Option<PathBuf>,
}

impl PostmanCommand {
    /// Create a new command instance
    ///
    /// # Arguments
    ///
    /// * `name` - Collection name; the configured name when absent
    pub const fn new(name: Option<String>, root: PathBuf, config: Option<PathBuf>) -> Self {
        Self { name, root, config }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        let project = Project::open(&self.root, self.config.as_deref())?;
        let layout = ProjectLayout::new(&project.root, project.config.layout.clone());
        let exporter = PostmanExporter::new(&layout, &project.config.postman);

        let path = exporter
            .export(self.name.as_deref())
            .context("Failed to export Postman collection")?;

        println!(
            "{}Postman collection exported to: {}",
            style(SUCCESS).green(),
            style(layout.display(&path).display()).cyan()
        );
        Ok(())
    }
}
