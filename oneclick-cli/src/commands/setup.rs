//! Project setup command

use std::path::PathBuf;

use anyhow::{Context, Result};
use console::{style, Emoji};
use oneclick_cli_lib::scaffold::report::ConsoleReporter;
use oneclick_cli_lib::{Pipeline, TerminalPrompter, Workspace};

use super::Project;

static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠ ", "! ");

/// Write the support files and wire `bootstrap/app.php`
pub struct SetupCommand {
    show_diffs: bool,
    root: PathBuf,
    config: Option<PathBuf>,
}

impl SetupCommand {
    /// Create a new command instance
    pub const fn new(show_diffs: bool, root: PathBuf, config: Option<PathBuf>) -> Self {
        Self {
            show_diffs,
            root,
            config,
        }
    }

    /// Execute the command
    pub fn execute(&self) -> Result<()> {
        println!("\n{}", style("Setting up the project...").cyan().bold());

        let project = Project::open(&self.root, self.config.as_deref())?;
        let workspace = Workspace::new(&project.root, &project.config)
            .context("Failed to load templates")?;

        let mut prompter = TerminalPrompter::new();
        let mut reporter = ConsoleReporter::new(self.show_diffs);
        let summary = Pipeline::new(&workspace, &mut prompter, &mut reporter)
            .setup()
            .context("Setup failed")?;

        if summary.failed_steps().is_empty() {
            println!("\n{}Project is ready for generation", style(SPARKLE).green().bold());
        } else {
            println!(
                "\n{}Setup finished with errors, see above",
                style(WARNING).yellow().bold()
            );
        }
        if summary.bootstrap_patched() {
            println!(
                "  Restart the server: {}",
                style("php artisan serve").yellow()
            );
        }
        Ok(())
    }
}
