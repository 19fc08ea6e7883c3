//! CLI command implementations

pub mod generate;
pub mod postman;
pub mod setup;

pub use generate::GenerateCommand;
pub use postman::PostmanCommand;
pub use setup::SetupCommand;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use console::{style, Emoji};
use oneclick_cli_lib::ScaffoldConfig;

static WARNING: Emoji<'_, '_> = Emoji("⚠ ", "! ");

/// Project root and its loaded configuration
pub struct Project {
    pub root: PathBuf,
    pub config: ScaffoldConfig,
}

impl Project {
    /// Resolve `root` and load the configuration layered on top of it
    pub fn open(root: &Path, config: Option<&Path>) -> Result<Self> {
        anyhow::ensure!(root.is_dir(), "Project root {} is not a directory", root.display());
        let root = root
            .canonicalize()
            .with_context(|| format!("Failed to resolve project root {}", root.display()))?;

        if !root.join("artisan").is_file() {
            println!(
                "{}{} does not look like a Laravel project (no artisan file)",
                style(WARNING).yellow(),
                style(root.display()).dim()
            );
        }

        let config = ScaffoldConfig::load(&root, config)?;
        tracing::debug!(root = %root.display(), "configuration loaded");
        Ok(Self { root, config })
    }
}
