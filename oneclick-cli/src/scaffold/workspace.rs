//! The host project as seen by the generators
//!
//! Every write goes through [`Workspace`] so collisions, overwrites and
//! patches are reported and logged the same way for every step.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::fsutil;
use super::layout::ProjectLayout;
use super::patch::{apply_rules, unified_diff, PatchOutcome, PatchRule};
use super::renderer::TemplateRenderer;
use super::report::StepReport;
use crate::config::{GeneratorSettings, ScaffoldConfig};
use crate::error::{Result, ScaffoldError};

/// Represents a generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Absolute path inside the project
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
}

impl GeneratedFile {
    /// Bundle a path with its content
    pub fn new(path: PathBuf, content: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            path,
            content: content.into(),
            description: description.into(),
        }
    }
}

/// Project root, layout, templates and generator settings
#[derive(Debug)]
pub struct Workspace {
    layout: ProjectLayout,
    renderer: TemplateRenderer,
    settings: GeneratorSettings,
}

impl Workspace {
    /// Open the project rooted at `root`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Template`] if the embedded templates fail to load.
    pub fn new(root: impl Into<PathBuf>, config: &ScaffoldConfig) -> Result<Self> {
        Ok(Self {
            layout: ProjectLayout::new(root, config.layout.clone()),
            renderer: TemplateRenderer::new()?,
            settings: config.generator.clone(),
        })
    }

    /// Path resolution
    #[must_use]
    pub const fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Generator settings
    #[must_use]
    pub const fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Render a registered template
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Template`] on rendering failure.
    pub fn render<S: Serialize>(&self, template: &str, context: S) -> Result<String> {
        self.renderer.render(template, context)
    }

    /// Path relative to the project root, for messages
    #[must_use]
    pub fn display(&self, path: &Path) -> PathBuf {
        self.layout.display(path)
    }

    /// Write a file that must not exist yet
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Collision`] if the file exists, or
    /// [`ScaffoldError::Io`] if it cannot be written.
    pub fn create(&self, file: &GeneratedFile, report: &mut StepReport) -> Result<()> {
        if file.path.exists() {
            return Err(ScaffoldError::Collision {
                path: self.display(&file.path),
            });
        }
        self.write(file, report, false)
    }

    /// Write a file, replacing whatever is there
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Io`] if the file cannot be written.
    pub fn create_or_overwrite(&self, file: &GeneratedFile, report: &mut StepReport) -> Result<()> {
        let existed = file.path.exists();
        self.write(file, report, existed)
    }

    /// Write a file only when it is absent; returns whether it was written
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Io`] if the file cannot be written.
    pub fn create_if_absent(&self, file: &GeneratedFile, report: &mut StepReport) -> Result<bool> {
        if file.path.exists() {
            tracing::debug!(step = %report.step(), path = %self.display(&file.path).display(), "exists, left alone");
            return Ok(false);
        }
        self.write(file, report, false)?;
        Ok(true)
    }

    /// Ensure a directory exists, reporting it when created
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::Io`] if the directory cannot be created.
    pub fn ensure_dir(&self, path: &Path, report: &mut StepReport) -> Result<()> {
        if fsutil::ensure_dir(path)? {
            tracing::debug!(step = %report.step(), path = %self.display(path).display(), "directory created");
            report.created(self.display(path), "directory");
        }
        Ok(())
    }

    /// Apply patch rules to an existing file, writing only on change
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`ScaffoldError::MissingFile`] if the file does not exist
    /// - [`ScaffoldError::AnchorNotFound`] if a rule cannot locate its anchor
    /// - [`ScaffoldError::Io`] if the file cannot be read or written
    pub fn patch_file(
        &self,
        path: &Path,
        rules: &[&dyn PatchRule],
        description: &str,
        report: &mut StepReport,
    ) -> Result<PatchOutcome> {
        self.patch(path, rules, description, None, report)
    }

    /// Like [`Workspace::patch_file`], copying the original to `backup` first
    ///
    /// The backup is only taken when the patch changes the text.
    ///
    /// # Errors
    ///
    /// Same as [`Workspace::patch_file`], plus [`ScaffoldError::Io`] if the
    /// backup cannot be written.
    pub fn patch_file_with_backup(
        &self,
        path: &Path,
        backup: &Path,
        rules: &[&dyn PatchRule],
        description: &str,
        report: &mut StepReport,
    ) -> Result<PatchOutcome> {
        self.patch(path, rules, description, Some(backup), report)
    }

    fn patch(
        &self,
        path: &Path,
        rules: &[&dyn PatchRule],
        description: &str,
        backup: Option<&Path>,
        report: &mut StepReport,
    ) -> Result<PatchOutcome> {
        let shown = self.display(path);
        if !path.is_file() {
            return Err(ScaffoldError::MissingFile { path: shown });
        }

        let original = fsutil::read(path)?;
        let outcome = apply_rules(&original, rules).map_err(|missing| {
            ScaffoldError::AnchorNotFound {
                anchor: missing.anchor,
                path: shown.clone(),
            }
        })?;

        if outcome.text == original {
            tracing::debug!(step = %report.step(), path = %shown.display(), "patch already applied");
            report.unchanged(&shown, "already up to date");
            return Ok(outcome);
        }

        if let Some(backup) = backup {
            fsutil::copy(path, backup)?;
            tracing::info!(step = %report.step(), backup = %self.display(backup).display(), "backup written");
            report.info(format!(
                "Backed up {} to {}",
                shown.display(),
                self.display(backup).display()
            ));
        }

        fsutil::write(path, &outcome.text)?;
        let diff = unified_diff(&original, &outcome.text, &shown.to_string_lossy());
        tracing::info!(
            step = %report.step(),
            path = %shown.display(),
            rules = ?outcome.applied,
            "file patched"
        );
        tracing::debug!("{diff}");
        report.patched(&shown, description, diff);
        Ok(outcome)
    }

    fn write(&self, file: &GeneratedFile, report: &mut StepReport, overwrite: bool) -> Result<()> {
        fsutil::write(&file.path, &file.content)?;
        let shown = self.display(&file.path);
        tracing::info!(step = %report.step(), path = %shown.display(), overwrite, "file written");
        if overwrite {
            report.overwritten(shown, file.description.clone());
        } else {
            report.created(shown, file.description.clone());
        }
        Ok(())
    }
}
