//! One-time project setup: support files and composition root wiring

use std::path::PathBuf;

use super::bootstrap::BootstrapPatcher;
use crate::error::{Result, ScaffoldError};
use crate::scaffold::report::StepReport;
use crate::scaffold::workspace::{GeneratedFile, Workspace};
use crate::templates::support::{
    API_ROUTES, CORS_MIDDLEWARE, IMAGE_TRAIT, LANG_MIDDLEWARE, RESPONSE_TRAIT, ROUTE_HELPER,
    TIMEZONE_TRAIT,
};

/// Writes the files generated code depends on and patches `bootstrap/app.php`
pub struct Setup;

impl Setup {
    fn support_files(workspace: &Workspace) -> Vec<GeneratedFile> {
        let layout = workspace.layout();
        vec![
            GeneratedFile::new(
                layout.app("Traits/ResponseTrait.php"),
                RESPONSE_TRAIT,
                "JSON response helpers",
            ),
            GeneratedFile::new(layout.app("Traits/ImageTrait.php"), IMAGE_TRAIT, "image upload helpers"),
            GeneratedFile::new(
                layout.app("Traits/HasTimezoneConversion.php"),
                TIMEZONE_TRAIT,
                "request timezone conversion for models",
            ),
            GeneratedFile::new(
                layout.app("Http/Middleware/Cors.php"),
                CORS_MIDDLEWARE,
                "CORS middleware",
            ),
            GeneratedFile::new(
                layout.app("Http/Middleware/Lang.php"),
                LANG_MIDDLEWARE,
                "locale middleware",
            ),
            GeneratedFile::new(
                layout.app("Helpers/Routes/v1/RouteHelper.php"),
                ROUTE_HELPER,
                "route file loader",
            ),
            GeneratedFile::new(layout.api_routes_file(), API_ROUTES, "API route entry point"),
        ]
    }

    /// Whether every support file exists and the composition root is wired
    #[must_use]
    pub fn is_complete(workspace: &Workspace) -> bool {
        Self::support_files(workspace)
            .iter()
            .all(|file| file.path.exists())
            && BootstrapPatcher::is_complete(workspace)
    }

    /// Write missing support files, then patch the composition root
    ///
    /// A composition root that is missing or cannot be patched is reported
    /// as an error notice; the rest of the setup still counts.
    ///
    /// # Errors
    ///
    /// Returns an error if a support file cannot be written or the
    /// composition root cannot be read or written.
    pub fn run(workspace: &Workspace, report: &mut StepReport) -> Result<()> {
        let files = Self::support_files(workspace);
        let directories: Vec<PathBuf> = files
            .iter()
            .filter_map(|file| file.path.parent().map(PathBuf::from))
            .collect();
        for directory in &directories {
            workspace.ensure_dir(directory, report)?;
        }
        for file in &files {
            workspace.create_if_absent(file, report)?;
        }

        match BootstrapPatcher::patch(workspace, report) {
            Err(err @ (ScaffoldError::MissingFile { .. } | ScaffoldError::AnchorNotFound { .. })) => {
                tracing::warn!(step = %report.step(), error = %err, "composition root not wired");
                report.error(format!("{err}; wire API routing and middleware aliases by hand"));
                Ok(())
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScaffoldConfig;
    use crate::scaffold::fsutil;
    use crate::scaffold::report::Step;
    use tempfile::tempdir;

    #[test]
    fn test_setup_without_bootstrap_file() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let mut report = StepReport::new(Step::Setup);

        Setup::run(&workspace, &mut report).unwrap();

        let layout = workspace.layout();
        assert!(layout.app("Traits/ResponseTrait.php").is_file());
        assert!(fsutil::read(&layout.app("Traits/HasTimezoneConversion.php"))
            .unwrap()
            .contains("trait HasTimezoneConversion"));
        assert!(layout.app("Helpers/Routes/v1/RouteHelper.php").is_file());
        assert_eq!(fsutil::read(&layout.api_routes_file()).unwrap(), "<?php\n");
        assert_eq!(report.errors().len(), 1);
        assert!(!Setup::is_complete(&workspace));
    }

    #[test]
    fn test_existing_support_files_are_kept() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let trait_path = workspace.layout().app("Traits/ResponseTrait.php");
        fsutil::write(&trait_path, "<?php // customised\n").unwrap();
        fsutil::write(
            &workspace.layout().bootstrap_file(),
            "<?php\n\nreturn Application::configure(basePath: dirname(__DIR__))\n    ->create();\n",
        )
        .unwrap();

        let mut report = StepReport::new(Step::Setup);
        Setup::run(&workspace, &mut report).unwrap();

        assert_eq!(fsutil::read(&trait_path).unwrap(), "<?php // customised\n");
        assert!(!report.has_errors());
        assert!(Setup::is_complete(&workspace));
    }
}
