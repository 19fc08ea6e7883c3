//! Composition root wiring in `bootstrap/app.php`

use chrono::Utc;

use crate::error::{Result, ScaffoldError};
use crate::scaffold::fsutil;
use crate::scaffold::patch::{EnsureUseStatements, UpsertCall};
use crate::scaffold::report::StepReport;
use crate::scaffold::workspace::Workspace;
use crate::templates::support::{
    BOOTSTRAP_IMPORTS, CORS_MARKER, EXCEPTIONS_BLOCK, MIDDLEWARE_BLOCK, ROUTING_BLOCK,
    ROUTING_MARKER, THROTTLE_MARKER,
};

const MARKERS: [&str; 3] = [ROUTING_MARKER, CORS_MARKER, THROTTLE_MARKER];

/// Wires API routing, middleware aliases and JSON error rendering
pub struct BootstrapPatcher;

impl BootstrapPatcher {
    /// Whether every marker is already present
    #[must_use]
    pub fn is_complete(workspace: &Workspace) -> bool {
        fsutil::read(&workspace.layout().bootstrap_file())
            .is_ok_and(|text| MARKERS.iter().all(|marker| text.contains(marker)))
    }

    /// Patch the composition root, backing it up when the text changes
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::MissingFile`] if `bootstrap/app.php` does not
    /// exist, [`ScaffoldError::AnchorNotFound`] if it has no
    /// `Application::configure(...)` call to attach to, or an I/O error.
    pub fn patch(workspace: &Workspace, report: &mut StepReport) -> Result<()> {
        let path = workspace.layout().bootstrap_file();
        if !path.is_file() {
            return Err(ScaffoldError::MissingFile {
                path: workspace.display(&path),
            });
        }
        if Self::is_complete(workspace) {
            report.unchanged(workspace.display(&path), "routing and middleware already wired");
            return Ok(());
        }

        let imports = EnsureUseStatements::new(BOOTSTRAP_IMPORTS);
        let routing = UpsertCall::new("withRouting", ROUTING_BLOCK, "Application::configure");
        let middleware = UpsertCall::new("withMiddleware", MIDDLEWARE_BLOCK, "withRouting");
        let exceptions = UpsertCall::new("withExceptions", EXCEPTIONS_BLOCK, "withMiddleware");

        let backup = path.with_file_name(format!("app.php.backup_{}", Utc::now().timestamp()));
        workspace.patch_file_with_backup(
            &path,
            &backup,
            &[&imports, &routing, &middleware, &exceptions],
            "API routing, middleware aliases and JSON exceptions",
            report,
        )?;
        report.info("Restart the development server so the new bootstrap configuration is loaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScaffoldConfig;
    use crate::scaffold::report::Step;
    use tempfile::tempdir;

    const STOCK_APP: &str = r"<?php

use Illuminate\Foundation\Application;
use Illuminate\Foundation\Configuration\Exceptions;
use Illuminate\Foundation\Configuration\Middleware;

return Application::configure(basePath: dirname(__DIR__))
    ->withRouting(
        web: __DIR__.'/../routes/web.php',
        commands: __DIR__.'/../routes/console.php',
        health: '/up',
    )
    ->withMiddleware(function (Middleware $middleware) {
        //
    })
    ->withExceptions(function (Exceptions $exceptions) {
        //
    })->create();
";

    fn backups(workspace: &Workspace) -> usize {
        std::fs::read_dir(workspace.layout().bootstrap_file().parent().unwrap())
            .unwrap()
            .filter(|entry| {
                entry
                    .as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .starts_with("app.php.backup_")
            })
            .count()
    }

    #[test]
    fn test_stock_file_is_wired() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let path = workspace.layout().bootstrap_file();
        fsutil::write(&path, STOCK_APP).unwrap();
        let mut report = StepReport::new(Step::Setup);

        BootstrapPatcher::patch(&workspace, &mut report).unwrap();

        let text = fsutil::read(&path).unwrap();
        assert!(BootstrapPatcher::is_complete(&workspace));
        assert!(text.contains("use Illuminate\\Http\\Request;\n"));
        assert!(text.contains(ROUTING_BLOCK));
        assert!(text.contains(MIDDLEWARE_BLOCK));
        assert!(text.contains(&format!("{EXCEPTIONS_BLOCK}->create();")));
        assert_eq!(text.matches("->withRouting(").count(), 1);
        assert!(report.has_patches());
        assert_eq!(backups(&workspace), 1);
    }

    #[test]
    fn test_complete_file_is_not_touched() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let path = workspace.layout().bootstrap_file();
        fsutil::write(&path, STOCK_APP).unwrap();
        BootstrapPatcher::patch(&workspace, &mut StepReport::new(Step::Setup)).unwrap();
        let first = fsutil::read(&path).unwrap();
        for entry in std::fs::read_dir(path.parent().unwrap()).unwrap() {
            let entry = entry.unwrap();
            if entry.path() != path {
                std::fs::remove_file(entry.path()).unwrap();
            }
        }

        let mut report = StepReport::new(Step::Setup);
        BootstrapPatcher::patch(&workspace, &mut report).unwrap();

        assert_eq!(fsutil::read(&path).unwrap(), first);
        assert!(!report.has_patches());
        assert_eq!(backups(&workspace), 0);
    }

    #[test]
    fn test_missing_bootstrap_file() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let err = BootstrapPatcher::patch(&workspace, &mut StepReport::new(Step::Setup)).unwrap_err();
        assert!(matches!(err, ScaffoldError::MissingFile { .. }));
    }

    #[test]
    fn test_without_configure_call_nothing_is_written() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let path = workspace.layout().bootstrap_file();
        fsutil::write(&path, "<?php\n\nreturn $app;\n").unwrap();

        let err = BootstrapPatcher::patch(&workspace, &mut StepReport::new(Step::Setup)).unwrap_err();

        assert!(matches!(err, ScaffoldError::AnchorNotFound { .. }));
        assert_eq!(fsutil::read(&path).unwrap(), "<?php\n\nreturn $app;\n");
        assert_eq!(backups(&workspace), 0);
    }
}
