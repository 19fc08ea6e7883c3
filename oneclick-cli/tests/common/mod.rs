//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use oneclick_cli_lib::{ScaffoldConfig, Workspace};
use tempfile::TempDir;

/// `bootstrap/app.php` as shipped by a fresh Laravel 11 install
pub const STOCK_APP: &str = r"<?php

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

/// Temporary Laravel project skeleton
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("artisan"), "#!/usr/bin/env php\n").unwrap();
        fs::create_dir_all(dir.path().join("bootstrap")).unwrap();
        fs::write(dir.path().join("bootstrap/app.php"), STOCK_APP).unwrap();
        fs::create_dir_all(dir.path().join("app/Models")).unwrap();
        fs::create_dir_all(dir.path().join("database/migrations")).unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).unwrap()
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::new(self.root(), &ScaffoldConfig::default()).unwrap()
    }

    /// Every file under the root with its content, sorted by path
    pub fn snapshot(&self) -> Vec<(PathBuf, String)> {
        let mut files: Vec<_> = walkdir::WalkDir::new(self.root())
            .into_iter()
            .map(Result::unwrap)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| {
                let content = fs::read_to_string(entry.path()).unwrap();
                (entry.into_path(), content)
            })
            .collect();
        files.sort();
        files
    }

    /// Migrations creating `table`
    pub fn migrations(&self, table: &str) -> Vec<String> {
        let suffix = format!("_create_{table}_table.php");
        let mut names: Vec<String> = fs::read_dir(self.path("database/migrations"))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(&suffix))
            .collect();
        names.sort();
        names
    }
}
