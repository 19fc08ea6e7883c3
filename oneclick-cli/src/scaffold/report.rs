//! Per-step outcome reporting

use std::fmt;
use std::path::{Path, PathBuf};

use console::{style, Emoji};

use crate::error::ScaffoldError;

static SUCCESS: Emoji<'_, '_> = Emoji("✓ ", "√ ");
static PATCHED: Emoji<'_, '_> = Emoji("✎ ", "~ ");
static SKIPPED: Emoji<'_, '_> = Emoji("○ ", "- ");
static WARNING: Emoji<'_, '_> = Emoji("⚠ ", "! ");
static FAILURE: Emoji<'_, '_> = Emoji("✗ ", "x ");
static INFO: Emoji<'_, '_> = Emoji("ℹ ", "i ");

/// Pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Support files and composition root wiring
    Setup,
    /// Model class
    Model,
    /// Schema migration
    Migration,
    /// Repository layer
    Repository,
    /// Service layer
    Service,
    /// API resource
    Resource,
    /// HTTP controller
    Controller,
    /// Form requests
    Requests,
    /// Route registration
    Routes,
}

impl Step {
    /// Label shown in progress output
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Model => "model",
            Self::Migration => "migration",
            Self::Repository => "repository",
            Self::Service => "service",
            Self::Resource => "resource",
            Self::Controller => "controller",
            Self::Requests => "requests",
            Self::Routes => "routes",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One thing that happened during a step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// New file written
    Created {
        /// Path relative to the project root
        path: PathBuf,
        /// What the file is
        description: String,
    },
    /// Existing file replaced
    Overwritten {
        /// Path relative to the project root
        path: PathBuf,
        /// What the file is
        description: String,
    },
    /// Existing file patched in place
    Patched {
        /// Path relative to the project root
        path: PathBuf,
        /// What changed
        description: String,
        /// Unified diff of the change
        diff: String,
    },
    /// Patch or write not needed
    Unchanged {
        /// Path relative to the project root
        path: PathBuf,
        /// Why nothing happened
        reason: String,
    },
    /// File removed
    Removed {
        /// Path relative to the project root
        path: PathBuf,
    },
    /// Step or part of it deliberately not performed
    Skipped(String),
    /// Something the user should look at
    Warning(String),
    /// Part of the step failed
    Error(String),
    /// Follow-up for the user
    Info(String),
}

/// Everything a single step reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    step: Step,
    notices: Vec<Notice>,
}

impl StepReport {
    /// Empty report for `step`
    #[must_use]
    pub const fn new(step: Step) -> Self {
        Self {
            step,
            notices: Vec::new(),
        }
    }

    /// Report for a step that ended with `error`
    #[must_use]
    pub fn failed(step: Step, error: &ScaffoldError) -> Self {
        let mut report = Self::new(step);
        report.error(error.to_string());
        report
    }

    /// Step this report belongs to
    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    /// Notices in the order they were raised
    #[must_use]
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// Record a created file
    pub fn created(&mut self, path: impl AsRef<Path>, description: impl Into<String>) {
        self.notices.push(Notice::Created {
            path: path.as_ref().to_path_buf(),
            description: description.into(),
        });
    }

    /// Record an overwritten file
    pub fn overwritten(&mut self, path: impl AsRef<Path>, description: impl Into<String>) {
        self.notices.push(Notice::Overwritten {
            path: path.as_ref().to_path_buf(),
            description: description.into(),
        });
    }

    /// Record a patched file
    pub fn patched(
        &mut self,
        path: impl AsRef<Path>,
        description: impl Into<String>,
        diff: impl Into<String>,
    ) {
        self.notices.push(Notice::Patched {
            path: path.as_ref().to_path_buf(),
            description: description.into(),
            diff: diff.into(),
        });
    }

    /// Record a file left alone
    pub fn unchanged(&mut self, path: impl AsRef<Path>, reason: impl Into<String>) {
        self.notices.push(Notice::Unchanged {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        });
    }

    /// Record a removed file
    pub fn removed(&mut self, path: impl AsRef<Path>) {
        self.notices.push(Notice::Removed {
            path: path.as_ref().to_path_buf(),
        });
    }

    /// Record a skip
    pub fn skipped(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::Skipped(message.into()));
    }

    /// Record a warning
    pub fn warn(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::Warning(message.into()));
    }

    /// Record a failure
    pub fn error(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::Error(message.into()));
    }

    /// Record a follow-up
    pub fn info(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::Info(message.into()));
    }

    /// Whether any part of the step failed
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| matches!(n, Notice::Error(_)))
    }

    /// Whether a file was patched
    #[must_use]
    pub fn has_patches(&self) -> bool {
        self.notices.iter().any(|n| matches!(n, Notice::Patched { .. }))
    }

    /// Files created, overwritten or patched
    #[must_use]
    pub fn written_paths(&self) -> Vec<&Path> {
        self.notices
            .iter()
            .filter_map(|notice| match notice {
                Notice::Created { path, .. }
                | Notice::Overwritten { path, .. }
                | Notice::Patched { path, .. } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Messages of every warning
    #[must_use]
    pub fn warnings(&self) -> Vec<&str> {
        self.notices
            .iter()
            .filter_map(|notice| match notice {
                Notice::Warning(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Messages of every error
    #[must_use]
    pub fn errors(&self) -> Vec<&str> {
        self.notices
            .iter()
            .filter_map(|notice| match notice {
                Notice::Error(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Messages of every follow-up
    #[must_use]
    pub fn infos(&self) -> Vec<&str> {
        self.notices
            .iter()
            .filter_map(|notice| match notice {
                Notice::Info(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    steps: Vec<StepReport>,
}

impl RunSummary {
    /// Append a finished step
    pub fn push(&mut self, report: StepReport) {
        self.steps.push(report);
    }

    /// Reports in pipeline order
    #[must_use]
    pub fn steps(&self) -> &[StepReport] {
        &self.steps
    }

    /// Report of a given step
    #[must_use]
    pub fn step(&self, step: Step) -> Option<&StepReport> {
        self.steps.iter().find(|report| report.step() == step)
    }

    /// Whether the composition root was patched
    #[must_use]
    pub fn bootstrap_patched(&self) -> bool {
        self.step(Step::Setup).is_some_and(StepReport::has_patches)
    }

    /// Steps that reported at least one error
    #[must_use]
    pub fn failed_steps(&self) -> Vec<Step> {
        self.steps
            .iter()
            .filter(|report| report.has_errors())
            .map(StepReport::step)
            .collect()
    }

    /// Follow-ups from every step
    #[must_use]
    pub fn follow_ups(&self) -> Vec<&str> {
        self.steps.iter().flat_map(StepReport::infos).collect()
    }
}

/// Receives progress while a run is in flight
pub trait Reporter {
    /// A step is about to start
    fn step_started(&mut self, step: Step);

    /// A step finished, successfully or not
    fn step_finished(&mut self, report: &StepReport);
}

/// Prints progress to the terminal
pub struct ConsoleReporter {
    show_diffs: bool,
}

impl ConsoleReporter {
    /// Reporter printing diffs of patched files when `show_diffs` is set
    #[must_use]
    pub const fn new(show_diffs: bool) -> Self {
        Self { show_diffs }
    }

    fn print_notice(&self, notice: &Notice) {
        match notice {
            Notice::Created { path, description } => println!(
                "  {}{} ({})",
                style(SUCCESS).green(),
                style(path.display()).dim(),
                style(description).dim()
            ),
            Notice::Overwritten { path, description } => println!(
                "  {}{} ({}, overwritten)",
                style(SUCCESS).yellow(),
                style(path.display()).dim(),
                style(description).dim()
            ),
            Notice::Patched {
                path,
                description,
                diff,
            } => {
                println!(
                    "  {}{} ({})",
                    style(PATCHED).cyan(),
                    style(path.display()).dim(),
                    style(description).dim()
                );
                if self.show_diffs {
                    for line in diff.lines() {
                        let styled = match line.chars().next() {
                            Some('+') => style(line).green(),
                            Some('-') => style(line).red(),
                            _ => style(line).dim(),
                        };
                        println!("      {styled}");
                    }
                }
            }
            Notice::Unchanged { path, reason } => println!(
                "  {}{} ({})",
                style(SKIPPED).dim(),
                style(path.display()).dim(),
                style(reason).dim()
            ),
            Notice::Removed { path } => println!(
                "  {}{} (removed)",
                style(FAILURE).yellow(),
                style(path.display()).dim()
            ),
            Notice::Skipped(message) => println!("  {}{}", style(SKIPPED).dim(), message),
            Notice::Warning(message) => {
                println!("  {}{}", style(WARNING).yellow(), style(message).yellow());
            }
            Notice::Error(message) => {
                println!("  {}{}", style(FAILURE).red(), style(message).red());
            }
            Notice::Info(message) => println!("  {}{}", style(INFO).cyan(), message),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn step_started(&mut self, step: Step) {
        println!("\n{}", style(format!("[{step}]")).cyan().bold());
    }

    fn step_finished(&mut self, report: &StepReport) {
        for notice in report.notices() {
            self.print_notice(notice);
        }
    }
}

/// Discards progress
#[derive(Debug, Default)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn step_started(&mut self, _step: Step) {}

    fn step_finished(&mut self, _report: &StepReport) {}
}
