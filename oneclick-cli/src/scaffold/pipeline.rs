//! Run orchestration
//!
//! ```text
//! validate name → setup (when incomplete) → model (hard gate)
//!   → custom methods → migration → repository → service → resource
//!   → controller → requests → routes
//! ```
//!
//! Only the name check and the model gate abort a run. Every later step
//! reports on its own and nothing is rolled back, except that a prompt
//! failure ends the run since no later step could collect input either.

use super::collect::CustomMethodCollector;
use super::generators::model::AttributeSource;
use super::generators::{Generator, ModelGenerator, Setup, PIPELINE};
use super::method::CustomMethod;
use super::naming::EntityNames;
use super::report::{Reporter, RunSummary, Step, StepReport};
use super::run::GenerationRun;
use super::workspace::Workspace;
use crate::error::{Result, ScaffoldError};
use crate::prompt::Prompter;

/// Where the custom repository methods come from
#[derive(Debug, Clone)]
pub enum MethodSource {
    /// Ask interactively after the model is written
    Interactive,
    /// Already decided, possibly empty
    Provided(Vec<CustomMethod>),
}

/// Drives the generators for one entity
pub struct Pipeline<'a> {
    workspace: &'a Workspace,
    prompter: &'a mut dyn Prompter,
    reporter: &'a mut dyn Reporter,
}

impl<'a> Pipeline<'a> {
    /// Pipeline writing into `workspace`
    pub fn new(
        workspace: &'a Workspace,
        prompter: &'a mut dyn Prompter,
        reporter: &'a mut dyn Reporter,
    ) -> Self {
        Self {
            workspace,
            prompter,
            reporter,
        }
    }

    /// Generate every layer for the entity `name`
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`ScaffoldError::InvalidName`] before anything is written
    /// - the model step's error (for example [`ScaffoldError::Collision`])
    /// - any prompt failure
    ///
    /// Other step failures are recorded in the returned [`RunSummary`].
    pub fn run(
        &mut self,
        name: &str,
        attributes: AttributeSource,
        methods: MethodSource,
    ) -> Result<RunSummary> {
        let entity = EntityNames::new(name)?;
        let span = tracing::info_span!("generate", entity = %entity.class);
        let _guard = span.enter();
        tracing::info!(table = %entity.table, "generation started");

        let mut summary = RunSummary::default();

        if Setup::is_complete(self.workspace) {
            tracing::debug!("project setup already complete");
        } else {
            summary.push(self.setup_step());
        }

        self.reporter.step_started(Step::Model);
        let mut report = StepReport::new(Step::Model);
        let attributes = match ModelGenerator::generate(
            self.workspace,
            &entity,
            attributes,
            &mut *self.prompter,
            &mut report,
        ) {
            Ok(attributes) => attributes,
            Err(err) => {
                tracing::error!(step = %Step::Model, error = %err, "model generation failed, aborting");
                report.error(err.to_string());
                self.reporter.step_finished(&report);
                return Err(err);
            }
        };
        self.reporter.step_finished(&report);
        summary.push(report);

        let methods = match methods {
            MethodSource::Interactive => CustomMethodCollector::collect(&mut *self.prompter)?,
            MethodSource::Provided(methods) => methods,
        };

        let run = GenerationRun::new(entity, attributes, methods);
        for generator in PIPELINE {
            let report = self.step(generator, &run)?;
            summary.push(report);
        }

        tracing::info!(failed = ?summary.failed_steps(), "generation finished");
        Ok(summary)
    }

    /// Run only the setup step
    ///
    /// # Errors
    ///
    /// Never fails on a missing composition root (that is reported); returns
    /// I/O errors from writing the support files.
    pub fn setup(&mut self) -> Result<RunSummary> {
        let mut summary = RunSummary::default();
        summary.push(self.setup_step());
        Ok(summary)
    }

    fn setup_step(&mut self) -> StepReport {
        self.reporter.step_started(Step::Setup);
        let mut report = StepReport::new(Step::Setup);
        if let Err(err) = Setup::run(self.workspace, &mut report) {
            tracing::error!(step = %Step::Setup, error = %err, "setup failed");
            report.error(err.to_string());
        }
        self.reporter.step_finished(&report);
        report
    }

    fn step(&mut self, generator: &dyn Generator, run: &GenerationRun) -> Result<StepReport> {
        let step = generator.step();
        let span = tracing::info_span!("step", %step);
        let _guard = span.enter();

        self.reporter.step_started(step);
        let mut report = StepReport::new(step);
        let outcome = generator.generate(self.workspace, run, &mut *self.prompter, &mut report);
        let fatal = match outcome {
            Ok(()) => None,
            Err(err) if err.is_prompt_failure() => {
                tracing::error!(error = %err, "input unavailable, aborting");
                report.error(err.to_string());
                Some(err)
            }
            Err(err @ ScaffoldError::Collision { .. }) => {
                tracing::warn!(error = %err, "step skipped");
                report.skipped(format!("{err}, step skipped"));
                None
            }
            Err(err) => {
                tracing::error!(error = %err, "step failed");
                report.error(err.to_string());
                None
            }
        };
        self.reporter.step_finished(&report);

        match fatal {
            Some(err) => Err(err),
            None => Ok(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScaffoldConfig;
    use crate::prompt::ScriptedPrompter;
    use crate::scaffold::attribute::AttributeSet;
    use crate::scaffold::report::SilentReporter;
    use tempfile::tempdir;

    #[test]
    fn test_invalid_name_writes_nothing() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let mut prompter = ScriptedPrompter::new();
        let mut reporter = SilentReporter;

        let err = Pipeline::new(&workspace, &mut prompter, &mut reporter)
            .run(
                "123abc",
                AttributeSource::Interactive,
                MethodSource::Interactive,
            )
            .unwrap_err();

        assert!(matches!(err, ScaffoldError::InvalidName { .. }));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_prompt_failure_aborts() {
        let dir = tempdir().unwrap();
        let workspace = Workspace::new(dir.path(), &ScaffoldConfig::default()).unwrap();
        let mut prompter = ScriptedPrompter::new();
        let mut reporter = SilentReporter;

        let err = Pipeline::new(&workspace, &mut prompter, &mut reporter)
            .run(
                "Post",
                AttributeSource::Provided(AttributeSet::parse_all(&["title:string"]).unwrap()),
                MethodSource::Provided(vec![]),
            )
            .unwrap_err();

        assert!(err.is_prompt_failure());
        assert!(workspace.layout().controller("Post").is_file());
        assert!(!workspace.layout().entity_routes("post").exists());
    }
}
