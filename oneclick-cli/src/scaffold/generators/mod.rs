//! File generators, one per pipeline step
//!
//! Generators receive the frozen [`GenerationRun`] and write through the
//! [`Workspace`]. A returned error fails the step; notices recorded before
//! the error are kept.

pub mod bootstrap;
pub mod controller;
pub mod migration;
pub mod model;
pub mod provider;
pub mod repository;
pub mod request;
pub mod resource;
pub mod route;
pub mod service;
pub mod setup;

pub use bootstrap::BootstrapPatcher;
pub use controller::ControllerGenerator;
pub use migration::MigrationGenerator;
pub use model::ModelGenerator;
pub use repository::RepositoryGenerator;
pub use request::RequestGenerator;
pub use resource::ResourceGenerator;
pub use route::RouteGenerator;
pub use service::ServiceGenerator;
pub use setup::Setup;

use std::collections::BTreeSet;
use std::path::Path;

use super::method::CustomMethod;
use super::report::{Step, StepReport};
use super::run::GenerationRun;
use super::workspace::{GeneratedFile, Workspace};
use crate::error::{Result, ScaffoldError};
use crate::prompt::Prompter;

/// One step of the pipeline after the model gate
pub trait Generator {
    /// Step this generator implements
    fn step(&self) -> Step;

    /// Write the step's files
    ///
    /// # Errors
    ///
    /// Returns an error when the step cannot complete; the pipeline reports
    /// it and moves on unless it is a prompt failure.
    fn generate(
        &self,
        workspace: &Workspace,
        run: &GenerationRun,
        prompter: &mut dyn Prompter,
        report: &mut StepReport,
    ) -> Result<()>;
}

/// Generators in pipeline order
pub const PIPELINE: [&dyn Generator; 7] = [
    &MigrationGenerator,
    &RepositoryGenerator,
    &ServiceGenerator,
    &ResourceGenerator,
    &ControllerGenerator,
    &RequestGenerator,
    &RouteGenerator,
];

/// Write shared files once; an existing file is kept and reported
fn write_shared(
    workspace: &Workspace,
    files: &[GeneratedFile],
    report: &mut StepReport,
) -> Result<()> {
    for file in files {
        if !workspace.create_if_absent(file, report)? {
            report.warn(format!(
                "{} already exists, skipped",
                workspace.display(&file.path).display()
            ));
        }
    }
    Ok(())
}

/// Refuse before writing anything if one of `paths` exists
fn ensure_absent(workspace: &Workspace, paths: &[&Path]) -> Result<()> {
    match paths.iter().find(|path| path.exists()) {
        Some(path) => Err(ScaffoldError::Collision {
            path: workspace.display(path),
        }),
        None => Ok(()),
    }
}

/// Classes the custom method signatures need imported, sorted and unique
fn return_type_imports<'a>(methods: impl Iterator<Item = &'a CustomMethod>) -> Vec<&'static str> {
    methods
        .filter_map(|method| method.return_type.import())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaffold::method::ReturnType;

    #[test]
    fn test_pipeline_order() {
        let steps: Vec<_> = PIPELINE.iter().map(|generator| generator.step()).collect();
        assert_eq!(
            steps,
            vec![
                Step::Migration,
                Step::Repository,
                Step::Service,
                Step::Resource,
                Step::Controller,
                Step::Requests,
                Step::Routes,
            ]
        );
    }

    #[test]
    fn test_imports_are_unique() {
        let methods = [
            CustomMethod::new("a", ReturnType::Model, "", true),
            CustomMethod::new("b", ReturnType::Collection, "", true),
            CustomMethod::new("c", ReturnType::Model, "", true),
            CustomMethod::new("d", ReturnType::Int, "", true),
        ];
        assert_eq!(
            return_type_imports(methods.iter()),
            vec![
                "Illuminate\\Database\\Eloquent\\Collection",
                "Illuminate\\Database\\Eloquent\\Model",
            ]
        );
    }
}
