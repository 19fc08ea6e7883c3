//! oneclick CLI library
//!
//! Generates the layered API surface of a Laravel application for a single
//! entity: model, migration, repository, service, resource, controller,
//! form requests and routes, plus the shared wiring they depend on.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::cognitive_complexity)]
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod observability;
pub mod postman;
pub mod prompt;
pub mod scaffold;
pub mod templates;

pub use config::ScaffoldConfig;
pub use error::{Result, ScaffoldError};
pub use prompt::{Prompter, ScriptedPrompter, TerminalPrompter};
pub use scaffold::{
    AttributeSource, EntityNames, GenerationRun, Pipeline, RunSummary, TemplateHelpers, Workspace,
};
