//! Layered API scaffold generator
//!
//! Turns an entity name plus its attributes into the model, migration,
//! repository, service, resource, controller, form requests and routes of a
//! Laravel application, and wires the shared files those depend on.

pub mod attribute;
pub mod collect;
pub mod fsutil;
pub mod generators;
pub mod layout;
pub mod method;
pub mod naming;
pub mod patch;
pub mod pipeline;
pub mod renderer;
pub mod report;
pub mod run;
pub mod validator;
pub mod workspace;

pub use generators::model::AttributeSource;
pub use naming::{EntityNames, TemplateHelpers};
pub use pipeline::{MethodSource, Pipeline};
pub use report::RunSummary;
pub use run::GenerationRun;
pub use workspace::Workspace;
