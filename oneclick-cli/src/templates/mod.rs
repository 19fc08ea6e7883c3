//! Embedded templates for generated PHP sources
//!
//! Rendered templates are registered with the
//! [`TemplateRenderer`](crate::scaffold::renderer::TemplateRenderer) under the
//! names listed in [`ALL`]. Support files that never vary are written
//! verbatim from [`support`].

pub mod http;
pub mod migration;
pub mod model;
pub mod providers;
pub mod repository;
pub mod routes;
pub mod service;
pub mod support;

/// Every rendered template as `(name, source)`
pub const ALL: &[(&str, &str)] = &[
    (model::MINIMAL_NAME, model::MINIMAL),
    (model::MEMBERS_NAME, model::MEMBERS),
    (migration::CREATE_NAME, migration::CREATE),
    (repository::BASE_INTERFACE_NAME, repository::BASE_INTERFACE),
    (repository::BASE_IMPL_NAME, repository::BASE_IMPL),
    (repository::INTERFACE_NAME, repository::INTERFACE),
    (repository::IMPL_NAME, repository::IMPL),
    (service::BASE_INTERFACE_NAME, service::BASE_INTERFACE),
    (service::BASE_IMPL_NAME, service::BASE_IMPL),
    (service::INTERFACE_NAME, service::INTERFACE),
    (service::IMPL_NAME, service::IMPL),
    (http::RESOURCE_NAME, http::RESOURCE),
    (http::CONTROLLER_NAME, http::CONTROLLER),
    (http::REQUEST_NAME, http::REQUEST),
    (routes::ENTITY_NAME, routes::ENTITY),
    (providers::PROVIDER_NAME, providers::PROVIDER),
];
