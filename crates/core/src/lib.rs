//! routegen: typed TypeScript clients and data-fetching hooks from an HTTP
//! route description.
//!
//! The pipeline, leaves first:
//! - [`route`]: raw declarations normalized into an ordered operation list
//! - [`naming`]: collision-free identifiers per generated module
//! - [`classify`]: read or write, argument shape, data type
//! - [`emit`]: one rendering strategy per output convention
//! - [`module`]: fragments assembled into complete modules
//!
//! [`openapi`] turns an OpenAPI document into the declarations the pipeline
//! consumes.

pub mod classify;
pub mod config;
pub mod emit;
pub mod error;
pub mod module;
pub mod naming;
pub mod openapi;
mod pipeline;
pub mod route;
pub mod target;
pub mod ts;

pub use config::GeneratorConfig;
pub use error::{GenerateError, GenerateWarning};
pub use module::GeneratedModule;
pub use pipeline::{generate, generate_model};
pub use route::{RouteDeclarations, RouteModel};
pub use target::Target;
