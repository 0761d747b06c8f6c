//! OpenAPI input adapter.
//!
//! Parses an OpenAPI 3.x document (JSON or YAML) into:
//! - raw route declarations for the generation pipeline
//! - declarations of the component schemas, rendered as `schemas.ts`

mod adapter;
mod document;
mod schema;

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::module::BANNER;
use crate::route::{HttpMethod, RouteDeclarations};
use crate::ts::{Emit, TsTypeDef};

pub use schema::ref_to_type_name;

/// File name of the rendered component schemas
pub const SCHEMAS_FILE: &str = "schemas.ts";

/// Errors reading an OpenAPI document
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("failed to parse OpenAPI JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse OpenAPI YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported OpenAPI version '{0}' (expected 3.x)")]
    UnsupportedVersion(String),

    #[error("unresolved reference '{reference}'")]
    UnresolvedRef { reference: String },

    #[error("{method} {path}: invalid response status '{status}'")]
    InvalidStatus {
        path: String,
        method: HttpMethod,
        status: String,
    },

    #[error("{method} {path}: parameter '{name}' has unknown location '{location}'")]
    InvalidParameter {
        path: String,
        method: HttpMethod,
        name: String,
        location: String,
    },
}

/// Serialization of the input document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// By file extension, falling back to the first non-blank character.
    pub fn detect(path: &Path, text: &str) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Format::Json,
            Some("yaml" | "yml") => Format::Yaml,
            _ if text.trim_start().starts_with('{') => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// A parsed OpenAPI document
#[derive(Debug)]
pub struct OpenApiSource {
    document: document::Document,
}

impl OpenApiSource {
    pub fn parse(text: &str, format: Format) -> Result<Self, SourceError> {
        let document: document::Document = match format {
            Format::Json => serde_json::from_str(text)?,
            Format::Yaml => serde_yaml::from_str(text)?,
        };
        if !document.openapi.starts_with("3.") {
            return Err(SourceError::UnsupportedVersion(document.openapi));
        }
        debug!(
            version = %document.openapi,
            paths = document.paths.len(),
            schemas = document.components.schemas.len(),
            "Parsed OpenAPI document"
        );
        Ok(Self { document })
    }

    pub fn title(&self) -> Option<&str> {
        self.document.info.title.as_deref()
    }

    /// Route declarations in document order.
    pub fn declarations(&self) -> Result<RouteDeclarations, SourceError> {
        adapter::declarations(&self.document)
    }

    /// One declaration per component schema.
    pub fn schema_typedefs(&self) -> Vec<TsTypeDef> {
        schema::schema_typedefs(&self.document.components.schemas)
    }

    /// The `schemas.ts` module text.
    pub fn schema_module(&self) -> String {
        let mut output = String::from(BANNER);
        output.push('\n');
        for def in self.schema_typedefs() {
            output.push('\n');
            output.push_str(&def.emit());
        }
        output
    }
}
