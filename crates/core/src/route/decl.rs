//! Raw route declarations, as an input adapter produces them.
//!
//! Shapes are already resolved. Nothing here is validated; `build` does that.

use crate::ts::TsType;

use super::model::{ContentKind, HttpMethod, InputKind, StatusCode};

/// The whole declared API, in document order
#[derive(Debug, Clone, Default)]
pub struct RouteDeclarations {
    pub title: Option<String>,
    pub paths: Vec<PathDecl>,
}

/// One path template and the methods declared on it
#[derive(Debug, Clone)]
pub struct PathDecl {
    pub template: String,
    pub methods: Vec<MethodDecl>,
}

#[derive(Debug, Clone)]
pub struct MethodDecl {
    pub method: HttpMethod,
    pub summary: Option<String>,
    pub description: Option<String>,
    /// May repeat a kind; repeated kinds are merged
    pub inputs: Vec<InputDecl>,
    pub responses: Vec<ResponseDecl>,
}

#[derive(Debug, Clone)]
pub struct InputDecl {
    pub kind: InputKind,
    pub shape: TsType,
}

#[derive(Debug, Clone)]
pub struct ResponseDecl {
    pub status: StatusCode,
    pub content: ContentKind,
    pub shape: Option<TsType>,
}

impl PathDecl {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            methods: Vec::new(),
        }
    }

    /// Builder-style helper used by adapters and tests
    #[must_use]
    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }
}

impl MethodDecl {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            summary: None,
            description: None,
            inputs: Vec::new(),
            responses: Vec::new(),
        }
    }

    #[must_use]
    pub fn input(mut self, kind: InputKind, shape: TsType) -> Self {
        self.inputs.push(InputDecl { kind, shape });
        self
    }

    #[must_use]
    pub fn response(mut self, status: StatusCode, content: ContentKind, shape: Option<TsType>) -> Self {
        self.responses.push(ResponseDecl {
            status,
            content,
            shape,
        });
        self
    }

    #[must_use]
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }
}
