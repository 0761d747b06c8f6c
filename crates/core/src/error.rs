//! Generation errors and warnings.

use std::fmt;

use thiserror::Error;

use crate::route::HttpMethod;
use crate::target::Target;

/// Fatal errors. Any of these aborts the whole run; no module is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    // =========================================================================
    // Structural errors (invalid route model)
    // =========================================================================
    #[error("{method} {path}: path template is empty")]
    EmptyPath { path: String, method: HttpMethod },

    #[error("{method} {path}: malformed path template: {reason}")]
    MalformedPath {
        path: String,
        method: HttpMethod,
        reason: String,
    },

    #[error("{method} {path}: parameter '{name}' appears more than once")]
    DuplicateParam {
        path: String,
        method: HttpMethod,
        name: String,
    },

    #[error("{method} {path}: no responses declared")]
    NoOutputVariants { path: String, method: HttpMethod },

    #[error("{method} {path}: status {status} declared more than once")]
    DuplicateStatus {
        path: String,
        method: HttpMethod,
        status: String,
    },

    #[error("{method} {path}: method declared more than once for this path")]
    DuplicateMethod { path: String, method: HttpMethod },

    #[error("{method} {path}: path template declared more than once")]
    DuplicatePath { path: String, method: HttpMethod },

    // =========================================================================
    // Identifier errors
    // =========================================================================
    #[error(
        "{method} {path}: could not allocate a unique name in the {target} module after {attempts} attempts"
    )]
    IdentifierExhausted {
        path: String,
        method: HttpMethod,
        target: Target,
        attempts: usize,
    },
}

impl GenerateError {
    /// The offending `(path, method)` pair.
    pub fn location(&self) -> (&str, HttpMethod) {
        match self {
            GenerateError::EmptyPath { path, method }
            | GenerateError::MalformedPath { path, method, .. }
            | GenerateError::DuplicateParam { path, method, .. }
            | GenerateError::NoOutputVariants { path, method }
            | GenerateError::DuplicateStatus { path, method, .. }
            | GenerateError::DuplicateMethod { path, method }
            | GenerateError::DuplicatePath { path, method }
            | GenerateError::IdentifierExhausted { path, method, .. } => (path, *method),
        }
    }
}

/// Recoverable problem: one operation was left out of one module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateWarning {
    pub target: Target,
    pub path: String,
    pub method: HttpMethod,
    pub reason: String,
}

impl fmt::Display for GenerateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: skipped {} {}: {}",
            self.target, self.method, self.path, self.reason
        )
    }
}
