//! Route model: declarations, paths and the normalized operation list.

mod builder;
mod decl;
mod model;
mod path;

pub use builder::build;
pub use decl::{InputDecl, MethodDecl, PathDecl, ResponseDecl, RouteDeclarations};
pub use model::{
    ContentKind, HttpMethod, InputKind, InputPart, Operation, OutputVariant, RouteModel, StatusCode,
};
pub use path::{Path, PathError, PathSegment};
