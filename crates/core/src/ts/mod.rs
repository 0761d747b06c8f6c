//! TypeScript AST and emission.
//!
//! - `types`: TypeScript AST IR (TsType, TsExpr, TsDecl, TsImport)
//! - `emit`: AST to TypeScript code strings (via the `Emit` trait)
//! - `utils`: identifier and quoting helpers shared across modules

mod emit;
mod types;
pub mod utils;

pub use emit::{Emit, emit_property};
pub use types::{
    DocComment, ObjectEntry, TsConst, TsDecl, TsExpr, TsFunction, TsImport, TsLiteral, TsParam,
    TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TypeDefKind,
};
