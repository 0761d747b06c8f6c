//! TypeScript code emission via the Emit trait.
//!
//! This module provides a trait-based approach to converting TypeScript AST nodes
//! to string representations. Each AST type implements `Emit` for clean, composable
//! code generation.

use super::types::{
    DocComment, ObjectEntry, TsConst, TsDecl, TsExpr, TsFunction, TsImport, TsLiteral, TsParam,
    TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TypeDefKind,
};
use super::utils::{escape_js_string, needs_bracket_notation, quote_if_needed};

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

// =============================================================================
// Primitive Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string".to_string(),
            TsPrimitive::Number => "number".to_string(),
            TsPrimitive::Boolean => "boolean".to_string(),
            TsPrimitive::Null => "null".to_string(),
            TsPrimitive::Void => "void".to_string(),
            TsPrimitive::Unknown => "unknown".to_string(),
        }
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => format!("\"{}\"", escape_js_string(s)),
            TsLiteral::Number(n) => n.to_string(),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

// =============================================================================
// Types
// =============================================================================

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Array(inner) => {
                let inner_str = inner.emit();
                // Wrap complex types in parentheses
                if matches!(**inner, TsType::Union(_) | TsType::Intersection(_)) {
                    format!("({inner_str})[]")
                } else {
                    format!("{inner_str}[]")
                }
            }
            TsType::Union(types) => types.iter().map(Emit::emit).collect::<Vec<_>>().join(" | "),
            TsType::Intersection(types) => types
                .iter()
                .map(|t| {
                    let s = t.emit();
                    if matches!(t, TsType::Union(_)) {
                        format!("({s})")
                    } else {
                        s
                    }
                })
                .collect::<Vec<_>>()
                .join(" & "),
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = props.iter().map(Emit::emit).collect();
                    format!("{{ {} }}", parts.join("; "))
                }
            }
            TsType::Record { key, value } => {
                format!("Record<{}, {}>", key.emit(), value.emit())
            }
            TsType::Literal(lit) => lit.emit(),
            TsType::Ref(name) => name.clone(),
            TsType::Generic { name, args } => {
                let args_str = args.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                format!("{name}<{args_str}>")
            }
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", key, opt, self.ty.emit())
    }
}

// =============================================================================
// Type Definitions
// =============================================================================

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        match &self.kind {
            TypeDefKind::Interface { properties } => {
                let mut output = format!("export interface {} {{\n", self.name);
                for prop in properties {
                    output.push_str(&format!("  {};\n", prop.emit()));
                }
                output.push_str("}\n");
                output
            }
            TypeDefKind::TypeAlias { ty } => {
                format!("export type {} = {};\n", self.name, ty.emit())
            }
            TypeDefKind::ConstEnum { values } => {
                let mut output = format!("export const {} = {{\n", self.name);
                for (key, value) in values {
                    output.push_str(&format!("  {}: {},\n", key, value.emit()));
                }
                output.push_str("} as const;\n\n");
                output.push_str(&format!(
                    "export type {} = (typeof {})[keyof typeof {}];\n",
                    self.name, self.name, self.name
                ));
                output
            }
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for TsExpr {
    fn emit(&self) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Call {
                callee,
                type_args,
                args,
            } => {
                let args_str = args.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                if type_args.is_empty() {
                    format!("{}({})", callee.emit(), args_str)
                } else {
                    let types = type_args.iter().map(Emit::emit).collect::<Vec<_>>();
                    format!("{}<{}>({})", callee.emit(), types.join(", "), args_str)
                }
            }
            TsExpr::Arrow {
                params,
                body,
                is_async,
            } => {
                let params_str = params.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                let async_str = if *is_async { "async " } else { "" };
                format!("{async_str}({params_str}) => {}", body.emit())
            }
            TsExpr::Object(entries) => {
                if entries.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = entries.iter().map(Emit::emit).collect();
                    format!("{{ {} }}", parts.join(", "))
                }
            }
            TsExpr::Member { object, prop } => {
                format!("{}.{}", object.emit(), prop)
            }
            TsExpr::OptionalMember { object, prop } => {
                format!("{}?.{}", object.emit(), prop)
            }
            TsExpr::Index { object, key } => {
                format!("{}[\"{}\"]", object.emit(), escape_js_string(key))
            }
            TsExpr::Array(items) => {
                let items_str = items.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                format!("[{items_str}]")
            }
            TsExpr::Cast { expr, ty } => {
                format!("{} as {}", expr.emit(), ty.emit())
            }
            TsExpr::Nullish { left, right } => {
                format!("{} ?? {}", left.emit(), right.emit())
            }
            TsExpr::Raw(code) => code.clone(),
        }
    }
}

impl Emit for ObjectEntry {
    fn emit(&self) -> String {
        match self {
            ObjectEntry::Prop(key, TsExpr::Ident(value)) if key == value => key.clone(),
            ObjectEntry::Prop(key, value) => format!("{}: {}", quote_if_needed(key), value.emit()),
            ObjectEntry::Spread(expr) => format!("...{}", expr.emit()),
        }
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        match &self.ty {
            Some(ty) => format!("{}{}: {}", self.name, opt, ty.emit()),
            None => format!("{}{}", self.name, opt),
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = "  ".repeat(indent);
        match self {
            TsStmt::Const { name, init } => {
                format!("{}const {} = {};\n", prefix, name, init.emit())
            }
            TsStmt::Return(expr) => match expr {
                Some(e) => format!("{}return {};\n", prefix, e.emit()),
                None => format!("{prefix}return;\n"),
            },
        }
    }
}

// =============================================================================
// Declarations
// =============================================================================

impl Emit for DocComment {
    fn emit(&self) -> String {
        let mut output = String::from("/**\n");
        for (i, paragraph) in self.paragraphs.iter().enumerate() {
            if i > 0 {
                output.push_str(" *\n");
            }
            for line in paragraph.lines() {
                let line = line.trim_end().replace("*/", "*\\/");
                if line.is_empty() {
                    output.push_str(" *\n");
                } else {
                    output.push_str(&format!(" * {line}\n"));
                }
            }
        }
        output.push_str(" */\n");
        output
    }
}

impl Emit for TsFunction {
    fn emit(&self) -> String {
        let mut output = self.doc.as_ref().map(Emit::emit).unwrap_or_default();

        if self.is_export {
            output.push_str("export ");
        }

        let params_str = self.params.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
        let async_str = if self.is_async { "async " } else { "" };

        output.push_str(&format!("{async_str}function {}({params_str})", self.name));
        if self.body.is_empty() {
            output.push_str(" {}\n");
        } else {
            output.push_str(" {\n");
            for stmt in &self.body {
                output.push_str(&stmt.emit_indented(1));
            }
            output.push_str("}\n");
        }

        output
    }
}

impl Emit for TsConst {
    fn emit(&self) -> String {
        let mut output = self.doc.as_ref().map(Emit::emit).unwrap_or_default();
        if self.is_export {
            output.push_str("export ");
        }
        output.push_str(&format!("const {} = {};\n", self.name, self.value.emit()));
        output
    }
}

impl Emit for TsDecl {
    fn emit(&self) -> String {
        match self {
            TsDecl::Function(f) => f.emit(),
            TsDecl::Const(c) => c.emit(),
        }
    }
}

// =============================================================================
// Imports
// =============================================================================

impl Emit for TsImport {
    fn emit(&self) -> String {
        let type_keyword = if self.type_only { "type " } else { "" };
        let named = if self.items.is_empty() {
            None
        } else {
            Some(format!("{{ {} }}", self.items.join(", ")))
        };
        let clause = match (&self.default, named) {
            (Some(default), Some(named)) => format!("{default}, {named}"),
            (Some(default), None) => default.clone(),
            (None, Some(named)) => named,
            (None, None) => return format!("import \"{}\";\n", self.from),
        };
        format!("import {type_keyword}{clause} from \"{}\";\n", self.from)
    }
}

/// Render a property access chain step, using bracket notation when needed.
pub fn emit_property(object: TsExpr, prop: &str) -> TsExpr {
    if needs_bracket_notation(prop) {
        object.index(prop)
    } else {
        object.member(prop)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_primitive() {
        assert_eq!(TsPrimitive::String.emit(), "string");
        assert_eq!(TsPrimitive::Number.emit(), "number");
        assert_eq!(TsPrimitive::Boolean.emit(), "boolean");
        assert_eq!(TsPrimitive::Null.emit(), "null");
        assert_eq!(TsPrimitive::Void.emit(), "void");
        assert_eq!(TsPrimitive::Unknown.emit(), "unknown");
    }

    #[test]
    fn test_emit_literal() {
        assert_eq!(TsLiteral::String("hello".into()).emit(), "\"hello\"");
        assert_eq!(
            TsLiteral::String("say \"hi\"".into()).emit(),
            "\"say \\\"hi\\\"\""
        );
        assert_eq!(TsLiteral::Int(42).emit(), "42");
        assert_eq!(TsLiteral::Bool(true).emit(), "true");
        assert_eq!(TsLiteral::Null.emit(), "null");
    }

    #[test]
    fn test_emit_union_array() {
        // (string | null)[] - union inside array needs parens
        let inner = TsType::Union(vec![
            TsType::Primitive(TsPrimitive::String),
            TsType::Primitive(TsPrimitive::Null),
        ]);
        let ty = TsType::Array(Box::new(inner));
        assert_eq!(ty.emit(), "(string | null)[]");
    }

    #[test]
    fn test_emit_object_type() {
        let ty = TsType::Object(vec![
            TsProp {
                name: "id".into(),
                ty: TsType::Primitive(TsPrimitive::Number),
                optional: false,
            },
            TsProp {
                name: "display-name".into(),
                ty: TsType::Primitive(TsPrimitive::String),
                optional: true,
            },
        ]);
        assert_eq!(ty.emit(), "{ id: number; \"display-name\"?: string }");
    }

    #[test]
    fn test_emit_generic_type() {
        let ty = TsType::generic(
            "SWRConfiguration",
            vec![TsType::named("User"), TsType::named("Error")],
        );
        assert_eq!(ty.emit(), "SWRConfiguration<User, Error>");
    }

    #[test]
    fn test_emit_object_literal_shorthand_and_spread() {
        let expr = TsExpr::Object(vec![
            ObjectEntry::Prop("query".into(), TsExpr::ident("query")),
            ObjectEntry::Spread(TsExpr::ident("options").optional_member("swr")),
            ObjectEntry::Prop("queryKey".into(), TsExpr::ident("key")),
        ]);
        assert_eq!(expr.emit(), "{ query, ...options?.swr, queryKey: key }");
    }

    #[test]
    fn test_emit_generic_call() {
        let call = TsExpr::call_generic(
            TsExpr::ident("hc"),
            vec![TsType::named("AppType")],
            vec![TsExpr::string("/")],
        );
        assert_eq!(call.emit(), "hc<AppType>(\"/\")");
    }

    #[test]
    fn test_emit_property_chain() {
        let chain = emit_property(
            emit_property(TsExpr::ident("client"), "users"),
            ":userId",
        );
        assert_eq!(chain.emit(), "client.users[\":userId\"]");
    }

    #[test]
    fn test_emit_doc_comment() {
        let doc = DocComment::new("GET /users").with(Some("List users\nPaged.")).with(None);
        assert_eq!(
            doc.emit(),
            "/**\n * GET /users\n *\n * List users\n * Paged.\n */\n"
        );
    }

    #[test]
    fn test_emit_doc_comment_escapes_terminator() {
        let doc = DocComment::new("GET /a").with(Some("ends */ early"));
        assert!(doc.emit().contains(" * ends *\\/ early\n"));
    }

    #[test]
    fn test_emit_import() {
        let import = TsImport {
            default: None,
            items: vec!["useQuery".into(), "useMutation".into()],
            from: "@tanstack/react-query".into(),
            type_only: false,
        };
        assert_eq!(
            import.emit(),
            "import { useQuery, useMutation } from \"@tanstack/react-query\";\n"
        );
    }

    #[test]
    fn test_emit_default_import() {
        let import = TsImport {
            default: Some("useSWR".into()),
            items: vec![],
            from: "swr".into(),
            type_only: false,
        };
        assert_eq!(import.emit(), "import useSWR from \"swr\";\n");
    }

    #[test]
    fn test_emit_type_import() {
        let import = TsImport {
            default: None,
            items: vec!["UseQueryOptions".into()],
            from: "@tanstack/react-query".into(),
            type_only: true,
        };
        assert_eq!(
            import.emit(),
            "import type { UseQueryOptions } from \"@tanstack/react-query\";\n"
        );
    }

    #[test]
    fn test_emit_function() {
        let func = TsFunction {
            doc: None,
            name: "getUsersKey".into(),
            params: vec![TsParam::required("args", TsType::named("Args"))],
            body: vec![TsStmt::Return(Some(
                TsExpr::Array(vec![TsExpr::string("/users"), TsExpr::ident("args")]).as_const(),
            ))],
            is_async: false,
            is_export: true,
        };
        assert_eq!(
            func.emit(),
            "export function getUsersKey(args: Args) {\n  return [\"/users\", args] as const;\n}\n"
        );
    }

    #[test]
    fn test_emit_const() {
        let decl = TsConst {
            doc: None,
            name: "postUsersMutationKey".into(),
            value: TsExpr::Array(vec![TsExpr::string("POST"), TsExpr::string("/users")])
                .as_const(),
            is_export: true,
        };
        assert_eq!(
            decl.emit(),
            "export const postUsersMutationKey = [\"POST\", \"/users\"] as const;\n"
        );
    }
}
