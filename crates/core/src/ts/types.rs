//! TypeScript IR types for code generation.
//!
//! This module defines the TypeScript representation the emitters build:
//! - TsType: Types (primitives, arrays, unions, objects, etc.). Shapes in the
//!   route model are `TsType` trees as well.
//! - TsExpr: Expressions (identifiers, calls, arrows, object literals, etc.)
//! - TsDecl: Top-level declarations (functions and constants)

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Primitive types: string, number, boolean, null, void, unknown
    Primitive(TsPrimitive),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Intersection type: A & B & C
    Intersection(Vec<TsType>),
    /// Object type: { foo: string; bar?: number }
    Object(Vec<TsProp>),
    /// Record type: Record<K, V>
    Record {
        key: Box<TsType>,
        value: Box<TsType>,
    },
    /// Literal type: "foo", 42, true
    Literal(TsLiteral),
    /// Reference to a named declaration (a schema type or a library type)
    Ref(String),
    /// Generic application: Foo<A, B>
    Generic { name: String, args: Vec<TsType> },
}

impl TsType {
    pub fn string() -> Self {
        TsType::Primitive(TsPrimitive::String)
    }

    pub fn unknown() -> Self {
        TsType::Primitive(TsPrimitive::Unknown)
    }

    pub fn void() -> Self {
        TsType::Primitive(TsPrimitive::Void)
    }

    pub fn named(name: impl Into<String>) -> Self {
        TsType::Ref(name.into())
    }

    pub fn generic(name: impl Into<String>, args: Vec<TsType>) -> Self {
        TsType::Generic {
            name: name.into(),
            args,
        }
    }

    /// Collect every named reference in this type, in first-seen order.
    pub fn collect_refs(&self, out: &mut Vec<String>) {
        match self {
            TsType::Primitive(_) | TsType::Literal(_) => {}
            TsType::Array(inner) => inner.collect_refs(out),
            TsType::Union(types) | TsType::Intersection(types) => {
                for t in types {
                    t.collect_refs(out);
                }
            }
            TsType::Object(props) => {
                for p in props {
                    p.ty.collect_refs(out);
                }
            }
            TsType::Record { key, value } => {
                key.collect_refs(out);
                value.collect_refs(out);
            }
            TsType::Ref(name) => {
                if !out.contains(name) {
                    out.push(name.clone());
                }
            }
            TsType::Generic { args, .. } => {
                for a in args {
                    a.collect_refs(out);
                }
            }
        }
    }
}

/// TypeScript primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    String,
    Number,
    Boolean,
    Null,
    Void,
    Unknown,
}

/// Object property definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    pub name: String,
    pub ty: TsType,
    pub optional: bool,
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    String(String),
    Number(f64),
    Int(i64),
    Bool(bool),
    Null,
}

/// TypeScript expression
#[derive(Debug, Clone)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// Literal value: "bar", 42
    Literal(TsLiteral),
    /// Function call: foo(a, b) or foo<T>(a)
    Call {
        callee: Box<TsExpr>,
        type_args: Vec<TsType>,
        args: Vec<TsExpr>,
    },
    /// Arrow function: async ({ signal }) => expr
    Arrow {
        params: Vec<TsParam>,
        body: Box<TsExpr>,
        is_async: bool,
    },
    /// Object literal: { a: 1, ...rest }
    Object(Vec<ObjectEntry>),
    /// Member access: foo.bar
    Member { object: Box<TsExpr>, prop: String },
    /// Optional chaining member access: foo?.bar
    OptionalMember { object: Box<TsExpr>, prop: String },
    /// Bracket access with a string key: foo[":id"]
    Index { object: Box<TsExpr>, key: String },
    /// Array literal: [a, b, c]
    Array(Vec<TsExpr>),
    /// Type cast: expr as Type
    Cast { expr: Box<TsExpr>, ty: TsType },
    /// Nullish fallback: a ?? b
    Nullish {
        left: Box<TsExpr>,
        right: Box<TsExpr>,
    },
    /// Raw code that doesn't fit the AST
    Raw(String),
}

impl TsExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TsExpr::Ident(name.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        TsExpr::Literal(TsLiteral::String(value.into()))
    }

    pub fn call(callee: TsExpr, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(callee),
            type_args: Vec::new(),
            args,
        }
    }

    pub fn call_generic(callee: TsExpr, type_args: Vec<TsType>, args: Vec<TsExpr>) -> Self {
        TsExpr::Call {
            callee: Box::new(callee),
            type_args,
            args,
        }
    }

    pub fn member(self, prop: impl Into<String>) -> Self {
        TsExpr::Member {
            object: Box::new(self),
            prop: prop.into(),
        }
    }

    pub fn optional_member(self, prop: impl Into<String>) -> Self {
        TsExpr::OptionalMember {
            object: Box::new(self),
            prop: prop.into(),
        }
    }

    pub fn index(self, key: impl Into<String>) -> Self {
        TsExpr::Index {
            object: Box::new(self),
            key: key.into(),
        }
    }

    pub fn as_const(self) -> Self {
        TsExpr::Cast {
            expr: Box::new(self),
            ty: TsType::Ref("const".into()),
        }
    }
}

/// Entry of an object literal
#[derive(Debug, Clone)]
pub enum ObjectEntry {
    /// key: value (or shorthand `key` when the value is the same identifier)
    Prop(String, TsExpr),
    /// ...expr
    Spread(TsExpr),
}

/// Function parameter
#[derive(Debug, Clone)]
pub struct TsParam {
    pub name: String,
    pub ty: Option<TsType>,
    pub optional: bool,
}

impl TsParam {
    pub fn required(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            optional: false,
        }
    }

    pub fn optional(name: impl Into<String>, ty: TsType) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            optional: true,
        }
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
            optional: false,
        }
    }
}

// =============================================================================
// Module-Level IR (for printer)
// =============================================================================

/// Import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// Default import binding
    pub default: Option<String>,
    /// Named items to import
    pub items: Vec<String>,
    /// Module path
    pub from: String,
    /// Whether this is a type-only import
    pub type_only: bool,
}

/// Type definition kind
#[derive(Debug, Clone)]
pub enum TypeDefKind {
    /// interface Foo { ... }
    Interface { properties: Vec<TsProp> },
    /// type Foo = ...
    TypeAlias { ty: TsType },
    /// const Foo = { ... } as const; type Foo = ...
    ConstEnum { values: Vec<(String, TsLiteral)> },
}

/// Type definition
#[derive(Debug, Clone)]
pub struct TsTypeDef {
    pub name: String,
    pub kind: TypeDefKind,
}

/// Statement in a function body
#[derive(Debug, Clone)]
pub enum TsStmt {
    /// const declaration
    Const { name: String, init: TsExpr },
    /// Return statement
    Return(Option<TsExpr>),
}

/// Documentation comment attached to a declaration
#[derive(Debug, Clone, Default)]
pub struct DocComment {
    /// Paragraphs, separated by an empty comment line when emitted
    pub paragraphs: Vec<String>,
}

impl DocComment {
    pub fn new(first: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![first.into()],
        }
    }

    pub fn with(mut self, paragraph: Option<&str>) -> Self {
        if let Some(text) = paragraph.map(str::trim).filter(|t| !t.is_empty()) {
            self.paragraphs.push(text.to_string());
        }
        self
    }
}

/// Function definition
#[derive(Debug, Clone)]
pub struct TsFunction {
    pub doc: Option<DocComment>,
    pub name: String,
    pub params: Vec<TsParam>,
    pub body: Vec<TsStmt>,
    pub is_async: bool,
    pub is_export: bool,
}

/// `export const name = value;`
#[derive(Debug, Clone)]
pub struct TsConst {
    pub doc: Option<DocComment>,
    pub name: String,
    pub value: TsExpr,
    pub is_export: bool,
}

/// Top-level declaration
#[derive(Debug, Clone)]
pub enum TsDecl {
    Function(TsFunction),
    Const(TsConst),
}
