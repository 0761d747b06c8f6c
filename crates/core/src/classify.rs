//! Operation classification: read or write, argument shape, data type.

use std::fmt;

use crate::route::{ContentKind, InputKind, Operation};
use crate::ts::{Emit, TsExpr, TsProp, TsType};

/// How targets address an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Cacheable, key-addressed (GET)
    Read,
    /// Mutation
    Write,
}

/// Input combinations no target can express
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unsupported {
    /// `json` and `form` are both request bodies
    MixedBodies,
}

impl fmt::Display for Unsupported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Unsupported::MixedBodies => f.write_str("json and form bodies cannot be combined"),
        }
    }
}

/// What callers supply and what they get back
#[derive(Debug, Clone)]
pub struct Classification {
    pub access: Access,
    /// Declared input kinds, canonical order
    pub kinds: Vec<InputKind>,
    /// Merged argument object, `None` when the operation takes no input
    pub args: Option<TsType>,
    /// Type of the success variant's body
    pub data: TsType,
    /// Canonical path, the first element of the cache key
    pub key_path: String,
}

impl Classification {
    /// The cache key tuple for a given argument expression.
    pub fn cache_key(&self, args: Option<TsExpr>) -> TsExpr {
        let mut items = vec![TsExpr::string(&self.key_path)];
        if self.args.is_some() {
            items.extend(args);
        }
        TsExpr::Array(items).as_const()
    }

    /// The tuple rendered as text, e.g. `["/users", args] as const`.
    pub fn describe_key(&self) -> String {
        self.cache_key(Some(TsExpr::ident("args"))).emit()
    }
}

pub fn classify(op: &Operation) -> Result<Classification, Unsupported> {
    if op.input(InputKind::Json).is_some() && op.input(InputKind::Form).is_some() {
        return Err(Unsupported::MixedBodies);
    }

    let access = if op.is_read() {
        Access::Read
    } else {
        Access::Write
    };

    let kinds: Vec<InputKind> = op.inputs.iter().map(|p| p.kind).collect();
    let args = (!op.inputs.is_empty()).then(|| {
        TsType::Object(
            op.inputs
                .iter()
                .map(|part| TsProp {
                    name: part.kind.as_str().to_string(),
                    ty: part.shape.clone(),
                    optional: false,
                })
                .collect(),
        )
    });

    Ok(Classification {
        access,
        kinds,
        args,
        data: data_type(op),
        key_path: op.path.canonical(),
    })
}

/// Body type of the success variant; `unknown` without one.
pub fn data_type(op: &Operation) -> TsType {
    let Some(variant) = op.success() else {
        return TsType::unknown();
    };
    match variant.content {
        ContentKind::Json => variant.shape.clone().unwrap_or_else(TsType::unknown),
        ContentKind::Text => TsType::string(),
        ContentKind::Binary => TsType::named("Blob"),
        ContentKind::Empty => TsType::void(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::route::{
        HttpMethod, InputPart, OutputVariant, Path, StatusCode,
    };
    use crate::ts::TsPrimitive;

    fn op(method: HttpMethod, template: &str) -> Operation {
        Operation {
            template: template.into(),
            path: Path::parse(template).unwrap(),
            method,
            inputs: vec![],
            outputs: vec![],
            summary: None,
            description: None,
        }
    }

    fn variant(status: StatusCode, content: ContentKind, shape: Option<TsType>) -> OutputVariant {
        OutputVariant {
            status,
            content,
            shape,
        }
    }

    #[test]
    fn test_read_with_query() {
        let mut op = op(HttpMethod::Get, "/users");
        op.inputs.push(InputPart {
            kind: InputKind::Query,
            shape: TsType::Object(vec![TsProp {
                name: "page".into(),
                ty: TsType::Primitive(TsPrimitive::Number),
                optional: true,
            }]),
        });
        op.outputs.push(variant(
            StatusCode::Code(200),
            ContentKind::Json,
            Some(TsType::Array(Box::new(TsType::named("User")))),
        ));

        let class = classify(&op).unwrap();
        assert_eq!(class.access, Access::Read);
        assert_eq!(class.kinds, [InputKind::Query]);
        assert_eq!(
            class.args.as_ref().map(Emit::emit).as_deref(),
            Some("{ query: { page?: number } }")
        );
        assert_eq!(class.data.emit(), "User[]");
        assert_eq!(class.describe_key(), "[\"/users\", args] as const");
    }

    #[test]
    fn test_no_inputs_means_no_args() {
        let mut op = op(HttpMethod::Get, "/health");
        op.outputs
            .push(variant(StatusCode::Code(200), ContentKind::Text, None));
        let class = classify(&op).unwrap();
        assert!(class.args.is_none());
        assert_eq!(class.data.emit(), "string");
        assert_eq!(class.describe_key(), "[\"/health\"] as const");
    }

    #[test]
    fn test_key_uses_canonical_path() {
        let mut op = op(HttpMethod::Get, "/users/{userId}");
        op.inputs.push(InputPart {
            kind: InputKind::Param,
            shape: TsType::Object(vec![]),
        });
        let class = classify(&op).unwrap();
        assert_eq!(class.key_path, "/users/:userId");
    }

    #[test]
    fn test_data_type_per_content_kind() {
        let mut op = op(HttpMethod::Delete, "/users/{userId}");
        op.outputs
            .push(variant(StatusCode::Code(204), ContentKind::Empty, None));
        assert_eq!(data_type(&op).emit(), "void");

        op.outputs = vec![variant(StatusCode::Code(200), ContentKind::Binary, None)];
        assert_eq!(data_type(&op).emit(), "Blob");

        op.outputs = vec![
            variant(StatusCode::Code(400), ContentKind::Json, None),
            variant(StatusCode::Default, ContentKind::Json, None),
        ];
        assert_eq!(data_type(&op).emit(), "unknown");
        assert_eq!(classify(&op).unwrap().access, Access::Write);
    }

    #[test]
    fn test_mixed_bodies_unsupported() {
        let mut op = op(HttpMethod::Post, "/upload");
        for kind in [InputKind::Json, InputKind::Form] {
            op.inputs.push(InputPart {
                kind,
                shape: TsType::unknown(),
            });
        }
        let err = classify(&op).unwrap_err();
        assert_eq!(err, Unsupported::MixedBodies);
        assert_eq!(err.to_string(), "json and form bodies cannot be combined");
    }
}
