//! JSON Schema to TypeScript shapes.

use std::collections::HashSet;

use crate::ts::utils::{quote_if_needed, sanitize_type_name};
use crate::ts::{TsLiteral, TsPrimitive, TsProp, TsType, TsTypeDef, TypeDefKind};

use super::document::{AdditionalProperties, Discriminator, EnumValue, Schema, SchemaType};

const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Declarations for `components.schemas`, in document order.
pub fn schema_typedefs(schemas: &[(String, Schema)]) -> Vec<TsTypeDef> {
    schemas
        .iter()
        .map(|(name, schema)| schema_to_typedef(name, schema))
        .collect()
}

fn schema_to_typedef(name: &str, schema: &Schema) -> TsTypeDef {
    let name = sanitize_type_name(name);

    if let Some(values) = &schema.enum_values {
        return TsTypeDef {
            name,
            kind: TypeDefKind::ConstEnum {
                values: values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| (enum_value_to_key(v, i), enum_value_to_literal(v)))
                    .collect(),
            },
        };
    }

    if let Some(properties) = &schema.properties
        && schema.additional_properties.is_none()
        && schema.all_of.is_none()
        && schema.any_of.is_none()
        && schema.one_of.is_none()
    {
        return TsTypeDef {
            name,
            kind: TypeDefKind::Interface {
                properties: object_properties(properties, schema.required.as_deref()),
            },
        };
    }

    TsTypeDef {
        name,
        kind: TypeDefKind::TypeAlias {
            ty: schema_to_ts_type(schema),
        },
    }
}

/// Convert a schema to a shape; `$ref`s become named references.
pub fn schema_to_ts_type(schema: &Schema) -> TsType {
    let ty = schema_to_ts_type_inner(schema);
    if schema.nullable == Some(true) {
        nullable(ty)
    } else {
        ty
    }
}

fn schema_to_ts_type_inner(schema: &Schema) -> TsType {
    if let Some(ref_path) = &schema.ref_path {
        return TsType::Ref(ref_to_type_name(ref_path));
    }

    if let Some(value) = &schema.const_value {
        return json_value_to_ts_type(value);
    }

    if let Some(all_of) = &schema.all_of {
        let mut types: Vec<TsType> = all_of.iter().map(schema_to_ts_type).collect();
        return match types.len() {
            0 => TsType::unknown(),
            1 => types.remove(0),
            _ => TsType::Intersection(types),
        };
    }

    if let Some(any_of) = &schema.any_of {
        return union(any_of, None);
    }

    if let Some(one_of) = &schema.one_of {
        return union(one_of, schema.discriminator.as_ref());
    }

    match &schema.schema_type {
        Some(SchemaType::Single(t)) => schema_type_to_ts(t, schema),
        Some(SchemaType::Multiple(types)) => {
            let has_null = types.iter().any(|t| t == "null");
            let mut members: Vec<TsType> = types
                .iter()
                .filter(|t| *t != "null")
                .map(|t| schema_type_to_ts(t, schema))
                .collect();
            if has_null {
                members.push(TsType::Primitive(TsPrimitive::Null));
            }
            match members.len() {
                0 => TsType::unknown(),
                1 => members.remove(0),
                _ => TsType::Union(members),
            }
        }
        None if schema.properties.is_some() || schema.additional_properties.is_some() => {
            object_type(schema)
        }
        None => match &schema.enum_values {
            Some(values) => enum_union(values),
            None => TsType::unknown(),
        },
    }
}

fn schema_type_to_ts(schema_type: &str, schema: &Schema) -> TsType {
    match schema_type {
        "string" | "number" | "integer" if schema.enum_values.is_some() => {
            schema.enum_values.as_deref().map_or_else(TsType::unknown, enum_union)
        }
        "string" => TsType::string(),
        "number" | "integer" => TsType::Primitive(TsPrimitive::Number),
        "boolean" => TsType::Primitive(TsPrimitive::Boolean),
        "null" => TsType::Primitive(TsPrimitive::Null),
        "array" => TsType::Array(Box::new(
            schema
                .items
                .as_deref()
                .map_or_else(TsType::unknown, schema_to_ts_type),
        )),
        "object" => object_type(schema),
        _ => TsType::unknown(),
    }
}

fn object_type(schema: &Schema) -> TsType {
    match (&schema.properties, &schema.additional_properties) {
        (Some(properties), Some(_)) => TsType::Intersection(vec![
            TsType::Object(object_properties(properties, schema.required.as_deref())),
            additional_properties(schema.additional_properties.as_ref()),
        ]),
        (Some(properties), None) => {
            TsType::Object(object_properties(properties, schema.required.as_deref()))
        }
        (None, additional) => additional_properties(additional.as_ref()),
    }
}

fn object_properties(properties: &[(String, Schema)], required: Option<&[String]>) -> Vec<TsProp> {
    let required: HashSet<&str> = required
        .unwrap_or_default()
        .iter()
        .map(String::as_str)
        .collect();
    properties
        .iter()
        .map(|(name, schema)| TsProp {
            name: name.clone(),
            ty: schema_to_ts_type(schema),
            optional: !required.contains(name.as_str()),
        })
        .collect()
}

fn additional_properties(additional: Option<&AdditionalProperties>) -> TsType {
    match additional {
        Some(AdditionalProperties::Bool(true)) | None => string_record(TsType::unknown()),
        Some(AdditionalProperties::Bool(false)) => TsType::Object(Vec::new()),
        Some(AdditionalProperties::Schema(s)) => string_record(schema_to_ts_type(s)),
    }
}

fn string_record(value: TsType) -> TsType {
    TsType::Record {
        key: Box::new(TsType::string()),
        value: Box::new(value),
    }
}

/// `anyOf`/`oneOf`; with a discriminator each member is tagged
/// (`{ petType: "dog" } & Dog`).
fn union(schemas: &[Schema], discriminator: Option<&Discriminator>) -> TsType {
    let members = schemas
        .iter()
        .map(|schema| {
            let base = schema_to_ts_type(schema);
            let tag = discriminator.and_then(|d| {
                let ref_path = schema.ref_path.as_ref()?;
                let value = if d.mapping.is_empty() {
                    ref_to_type_name(ref_path)
                } else {
                    d.mapping
                        .iter()
                        .find(|(_, target)| target == ref_path)
                        .map(|(value, _)| value.clone())?
                };
                Some((d.property_name.clone(), value))
            });
            match tag {
                Some((name, value)) => TsType::Intersection(vec![
                    TsType::Object(vec![TsProp {
                        name,
                        ty: TsType::Literal(TsLiteral::String(value)),
                        optional: false,
                    }]),
                    base,
                ]),
                None => base,
            }
        })
        .collect();
    TsType::Union(members)
}

fn nullable(ty: TsType) -> TsType {
    let null = TsType::Primitive(TsPrimitive::Null);
    match ty {
        TsType::Union(mut members) => {
            if !members.contains(&null) {
                members.push(null);
            }
            TsType::Union(members)
        }
        other => TsType::Union(vec![other, null]),
    }
}

fn enum_union(values: &[EnumValue]) -> TsType {
    TsType::Union(
        values
            .iter()
            .map(|v| TsType::Literal(enum_value_to_literal(v)))
            .collect(),
    )
}

fn enum_value_to_literal(v: &EnumValue) -> TsLiteral {
    match v {
        EnumValue::String(s) => TsLiteral::String(s.clone()),
        EnumValue::Integer(n) => TsLiteral::Int(*n),
        EnumValue::Float(f) => TsLiteral::Number(*f),
        EnumValue::Bool(b) => TsLiteral::Bool(*b),
        EnumValue::Null => TsLiteral::Null,
    }
}

fn enum_value_to_key(v: &EnumValue, index: usize) -> String {
    match v {
        EnumValue::String(s) => quote_if_needed(s),
        EnumValue::Integer(n) => format!("VALUE_{n}").replace('-', "NEG_"),
        EnumValue::Float(_) => format!("VALUE_{index}"),
        EnumValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        EnumValue::Null => "NULL".to_string(),
    }
}

fn json_value_to_ts_type(value: &serde_json::Value) -> TsType {
    match value {
        serde_json::Value::Null => TsType::Literal(TsLiteral::Null),
        serde_json::Value::Bool(b) => TsType::Literal(TsLiteral::Bool(*b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => TsType::Literal(TsLiteral::Int(i)),
            None => TsType::Literal(TsLiteral::Number(n.as_f64().unwrap_or(0.0))),
        },
        serde_json::Value::String(s) => TsType::Literal(TsLiteral::String(s.clone())),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => TsType::unknown(),
    }
}

/// `#/components/schemas/user.Profile` is `UserProfile`
pub fn ref_to_type_name(ref_path: &str) -> String {
    let name = ref_path
        .strip_prefix(SCHEMA_REF_PREFIX)
        .unwrap_or_else(|| ref_path.rsplit('/').next().unwrap_or(ref_path));
    sanitize_type_name(name)
}
