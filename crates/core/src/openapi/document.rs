//! OpenAPI document structs for serde deserialization.
//!
//! A subset of OpenAPI 3.x: what route declarations and schema declarations
//! need. Maps whose order matters (paths, responses, properties, component
//! schemas) deserialize into ordered pair lists.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

/// Root document
#[derive(Debug, Deserialize)]
pub struct Document {
    pub openapi: String,
    #[serde(default)]
    pub info: Info,
    #[serde(default, deserialize_with = "ordered")]
    pub paths: Vec<(String, PathItem)>,
    #[serde(default)]
    pub components: Components,
}

#[derive(Debug, Default, Deserialize)]
pub struct Info {
    pub title: Option<String>,
}

/// Reusable objects that operations may `$ref`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Components {
    #[serde(default, deserialize_with = "ordered")]
    pub schemas: Vec<(String, Schema)>,
    #[serde(default, deserialize_with = "ordered")]
    pub parameters: Vec<(String, Parameter)>,
    #[serde(default, deserialize_with = "ordered")]
    pub request_bodies: Vec<(String, RequestBody)>,
    #[serde(default, deserialize_with = "ordered")]
    pub responses: Vec<(String, Response)>,
}

/// Either an inline object or a `$ref` to a component
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    Ref {
        #[serde(rename = "$ref")]
        reference: String,
    },
    Item(T),
}

/// Operations of one path, plus parameters shared by all of them
#[derive(Debug, Default, Deserialize)]
pub struct PathItem {
    pub get: Option<Operation>,
    pub put: Option<Operation>,
    pub post: Option<Operation>,
    pub patch: Option<Operation>,
    pub delete: Option<Operation>,
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
    pub request_body: Option<RefOr<RequestBody>>,
    #[serde(default, deserialize_with = "ordered")]
    pub responses: Vec<(String, RefOr<Response>)>,
}

/// A path, query, header or cookie parameter
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    #[serde(default)]
    pub required: bool,
    pub schema: Option<Schema>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestBody {
    #[serde(default, deserialize_with = "ordered")]
    pub content: Vec<(String, MediaType)>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[serde(default, deserialize_with = "ordered")]
    pub content: Vec<(String, MediaType)>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaType {
    pub schema: Option<Schema>,
}

/// JSON Schema, as far as type generation reads it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,

    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,

    #[serde(default, deserialize_with = "ordered_opt")]
    pub properties: Option<Vec<(String, Schema)>>,

    pub required: Option<Vec<String>>,

    pub items: Option<Box<Schema>>,

    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<EnumValue>>,

    pub any_of: Option<Vec<Schema>>,

    pub one_of: Option<Vec<Schema>>,

    pub all_of: Option<Vec<Schema>>,

    pub additional_properties: Option<AdditionalProperties>,

    pub discriminator: Option<Discriminator>,

    #[serde(rename = "const")]
    pub const_value: Option<serde_json::Value>,

    /// OpenAPI 3.0 nullable flag (3.1 uses type arrays instead)
    pub nullable: Option<bool>,
}

/// Enum value can be string, integer, float, boolean, or null.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discriminator {
    pub property_name: String,
    #[serde(default, deserialize_with = "ordered")]
    pub mapping: Vec<(String, String)>,
}

/// A single type or an array of types (nullable in 3.1)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    Single(String),
    Multiple(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Bool(bool),
    Schema(Box<Schema>),
}

/// Deserialize a map into `(key, value)` pairs in document order.
fn ordered<'de, D, T>(deserializer: D) -> Result<Vec<(String, T)>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    struct OrderedVisitor<T>(PhantomData<T>);

    impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedVisitor<T> {
        type Value = Vec<(String, T)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<MapKey, T>()? {
                entries.push((key.0, value));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(OrderedVisitor(PhantomData))
}

/// Map key; YAML writes status codes as bare integers.
struct MapKey(String);

impl<'de> Deserialize<'de> for MapKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl Visitor<'_> for KeyVisitor {
            type Value = MapKey;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a string or integer key")
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<MapKey, E> {
                Ok(MapKey(v.to_string()))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<MapKey, E> {
                Ok(MapKey(v.to_string()))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<MapKey, E> {
                Ok(MapKey(v.to_string()))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

fn ordered_opt<'de, D, T>(deserializer: D) -> Result<Option<Vec<(String, T)>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    ordered(deserializer).map(Some)
}
