//! Route model: the normalized, immutable operation records every later
//! stage reads from.

use std::fmt;
use std::str::FromStr;

use crate::ts::TsType;

use super::path::Path;

/// HTTP method
///
/// Variant order is the precedence operations are ordered by within a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Put,
        HttpMethod::Post,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Lowercase form: the Hono client's `$get`/`$post` suffix and the verb
    /// prefix of plain-call names.
    pub fn lower(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    /// Capitalized word used inside identifiers.
    pub fn word(&self) -> &'static str {
        match self {
            HttpMethod::Get => "Get",
            HttpMethod::Put => "Put",
            HttpMethod::Post => "Post",
            HttpMethod::Patch => "Patch",
            HttpMethod::Delete => "Delete",
        }
    }

    pub fn is_read(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unsupported HTTP method '{s}'"))
    }
}

/// Request location an input part is sent in
///
/// Variant order is the canonical order of keys in merged arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputKind {
    Param,
    Query,
    Header,
    Cookie,
    Json,
    Form,
}

impl InputKind {
    /// Key of this part in the client's request argument.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputKind::Param => "param",
            InputKind::Query => "query",
            InputKind::Header => "header",
            InputKind::Cookie => "cookie",
            InputKind::Json => "json",
            InputKind::Form => "form",
        }
    }

    pub fn is_body(&self) -> bool {
        matches!(self, InputKind::Json | InputKind::Form)
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared input location and its shape
#[derive(Debug, Clone, PartialEq)]
pub struct InputPart {
    pub kind: InputKind,
    pub shape: TsType,
}

/// Response status of an output variant
///
/// Ordering: explicit codes ascending, then class ranges, then `default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatusCode {
    /// `200`, `404`, ...
    Code(u16),
    /// `2XX`: the leading digit
    Range(u8),
    /// `default`
    Default,
}

impl StatusCode {
    pub fn is_success(&self) -> bool {
        match self {
            StatusCode::Code(code) => (200..300).contains(code),
            StatusCode::Range(class) => *class == 2,
            StatusCode::Default => false,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Code(code) => write!(f, "{code}"),
            StatusCode::Range(class) => write!(f, "{class}XX"),
            StatusCode::Default => f.write_str("default"),
        }
    }
}

impl FromStr for StatusCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("default") {
            return Ok(StatusCode::Default);
        }
        let bytes = s.as_bytes();
        if bytes.len() == 3 && bytes[0].is_ascii_digit() && s[1..].eq_ignore_ascii_case("xx") {
            return Ok(StatusCode::Range(bytes[0] - b'0'));
        }
        s.parse::<u16>()
            .ok()
            .filter(|code| (100..600).contains(code))
            .map(StatusCode::Code)
            .ok_or_else(|| format!("Invalid response status '{s}'"))
    }
}

/// How a response body is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Text,
    Binary,
    /// No body (e.g. 204)
    Empty,
}

/// One declared response
#[derive(Debug, Clone, PartialEq)]
pub struct OutputVariant {
    pub status: StatusCode,
    pub content: ContentKind,
    /// Body shape; `None` for empty bodies or undeclared schemas
    pub shape: Option<TsType>,
}

/// Normalized API operation: one path + method
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    /// Template as declared (used in diagnostics)
    pub template: String,
    pub path: Path,
    pub method: HttpMethod,
    /// Unique by kind, in canonical kind order
    pub inputs: Vec<InputPart>,
    /// Non-empty, sorted by status
    pub outputs: Vec<OutputVariant>,
    pub summary: Option<String>,
    pub description: Option<String>,
}

impl Operation {
    pub fn is_read(&self) -> bool {
        self.method.is_read()
    }

    pub fn input(&self, kind: InputKind) -> Option<&InputPart> {
        self.inputs.iter().find(|p| p.kind == kind)
    }

    /// The variant accessors resolve their data type from: the lowest
    /// explicit 2xx, then a `2XX` range, or the sole variant.
    pub fn success(&self) -> Option<&OutputVariant> {
        self.outputs
            .iter()
            .find(|v| v.status.is_success())
            .or_else(|| match self.outputs.as_slice() {
                [only] => Some(only),
                _ => None,
            })
    }
}

/// The normalized route model
#[derive(Debug, Clone, PartialEq)]
pub struct RouteModel {
    pub title: Option<String>,
    /// Document order of paths, method precedence within a path
    pub operations: Vec<Operation>,
}

impl RouteModel {
    /// Every named shape any operation refers to, in first-seen order.
    pub fn referenced_shapes(&self) -> Vec<String> {
        let mut refs = Vec::new();
        for op in &self.operations {
            for part in &op.inputs {
                part.shape.collect_refs(&mut refs);
            }
            for variant in &op.outputs {
                if let Some(shape) = &variant.shape {
                    shape.collect_refs(&mut refs);
                }
            }
        }
        refs
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_method_precedence() {
        let mut methods = vec![
            HttpMethod::Delete,
            HttpMethod::Post,
            HttpMethod::Get,
            HttpMethod::Patch,
            HttpMethod::Put,
        ];
        methods.sort();
        assert_eq!(methods, HttpMethod::ALL.to_vec());
    }

    #[test]
    fn test_method_from_str() {
        assert_eq!("get".parse::<HttpMethod>(), Ok(HttpMethod::Get));
        assert_eq!("DELETE".parse::<HttpMethod>(), Ok(HttpMethod::Delete));
        assert!("head".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_status_parse_and_order() {
        let mut statuses: Vec<StatusCode> = ["default", "404", "2XX", "201", "200"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        statuses.sort();
        let rendered: Vec<_> = statuses.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["200", "201", "404", "2XX", "default"]);
        assert!("2xx".parse::<StatusCode>().unwrap().is_success());
        assert!("ok".parse::<StatusCode>().is_err());
        assert!("999".parse::<StatusCode>().is_err());
    }

    fn op_with(statuses: &[StatusCode]) -> Operation {
        Operation {
            template: "/x".into(),
            path: Path::parse("/x").unwrap(),
            method: HttpMethod::Get,
            inputs: vec![],
            outputs: statuses
                .iter()
                .map(|s| OutputVariant {
                    status: *s,
                    content: ContentKind::Json,
                    shape: None,
                })
                .collect(),
            summary: None,
            description: None,
        }
    }

    #[test]
    fn test_success_variant_selection() {
        let op = op_with(&[
            StatusCode::Code(201),
            StatusCode::Code(204),
            StatusCode::Code(400),
        ]);
        assert_eq!(op.success().map(|v| v.status), Some(StatusCode::Code(201)));

        let op = op_with(&[StatusCode::Code(404), StatusCode::Range(2)]);
        assert_eq!(op.success().map(|v| v.status), Some(StatusCode::Range(2)));

        let op = op_with(&[StatusCode::Default]);
        assert_eq!(op.success().map(|v| v.status), Some(StatusCode::Default));

        let op = op_with(&[StatusCode::Code(400), StatusCode::Default]);
        assert!(op.success().is_none());
    }
}
