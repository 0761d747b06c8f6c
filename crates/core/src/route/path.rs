//! Path templates flattened into segment lists.

use std::collections::HashSet;
use std::fmt;

/// One `/`-separated piece of a path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Static text. The root path `/` is a single empty literal.
    Literal(String),
    /// Named parameter (`{userId}` or `:userId`)
    Param {
        name: String,
        /// Segment text the client chain is keyed by: `:userId`, or the
        /// declared `:id{[0-9]+}` / `:id?` with its pattern or optional mark
        marker: String,
    },
}

/// Ordered, non-empty list of segments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<PathSegment>,
}

/// Why a template was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    Empty,
    Malformed(String),
    DuplicateParam(String),
}

impl Path {
    /// Parse a template using either `{name}` or `:name` parameter markers.
    pub fn parse(template: &str) -> Result<Self, PathError> {
        if template.is_empty() {
            return Err(PathError::Empty);
        }
        let Some(rest) = template.strip_prefix('/') else {
            return Err(PathError::Malformed("must start with '/'".into()));
        };
        if rest.is_empty() {
            return Ok(Self {
                segments: vec![PathSegment::Literal(String::new())],
            });
        }

        let mut segments = Vec::new();
        let mut seen = HashSet::new();
        for raw in rest.split('/') {
            let segment = parse_segment(raw)?;
            if let PathSegment::Param { name, .. } = &segment
                && !seen.insert(name.clone())
            {
                return Err(PathError::DuplicateParam(name.clone()));
            }
            segments.push(segment);
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Parameter names in path order
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            PathSegment::Param { name, .. } => Some(name.as_str()),
            PathSegment::Literal(_) => None,
        })
    }

    /// Canonical form, parameters rendered as `:name` (`/users/:userId`).
    ///
    /// This string is the first element of every cache key.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                PathSegment::Literal(text) => out.push_str(text),
                PathSegment::Param { name, .. } => {
                    out.push(':');
                    out.push_str(name);
                }
            }
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

fn parse_segment(raw: &str) -> Result<PathSegment, PathError> {
    if raw.is_empty() {
        return Err(PathError::Malformed("empty segment".into()));
    }

    if let Some(inner) = raw.strip_prefix('{') {
        let Some(name) = inner.strip_suffix('}') else {
            return Err(PathError::Malformed(format!(
                "unterminated parameter in segment '{raw}'"
            )));
        };
        return param_segment(name, format!(":{name}"), raw);
    }

    if let Some(marked) = raw.strip_prefix(':') {
        // `:id{[0-9]+}` and `:id?` are named `id`; the marker keeps the rest
        let name = marked.split_once('{').map_or(marked, |(name, _)| name);
        let name = name.strip_suffix('?').unwrap_or(name);
        return param_segment(name, raw.to_string(), raw);
    }

    if raw.contains(['{', '}']) {
        return Err(PathError::Malformed(format!(
            "parameter must span the whole segment in '{raw}'"
        )));
    }

    Ok(PathSegment::Literal(raw.to_string()))
}

fn param_segment(name: &str, marker: String, raw: &str) -> Result<PathSegment, PathError> {
    if name.is_empty() || name.contains(['{', '}', ':']) {
        return Err(PathError::Malformed(format!(
            "invalid parameter name in segment '{raw}'"
        )));
    }
    Ok(PathSegment::Param {
        name: name.to_string(),
        marker,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn lit(s: &str) -> PathSegment {
        PathSegment::Literal(s.into())
    }

    fn param(s: &str) -> PathSegment {
        PathSegment::Param {
            name: s.into(),
            marker: format!(":{s}"),
        }
    }

    #[test]
    fn test_parse_both_marker_styles() {
        let braces = Path::parse("/users/{userId}/posts").unwrap();
        let colon = Path::parse("/users/:userId/posts").unwrap();
        assert_eq!(braces, colon);
        assert_eq!(
            braces.segments(),
            &[lit("users"), param("userId"), lit("posts")]
        );
        assert_eq!(braces.canonical(), "/users/:userId/posts");
    }

    #[test]
    fn test_parse_awkward_literals() {
        let path = Path::parse("/@me/openapi.json/delete/$batch").unwrap();
        assert_eq!(
            path.segments(),
            &[lit("@me"), lit("openapi.json"), lit("delete"), lit("$batch")]
        );
    }

    #[test]
    fn test_parse_root() {
        let path = Path::parse("/").unwrap();
        assert_eq!(path.segments(), &[lit("")]);
        assert_eq!(path.canonical(), "/");
    }

    #[test]
    fn test_parse_constrained_param() {
        let path = Path::parse("/posts/:id{[0-9]+}").unwrap();
        assert_eq!(
            path.segments(),
            &[
                lit("posts"),
                PathSegment::Param {
                    name: "id".into(),
                    marker: ":id{[0-9]+}".into(),
                }
            ]
        );
        assert_eq!(path.canonical(), "/posts/:id");
        assert_eq!(path.params().collect::<Vec<_>>(), ["id"]);
    }

    #[test]
    fn test_parse_optional_param_keeps_marker() {
        let path = Path::parse("/api/animal/:type?").unwrap();
        assert_eq!(
            path.segments()[2],
            PathSegment::Param {
                name: "type".into(),
                marker: ":type?".into(),
            }
        );
        assert_eq!(path.canonical(), "/api/animal/:type");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Path::parse(""), Err(PathError::Empty));
        assert!(matches!(Path::parse("users"), Err(PathError::Malformed(_))));
        assert!(matches!(
            Path::parse("/users//x"),
            Err(PathError::Malformed(_))
        ));
        assert!(matches!(Path::parse("/users/"), Err(PathError::Malformed(_))));
        assert!(matches!(
            Path::parse("/users/{id"),
            Err(PathError::Malformed(_))
        ));
        assert!(matches!(
            Path::parse("/files/{name}.{ext}"),
            Err(PathError::Malformed(_))
        ));
        assert!(matches!(Path::parse("/users/{}"), Err(PathError::Malformed(_))));
        assert_eq!(
            Path::parse("/a/{id}/b/:id"),
            Err(PathError::DuplicateParam("id".into()))
        );
    }

    #[test]
    fn test_params_in_order() {
        let path = Path::parse("/orgs/{org}/repos/{repo}").unwrap();
        assert_eq!(path.params().collect::<Vec<_>>(), ["org", "repo"]);
    }
}
