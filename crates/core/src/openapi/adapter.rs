//! OpenAPI operations to raw route declarations.

use tracing::debug;

use crate::route::{
    ContentKind, HttpMethod, InputKind, MethodDecl, PathDecl, RouteDeclarations, StatusCode,
};
use crate::ts::{TsProp, TsType};

use super::SourceError;
use super::document::{Components, Document, MediaType, Operation, Parameter, PathItem, RefOr};
use super::schema::schema_to_ts_type;

pub fn declarations(doc: &Document) -> Result<RouteDeclarations, SourceError> {
    let mut paths = Vec::with_capacity(doc.paths.len());
    for (template, item) in &doc.paths {
        let mut decl = PathDecl::new(template.as_str());
        for (method, op) in methods(item) {
            decl.methods
                .push(method_decl(template, method, op, item, &doc.components)?);
        }
        paths.push(decl);
    }
    Ok(RouteDeclarations {
        title: doc.info.title.clone(),
        paths,
    })
}

fn methods(item: &PathItem) -> impl Iterator<Item = (HttpMethod, &Operation)> {
    [
        (HttpMethod::Get, item.get.as_ref()),
        (HttpMethod::Put, item.put.as_ref()),
        (HttpMethod::Post, item.post.as_ref()),
        (HttpMethod::Patch, item.patch.as_ref()),
        (HttpMethod::Delete, item.delete.as_ref()),
    ]
    .into_iter()
    .filter_map(|(method, op)| op.map(|op| (method, op)))
}

fn method_decl(
    path: &str,
    method: HttpMethod,
    op: &Operation,
    item: &PathItem,
    components: &Components,
) -> Result<MethodDecl, SourceError> {
    let mut decl = MethodDecl::new(method);
    decl.summary.clone_from(&op.summary);
    decl.description.clone_from(&op.description);

    for (kind, shape) in parameter_groups(path, method, item, op, components)? {
        decl = decl.input(kind, shape);
    }

    if let Some(body) = &op.request_body {
        let body = resolve(body, &components.request_bodies, "requestBodies")?;
        for (media_type, content) in &body.content {
            match body_kind(media_type) {
                Some(kind) => {
                    let shape = content
                        .schema
                        .as_ref()
                        .map_or_else(TsType::unknown, schema_to_ts_type);
                    decl = decl.input(kind, shape);
                }
                None => debug!(%method, path, media_type, "Ignoring request body media type"),
            }
        }
    }

    for (status, response) in &op.responses {
        let status: StatusCode = status.parse().map_err(|_| SourceError::InvalidStatus {
            path: path.to_string(),
            method,
            status: status.clone(),
        })?;
        let response = resolve(response, &components.responses, "responses")?;
        let (content, shape) = response_body(&response.content);
        decl = decl.response(status, content, shape);
    }

    Ok(decl)
}

/// Path-level and operation-level parameters, operation winning on
/// `(name, in)`, grouped into one object shape per location.
fn parameter_groups(
    path: &str,
    method: HttpMethod,
    item: &PathItem,
    op: &Operation,
    components: &Components,
) -> Result<Vec<(InputKind, TsType)>, SourceError> {
    let mut merged: Vec<&Parameter> = Vec::new();
    for param in item.parameters.iter().chain(op.parameters.iter()) {
        let param = resolve(param, &components.parameters, "parameters")?;
        merged.retain(|p| !(p.name == param.name && p.location == param.location));
        merged.push(param);
    }

    let mut groups: Vec<(InputKind, Vec<TsProp>)> = Vec::new();
    for param in merged {
        let kind = match param.location.as_str() {
            "path" => InputKind::Param,
            "query" => InputKind::Query,
            "header" => InputKind::Header,
            "cookie" => InputKind::Cookie,
            other => {
                return Err(SourceError::InvalidParameter {
                    path: path.to_string(),
                    method,
                    name: param.name.clone(),
                    location: other.to_string(),
                });
            }
        };
        let prop = TsProp {
            name: param.name.clone(),
            ty: param
                .schema
                .as_ref()
                .map_or_else(TsType::string, schema_to_ts_type),
            optional: kind != InputKind::Param && !param.required,
        };
        match groups.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, props)) => props.push(prop),
            None => groups.push((kind, vec![prop])),
        }
    }

    groups.sort_by_key(|(kind, _)| *kind);
    Ok(groups
        .into_iter()
        .map(|(kind, props)| (kind, TsType::Object(props)))
        .collect())
}

fn body_kind(media_type: &str) -> Option<InputKind> {
    let essence = media_type.split(';').next().unwrap_or(media_type).trim();
    if essence == "application/json" || essence.ends_with("+json") {
        Some(InputKind::Json)
    } else if essence == "multipart/form-data" || essence == "application/x-www-form-urlencoded" {
        Some(InputKind::Form)
    } else {
        None
    }
}

fn response_content_kind(media_type: &str) -> ContentKind {
    let essence = media_type.split(';').next().unwrap_or(media_type).trim();
    if essence == "application/json" || essence.ends_with("+json") {
        ContentKind::Json
    } else if essence.starts_with("text/") || essence == "application/xml" || essence.ends_with("+xml")
    {
        ContentKind::Text
    } else {
        ContentKind::Binary
    }
}

/// First declared media type decides the body; none means an empty body.
fn response_body(content: &[(String, MediaType)]) -> (ContentKind, Option<TsType>) {
    match content.first() {
        None => (ContentKind::Empty, None),
        Some((media_type, media)) => (
            response_content_kind(media_type),
            media.schema.as_ref().map(schema_to_ts_type),
        ),
    }
}

/// Follow a `#/components/<section>/<name>` reference.
fn resolve<'a, T>(
    item: &'a RefOr<T>,
    components: &'a [(String, T)],
    section: &str,
) -> Result<&'a T, SourceError> {
    match item {
        RefOr::Item(value) => Ok(value),
        RefOr::Ref { reference } => {
            let prefix = format!("#/components/{section}/");
            reference
                .strip_prefix(prefix.as_str())
                .and_then(|name| components.iter().find(|(n, _)| n == name))
                .map(|(_, value)| value)
                .ok_or_else(|| SourceError::UnresolvedRef {
                    reference: reference.clone(),
                })
        }
    }
}
