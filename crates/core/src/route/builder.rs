//! Route model construction: raw declarations in, validated operations out.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::collections::btree_map::Entry;

use tracing::debug;

use crate::error::GenerateError;
use crate::ts::{TsPrimitive, TsProp, TsType};

use super::decl::{InputDecl, MethodDecl, PathDecl, ResponseDecl, RouteDeclarations};
use super::model::{ContentKind, HttpMethod, InputKind, InputPart, Operation, OutputVariant, RouteModel};
use super::path::{Path, PathError};

/// Normalize declarations into the route model.
///
/// Operations come out in document order of paths, then in method
/// precedence within a path. The first structural problem aborts the build.
pub fn build(decls: &RouteDeclarations) -> Result<RouteModel, GenerateError> {
    let mut operations = Vec::new();
    let mut seen_paths = HashSet::new();

    for path_decl in &decls.paths {
        let mut methods: Vec<&MethodDecl> = path_decl.methods.iter().collect();
        // Stable: a method declared twice keeps its declaration order
        methods.sort_by_key(|m| m.method);
        let Some(first) = methods.first() else {
            debug!(path = %path_decl.template, "Path declares no methods, skipping");
            continue;
        };

        let path = parse_path(&path_decl.template, first.method)?;
        if !seen_paths.insert(path.canonical()) {
            return Err(GenerateError::DuplicatePath {
                path: path_decl.template.clone(),
                method: first.method,
            });
        }

        for pair in methods.windows(2) {
            if pair[0].method == pair[1].method {
                return Err(GenerateError::DuplicateMethod {
                    path: path_decl.template.clone(),
                    method: pair[1].method,
                });
            }
        }

        for method_decl in methods {
            operations.push(build_operation(path_decl, &path, method_decl)?);
        }
    }

    debug!(operations = operations.len(), "Built route model");
    Ok(RouteModel {
        title: decls.title.clone(),
        operations,
    })
}

fn parse_path(template: &str, method: HttpMethod) -> Result<Path, GenerateError> {
    Path::parse(template).map_err(|e| match e {
        PathError::Empty => GenerateError::EmptyPath {
            path: template.to_string(),
            method,
        },
        PathError::Malformed(reason) => GenerateError::MalformedPath {
            path: template.to_string(),
            method,
            reason,
        },
        PathError::DuplicateParam(name) => GenerateError::DuplicateParam {
            path: template.to_string(),
            method,
            name,
        },
    })
}

fn build_operation(
    path_decl: &PathDecl,
    path: &Path,
    decl: &MethodDecl,
) -> Result<Operation, GenerateError> {
    let outputs = collect_outputs(&decl.responses).map_err(|e| match e {
        OutputError::Empty => GenerateError::NoOutputVariants {
            path: path_decl.template.clone(),
            method: decl.method,
        },
        OutputError::Duplicate(status) => GenerateError::DuplicateStatus {
            path: path_decl.template.clone(),
            method: decl.method,
            status,
        },
    })?;

    let inputs = collect_inputs(path, &decl.inputs);
    debug!(
        method = %decl.method,
        path = %path,
        inputs = inputs.len(),
        outputs = outputs.len(),
        "Normalized operation"
    );

    Ok(Operation {
        template: path_decl.template.clone(),
        path: path.clone(),
        method: decl.method,
        inputs,
        outputs,
        summary: decl.summary.clone(),
        description: decl.description.clone(),
    })
}

/// One part per kind in canonical order. Repeated kinds merge; path
/// parameters without a declared `param` part get string fields.
fn collect_inputs(path: &Path, decls: &[InputDecl]) -> Vec<InputPart> {
    let mut parts: BTreeMap<InputKind, TsType> = BTreeMap::new();
    for decl in decls {
        match parts.entry(decl.kind) {
            Entry::Vacant(slot) => {
                slot.insert(decl.shape.clone());
            }
            Entry::Occupied(mut slot) => {
                let merged = merge_shapes(slot.get(), &decl.shape);
                slot.insert(merged);
            }
        }
    }

    if !parts.contains_key(&InputKind::Param) {
        let props: Vec<TsProp> = path
            .params()
            .map(|name| TsProp {
                name: name.to_string(),
                ty: TsType::Primitive(TsPrimitive::String),
                optional: false,
            })
            .collect();
        if !props.is_empty() {
            parts.insert(InputKind::Param, TsType::Object(props));
        }
    }

    parts
        .into_iter()
        .map(|(kind, shape)| InputPart { kind, shape })
        .collect()
}

fn merge_shapes(first: &TsType, second: &TsType) -> TsType {
    match (first, second) {
        (TsType::Object(a), TsType::Object(b)) => {
            let mut props = a.clone();
            for prop in b {
                if !props.iter().any(|p| p.name == prop.name) {
                    props.push(prop.clone());
                }
            }
            TsType::Object(props)
        }
        (TsType::Intersection(items), other) => {
            let mut items = items.clone();
            items.push(other.clone());
            TsType::Intersection(items)
        }
        (a, b) => TsType::Intersection(vec![a.clone(), b.clone()]),
    }
}

enum OutputError {
    Empty,
    Duplicate(String),
}

fn collect_outputs(decls: &[ResponseDecl]) -> Result<Vec<OutputVariant>, OutputError> {
    if decls.is_empty() {
        return Err(OutputError::Empty);
    }

    let mut outputs: Vec<OutputVariant> = decls
        .iter()
        .map(|r| OutputVariant {
            status: r.status,
            content: r.content,
            shape: match r.content {
                ContentKind::Empty => None,
                _ => r.shape.clone(),
            },
        })
        .collect();
    outputs.sort_by_key(|v| v.status);

    if let Some(pair) = outputs.windows(2).find(|w| w[0].status == w[1].status) {
        return Err(OutputError::Duplicate(pair[0].status.to_string()));
    }
    Ok(outputs)
}
