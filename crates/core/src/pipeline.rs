//! The generation pipeline: route model in, one module per target out.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::classify::Unsupported;
use crate::config::GeneratorConfig;
use crate::emit::{EmitContext, OperationView, Strategy, render_binding, reserved_values};
use crate::error::{GenerateError, GenerateWarning};
use crate::module::{GeneratedModule, ModuleWriter};
use crate::naming::IdentifierAllocator;
use crate::route::{Operation, RouteDeclarations, RouteModel, build};
use crate::target::Target;

/// Build the route model from `decls` and render every enabled target.
pub fn generate(
    decls: &RouteDeclarations,
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedModule>, GenerateError> {
    let model = build(decls)?;
    generate_model(&model, config)
}

/// Render every enabled target for an already-built model.
///
/// Targets render in parallel; results keep the configured order and the
/// first failing target (in that order) decides the error.
pub fn generate_model(
    model: &RouteModel,
    config: &GeneratorConfig,
) -> Result<Vec<GeneratedModule>, GenerateError> {
    let prepared: Vec<Prepared<'_>> = model
        .operations
        .iter()
        .map(|op| match OperationView::new(op) {
            Ok(view) => Prepared::Ready(view),
            Err(reason) => Prepared::Skipped { op, reason },
        })
        .collect();
    let schema_names = model.referenced_shapes();

    let mut targets: Vec<Target> = Vec::with_capacity(config.targets.len());
    for target in &config.targets {
        if !targets.contains(target) {
            targets.push(*target);
        }
    }

    let results: Vec<Result<GeneratedModule, GenerateError>> = targets
        .par_iter()
        .map(|target| render_module(*target, model, &prepared, &schema_names, config))
        .collect();
    results.into_iter().collect()
}

enum Prepared<'a> {
    Ready(OperationView<'a>),
    Skipped {
        op: &'a Operation,
        reason: Unsupported,
    },
}

fn render_module(
    target: Target,
    model: &RouteModel,
    prepared: &[Prepared<'_>],
    schema_names: &[String],
    config: &GeneratorConfig,
) -> Result<GeneratedModule, GenerateError> {
    let ctx = EmitContext { config };
    let mut writer = ModuleWriter::new(target, config);
    let mut warnings = Vec::new();

    if target == Target::Client {
        writer.push(render_binding(&ctx, model.title.as_deref()));
    } else {
        let reserved = reserved_values(target)
            .into_iter()
            .map(str::to_string)
            .chain(schema_names.iter().cloned());
        let mut allocator = IdentifierAllocator::new(target, config.naming, reserved);

        for item in prepared {
            match item {
                Prepared::Skipped { op, reason } => {
                    warn!(
                        module = %target,
                        method = %op.method,
                        path = %op.template,
                        %reason,
                        "Skipping operation"
                    );
                    warnings.push(GenerateWarning {
                        target,
                        path: op.template.clone(),
                        method: op.method,
                        reason: reason.to_string(),
                    });
                }
                Prepared::Ready(view) => {
                    let Some(strategy) = Strategy::select(target, view.class.access) else {
                        continue;
                    };
                    let names = allocator.allocate(view.op, strategy.identifier_kinds())?;
                    writer.push(strategy.render(view, &names, &ctx));
                }
            }
        }
    }

    let source = writer.finish();
    debug!(module = %target, bytes = source.len(), warnings = warnings.len(), "Rendered module");
    Ok(GeneratedModule {
        target,
        file_name: target.file_name(),
        source,
        warnings,
    })
}
