//! Plain async wrappers around the client.

use crate::naming::{IdentifierKind, OperationNames};
use crate::ts::{ObjectEntry, TsDecl, TsExpr, TsFunction, TsParam, TsStmt, TsType};

use super::{Fragment, HONO_CLIENT, OperationView, name_of};

/// One `export async function` per operation.
///
/// A single input kind becomes a parameter named after it, forwarded as
/// `{ kind }`; several kinds share one `args` parameter forwarded as-is.
pub fn render(view: &OperationView<'_>, names: &OperationNames) -> Fragment {
    let mut fragment = Fragment::default();
    fragment.import_type(HONO_CLIENT, "ClientRequestOptions");

    let (mut params, forwarded) = match (view.op.inputs.as_slice(), &view.class.args) {
        ([part], _) => {
            let kind = part.kind.as_str();
            (
                vec![TsParam::required(kind, part.shape.clone())],
                Some(TsExpr::Object(vec![ObjectEntry::Prop(
                    kind.to_string(),
                    TsExpr::ident(kind),
                )])),
            )
        }
        (_, Some(args)) => (
            vec![TsParam::required("args", args.clone())],
            Some(TsExpr::ident("args")),
        ),
        (_, None) => (Vec::new(), None),
    };
    params.push(TsParam::optional(
        "options",
        TsType::named("ClientRequestOptions"),
    ));

    fragment.push(TsDecl::Function(TsFunction {
        doc: Some(view.doc()),
        name: name_of(names, IdentifierKind::Function),
        params,
        body: vec![TsStmt::Return(Some(
            view.client_call(forwarded, TsExpr::ident("options")),
        ))],
        is_async: true,
        is_export: true,
    }));
    fragment
}
