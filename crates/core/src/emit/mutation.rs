//! Mutation keys and hooks for write operations.

use crate::naming::{IdentifierKind, OperationNames};
use crate::target::{HookFlavor, HookLibrary};
use crate::ts::{
    DocComment, ObjectEntry, TsConst, TsDecl, TsExpr, TsFunction, TsParam, TsProp, TsStmt, TsType,
};

use super::query::omit_fixed;
use super::{Fragment, HONO_CLIENT, HookImports, OperationView, name_of};

pub fn render(view: &OperationView<'_>, names: &OperationNames, flavor: HookFlavor) -> Fragment {
    let imports = HookImports::for_library(flavor.library);
    let mut fragment = Fragment::default();
    fragment.import_type(HONO_CLIENT, "ClientRequestOptions");
    fragment.import(&imports.mutation_hook);
    fragment.import(&imports.mutation_options);

    let key_name = name_of(names, IdentifierKind::KeyConstant);
    fragment.push(TsDecl::Const(TsConst {
        doc: Some(DocComment::new(format!(
            "Mutation key for {}",
            view.signature()
        ))),
        name: key_name.clone(),
        value: TsExpr::Array(vec![
            TsExpr::string(view.op.method.as_str()),
            TsExpr::string(view.class.key_path.as_str()),
        ])
        .as_const(),
        is_export: true,
    }));

    // Variables type the caller passes to `mutate`/`trigger`
    let variables = view
        .class
        .args
        .clone()
        .unwrap_or_else(|| TsType::named(match flavor.library {
            HookLibrary::Swr => "never",
            HookLibrary::TanstackReact | HookLibrary::TanstackVue => "void",
        }));
    let client_options = TsExpr::ident("options").optional_member("client");
    let slot = imports.mutation_slot;

    let (library_options, call) = match flavor.library {
        HookLibrary::Swr => {
            // useSWRMutation(key, fetcher(key, { arg }), config)
            let (params, forwarded) = if view.has_args() {
                (
                    vec![
                        TsParam::required("_key", TsType::unknown()),
                        TsParam::required(
                            "{ arg }",
                            TsType::Object(vec![TsProp {
                                name: "arg".into(),
                                ty: variables.clone(),
                                optional: false,
                            }]),
                        ),
                    ],
                    Some(TsExpr::ident("arg")),
                )
            } else {
                (Vec::new(), None)
            };
            let fetcher = TsExpr::Arrow {
                params,
                body: Box::new(view.client_call(forwarded, client_options)),
                is_async: true,
            };
            let options_ty = TsType::generic(
                imports.mutation_options.name,
                vec![
                    TsType::named("Response"),
                    TsType::named("Error"),
                    TsType::named(format!("typeof {key_name}")),
                    variables,
                ],
            );
            let call = TsExpr::call(
                TsExpr::ident(imports.mutation_hook.name),
                vec![
                    TsExpr::ident(key_name.as_str()),
                    fetcher,
                    TsExpr::ident("options").optional_member(slot),
                ],
            );
            (options_ty, call)
        }
        HookLibrary::TanstackReact | HookLibrary::TanstackVue => {
            let (params, forwarded) = if view.has_args() {
                (
                    vec![TsParam::required("args", variables.clone())],
                    Some(TsExpr::ident("args")),
                )
            } else {
                (Vec::new(), None)
            };
            let mutation_fn = TsExpr::Arrow {
                params,
                body: Box::new(view.client_call(forwarded, client_options)),
                is_async: false,
            };
            let options_ty = omit_fixed(
                TsType::generic(
                    imports.mutation_options.name,
                    vec![TsType::named("Response"), TsType::named("Error"), variables],
                ),
                &["mutationKey", "mutationFn"],
            );
            // Lifecycle callbacks travel in the caller spread untouched
            let config = TsExpr::Object(vec![
                ObjectEntry::Spread(TsExpr::ident("options").optional_member(slot)),
                ObjectEntry::Prop("mutationKey".into(), TsExpr::ident(key_name.as_str())),
                ObjectEntry::Prop("mutationFn".into(), mutation_fn),
            ]);
            let call = TsExpr::call(TsExpr::ident(imports.mutation_hook.name), vec![config]);
            (options_ty, call)
        }
    };

    let options_param = TsParam::optional(
        "options",
        TsType::Object(vec![
            TsProp {
                name: slot.into(),
                ty: library_options,
                optional: true,
            },
            TsProp {
                name: "client".into(),
                ty: TsType::named("ClientRequestOptions"),
                optional: true,
            },
        ]),
    );

    fragment.push(TsDecl::Function(TsFunction {
        doc: Some(view.doc()),
        name: name_of(names, IdentifierKind::Hook),
        params: vec![options_param],
        body: vec![TsStmt::Return(Some(call))],
        is_async: false,
        is_export: true,
    }));
    fragment
}
