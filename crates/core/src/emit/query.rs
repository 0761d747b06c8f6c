//! Read hooks.
//!
//! The three flavors share a key builder and differ in how the key is held
//! (tuple or reactive), whether a query-options builder is emitted, and
//! whether the abort signal reaches the client call.

use crate::naming::{IdentifierKind, OperationNames};
use crate::target::{HookFlavor, HookLibrary, KeyStyle};
use crate::ts::{
    DocComment, ObjectEntry, TsDecl, TsExpr, TsFunction, TsParam, TsProp, TsStmt, TsType,
};

use super::{
    EmitContext, Fragment, HONO_CLIENT, HookImports, OperationView, merged_config, name_of,
    with_signal,
};

pub fn render(
    view: &OperationView<'_>,
    names: &OperationNames,
    flavor: HookFlavor,
    ctx: &EmitContext<'_>,
) -> Fragment {
    let imports = HookImports::for_library(flavor.library);
    let mut fragment = Fragment::default();
    fragment.import_value(HONO_CLIENT, "parseResponse");
    fragment.import_type(HONO_CLIENT, "ClientRequestOptions");
    fragment.import(&imports.query_hook);
    fragment.import(&imports.query_options);
    for import in imports.reactive {
        fragment.import(import);
    }

    let read = ReadHook {
        view,
        flavor,
        imports,
        ctx,
        key_name: name_of(names, IdentifierKind::KeyFunction),
        hook_name: name_of(names, IdentifierKind::Hook),
    };

    fragment.push(read.key_builder());
    if let Some(helper) = &imports.options_helper {
        fragment.import(helper);
        let builder_name = name_of(names, IdentifierKind::OptionsBuilder);
        fragment.push(read.options_builder(&builder_name, helper.name));
        fragment.push(read.hook_with_builder(&builder_name));
    } else {
        fragment.push(read.hook());
    }
    fragment
}

struct ReadHook<'v, 'a> {
    view: &'v OperationView<'a>,
    flavor: HookFlavor,
    imports: HookImports,
    ctx: &'v EmitContext<'v>,
    key_name: String,
    hook_name: String,
}

impl ReadHook<'_, '_> {
    fn reactive(&self) -> bool {
        self.flavor.key_style == KeyStyle::Reactive
    }

    /// `args`, or `args: MaybeRefOrGetter<...>` for reactive keys
    fn args_params(&self) -> Vec<TsParam> {
        let Some(args) = &self.view.class.args else {
            return Vec::new();
        };
        let ty = if self.reactive() {
            TsType::generic("MaybeRefOrGetter", vec![args.clone()])
        } else {
            args.clone()
        };
        vec![TsParam::required("args", ty)]
    }

    /// What the key builder and the client receive: `args` or `toValue(args)`
    fn args_value(&self) -> Option<TsExpr> {
        if !self.view.has_args() {
            return None;
        }
        let args = TsExpr::ident("args");
        Some(if self.reactive() {
            TsExpr::call(TsExpr::ident("toValue"), vec![args])
        } else {
            args
        })
    }

    fn key_call(&self) -> TsExpr {
        let args = if self.view.has_args() {
            vec![TsExpr::ident("args")]
        } else {
            Vec::new()
        };
        TsExpr::call(TsExpr::ident(self.key_name.as_str()), args)
    }

    /// `parseResponse(client.x.$get(args, init))`
    fn fetch(&self, options: TsExpr) -> TsExpr {
        let options = if self.flavor.cancellation {
            with_signal(options)
        } else {
            options
        };
        TsExpr::call(
            TsExpr::ident("parseResponse"),
            vec![self.view.client_call(self.args_value(), options)],
        )
    }

    /// Query function: `({ signal }) => ...` when the signal is threaded.
    fn query_fn(&self, options: TsExpr) -> TsExpr {
        let params = if self.flavor.cancellation {
            vec![TsParam::untyped("{ signal }")]
        } else {
            Vec::new()
        };
        TsExpr::Arrow {
            params,
            body: Box::new(self.fetch(options)),
            is_async: !self.flavor.cancellation,
        }
    }

    fn key_builder(&self) -> TsDecl {
        let key = self.view.class.cache_key(self.args_value());
        let body = if self.reactive() {
            TsExpr::call(
                TsExpr::ident("computed"),
                vec![TsExpr::Arrow {
                    params: Vec::new(),
                    body: Box::new(key),
                    is_async: false,
                }],
            )
        } else {
            key
        };
        TsDecl::Function(TsFunction {
            doc: Some(DocComment::new(format!(
                "Cache key for {}",
                self.view.signature()
            ))),
            name: self.key_name.clone(),
            params: self.args_params(),
            body: vec![TsStmt::Return(Some(body))],
            is_async: false,
            is_export: true,
        })
    }

    /// `options?: { query?: ...; client?: ClientRequestOptions }`
    fn options_param(&self) -> TsParam {
        let library_options = match self.flavor.library {
            HookLibrary::Swr => TsType::generic(
                self.imports.query_options.name,
                vec![self.view.class.data.clone()],
            ),
            HookLibrary::TanstackReact | HookLibrary::TanstackVue => omit_fixed(
                TsType::generic(
                    self.imports.query_options.name,
                    vec![self.view.class.data.clone()],
                ),
                &["queryKey", "queryFn"],
            ),
        };
        TsParam::optional(
            "options",
            TsType::Object(vec![
                TsProp {
                    name: self.imports.query_slot.into(),
                    ty: library_options,
                    optional: true,
                },
                TsProp {
                    name: "client".into(),
                    ty: TsType::named("ClientRequestOptions"),
                    optional: true,
                },
            ]),
        )
    }

    fn caller_options(&self) -> TsExpr {
        TsExpr::ident("options").optional_member(self.imports.query_slot)
    }

    fn client_options() -> TsExpr {
        TsExpr::ident("options").optional_member("client")
    }

    fn hook_params(&self) -> Vec<TsParam> {
        let mut params = self.args_params();
        params.push(self.options_param());
        params
    }

    /// Hook without an options builder (SWR and Vue flavors)
    fn hook(&self) -> TsDecl {
        let defaults = &self.ctx.config.query.defaults;
        let hook_call = match self.flavor.library {
            // key and fetcher are positional, so the config cannot hold them
            HookLibrary::Swr => TsExpr::call(
                TsExpr::ident(self.imports.query_hook.name),
                vec![
                    TsExpr::ident("key"),
                    TsExpr::ident("fetcher"),
                    merged_config(defaults, self.caller_options(), Vec::new()),
                ],
            ),
            HookLibrary::TanstackReact | HookLibrary::TanstackVue => TsExpr::call(
                TsExpr::ident(self.imports.query_hook.name),
                vec![merged_config(
                    defaults,
                    self.caller_options(),
                    vec![
                        ObjectEntry::Prop("queryKey".into(), TsExpr::ident("queryKey")),
                        ObjectEntry::Prop("queryFn".into(), self.query_fn(Self::client_options())),
                    ],
                )],
            ),
        };

        let body = match self.flavor.library {
            HookLibrary::Swr => vec![
                TsStmt::Const {
                    name: "key".into(),
                    init: self.key_call(),
                },
                TsStmt::Const {
                    name: "fetcher".into(),
                    init: self.query_fn(Self::client_options()),
                },
                TsStmt::Return(Some(hook_call)),
            ],
            HookLibrary::TanstackReact | HookLibrary::TanstackVue => vec![
                TsStmt::Const {
                    name: "queryKey".into(),
                    init: self.key_call(),
                },
                TsStmt::Return(Some(hook_call)),
            ],
        };

        TsDecl::Function(TsFunction {
            doc: Some(self.view.doc()),
            name: self.hook_name.clone(),
            params: self.hook_params(),
            body,
            is_async: false,
            is_export: true,
        })
    }

    /// `getXQueryOptions(args, options)`: key and query function in one place
    fn options_builder(&self, name: &str, helper: &str) -> TsDecl {
        let mut params = self.args_params();
        params.push(TsParam::optional(
            "options",
            TsType::named("ClientRequestOptions"),
        ));
        let options = TsExpr::Object(vec![
            ObjectEntry::Prop("queryKey".into(), self.key_call()),
            ObjectEntry::Prop("queryFn".into(), self.query_fn(TsExpr::ident("options"))),
        ]);
        TsDecl::Function(TsFunction {
            doc: Some(DocComment::new(format!(
                "Query options for {}",
                self.view.signature()
            ))),
            name: name.to_string(),
            params,
            body: vec![TsStmt::Return(Some(TsExpr::call(
                TsExpr::ident(helper),
                vec![options],
            )))],
            is_async: false,
            is_export: true,
        })
    }

    /// Hook spreading defaults, caller options, then the builder's output
    fn hook_with_builder(&self, builder: &str) -> TsDecl {
        let mut builder_args: Vec<TsExpr> = self.args_value().into_iter().collect();
        builder_args.push(Self::client_options());
        let merged = merged_config(
            &self.ctx.config.query.defaults,
            self.caller_options(),
            vec![ObjectEntry::Spread(TsExpr::call(
                TsExpr::ident(builder),
                builder_args,
            ))],
        );
        TsDecl::Function(TsFunction {
            doc: Some(self.view.doc()),
            name: self.hook_name.clone(),
            params: self.hook_params(),
            body: vec![TsStmt::Return(Some(TsExpr::call(
                TsExpr::ident(self.imports.query_hook.name),
                vec![merged],
            )))],
            is_async: false,
            is_export: true,
        })
    }
}

/// `Omit<T, "a" | "b">`
pub(crate) fn omit_fixed(ty: TsType, fixed: &[&str]) -> TsType {
    let keys = fixed
        .iter()
        .map(|k| TsType::Literal(crate::ts::TsLiteral::String((*k).to_string())))
        .collect();
    TsType::generic("Omit", vec![ty, TsType::Union(keys)])
}
