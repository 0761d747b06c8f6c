//! Target emitters.
//!
//! Every target renders the same [`OperationView`] through one of the
//! [`Strategy`] variants. A strategy produces a self-contained [`Fragment`]:
//! its declarations plus the imports they need.
//!
//! - `binding`: the bound `client` handle (`client.ts`)
//! - `rpc`: plain async wrappers
//! - `query`: read hooks, in the three key/options flavors
//! - `mutation`: mutation keys and hooks

mod binding;
mod mutation;
mod query;
mod rpc;

use std::collections::BTreeMap;

use crate::classify::{Access, Classification, Unsupported, classify};
use crate::config::GeneratorConfig;
use crate::naming::{IdentifierKind, OperationNames};
use crate::route::{ContentKind, Operation, PathSegment};
use crate::target::{HookFlavor, HookLibrary, Target};
use crate::ts::{DocComment, ObjectEntry, TsDecl, TsExpr, emit_property};

pub use binding::render as render_binding;

/// Package the Hono client helpers come from
pub(crate) const HONO_CLIENT: &str = "hono/client";

/// Name as it appears in an import clause
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportName {
    Default(String),
    Named(String),
}

/// One name a fragment needs from another module
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportRequirement {
    pub from: String,
    pub name: ImportName,
    pub type_only: bool,
}

/// Declarations for one operation (or the binding) and their imports
#[derive(Debug, Clone, Default)]
pub struct Fragment {
    pub decls: Vec<TsDecl>,
    pub imports: Vec<ImportRequirement>,
}

impl Fragment {
    pub fn push(&mut self, decl: TsDecl) {
        self.decls.push(decl);
    }

    pub fn import_value(&mut self, from: &str, name: &str) {
        self.require(from, ImportName::Named(name.to_string()), false);
    }

    pub fn import_type(&mut self, from: &str, name: &str) {
        self.require(from, ImportName::Named(name.to_string()), true);
    }

    pub fn import_default(&mut self, from: &str, name: &str) {
        self.require(from, ImportName::Default(name.to_string()), false);
    }

    fn import(&mut self, import: &LibraryImport) {
        match import.kind {
            ImportKind::Default => self.import_default(import.from, import.name),
            ImportKind::Value => self.import_value(import.from, import.name),
            ImportKind::Type => self.import_type(import.from, import.name),
        }
    }

    fn require(&mut self, from: &str, name: ImportName, type_only: bool) {
        let requirement = ImportRequirement {
            from: from.to_string(),
            name,
            type_only,
        };
        if !self.imports.contains(&requirement) {
            self.imports.push(requirement);
        }
    }
}

/// Immutable per-operation view every target renders from
#[derive(Debug, Clone)]
pub struct OperationView<'a> {
    pub op: &'a Operation,
    pub class: Classification,
    /// Schema names the argument types mention
    pub input_refs: Vec<String>,
    /// Schema names the JSON success type mentions; only read hooks spell
    /// out the data type
    pub data_refs: Vec<String>,
}

impl<'a> OperationView<'a> {
    pub fn new(op: &'a Operation) -> Result<Self, Unsupported> {
        let class = classify(op)?;
        let mut input_refs = Vec::new();
        for part in &op.inputs {
            part.shape.collect_refs(&mut input_refs);
        }
        let mut data_refs = Vec::new();
        if let Some(variant) = op.success()
            && variant.content == ContentKind::Json
            && let Some(shape) = &variant.shape
        {
            shape.collect_refs(&mut data_refs);
        }
        Ok(Self {
            op,
            class,
            input_refs,
            data_refs,
        })
    }

    pub fn has_args(&self) -> bool {
        self.class.args.is_some()
    }

    /// `client.users[":userId"].$get`
    pub fn client_method(&self) -> TsExpr {
        let mut chain = TsExpr::ident("client");
        for segment in self.op.path.segments() {
            chain = match segment {
                PathSegment::Literal(text) if text.is_empty() => chain.member("index"),
                PathSegment::Literal(text) => emit_property(chain, text),
                PathSegment::Param { marker, .. } => chain.index(marker.as_str()),
            };
        }
        chain.member(format!("${}", self.op.method.lower()))
    }

    /// `client.users.$get(args, options)`; argument-less calls pass `undefined`.
    pub fn client_call(&self, args: Option<TsExpr>, options: TsExpr) -> TsExpr {
        let args = args.unwrap_or_else(|| TsExpr::ident("undefined"));
        TsExpr::call(self.client_method(), vec![args, options])
    }

    /// `GET /users/:userId`
    pub fn signature(&self) -> String {
        format!("{} {}", self.op.method, self.class.key_path)
    }

    /// Method, canonical path, summary and description
    pub fn doc(&self) -> DocComment {
        DocComment::new(self.signature())
            .with(self.op.summary.as_deref())
            .with(self.op.description.as_deref())
    }

    fn import_schemas(&self, fragment: &mut Fragment, ctx: &EmitContext<'_>, with_data: bool) {
        let data: &[String] = if with_data { &self.data_refs } else { &[] };
        for name in self.input_refs.iter().chain(data) {
            fragment.import_type(&ctx.config.schemas.module, name);
        }
    }
}

/// Shared inputs of every strategy
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub config: &'a GeneratorConfig,
}

/// How one operation is rendered in one target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    PlainCall,
    ReadHook(HookFlavor),
    Mutation(HookFlavor),
}

impl Strategy {
    /// `None` for the binding target, which has no per-operation output.
    pub fn select(target: Target, access: Access) -> Option<Self> {
        match (target, target.hook_flavor()) {
            (Target::Client, _) => None,
            (_, None) => Some(Strategy::PlainCall),
            (_, Some(flavor)) => Some(match access {
                Access::Read => Strategy::ReadHook(flavor),
                Access::Write => Strategy::Mutation(flavor),
            }),
        }
    }

    /// Names this strategy declares per operation.
    pub fn identifier_kinds(&self) -> &'static [IdentifierKind] {
        match self {
            Strategy::PlainCall => &[IdentifierKind::Function],
            Strategy::ReadHook(flavor) if flavor.options_builder => &[
                IdentifierKind::Hook,
                IdentifierKind::KeyFunction,
                IdentifierKind::OptionsBuilder,
            ],
            Strategy::ReadHook(_) => &[IdentifierKind::Hook, IdentifierKind::KeyFunction],
            Strategy::Mutation(_) => &[IdentifierKind::Hook, IdentifierKind::KeyConstant],
        }
    }

    pub fn render(
        &self,
        view: &OperationView<'_>,
        names: &OperationNames,
        ctx: &EmitContext<'_>,
    ) -> Fragment {
        let mut fragment = match self {
            Strategy::PlainCall => rpc::render(view, names),
            Strategy::ReadHook(flavor) => query::render(view, names, *flavor, ctx),
            Strategy::Mutation(flavor) => mutation::render(view, names, *flavor),
        };
        view.import_schemas(&mut fragment, ctx, matches!(self, Strategy::ReadHook(_)));
        fragment
    }
}

/// Value names a target's module imports, reserved before allocation.
pub fn reserved_values(target: Target) -> Vec<&'static str> {
    let mut names = match target {
        Target::Client => return vec!["hc"],
        Target::Rpc => vec!["client"],
        Target::Swr | Target::TanstackQuery | Target::VueQuery => vec!["client", "parseResponse"],
    };
    if let Some(flavor) = target.hook_flavor() {
        let imports = HookImports::for_library(flavor.library);
        names.extend(
            imports
                .all()
                .filter(|i| i.kind != ImportKind::Type)
                .map(|i| i.name),
        );
    }
    names.sort_unstable();
    names.dedup();
    names
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImportKind {
    Default,
    Value,
    Type,
}

#[derive(Debug, Clone, Copy)]
struct LibraryImport {
    from: &'static str,
    name: &'static str,
    kind: ImportKind,
}

const fn lib(from: &'static str, name: &'static str, kind: ImportKind) -> LibraryImport {
    LibraryImport { from, name, kind }
}

/// Library names the hook emitters refer to
#[derive(Debug, Clone, Copy)]
struct HookImports {
    query_hook: LibraryImport,
    query_options: LibraryImport,
    /// Builder helper (`queryOptions`) for flavors that emit one
    options_helper: Option<LibraryImport>,
    mutation_hook: LibraryImport,
    mutation_options: LibraryImport,
    /// Reactive key helpers (`computed`, `toValue`, `MaybeRefOrGetter`)
    reactive: &'static [LibraryImport],
    /// Property of the hook's `options` argument holding library options
    query_slot: &'static str,
    mutation_slot: &'static str,
}

const VUE_REACTIVE: &[LibraryImport] = &[
    lib("vue", "computed", ImportKind::Value),
    lib("vue", "toValue", ImportKind::Value),
    lib("vue", "MaybeRefOrGetter", ImportKind::Type),
];

impl HookImports {
    fn for_library(library: HookLibrary) -> Self {
        match library {
            HookLibrary::Swr => Self {
                query_hook: lib("swr", "useSWR", ImportKind::Default),
                query_options: lib("swr", "SWRConfiguration", ImportKind::Type),
                options_helper: None,
                mutation_hook: lib("swr/mutation", "useSWRMutation", ImportKind::Default),
                mutation_options: lib("swr/mutation", "SWRMutationConfiguration", ImportKind::Type),
                reactive: &[],
                query_slot: "swr",
                mutation_slot: "swr",
            },
            HookLibrary::TanstackReact => Self {
                query_hook: lib("@tanstack/react-query", "useQuery", ImportKind::Value),
                query_options: lib("@tanstack/react-query", "UseQueryOptions", ImportKind::Type),
                options_helper: Some(lib(
                    "@tanstack/react-query",
                    "queryOptions",
                    ImportKind::Value,
                )),
                mutation_hook: lib("@tanstack/react-query", "useMutation", ImportKind::Value),
                mutation_options: lib(
                    "@tanstack/react-query",
                    "UseMutationOptions",
                    ImportKind::Type,
                ),
                reactive: &[],
                query_slot: "query",
                mutation_slot: "mutation",
            },
            HookLibrary::TanstackVue => Self {
                query_hook: lib("@tanstack/vue-query", "useQuery", ImportKind::Value),
                query_options: lib("@tanstack/vue-query", "UseQueryOptions", ImportKind::Type),
                options_helper: None,
                mutation_hook: lib("@tanstack/vue-query", "useMutation", ImportKind::Value),
                mutation_options: lib(
                    "@tanstack/vue-query",
                    "UseMutationOptions",
                    ImportKind::Type,
                ),
                reactive: VUE_REACTIVE,
                query_slot: "query",
                mutation_slot: "mutation",
            },
        }
    }

    fn all(&self) -> impl Iterator<Item = &LibraryImport> {
        [
            &self.query_hook,
            &self.query_options,
            &self.mutation_hook,
            &self.mutation_options,
        ]
        .into_iter()
        .chain(self.options_helper.iter())
        .chain(self.reactive.iter())
    }
}

/// `{ ...defaults, ...caller, ...fixed }`: generation defaults first, caller
/// options over them, fixed fields last so callers cannot replace them.
pub(crate) fn merged_config(
    defaults: &BTreeMap<String, String>,
    caller: TsExpr,
    fixed: Vec<ObjectEntry>,
) -> TsExpr {
    let mut entries: Vec<ObjectEntry> = defaults
        .iter()
        .map(|(key, value)| ObjectEntry::Prop(key.clone(), TsExpr::Raw(value.clone())))
        .collect();
    entries.push(ObjectEntry::Spread(caller));
    entries.extend(fixed);
    TsExpr::Object(entries)
}

/// `{ ...options, init: { ...options?.init, signal } }`
pub(crate) fn with_signal(options: TsExpr) -> TsExpr {
    TsExpr::Object(vec![
        ObjectEntry::Spread(options.clone()),
        ObjectEntry::Prop(
            "init".into(),
            TsExpr::Object(vec![
                ObjectEntry::Spread(options.optional_member("init")),
                ObjectEntry::Prop("signal".into(), TsExpr::ident("signal")),
            ]),
        ),
    ])
}

/// Allocation always covers [`Strategy::identifier_kinds`].
pub(crate) fn name_of(names: &OperationNames, kind: IdentifierKind) -> String {
    names.get(kind).unwrap_or_default().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::naming::IdentifierAllocator;
    use crate::route::{HttpMethod, InputKind, InputPart, OutputVariant, Path, StatusCode};
    use crate::ts::{Emit, TsType};

    fn op(method: HttpMethod, template: &str) -> Operation {
        Operation {
            template: template.into(),
            path: Path::parse(template).unwrap(),
            method,
            inputs: vec![],
            outputs: vec![OutputVariant {
                status: StatusCode::Code(200),
                content: ContentKind::Json,
                shape: None,
            }],
            summary: Some("Fetch one".into()),
            description: None,
        }
    }

    #[test]
    fn test_client_method_chain() {
        let cases = [
            (HttpMethod::Get, "/users/{userId}", "client.users[\":userId\"].$get"),
            (HttpMethod::Post, "/", "client.index.$post"),
            (HttpMethod::Get, "/@me/openapi.json", "client[\"@me\"][\"openapi.json\"].$get"),
            (HttpMethod::Delete, "/posts/delete", "client.posts.delete.$delete"),
            (HttpMethod::Get, "/posts/:id{[0-9]+}", "client.posts[\":id{[0-9]+}\"].$get"),
            (HttpMethod::Get, "/animal/:type?", "client.animal[\":type?\"].$get"),
        ];
        for (method, template, expected) in cases {
            let op = op(method, template);
            let view = OperationView::new(&op).unwrap();
            assert_eq!(view.client_method().emit(), expected);
        }
    }

    #[test]
    fn test_argumentless_call_passes_undefined() {
        let op = op(HttpMethod::Get, "/health");
        let view = OperationView::new(&op).unwrap();
        let call = view.client_call(None, TsExpr::ident("options"));
        assert_eq!(call.emit(), "client.health.$get(undefined, options)");
        assert_eq!(view.doc().emit(), "/**\n * GET /health\n *\n * Fetch one\n */\n");
    }

    #[test]
    fn test_merged_config_order() {
        let mut defaults = BTreeMap::new();
        defaults.insert("staleTime".to_string(), "30_000".to_string());
        let merged = merged_config(
            &defaults,
            TsExpr::ident("options").optional_member("query"),
            vec![ObjectEntry::Prop("queryKey".into(), TsExpr::ident("key"))],
        );
        assert_eq!(
            merged.emit(),
            "{ staleTime: 30_000, ...options?.query, queryKey: key }"
        );
    }

    #[test]
    fn test_with_signal() {
        let init = with_signal(TsExpr::ident("options").optional_member("client"));
        assert_eq!(
            init.emit(),
            "{ ...options?.client, init: { ...options?.client?.init, signal } }"
        );
    }

    #[test]
    fn test_strategy_selection() {
        assert_eq!(Strategy::select(Target::Client, Access::Read), None);
        assert_eq!(
            Strategy::select(Target::Rpc, Access::Write),
            Some(Strategy::PlainCall)
        );
        assert!(matches!(
            Strategy::select(Target::Swr, Access::Write),
            Some(Strategy::Mutation(_))
        ));
        let react = Strategy::select(Target::TanstackQuery, Access::Read).unwrap();
        assert_eq!(react.identifier_kinds().len(), 3);
        let vue = Strategy::select(Target::VueQuery, Access::Read).unwrap();
        assert_eq!(vue.identifier_kinds().len(), 2);
    }

    #[test]
    fn test_reserved_values_per_target() {
        assert_eq!(reserved_values(Target::Client), ["hc"]);
        assert_eq!(reserved_values(Target::Rpc), ["client"]);
        assert_eq!(
            reserved_values(Target::Swr),
            ["client", "parseResponse", "useSWR", "useSWRMutation"]
        );
        assert_eq!(
            reserved_values(Target::TanstackQuery),
            ["client", "parseResponse", "queryOptions", "useMutation", "useQuery"]
        );
        assert_eq!(
            reserved_values(Target::VueQuery),
            [
                "client",
                "computed",
                "parseResponse",
                "toValue",
                "useMutation",
                "useQuery"
            ]
        );
    }

    fn schema_imports(target: Target, op: &Operation) -> Vec<String> {
        let config = GeneratorConfig::default();
        let view = OperationView::new(op).unwrap();
        let strategy = Strategy::select(target, view.class.access).unwrap();
        let mut allocator = IdentifierAllocator::new(target, config.naming, Vec::<String>::new());
        let names = allocator.allocate(op, strategy.identifier_kinds()).unwrap();
        let fragment = strategy.render(&view, &names, &EmitContext { config: &config });
        fragment
            .imports
            .iter()
            .filter(|i| i.from == "./schemas")
            .map(|i| match &i.name {
                ImportName::Named(name) | ImportName::Default(name) => name.clone(),
            })
            .collect()
    }

    #[test]
    fn test_only_emitted_types_are_imported() {
        let mut create = op(HttpMethod::Post, "/users");
        create.inputs = vec![InputPart {
            kind: InputKind::Json,
            shape: TsType::named("NewUser"),
        }];
        create.outputs[0].shape = Some(TsType::named("User"));

        // Plain calls and mutations return the raw client response
        assert_eq!(schema_imports(Target::Rpc, &create), ["NewUser"]);
        assert_eq!(schema_imports(Target::Swr, &create), ["NewUser"]);
        assert_eq!(schema_imports(Target::VueQuery, &create), ["NewUser"]);

        let mut read = op(HttpMethod::Get, "/users");
        read.outputs[0].shape = Some(TsType::Array(Box::new(TsType::named("User"))));
        assert!(schema_imports(Target::Rpc, &read).is_empty());
        assert_eq!(schema_imports(Target::TanstackQuery, &read), ["User"]);
    }
}
