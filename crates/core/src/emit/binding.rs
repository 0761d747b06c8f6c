//! The bound client handle every other module calls through.

use crate::ts::{DocComment, TsConst, TsDecl, TsExpr, TsType};

use super::{EmitContext, Fragment, HONO_CLIENT};

/// `export const client = hc<AppType>("/");`
pub fn render(ctx: &EmitContext<'_>, title: Option<&str>) -> Fragment {
    let client = &ctx.config.client;
    let mut fragment = Fragment::default();
    fragment.import_value(HONO_CLIENT, "hc");
    fragment.import_type(&client.app_type_module, &client.app_type);

    let doc = DocComment::new(format!("RPC client bound to `{}`.", client.app_type)).with(title);
    fragment.push(TsDecl::Const(TsConst {
        doc: Some(doc),
        name: "client".into(),
        value: TsExpr::call_generic(
            TsExpr::ident("hc"),
            vec![TsType::named(client.app_type.as_str())],
            vec![TsExpr::string(client.base_url.as_str())],
        ),
        is_export: true,
    }));
    fragment
}
