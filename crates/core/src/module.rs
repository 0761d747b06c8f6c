//! Module assembly: banner, merged imports, fragments in operation order.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::GeneratorConfig;
use crate::emit::{Fragment, ImportName, ImportRequirement};
use crate::error::GenerateWarning;
use crate::target::Target;
use crate::ts::{Emit, TsImport};

/// First line of every generated file
pub const BANNER: &str = "// Code generated by routegen. DO NOT EDIT.";

/// One generated source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    pub target: Target,
    pub file_name: String,
    pub source: String,
    /// Operations this module left out, and why
    pub warnings: Vec<GenerateWarning>,
}

/// Collects fragments for one target and renders the final source text.
#[derive(Debug)]
pub struct ModuleWriter<'a> {
    target: Target,
    config: &'a GeneratorConfig,
    fragments: Vec<Fragment>,
}

#[derive(Debug, Default)]
struct SpecifierImports {
    default: Option<String>,
    values: BTreeSet<String>,
    types: BTreeSet<String>,
}

impl<'a> ModuleWriter<'a> {
    pub fn new(target: Target, config: &'a GeneratorConfig) -> Self {
        Self {
            target,
            config,
            fragments: Vec::new(),
        }
    }

    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Merged import block.
    ///
    /// Packages come before relative modules, each group sorted by
    /// specifier. Values and types are separate statements; a name needed
    /// as both is imported once, as a value.
    pub fn imports(&self) -> Vec<TsImport> {
        let mut client = Vec::new();
        if self.target != Target::Client {
            client.push(ImportRequirement {
                from: self.config.client.module.clone(),
                name: ImportName::Named("client".into()),
                type_only: false,
            });
        }

        // (relative, specifier) orders packages first
        let mut merged: BTreeMap<(bool, &str), SpecifierImports> = BTreeMap::new();
        let requirements = self
            .fragments
            .iter()
            .flat_map(|f| f.imports.iter())
            .chain(client.iter());
        for req in requirements {
            let entry = merged
                .entry((is_relative(&req.from), req.from.as_str()))
                .or_default();
            match (&req.name, req.type_only) {
                (ImportName::Default(name), _) => entry.default = Some(name.clone()),
                (ImportName::Named(name), false) => {
                    entry.values.insert(name.clone());
                }
                (ImportName::Named(name), true) => {
                    entry.types.insert(name.clone());
                }
            }
        }

        let mut imports = Vec::new();
        for ((_, from), mut entry) in merged {
            entry.types.retain(|name| !entry.values.contains(name));
            if entry.default.is_some() || !entry.values.is_empty() {
                imports.push(TsImport {
                    default: entry.default.take(),
                    items: entry.values.into_iter().collect(),
                    from: from.to_string(),
                    type_only: false,
                });
            }
            if !entry.types.is_empty() {
                imports.push(TsImport {
                    default: None,
                    items: entry.types.into_iter().collect(),
                    from: from.to_string(),
                    type_only: true,
                });
            }
        }
        imports
    }

    /// Render the module text.
    pub fn finish(&self) -> String {
        let mut output = String::from(BANNER);
        output.push_str("\n\n");

        let imports = self.imports();
        for import in &imports {
            output.push_str(&import.emit());
        }

        for decl in self.fragments.iter().flat_map(|f| f.decls.iter()) {
            output.push('\n');
            output.push_str(&decl.emit());
        }
        output
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier.starts_with('.') || specifier.starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(reqs: &[(&str, &str, bool)]) -> Fragment {
        let mut fragment = Fragment::default();
        for (from, name, type_only) in reqs {
            if *type_only {
                fragment.import_type(from, name);
            } else {
                fragment.import_value(from, name);
            }
        }
        fragment
    }

    #[test]
    fn test_imports_are_grouped_and_sorted() {
        let config = GeneratorConfig::default();
        let mut writer = ModuleWriter::new(Target::TanstackQuery, &config);
        writer.push(fragment(&[
            ("./schemas", "User", true),
            ("hono/client", "ClientRequestOptions", true),
            ("@tanstack/react-query", "useQuery", false),
            ("hono/client", "parseResponse", false),
        ]));
        writer.push(fragment(&[
            ("@tanstack/react-query", "useMutation", false),
            ("./schemas", "Error", true),
            ("./schemas", "User", true),
        ]));

        let rendered: Vec<String> = writer.imports().iter().map(Emit::emit).collect();
        assert_eq!(
            rendered,
            [
                "import { useMutation, useQuery } from \"@tanstack/react-query\";\n",
                "import { parseResponse } from \"hono/client\";\n",
                "import type { ClientRequestOptions } from \"hono/client\";\n",
                "import { client } from \"./client\";\n",
                "import type { Error, User } from \"./schemas\";\n",
            ]
        );
    }

    #[test]
    fn test_value_wins_over_type() {
        let config = GeneratorConfig::default();
        let mut writer = ModuleWriter::new(Target::Client, &config);
        writer.push(fragment(&[("pkg", "Thing", true), ("pkg", "Thing", false)]));
        let rendered: Vec<String> = writer.imports().iter().map(Emit::emit).collect();
        assert_eq!(rendered, ["import { Thing } from \"pkg\";\n"]);
    }

    #[test]
    fn test_default_import_merges_with_named() {
        let config = GeneratorConfig::default();
        let mut writer = ModuleWriter::new(Target::Client, &config);
        let mut f = fragment(&[("swr", "SWRConfiguration", true)]);
        f.import_default("swr", "useSWR");
        writer.push(f);
        let rendered: Vec<String> = writer.imports().iter().map(Emit::emit).collect();
        assert_eq!(
            rendered,
            [
                "import useSWR from \"swr\";\n",
                "import type { SWRConfiguration } from \"swr\";\n",
            ]
        );
    }

    #[test]
    fn test_empty_module_still_imports_client() {
        let config = GeneratorConfig::default();
        let writer = ModuleWriter::new(Target::Rpc, &config);
        assert_eq!(
            writer.finish(),
            format!("{BANNER}\n\nimport {{ client }} from \"./client\";\n")
        );
    }
}
