//! Generator configuration.
//!
//! Every field has a default so an empty `routegen.toml` is valid.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::target::Target;

/// Configuration for one generation run.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub client: ClientConfig,
    pub schemas: SchemasConfig,
    pub naming: NamingConfig,
    pub query: QueryConfig,
    /// Enabled targets, generated in this order
    pub targets: Vec<Target>,
    pub output: OutputConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            schemas: SchemasConfig::default(),
            naming: NamingConfig::default(),
            query: QueryConfig::default(),
            targets: Target::ALL.to_vec(),
            output: OutputConfig::default(),
        }
    }
}

/// Bound client settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Type describing the whole route model (`hc<AppType>`)
    pub app_type: String,
    /// Module `app_type` is imported from, relative to the output directory
    pub app_type_module: String,
    /// Base address the client is constructed with
    pub base_url: String,
    /// Import path of the client module from its sibling modules
    pub module: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            app_type: "AppType".into(),
            app_type_module: "../server".into(),
            base_url: "/".into(),
            module: "./client".into(),
        }
    }
}

/// Where named shapes are declared
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemasConfig {
    pub module: String,
}

impl Default for SchemasConfig {
    fn default() -> Self {
        Self {
            module: "./schemas".into(),
        }
    }
}

/// Identifier derivation settings
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Drop the `Get` word from read hook, key and options-builder names
    pub elide_read_method: bool,
    /// Candidates tried per operation before giving up
    pub max_disambiguation_attempts: usize,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            elide_read_method: true,
            max_disambiguation_attempts: 64,
        }
    }
}

/// Read hook settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Generation-provided defaults merged under caller options.
    /// Values are TypeScript expressions emitted verbatim.
    pub defaults: BTreeMap<String, String>,
}

/// Output settings (used by the CLI)
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub dir: String,
    /// Also write `schemas.ts` with the document's component schemas
    pub schemas: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "src/api".into(),
            schemas: true,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: GeneratorConfig = toml::from_str("").unwrap();
        assert_eq!(config.targets, Target::ALL.to_vec());
        assert_eq!(config.client.app_type, "AppType");
        assert!(config.naming.elide_read_method);
        assert_eq!(config.naming.max_disambiguation_attempts, 64);
        assert!(config.query.defaults.is_empty());
    }

    #[test]
    fn test_partial_config() {
        let config: GeneratorConfig = toml::from_str(
            r#"
targets = ["client", "tanstack-query"]

[client]
base_url = "http://localhost:8787"

[naming]
elide_read_method = false

[query.defaults]
staleTime = "30_000"
"#,
        )
        .unwrap();
        assert_eq!(config.targets, vec![Target::Client, Target::TanstackQuery]);
        assert_eq!(config.client.base_url, "http://localhost:8787");
        assert_eq!(config.client.module, "./client");
        assert!(!config.naming.elide_read_method);
        assert_eq!(
            config.query.defaults.get("staleTime").map(String::as_str),
            Some("30_000")
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<GeneratorConfig, _> = toml::from_str("[client]\nbase = \"/\"\n");
        assert!(result.is_err());
    }
}
