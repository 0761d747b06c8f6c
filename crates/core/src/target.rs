//! Target conventions: one generated module each.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Output convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Target {
    /// Bound `hc<AppType>()` client handle
    Client,
    /// Plain async wrappers around the client
    Rpc,
    /// SWR hooks (tuple keys)
    Swr,
    /// TanStack React Query hooks (tuple keys, query-options builders)
    TanstackQuery,
    /// TanStack Vue Query hooks (reactive keys)
    VueQuery,
}

impl Target {
    pub const ALL: [Target; 5] = [
        Target::Client,
        Target::Rpc,
        Target::Swr,
        Target::TanstackQuery,
        Target::VueQuery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Client => "client",
            Target::Rpc => "rpc",
            Target::Swr => "swr",
            Target::TanstackQuery => "tanstack-query",
            Target::VueQuery => "vue-query",
        }
    }

    /// File name of the generated module.
    pub fn file_name(&self) -> String {
        format!("{}.ts", self.as_str())
    }

    /// Hook conventions carry per-operation read and mutation hooks.
    pub fn hook_flavor(&self) -> Option<HookFlavor> {
        match self {
            Target::Client | Target::Rpc => None,
            Target::Swr => Some(HookFlavor {
                library: HookLibrary::Swr,
                key_style: KeyStyle::Tuple,
                options_builder: false,
                cancellation: false,
            }),
            Target::TanstackQuery => Some(HookFlavor {
                library: HookLibrary::TanstackReact,
                key_style: KeyStyle::Tuple,
                options_builder: true,
                cancellation: true,
            }),
            Target::VueQuery => Some(HookFlavor {
                library: HookLibrary::TanstackVue,
                key_style: KeyStyle::Reactive,
                options_builder: false,
                cancellation: true,
            }),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Target::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<_> = Target::ALL.iter().map(Target::as_str).collect();
                format!("Unknown target '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

/// Hook library a hook target renders for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookLibrary {
    Swr,
    TanstackReact,
    TanstackVue,
}

/// Shape of a read operation's cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyStyle {
    /// `["/users", args] as const`
    Tuple,
    /// `computed(() => ["/users", toValue(args)] as const)`
    Reactive,
}

/// Decisions that tell the three read-hook variants apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookFlavor {
    pub library: HookLibrary,
    pub key_style: KeyStyle,
    /// Emit a `get{Words}QueryOptions` builder per read operation
    pub options_builder: bool,
    /// Thread the query function's abort `signal` into the client call
    pub cancellation: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_round_trips_through_str() {
        for target in Target::ALL {
            assert_eq!(target.as_str().parse::<Target>(), Ok(target));
        }
        assert!("react".parse::<Target>().is_err());
    }

    #[test]
    fn test_hook_variants_differ() {
        let swr = Target::Swr.hook_flavor();
        let react = Target::TanstackQuery.hook_flavor();
        let vue = Target::VueQuery.hook_flavor();
        assert!(swr.is_some_and(|f| !f.options_builder && !f.cancellation));
        assert!(react.is_some_and(|f| f.options_builder && f.cancellation));
        assert!(vue.is_some_and(|f| f.key_style == KeyStyle::Reactive));
        assert!(Target::Rpc.hook_flavor().is_none());
    }
}
