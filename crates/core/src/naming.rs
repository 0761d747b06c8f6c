//! Identifier allocation.
//!
//! Names derive from the path words and the HTTP method. Each module owns one
//! [`IdentifierAllocator`]; operations are allocated in model order, so an
//! appended operation never renames an earlier one.

use std::collections::HashSet;
use std::fmt;

use crate::config::NamingConfig;
use crate::error::GenerateError;
use crate::route::{Operation, Path, PathSegment};
use crate::target::Target;
use crate::ts::utils::{lower_first, pascal_words};

/// Role of a generated symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierKind {
    /// Plain async call: `getUsers`, `postUsers`
    Function,
    /// `useUsers`, `usePostUsers`
    Hook,
    /// Read cache-key builder: `getUsersKey`
    KeyFunction,
    /// Mutation key: `postUsersMutationKey`
    KeyConstant,
    /// `getUsersQueryOptions`
    OptionsBuilder,
}

impl fmt::Display for IdentifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IdentifierKind::Function => "function",
            IdentifierKind::Hook => "hook",
            IdentifierKind::KeyFunction => "key-function",
            IdentifierKind::KeyConstant => "key-constant",
            IdentifierKind::OptionsBuilder => "options-builder",
        })
    }
}

/// One allocated symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub scope: Target,
    pub kind: IdentifierKind,
    /// First candidate, before any disambiguation
    pub raw_name: String,
    pub final_name: String,
}

/// The identifiers one operation received in one module
#[derive(Debug, Clone, Default)]
pub struct OperationNames {
    identifiers: Vec<Identifier>,
}

impl OperationNames {
    pub fn get(&self, kind: IdentifierKind) -> Option<&str> {
        self.identifiers
            .iter()
            .find(|id| id.kind == kind)
            .map(|id| id.final_name.as_str())
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.identifiers
    }
}

/// Collision-free name allocation within one module
#[derive(Debug)]
pub struct IdentifierAllocator {
    scope: Target,
    config: NamingConfig,
    taken: HashSet<String>,
}

impl IdentifierAllocator {
    /// `reserved` holds names the module already binds: imported values and
    /// referenced schema names.
    pub fn new<I, S>(scope: Target, config: NamingConfig, reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scope,
            config,
            taken: reserved.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    /// Allocate every name in `kinds` for `op`, all from the same candidate.
    pub fn allocate(
        &mut self,
        op: &Operation,
        kinds: &[IdentifierKind],
    ) -> Result<OperationNames, GenerateError> {
        let owned_words = path_words(&op.path);
        let words = owned_words.as_str();
        let elided = op.is_read() && self.config.elide_read_method;

        let mut candidates = Vec::with_capacity(2);
        candidates.push(Candidate {
            words,
            with_get: !elided,
            suffix: None,
        });
        // Only hook-style names spell the `Get`; plain calls always carry the verb
        if elided && kinds.iter().any(|k| *k != IdentifierKind::Function) {
            candidates.push(Candidate {
                words,
                with_get: true,
                suffix: None,
            });
        }
        let numbered = (2..).map(move |n| Candidate {
            words,
            with_get: !elided,
            suffix: Some(n),
        });

        let raw: Vec<String> = kinds.iter().map(|k| candidates[0].name(op, *k)).collect();
        let limit = self.config.max_disambiguation_attempts;

        for (attempt, candidate) in candidates.into_iter().chain(numbered).enumerate() {
            if attempt >= limit {
                break;
            }
            let names: Vec<String> = kinds.iter().map(|k| candidate.name(op, *k)).collect();
            if names.iter().any(|n| self.taken.contains(n)) {
                continue;
            }
            // Two kinds of one candidate never coincide: each has its own affix
            self.taken.extend(names.iter().cloned());
            let identifiers = kinds
                .iter()
                .zip(raw)
                .zip(names)
                .map(|((kind, raw_name), final_name)| Identifier {
                    scope: self.scope,
                    kind: *kind,
                    raw_name,
                    final_name,
                })
                .collect();
            return Ok(OperationNames { identifiers });
        }

        Err(GenerateError::IdentifierExhausted {
            path: op.template.clone(),
            method: op.method,
            target: self.scope,
            attempts: limit,
        })
    }
}

struct Candidate<'a> {
    words: &'a str,
    with_get: bool,
    suffix: Option<usize>,
}

impl Candidate<'_> {
    fn name(&self, op: &Operation, kind: IdentifierKind) -> String {
        let mut words = self.words.to_string();
        if let Some(n) = self.suffix {
            words.push_str(&n.to_string());
        }
        let stem = if self.with_get || !op.is_read() {
            format!("{}{words}", op.method.word())
        } else {
            words.clone()
        };

        match kind {
            IdentifierKind::Function => format!("{}{words}", op.method.lower()),
            IdentifierKind::Hook => format!("use{stem}"),
            IdentifierKind::KeyFunction => format!("get{stem}Key"),
            IdentifierKind::OptionsBuilder => format!("get{stem}QueryOptions"),
            IdentifierKind::KeyConstant => format!("{}MutationKey", lower_first(&stem)),
        }
    }
}

/// PascalCase words for a path: `/users/@me/{postId}` is `UsersAtMePostId`.
pub fn path_words(path: &Path) -> String {
    let mut out = String::new();
    for segment in path.segments() {
        match segment {
            PathSegment::Literal(text) if text.is_empty() => out.push_str("Index"),
            PathSegment::Literal(text) => {
                if let Some(rest) = text.strip_prefix('@') {
                    out.push_str("At");
                    out.push_str(&pascal_words(rest));
                } else if let Some(rest) = text.strip_prefix('$') {
                    out.push_str("Dollar");
                    out.push_str(&pascal_words(rest));
                } else {
                    out.push_str(&pascal_words(text));
                }
            }
            PathSegment::Param { name, .. } => out.push_str(&pascal_words(name)),
        }
    }
    // `/{_}` and `/-` spell no words
    if out.is_empty() {
        out.push_str("Root");
    }
    out
}
