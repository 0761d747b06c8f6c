//! Common utilities for TypeScript code generation.
//!
//! This module provides shared helper functions used across the route model,
//! identifier allocation and printing.

use std::collections::HashSet;
use std::sync::LazyLock;

/// TypeScript reserved words that cannot be used as identifiers.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Check if an identifier needs bracket notation (or quoting) for property/key access.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_bracket_notation(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use in JavaScript/TypeScript string literals.
/// Escapes backslashes and double quotes.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a string if needed for use as a property key or enum key.
/// Returns the name quoted with escaped special characters if needed,
/// or the original name if it's a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_bracket_notation(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Lowercase the first letter of a string.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

/// Split a raw name into capitalized words on every non-alphanumeric character.
///
/// The casing inside a word is kept (`userId` stays one word, `UserId`).
pub fn pascal_words(raw: &str) -> String {
    raw.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(capitalize_first)
        .collect()
}

/// Sanitize a declaration name to be a valid TypeScript identifier.
/// - Splits on separators and converts to PascalCase
/// - Prepends `_` if starts with digit
/// - Escapes reserved words with `_` prefix
pub fn sanitize_type_name(name: &str) -> String {
    let mut result = pascal_words(name);
    if result.is_empty() {
        return "_Empty".to_string();
    }

    if result.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        result = format!("_{result}");
    }

    if TS_RESERVED_WORDS.contains(result.as_str()) {
        result = format!("_{result}");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_bracket_notation() {
        // Valid identifiers
        assert!(!needs_bracket_notation("foo"));
        assert!(!needs_bracket_notation("_foo"));
        assert!(!needs_bracket_notation("$foo"));
        assert!(!needs_bracket_notation("foo123"));
        assert!(!needs_bracket_notation("camelCase"));

        // Need bracket notation
        assert!(needs_bracket_notation(""));
        assert!(needs_bracket_notation("123foo"));
        assert!(needs_bracket_notation("foo-bar"));
        assert!(needs_bracket_notation("foo.bar"));
        assert!(needs_bracket_notation(":userId"));
        assert!(needs_bracket_notation("@me"));
    }

    #[test]
    fn test_escape_js_string() {
        assert_eq!(escape_js_string("hello"), "hello");
        assert_eq!(escape_js_string("hel\"lo"), "hel\\\"lo");
        assert_eq!(escape_js_string("hel\\lo"), "hel\\\\lo");
    }

    #[test]
    fn test_quote_if_needed() {
        assert_eq!(quote_if_needed("foo"), "foo");
        assert_eq!(quote_if_needed("foo-bar"), "\"foo-bar\"");
        assert_eq!(quote_if_needed("123"), "\"123\"");
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(capitalize_first("foo"), "Foo");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(lower_first("PostUsers"), "postUsers");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_pascal_words() {
        assert_eq!(pascal_words("users"), "Users");
        assert_eq!(pascal_words("user-profiles"), "UserProfiles");
        assert_eq!(pascal_words("openapi.json"), "OpenapiJson");
        assert_eq!(pascal_words("user_id"), "UserId");
        assert_eq!(pascal_words("userId"), "UserId");
        assert_eq!(pascal_words("--"), "");
    }

    #[test]
    fn test_sanitize_type_name() {
        assert_eq!(sanitize_type_name("User"), "User");
        assert_eq!(sanitize_type_name("user.profile"), "UserProfile");
        assert_eq!(sanitize_type_name("2fa"), "_2fa");
        assert_eq!(sanitize_type_name(""), "_Empty");
    }
}
