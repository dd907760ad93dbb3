//! Literal escaping for the predicate text DSL
//!
//! Pure, total "search escape": quote and backslash-escape a text literal
//! only when it needs it. Safe strings (letters, digits, underscore) pass
//! through unchanged.

/// Escapes a text literal for the predicate grammar
///
/// - Empty input yields the two-character literal `""`
/// - `"` and `\` are each preceded by an extra `\`
/// - Any character outside `[A-Za-z0-9_]` (unicode letters/digits included)
///   forces surrounding quotes
pub fn search_escape(s: &str) -> String {
    if s.is_empty() {
        return "\"\"".to_string();
    }

    let mut escaped = String::with_capacity(s.len());
    let mut quote = false;

    for c in s.chars() {
        if c == '"' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);

        quote |= !(c.is_alphanumeric() || c == '_');
    }

    if quote || escaped.len() != s.len() {
        let mut quoted = String::with_capacity(escaped.len() + 2);
        quoted.push('"');
        quoted.push_str(&escaped);
        quoted.push('"');
        quoted
    } else {
        s.to_string()
    }
}
