//! Literal string formulas for canvas cells.
//!
//! Cells store formulas, not values. A literal string is written as a
//! double-quoted formula in which embedded double quotes are doubled, so
//! `say "hi"` becomes `"say ""hi"""`.

/// Wraps `text` in a string-literal formula.
///
/// # Examples
///
/// ```
/// # use drafter_core::formula::quote;
/// assert_eq!(quote("Alice"), "\"Alice\"");
/// assert_eq!(quote("6\" wide"), "\"6\"\" wide\"");
/// ```
pub fn quote(text: &str) -> String {
    let mut formula = String::with_capacity(text.len() + 2);
    formula.push('"');
    for ch in text.chars() {
        if ch == '"' {
            formula.push('"');
        }
        formula.push(ch);
    }
    formula.push('"');
    formula
}

/// Evaluates a string-literal formula back to its text.
///
/// Returns `None` when `formula` is not a single well-formed string literal.
///
/// # Examples
///
/// ```
/// # use drafter_core::formula::unquote;
/// assert_eq!(unquote("\"Alice\"").as_deref(), Some("Alice"));
/// assert_eq!(unquote("PinX*2"), None);
/// ```
pub fn unquote(formula: &str) -> Option<String> {
    let inner = formula.strip_prefix('"')?.strip_suffix('"')?;

    let mut text = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '"' {
            // A lone quote would have terminated the literal.
            if chars.next() != Some('"') {
                return None;
            }
        }
        text.push(ch);
    }
    Some(text)
}
