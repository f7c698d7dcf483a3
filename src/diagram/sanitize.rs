//! Name sanitization for Mermaid ER syntax.

/// Entity/attribute names must be bare identifiers: anything outside
/// `[A-Za-z0-9_]` becomes `_`.
pub fn sanitize_identifier(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "_".to_string()
    } else {
        cleaned
    }
}

/// Relationship labels are quoted, so spaces survive; other punctuation is
/// dropped and whitespace runs collapse to one space.
pub fn sanitize_label(label: &str) -> String {
    label
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
