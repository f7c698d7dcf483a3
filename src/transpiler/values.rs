//! Default-value formatting.

use super::traits::{DdlGenerator, quote_string};
use crate::ir::DefaultValue;

/// Markers that make a string default an SQL expression rather than a literal.
/// Matched case-insensitively anywhere in the value.
pub const FUNCTION_MARKERS: &[&str] = &["CURRENT_TIMESTAMP", "NOW()", "UUID"];

/// Whether a string default should be emitted verbatim as an expression.
pub fn is_sql_expression(value: &str) -> bool {
    let upper = value.to_uppercase();
    FUNCTION_MARKERS.iter().any(|m| upper.contains(m))
}

/// Render a default value for the generator's dialect.
pub fn format_default(value: &DefaultValue, generator: &dyn DdlGenerator) -> String {
    match value {
        DefaultValue::Null => "NULL".to_string(),
        DefaultValue::Bool(b) => generator.bool_literal(*b).to_string(),
        DefaultValue::Number(n) => n.to_string(),
        DefaultValue::String(s) if is_sql_expression(s) => s.clone(),
        DefaultValue::String(s) => quote_string(s),
    }
}
