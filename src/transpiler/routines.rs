//! Stored procedures and functions.
//!
//! Bodies are opaque: they are wrapped, never parsed.

use super::traits::DdlGenerator;
use crate::ir::{ColumnType, ProcedureParameter, StoredProcedureDefinition};

/// Procedural language used when a PostgreSQL function does not name one.
pub const DEFAULT_LANGUAGE: &str = "plpgsql";

/// Emit one CREATE statement per stored procedure, in declaration order.
pub fn build_routines(
    routines: &[StoredProcedureDefinition],
    generator: &dyn DdlGenerator,
) -> Vec<String> {
    routines.iter().map(|r| generator.create_routine(r)).collect()
}

/// Type of a parameter or scalar return value.
///
/// Routines have no column to hang a length or enum type on, so enums fall
/// back to the dialect's plain text type.
pub fn routine_type(generator: &dyn DdlGenerator, ty: ColumnType) -> String {
    if ty == ColumnType::Enum {
        generator.empty_enum_type().to_string()
    } else {
        generator.scalar_type(ty, None, None, None)
    }
}

/// Parameter name and type, without direction or default.
pub fn parameter_decl(generator: &dyn DdlGenerator, param: &ProcedureParameter) -> String {
    format!(
        "{} {}",
        generator.quote_identifier(&param.name),
        routine_type(generator, param.param_type)
    )
}

/// Body with trailing line breaks removed.
pub fn body_text(routine: &StoredProcedureDefinition) -> &str {
    routine.body.trim_end_matches(['\n', '\r'])
}

/// A dollar-quote tag that does not occur inside `body`.
pub fn dollar_tag(body: &str) -> String {
    if !body.contains("$$") {
        return "$$".to_string();
    }
    let mut candidate = "$body$".to_string();
    let mut n = 1;
    while body.contains(&candidate) {
        candidate = format!("$body{}$", n);
        n += 1;
    }
    candidate
}

/// `-- comment` lines preceding a routine, one per comment line.
pub fn comment_lines(routine: &StoredProcedureDefinition) -> Vec<String> {
    routine
        .comment
        .as_deref()
        .map(|c| c.lines().map(|l| format!("-- {}", l).trim_end().to_string()).collect())
        .unwrap_or_default()
}
