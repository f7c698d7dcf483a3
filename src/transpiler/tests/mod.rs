//! Transpiler test modules.
//!
//! Tests are organized by category:
//! - `core`: section order, tables, keys, indexes, junction tables (PostgreSQL)
//! - `dialects`: MySQL output and per-dialect type mapping
//! - `routines`: stored procedures and functions

mod routines;

use crate::ir::SchemaDefinition;
use crate::transpiler::SqlCompiler;
use chrono::{DateTime, TimeZone, Utc};

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
}

fn compile(schema: &SchemaDefinition) -> String {
    SqlCompiler::new().compile_at(schema, fixed_time())
}
