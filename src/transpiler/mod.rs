//! SQL compiler for the schema IR.
//!
//! Converts a [`SchemaDefinition`] into ordered DDL text for its dialect.
//! Section order is fixed: header, namespaces, enum types, tables, indexes,
//! foreign keys, junction tables, stored procedures. Empty sections are
//! omitted entirely.

pub mod ddl;
pub mod dialect;
pub mod routines;
pub mod sql;
pub mod traits;
pub mod values;

#[cfg(test)]
mod tests;

use crate::ir::SchemaDefinition;
use chrono::{DateTime, Utc};

pub use dialect::Dialect;
pub use traits::DdlGenerator;

/// Knobs that sit outside the IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Emit the `-- Generated:` header line.
    pub timestamp: bool,
    /// Compile for this dialect instead of the one carried by the schema.
    pub dialect: Option<Dialect>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            timestamp: true,
            dialect: None,
        }
    }
}

/// Stateless IR -> DDL compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlCompiler {
    options: CompileOptions,
}

impl SqlCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self { options }
    }

    /// Compile, stamping the header with the current time.
    pub fn compile(&self, schema: &SchemaDefinition) -> String {
        self.compile_at(schema, Utc::now())
    }

    /// Compile with a fixed generation time. Pure.
    pub fn compile_at(&self, schema: &SchemaDefinition, generated_at: DateTime<Utc>) -> String {
        let dialect = self.options.dialect.unwrap_or(schema.dialect);
        let generator = dialect.generator();
        let generator = generator.as_ref();

        let stamp = self.options.timestamp.then_some(generated_at);
        let header = ddl::build_header(schema, dialect, stamp);

        let tables = ddl::build_tables(schema, generator);
        let indexes = ddl::build_indexes(schema, generator);
        let foreign_keys = ddl::build_foreign_keys(schema, generator);
        let junctions = ddl::build_junction_tables(schema, generator);
        let routines = routines::build_routines(&schema.stored_procedures, generator);

        tracing::debug!(
            schema = %schema.name,
            %dialect,
            tables = tables.len(),
            indexes = indexes.len(),
            foreign_keys = foreign_keys.len(),
            junction_tables = junctions.len(),
            routines = routines.len(),
            "compiled SQL"
        );

        let sections: [(&str, Vec<String>, &str); 7] = [
            ("Schemas", ddl::build_namespaces(schema, generator), "\n"),
            ("Enum types", ddl::build_enum_types(schema, generator), "\n"),
            ("Tables", tables, "\n\n"),
            ("Indexes", indexes, "\n"),
            ("Foreign keys", foreign_keys, "\n"),
            ("Junction tables", junctions, "\n\n"),
            ("Stored procedures", routines, "\n\n"),
        ];

        let mut out = header.join("\n");
        for (title, stmts, separator) in sections {
            if stmts.is_empty() {
                continue;
            }
            out.push_str("\n\n-- ");
            out.push_str(title);
            out.push('\n');
            out.push_str(&stmts.join(separator));
        }
        out.push('\n');
        out
    }
}

/// Trait for converting a schema to DDL text.
pub trait ToDdl {
    /// Convert using the dialect carried by the schema.
    fn to_ddl(&self) -> String;
    /// Convert for a specific dialect.
    fn to_ddl_with_dialect(&self, dialect: Dialect) -> String;
}

impl ToDdl for SchemaDefinition {
    fn to_ddl(&self) -> String {
        SqlCompiler::new().compile(self)
    }

    fn to_ddl_with_dialect(&self, dialect: Dialect) -> String {
        SqlCompiler::with_options(CompileOptions {
            dialect: Some(dialect),
            ..CompileOptions::default()
        })
        .compile(self)
    }
}
