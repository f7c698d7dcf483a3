//! # schemaforge — schema IR to DDL and ER diagrams
//!
//! Two pure compilers read the same [`SchemaDefinition`]:
//!
//! - the SQL compiler emits ordered DDL for PostgreSQL or MySQL;
//! - the diagram compiler emits a Mermaid `erDiagram`.
//!
//! ## Quick Example
//!
//! ```
//! use schemaforge::prelude::*;
//!
//! let schema = SchemaDefinition::new("Blog", Dialect::Postgresql).table(
//!     TableDefinition::new("users")
//!         .column(ColumnDefinition::new("id", ColumnType::Serial).primary_key()),
//! );
//!
//! let sql = schemaforge::compile_sql(&schema);
//! assert!(sql.contains("CREATE TABLE \"users\" ("));
//!
//! let diagram = schemaforge::compile_diagram(&schema);
//! assert!(diagram.contains("serial id \"PK\""));
//! ```
//!
//! ## Output order (SQL)
//!
//! | Section           | PostgreSQL                 | MySQL                     |
//! |-------------------|----------------------------|---------------------------|
//! | Namespaces        | `CREATE SCHEMA IF NOT EXISTS` | ignored                |
//! | Enum types        | `CREATE TYPE ... AS ENUM`  | inline `ENUM(...)`        |
//! | Tables            | `COMMENT ON` statements    | `ENGINE=InnoDB` suffix    |
//! | Indexes           | `USING <method>`           | method ignored            |
//! | Foreign keys      | `ALTER TABLE ... ADD CONSTRAINT` | same                |
//! | Junction tables   | one per many-to-many       | same                      |
//! | Stored procedures | `CREATE OR REPLACE FUNCTION` | `DELIMITER` + `CREATE PROCEDURE` |

pub mod config;
pub mod diagram;
pub mod error;
pub mod export;
pub mod generate;
pub mod ir;
pub mod transpiler;
pub mod workspace;

pub mod prelude {
    pub use crate::diagram::DiagramCompiler;
    pub use crate::error::*;
    pub use crate::export::{Artifact, ExportFormat};
    pub use crate::generate::{
        GenerationRequest, GenerationResponse, RefinementRequest, SchemaGenerator,
    };
    pub use crate::ir::*;
    pub use crate::transpiler::{CompileOptions, SqlCompiler, ToDdl};
    pub use crate::workspace::{CompiledOutputs, SchemaEdit, Workspace};
}

use ir::SchemaDefinition;

/// Compile a schema to DDL for the dialect it carries.
pub fn compile_sql(schema: &SchemaDefinition) -> String {
    transpiler::SqlCompiler::new().compile(schema)
}

/// Compile a schema to a Mermaid ER diagram.
pub fn compile_diagram(schema: &SchemaDefinition) -> String {
    diagram::DiagramCompiler::new().compile(schema)
}
