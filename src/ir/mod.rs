//! Intermediate representation shared by the SQL and diagram compilers.

pub mod schema;
pub mod types;

pub use schema::{
    ColumnDefinition, DefaultValue, ForeignKeyDefinition, IndexDefinition, JunctionTable,
    ProcedureParameter, RelationshipDefinition, SchemaDefinition, StoredProcedureDefinition,
    TableDefinition, new_id,
};
pub use types::{
    Cardinality, ColumnType, Dialect, IndexMethod, ParameterDirection, ReferentialAction,
    ReturnType,
};
