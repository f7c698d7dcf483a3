//! The workspace holds the current schema and its compiled outputs.
//!
//! Every state change goes through one install step, which compiles
//! both outputs before swapping schema and outputs in together. A failed
//! edit or generation never touches the current slot.

use crate::diagram::DiagramCompiler;
use crate::error::{ForgeError, ForgeResult};
use crate::export::{Artifact, ExportFormat};
use crate::generate::{GenerationRequest, RefinementRequest, SchemaGenerator};
use crate::ir::{
    Cardinality, ColumnDefinition, Dialect, JunctionTable, RelationshipDefinition,
    SchemaDefinition, TableDefinition,
};
use crate::transpiler::{CompileOptions, SqlCompiler};
use chrono::Utc;

/// Cached compiler outputs for the current schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledOutputs {
    pub sql: String,
    pub diagram: String,
}

/// An interactive edit to the current schema.
///
/// Tables, columns and relationships are addressed by id.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaEdit {
    Rename(String),
    SetDescription(String),
    SetDialect(Dialect),
    AddTable(TableDefinition),
    UpdateTable(TableDefinition),
    RemoveTable { table_id: String },
    AddColumn { table_id: String, column: ColumnDefinition },
    UpdateColumn { table_id: String, column: ColumnDefinition },
    RemoveColumn { table_id: String, column_id: String },
    AddRelationship(RelationshipDefinition),
    UpdateRelationship(RelationshipDefinition),
    RemoveRelationship { relationship_id: String },
    SetCardinality {
        relationship_id: String,
        cardinality: Cardinality,
    },
}

#[derive(Debug, Clone)]
struct Slot {
    schema: SchemaDefinition,
    outputs: CompiledOutputs,
}

/// Holder of the current schema.
#[derive(Debug, Clone, Default)]
pub struct Workspace {
    compiler: SqlCompiler,
    current: Option<Slot>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CompileOptions) -> Self {
        Self {
            compiler: SqlCompiler::with_options(options),
            current: None,
        }
    }

    pub fn current(&self) -> Option<&SchemaDefinition> {
        self.current.as_ref().map(|s| &s.schema)
    }

    pub fn outputs(&self) -> Option<&CompiledOutputs> {
        self.current.as_ref().map(|s| &s.outputs)
    }

    /// Replace the current schema wholesale.
    pub fn load(&mut self, schema: SchemaDefinition) -> &SchemaDefinition {
        self.install(schema)
    }

    pub fn clear(&mut self) {
        if self.current.take().is_some() {
            tracing::info!("cleared workspace");
        }
    }

    fn install(&mut self, schema: SchemaDefinition) -> &SchemaDefinition {
        let outputs = CompiledOutputs {
            sql: self.compiler.compile(&schema),
            diagram: DiagramCompiler::new().compile(&schema),
        };
        tracing::info!(
            schema = %schema.name,
            tables = schema.tables.len(),
            relationships = schema.relationships.len(),
            "installed schema"
        );
        &self.current.insert(Slot { schema, outputs }).schema
    }

    /// Apply an edit to a copy of the current schema; install it on success.
    pub fn apply(&mut self, edit: SchemaEdit) -> ForgeResult<&SchemaDefinition> {
        let mut schema = self.current().ok_or(ForgeError::NoSchema)?.clone();
        apply_edit(&mut schema, edit)?;
        schema.updated_at = Utc::now();
        Ok(self.install(schema))
    }

    /// Ask the generator for a new schema. On any failure the current
    /// schema stays in place.
    pub async fn generate<G: SchemaGenerator>(
        &mut self,
        generator: &G,
        request: &GenerationRequest,
    ) -> ForgeResult<&SchemaDefinition> {
        let schema = generator
            .generate(request)
            .await
            .and_then(|resp| resp.into_schema())
            .inspect_err(|e| tracing::warn!(error = %e, "generation rejected"))?;
        Ok(self.install(schema))
    }

    /// Ask the generator to refine the current schema.
    pub async fn refine<G: SchemaGenerator>(
        &mut self,
        generator: &G,
        instruction: impl Into<String>,
    ) -> ForgeResult<&SchemaDefinition> {
        let request = RefinementRequest {
            schema: self.current().ok_or(ForgeError::NoSchema)?.clone(),
            instruction: instruction.into(),
        };
        let schema = generator
            .refine(&request)
            .await
            .and_then(|resp| resp.into_schema())
            .inspect_err(|e| tracing::warn!(error = %e, "refinement rejected"))?;
        Ok(self.install(schema))
    }

    /// Build an export artifact from the cached outputs.
    pub fn export(&self, format: ExportFormat) -> ForgeResult<Artifact> {
        let slot = self.current.as_ref().ok_or(ForgeError::NoSchema)?;
        let contents = match format {
            ExportFormat::Sql => slot.outputs.sql.clone(),
            ExportFormat::Diagram => slot.outputs.diagram.clone(),
            ExportFormat::Json => serde_json::to_string_pretty(&slot.schema)?,
        };
        Ok(Artifact::new(&slot.schema.name, format, contents))
    }
}

/// Keep the junction descriptor present iff the relationship is many-to-many.
pub fn normalize_junction(rel: &mut RelationshipDefinition) {
    match rel.cardinality {
        Cardinality::ManyToMany => {
            if rel.junction_table.is_none() {
                rel.junction_table = Some(JunctionTable::for_tables(
                    &rel.source_table,
                    &rel.target_table,
                ));
            }
        }
        _ => rel.junction_table = None,
    }
}

fn table_mut<'a>(
    schema: &'a mut SchemaDefinition,
    table_id: &str,
) -> ForgeResult<&'a mut TableDefinition> {
    schema
        .tables
        .iter_mut()
        .find(|t| t.id == table_id)
        .ok_or_else(|| ForgeError::not_found("Table", table_id))
}

fn relationship_mut<'a>(
    schema: &'a mut SchemaDefinition,
    relationship_id: &str,
) -> ForgeResult<&'a mut RelationshipDefinition> {
    schema
        .relationships
        .iter_mut()
        .find(|r| r.id == relationship_id)
        .ok_or_else(|| ForgeError::not_found("Relationship", relationship_id))
}

fn ensure_unique_table_name(
    schema: &SchemaDefinition,
    name: &str,
    except_id: Option<&str>,
) -> ForgeResult<()> {
    let clash = schema
        .tables
        .iter()
        .any(|t| t.name == name && Some(t.id.as_str()) != except_id);
    if clash {
        return Err(ForgeError::invalid(format!("table '{}' already exists", name)));
    }
    Ok(())
}

/// Point every relationship and foreign key at a renamed table.
fn rename_table_references(schema: &mut SchemaDefinition, from: &str, to: &str) {
    for rel in &mut schema.relationships {
        if rel.source_table == from {
            rel.source_table = to.to_string();
        }
        if rel.target_table == from {
            rel.target_table = to.to_string();
        }
    }
    for fk in schema.tables.iter_mut().flat_map(|t| t.foreign_keys.iter_mut()) {
        if fk.referenced_table == from {
            fk.referenced_table = to.to_string();
        }
    }
}

fn apply_edit(schema: &mut SchemaDefinition, edit: SchemaEdit) -> ForgeResult<()> {
    match edit {
        SchemaEdit::Rename(name) => schema.name = name,
        SchemaEdit::SetDescription(text) => schema.description = text,
        SchemaEdit::SetDialect(dialect) => schema.dialect = dialect,
        SchemaEdit::AddTable(table) => {
            ensure_unique_table_name(schema, &table.name, None)?;
            schema.tables.push(table);
        }
        SchemaEdit::UpdateTable(table) => {
            ensure_unique_table_name(schema, &table.name, Some(&table.id))?;
            let slot = table_mut(schema, &table.id)?;
            let old_name = std::mem::replace(slot, table).name;
            let new_name = slot.name.clone();
            if old_name != new_name {
                rename_table_references(schema, &old_name, &new_name);
            }
        }
        SchemaEdit::RemoveTable { table_id } => {
            let name = table_mut(schema, &table_id)?.name.clone();
            schema.tables.retain(|t| t.id != table_id);
            schema
                .relationships
                .retain(|r| r.source_table != name && r.target_table != name);
            for table in &mut schema.tables {
                table.foreign_keys.retain(|fk| fk.referenced_table != name);
            }
        }
        SchemaEdit::AddColumn { table_id, column } => {
            let table = table_mut(schema, &table_id)?;
            if table.columns.iter().any(|c| c.name == column.name) {
                return Err(ForgeError::invalid(format!(
                    "column '{}' already exists on '{}'",
                    column.name, table.name
                )));
            }
            table.columns.push(column);
        }
        SchemaEdit::UpdateColumn { table_id, column } => {
            let table = table_mut(schema, &table_id)?;
            if table
                .columns
                .iter()
                .any(|c| c.name == column.name && c.id != column.id)
            {
                return Err(ForgeError::invalid(format!(
                    "column '{}' already exists on '{}'",
                    column.name, table.name
                )));
            }
            let slot = table
                .columns
                .iter_mut()
                .find(|c| c.id == column.id)
                .ok_or_else(|| ForgeError::not_found("Column", column.id.clone()))?;
            *slot = column;
        }
        SchemaEdit::RemoveColumn {
            table_id,
            column_id,
        } => {
            let table = table_mut(schema, &table_id)?;
            let before = table.columns.len();
            table.columns.retain(|c| c.id != column_id);
            if table.columns.len() == before {
                return Err(ForgeError::not_found("Column", column_id));
            }
        }
        SchemaEdit::AddRelationship(mut rel) => {
            normalize_junction(&mut rel);
            schema.relationships.push(rel);
        }
        SchemaEdit::UpdateRelationship(mut rel) => {
            normalize_junction(&mut rel);
            let id = rel.id.clone();
            *relationship_mut(schema, &id)? = rel;
        }
        SchemaEdit::RemoveRelationship { relationship_id } => {
            relationship_mut(schema, &relationship_id)?;
            schema.relationships.retain(|r| r.id != relationship_id);
        }
        SchemaEdit::SetCardinality {
            relationship_id,
            cardinality,
        } => {
            let rel = relationship_mut(schema, &relationship_id)?;
            rel.cardinality = cardinality;
            normalize_junction(rel);
        }
    }
    Ok(())
}
