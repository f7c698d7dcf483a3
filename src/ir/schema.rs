//! Schema definitions (the IR both compilers read).
//!
//! ```json
//! {
//!   "name": "Blog",
//!   "dialect": "postgresql",
//!   "tables": [
//!     { "name": "users",
//!       "columns": [
//!         { "name": "id", "type": "serial", "isPrimaryKey": true, "isNullable": false }
//!       ] }
//!   ]
//! }
//! ```
//!
//! Values are replaced wholesale by the workspace; the compilers only read.

use super::types::{
    Cardinality, ColumnType, Dialect, IndexMethod, ParameterDirection, ReferentialAction,
    ReturnType,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Fresh identity for entities created locally.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_true() -> bool {
    true
}

/// Distinguishes an explicit JSON `null` default from an absent one.
fn present<'de, D>(deserializer: D) -> Result<Option<DefaultValue>, D::Error>
where
    D: Deserializer<'de>,
{
    DefaultValue::deserialize(deserializer).map(Some)
}

/// A complete database schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaDefinition {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub dialect: Dialect,
    #[serde(default)]
    pub tables: Vec<TableDefinition>,
    #[serde(default)]
    pub relationships: Vec<RelationshipDefinition>,
    #[serde(default)]
    pub stored_procedures: Vec<StoredProcedureDefinition>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// A table definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDefinition {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    /// Namespace qualifier, honored by PostgreSQL only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
    #[serde(default)]
    pub indexes: Vec<IndexDefinition>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKeyDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A column definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default = "default_true")]
    pub is_nullable: bool,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<DefaultValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Column or parameter default as authored upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl From<bool> for DefaultValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for DefaultValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for DefaultValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// An index definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexDefinition {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub is_unique: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<IndexMethod>,
}

/// A foreign key declared on its owning table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyDefinition {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: String,
    #[serde(default)]
    pub on_delete: ReferentialAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<ReferentialAction>,
}

/// A relationship between two tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipDefinition {
    #[serde(default = "new_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    pub cardinality: Cardinality,
    #[serde(default)]
    pub on_delete: ReferentialAction,
    /// Present if and only if the cardinality is many-to-many.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub junction_table: Option<JunctionTable>,
}

/// Auxiliary table materializing a many-to-many relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JunctionTable {
    pub name: String,
    pub source_column: String,
    pub target_column: String,
}

/// A stored procedure or function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProcedureDefinition {
    #[serde(default = "new_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ProcedureParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<ReturnType>,
    /// Dialect-specific procedural SQL, passed through untouched.
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A stored-procedure parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcedureParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ColumnType,
    #[serde(default)]
    pub direction: ParameterDirection,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<DefaultValue>,
}

impl SchemaDefinition {
    pub fn new(name: impl Into<String>, dialect: Dialect) -> Self {
        let now = Utc::now();
        Self {
            id: new_id(),
            name: name.into(),
            description: String::new(),
            dialect,
            tables: Vec::new(),
            relationships: Vec::new(),
            stored_procedures: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    pub fn table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    pub fn relationship(mut self, rel: RelationshipDefinition) -> Self {
        self.relationships.push(rel);
        self
    }

    pub fn procedure(mut self, proc: StoredProcedureDefinition) -> Self {
        self.stored_procedures.push(proc);
        self
    }

    /// Look up a table by name.
    pub fn find_table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.iter().find(|t| t.name == name)
    }
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            schema: None,
            columns: Vec::new(),
            indexes: Vec::new(),
            foreign_keys: Vec::new(),
            comment: None,
        }
    }

    pub fn in_schema(mut self, namespace: impl Into<String>) -> Self {
        self.schema = Some(namespace.into());
        self
    }

    pub fn column(mut self, col: ColumnDefinition) -> Self {
        self.columns.push(col);
        self
    }

    pub fn index(mut self, idx: IndexDefinition) -> Self {
        self.indexes.push(idx);
        self
    }

    pub fn foreign_key(mut self, fk: ForeignKeyDefinition) -> Self {
        self.foreign_keys.push(fk);
        self
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }

    /// Primary-key columns in declaration order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &ColumnDefinition> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }

    /// The namespace if it is something other than the server default.
    pub fn namespace(&self) -> Option<&str> {
        self.schema
            .as_deref()
            .map(str::trim)
            .filter(|ns| !ns.is_empty() && !ns.eq_ignore_ascii_case("public"))
    }
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            column_type,
            length: None,
            precision: None,
            scale: None,
            is_primary_key: false,
            is_nullable: true,
            is_unique: false,
            default_value: None,
            enum_values: Vec::new(),
            comment: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.is_nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.is_nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn length(mut self, len: u32) -> Self {
        self.length = Some(len);
        self
    }

    pub fn precision(mut self, precision: u32, scale: u32) -> Self {
        self.precision = Some(precision);
        self.scale = Some(scale);
        self
    }

    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }
}

impl IndexDefinition {
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: new_id(),
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            is_unique: false,
            method: None,
        }
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn using(mut self, method: IndexMethod) -> Self {
        self.method = Some(method);
        self
    }
}

impl ForeignKeyDefinition {
    pub fn new(
        name: impl Into<String>,
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            column: column.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
            on_delete: ReferentialAction::NoAction,
            on_update: None,
        }
    }

    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = action;
        self
    }

    pub fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = Some(action);
        self
    }
}

impl RelationshipDefinition {
    pub fn new(
        source: (&str, &str),
        target: (&str, &str),
        cardinality: Cardinality,
    ) -> Self {
        Self {
            id: new_id(),
            name: String::new(),
            source_table: source.0.to_string(),
            source_column: source.1.to_string(),
            target_table: target.0.to_string(),
            target_column: target.1.to_string(),
            cardinality,
            on_delete: ReferentialAction::NoAction,
            junction_table: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn junction(mut self, junction: JunctionTable) -> Self {
        self.junction_table = Some(junction);
        self
    }
}

impl JunctionTable {
    /// Deterministic junction naming for a source/target table pair.
    pub fn for_tables(source: &str, target: &str) -> Self {
        let (source_column, target_column) = if source == target {
            (format!("source_{}_id", source), format!("target_{}_id", target))
        } else {
            (format!("{}_id", source), format!("{}_id", target))
        };
        Self {
            name: format!("{}_{}", source, target),
            source_column,
            target_column,
        }
    }
}

impl StoredProcedureDefinition {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            parameters: Vec::new(),
            return_type: None,
            body: body.into(),
            language: None,
            comment: None,
        }
    }

    pub fn param(mut self, param: ProcedureParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn returns(mut self, ret: ReturnType) -> Self {
        self.return_type = Some(ret);
        self
    }

    pub fn language(mut self, lang: impl Into<String>) -> Self {
        self.language = Some(lang.into());
        self
    }

    pub fn comment(mut self, text: impl Into<String>) -> Self {
        self.comment = Some(text.into());
        self
    }
}

impl ProcedureParameter {
    pub fn new(name: impl Into<String>, param_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            param_type,
            direction: ParameterDirection::In,
            default_value: None,
        }
    }

    pub fn direction(mut self, direction: ParameterDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}
