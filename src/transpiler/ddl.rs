//! DDL section builders.
//!
//! Each builder returns the statements of one output section; the compiler
//! in [`super`] decides order and spacing. Nothing here inspects the dialect
//! directly: every difference goes through the [`DdlGenerator`].

use super::traits::{DdlGenerator, enum_type_name, quote_string};
use super::values::format_default;
use crate::ir::{
    Cardinality, ColumnDefinition, ColumnType, Dialect, IndexMethod, RelationshipDefinition,
    SchemaDefinition, TableDefinition,
};
use chrono::{DateTime, SecondsFormat, Utc};

/// Indentation of lines inside CREATE TABLE.
const INDENT: &str = "    ";

/// Header comment lines: name, dialect, timestamp, description.
pub fn build_header(
    schema: &SchemaDefinition,
    dialect: Dialect,
    generated_at: Option<DateTime<Utc>>,
) -> Vec<String> {
    let mut lines = vec![
        format!("-- Schema: {}", single_line(&schema.name)),
        format!("-- Dialect: {}", dialect.label()),
    ];
    if let Some(at) = generated_at {
        lines.push(format!(
            "-- Generated: {}",
            at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
    }
    lines.extend(
        schema
            .description
            .lines()
            .map(|l| format!("-- {}", l).trim_end().to_string()),
    );
    lines
}

fn single_line(text: &str) -> String {
    text.lines().collect::<Vec<_>>().join(" ")
}

/// Table name qualified with its namespace where the dialect supports it.
pub fn table_name(table: &TableDefinition, generator: &dyn DdlGenerator) -> String {
    generator.qualify(table.namespace(), &table.name)
}

/// Qualify a table referenced by name, resolving its namespace from the schema.
///
/// Unknown names are quoted as-is.
pub fn referenced_table_name(
    schema: &SchemaDefinition,
    name: &str,
    generator: &dyn DdlGenerator,
) -> String {
    let namespace = schema.find_table(name).and_then(|t| t.namespace());
    generator.qualify(namespace, name)
}

fn column_list<'a, I>(columns: I, generator: &dyn DdlGenerator) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    columns
        .into_iter()
        .map(|c| generator.quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// `CREATE SCHEMA IF NOT EXISTS` per distinct non-default namespace.
pub fn build_namespaces(schema: &SchemaDefinition, generator: &dyn DdlGenerator) -> Vec<String> {
    if !generator.supports_namespaces() {
        return Vec::new();
    }
    let mut seen: Vec<&str> = Vec::new();
    for ns in schema.tables.iter().filter_map(|t| t.namespace()) {
        if !seen.contains(&ns) {
            seen.push(ns);
        }
    }
    seen.into_iter()
        .map(|ns| {
            format!(
                "CREATE SCHEMA IF NOT EXISTS {};",
                generator.quote_identifier(ns)
            )
        })
        .collect()
}

/// Named enum types for dialects that declare them separately.
pub fn build_enum_types(schema: &SchemaDefinition, generator: &dyn DdlGenerator) -> Vec<String> {
    if !generator.declares_enum_types() {
        return Vec::new();
    }
    schema
        .tables
        .iter()
        .flat_map(|t| t.columns.iter().map(move |c| (t, c)))
        .filter(|(_, c)| c.column_type == ColumnType::Enum && !c.enum_values.is_empty())
        .map(|(t, c)| {
            let values = c
                .enum_values
                .iter()
                .map(|v| quote_string(v))
                .collect::<Vec<_>>()
                .join(", ");
            format!(
                "CREATE TYPE {} AS ENUM ({});",
                generator.quote_identifier(&enum_type_name(&t.name, &c.name)),
                values
            )
        })
        .collect()
}

/// One column line inside CREATE TABLE (without trailing comma).
pub fn build_column(
    table: &TableDefinition,
    column: &ColumnDefinition,
    generator: &dyn DdlGenerator,
) -> String {
    let mut line = format!(
        "{}{} {}",
        INDENT,
        generator.quote_identifier(&column.name),
        generator.column_type(&table.name, column)
    );

    // PRIMARY KEY already implies NOT NULL and uniqueness.
    if !column.is_primary_key {
        if !column.is_nullable {
            line.push_str(" NOT NULL");
        }
        if column.is_unique {
            line.push_str(" UNIQUE");
        }
    }

    if let Some(value) = &column.default_value {
        line.push_str(" DEFAULT ");
        line.push_str(&format_default(value, generator));
    }

    if let Some(clause) = column
        .comment
        .as_deref()
        .and_then(|c| generator.inline_column_comment(c))
    {
        line.push(' ');
        line.push_str(&clause);
    }

    line
}

/// CREATE TABLE for one table, followed by any comment statements.
pub fn build_create_table(table: &TableDefinition, generator: &dyn DdlGenerator) -> String {
    let name = table_name(table, generator);

    let mut defs: Vec<String> = table
        .columns
        .iter()
        .map(|c| build_column(table, c, generator))
        .collect();

    let pk: Vec<&str> = table.primary_key_columns().map(|c| c.name.as_str()).collect();
    if !pk.is_empty() {
        defs.push(format!("{}PRIMARY KEY ({})", INDENT, column_list(pk, generator)));
    }

    let mut sql = format!("CREATE TABLE {} (\n", name);
    sql.push_str(&defs.join(",\n"));
    if !defs.is_empty() {
        sql.push('\n');
    }
    sql.push(')');
    sql.push_str(&generator.table_suffix(table.comment.as_deref()));
    sql.push(';');

    for stmt in generator.comment_statements(&name, table.comment.as_deref(), &table.columns) {
        sql.push('\n');
        sql.push_str(&stmt);
    }
    sql
}

/// CREATE TABLE for every table, in schema order.
pub fn build_tables(schema: &SchemaDefinition, generator: &dyn DdlGenerator) -> Vec<String> {
    schema
        .tables
        .iter()
        .map(|t| build_create_table(t, generator))
        .collect()
}

/// CREATE [UNIQUE] INDEX for every index of every table.
pub fn build_indexes(schema: &SchemaDefinition, generator: &dyn DdlGenerator) -> Vec<String> {
    let mut stmts = Vec::new();
    for table in &schema.tables {
        let name = table_name(table, generator);
        for idx in &table.indexes {
            let unique = if idx.is_unique { "UNIQUE " } else { "" };
            let using = match idx.method {
                Some(method) if generator.supports_index_method() && method != IndexMethod::Btree => {
                    format!(" USING {}", method.as_sql())
                }
                _ => String::new(),
            };
            stmts.push(format!(
                "CREATE {}INDEX {} ON {}{} ({});",
                unique,
                generator.quote_identifier(&idx.name),
                name,
                using,
                column_list(idx.columns.iter().map(String::as_str), generator)
            ));
        }
    }
    stmts
}

/// ALTER TABLE ... ADD CONSTRAINT for every declared foreign key.
///
/// Emitted after all tables, so declaration order never matters.
pub fn build_foreign_keys(schema: &SchemaDefinition, generator: &dyn DdlGenerator) -> Vec<String> {
    let mut stmts = Vec::new();
    for table in &schema.tables {
        let name = table_name(table, generator);
        for fk in &table.foreign_keys {
            let mut stmt = format!(
                "ALTER TABLE {} ADD CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {}",
                name,
                generator.quote_identifier(&fk.name),
                generator.quote_identifier(&fk.column),
                referenced_table_name(schema, &fk.referenced_table, generator),
                generator.quote_identifier(&fk.referenced_column),
                fk.on_delete.as_sql()
            );
            if let Some(action) = fk.on_update {
                stmt.push_str(" ON UPDATE ");
                stmt.push_str(action.as_sql());
            }
            stmt.push(';');
            stmts.push(stmt);
        }
    }
    stmts
}

/// Junction table for one many-to-many relationship, if it has a descriptor.
pub fn build_junction_table(
    schema: &SchemaDefinition,
    rel: &RelationshipDefinition,
    generator: &dyn DdlGenerator,
) -> Option<String> {
    if rel.cardinality != Cardinality::ManyToMany {
        return None;
    }
    let junction = rel.junction_table.as_ref()?;

    let key_type = generator.type_keyword(ColumnType::Integer);
    let created_type = generator.type_keyword(ColumnType::Timestamp);
    let src = generator.quote_identifier(&junction.source_column);
    let tgt = generator.quote_identifier(&junction.target_column);

    let fk = |column: &str, quoted: &str, table: &str, referenced: &str| {
        format!(
            "{}CONSTRAINT {} FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE CASCADE",
            INDENT,
            generator.quote_identifier(&format!("fk_{}_{}", junction.name, column)),
            quoted,
            referenced_table_name(schema, table, generator),
            generator.quote_identifier(referenced)
        )
    };

    let defs = [
        format!("{}{} {}", INDENT, src, key_type),
        format!("{}{} {}", INDENT, tgt, key_type),
        format!(
            "{}{} {} DEFAULT CURRENT_TIMESTAMP",
            INDENT,
            generator.quote_identifier("created_at"),
            created_type
        ),
        format!("{}PRIMARY KEY ({}, {})", INDENT, src, tgt),
        fk(&junction.source_column, &src, &rel.source_table, &rel.source_column),
        fk(&junction.target_column, &tgt, &rel.target_table, &rel.target_column),
    ];

    Some(format!(
        "CREATE TABLE {} (\n{}\n){};",
        generator.quote_identifier(&junction.name),
        defs.join(",\n"),
        generator.table_suffix(None)
    ))
}

/// Junction tables for every many-to-many relationship.
pub fn build_junction_tables(
    schema: &SchemaDefinition,
    generator: &dyn DdlGenerator,
) -> Vec<String> {
    schema
        .relationships
        .iter()
        .filter_map(|r| build_junction_table(schema, r, generator))
        .collect()
}
