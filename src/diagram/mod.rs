//! ER diagram compiler (Mermaid `erDiagram` syntax).
//!
//! Dialect-agnostic and deterministic: no timestamps, no hidden state.
//!
//! ```text
//! erDiagram
//!     users {
//!         serial id "PK"
//!         varchar email "UK"
//!     }
//!     posts {
//!         serial id "PK"
//!         int user_id
//!     }
//!
//!     users ||--o{ posts : "writes"
//! ```

pub mod sanitize;

use crate::ir::{
    Cardinality, ColumnDefinition, ColumnType, RelationshipDefinition, SchemaDefinition,
    TableDefinition,
};
pub use sanitize::{sanitize_identifier, sanitize_label};
use std::collections::HashSet;

/// First line of every diagram.
pub const HEADER: &str = "erDiagram";

/// Mermaid connector for a cardinality.
pub fn notation(cardinality: Cardinality) -> &'static str {
    match cardinality {
        Cardinality::OneToOne => "||--||",
        Cardinality::OneToMany => "||--o{",
        Cardinality::ManyToMany => "}o--o{",
    }
}

/// Lowercase, cosmetic type label. Not meant to round-trip.
pub fn type_label(ty: ColumnType) -> &'static str {
    match ty {
        ColumnType::Integer => "int",
        other => other.name(),
    }
}

/// Stateless IR -> ER diagram compiler.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagramCompiler;

impl DiagramCompiler {
    pub fn new() -> Self {
        Self
    }

    pub fn compile(&self, schema: &SchemaDefinition) -> String {
        let mut output = String::from(HEADER);
        output.push('\n');

        for table in &schema.tables {
            serialize_entity(&mut output, table);
        }

        let implicit = implicit_relationships(schema);

        tracing::debug!(
            schema = %schema.name,
            entities = schema.tables.len(),
            relationships = schema.relationships.len(),
            inferred = implicit.len(),
            "compiled diagram"
        );

        if schema.relationships.is_empty() && implicit.is_empty() {
            return output;
        }

        output.push('\n');
        for rel in &schema.relationships {
            serialize_relationship(
                &mut output,
                &rel.source_table,
                notation(rel.cardinality),
                &rel.target_table,
                &explicit_label(rel),
            );
        }
        for (parent, child) in implicit {
            serialize_relationship(
                &mut output,
                parent,
                notation(Cardinality::OneToMany),
                child,
                &sanitize_label(&format!("has_{}", child)),
            );
        }
        output
    }
}

fn serialize_entity(output: &mut String, table: &TableDefinition) {
    output.push_str("    ");
    output.push_str(&sanitize_identifier(&table.name));
    output.push_str(" {\n");
    for col in &table.columns {
        serialize_column(output, col);
    }
    output.push_str("    }\n");
}

fn serialize_column(output: &mut String, col: &ColumnDefinition) {
    output.push_str("        ");
    output.push_str(type_label(col.column_type));
    output.push(' ');
    output.push_str(&sanitize_identifier(&col.name));
    // One marker per column; PK wins.
    if col.is_primary_key {
        output.push_str(" \"PK\"");
    } else if col.is_unique {
        output.push_str(" \"UK\"");
    }
    output.push('\n');
}

fn serialize_relationship(
    output: &mut String,
    source: &str,
    connector: &str,
    target: &str,
    label: &str,
) {
    output.push_str(&format!(
        "    {} {} {} : \"{}\"\n",
        sanitize_identifier(source),
        connector,
        sanitize_identifier(target),
        label
    ));
}

/// Relationship name if it survives sanitization, else `<source>_to_<target>`.
fn explicit_label(rel: &RelationshipDefinition) -> String {
    let named = sanitize_label(&rel.name);
    if named.is_empty() {
        sanitize_label(&format!("{}_to_{}", rel.source_table, rel.target_table))
    } else {
        named
    }
}

fn pair_key<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Foreign keys not covered by an explicit relationship, as
/// `(referenced table, owning table)` edges.
///
/// Coverage is by unordered table pair only: a second foreign key between
/// the same two tables never adds another edge.
pub fn implicit_relationships(schema: &SchemaDefinition) -> Vec<(&str, &str)> {
    let covered: HashSet<(&str, &str)> = schema
        .relationships
        .iter()
        .map(|r| pair_key(&r.source_table, &r.target_table))
        .collect();

    let (_, edges) = schema
        .tables
        .iter()
        .flat_map(|t| {
            t.foreign_keys
                .iter()
                .map(move |fk| (t.name.as_str(), fk.referenced_table.as_str()))
        })
        .fold(
            (covered, Vec::new()),
            |(mut seen, mut edges), (owner, referenced)| {
                if seen.insert(pair_key(owner, referenced)) {
                    edges.push((referenced, owner));
                }
                (seen, edges)
            },
        );
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{ForeignKeyDefinition, RelationshipDefinition, TableDefinition};
    use pretty_assertions::assert_eq;

    fn fk(name: &str, column: &str, table: &str) -> ForeignKeyDefinition {
        ForeignKeyDefinition::new(name, column, table, "id")
    }

    #[test]
    fn test_notation_table() {
        assert_eq!(notation(Cardinality::OneToOne), "||--||");
        assert_eq!(notation(Cardinality::OneToMany), "||--o{");
        assert_eq!(notation(Cardinality::ManyToMany), "}o--o{");
    }

    #[test]
    fn test_type_labels() {
        assert_eq!(type_label(ColumnType::Integer), "int");
        assert_eq!(type_label(ColumnType::Timestamptz), "timestamptz");
        assert_eq!(type_label(ColumnType::Jsonb), "jsonb");
    }

    #[test]
    fn test_implicit_skips_explicit_pair_in_either_direction() {
        let schema = SchemaDefinition::new("s", Default::default())
            .table(TableDefinition::new("users"))
            .table(
                TableDefinition::new("posts").foreign_key(fk("fk_posts_user", "user_id", "users")),
            )
            .relationship(RelationshipDefinition::new(
                ("posts", "user_id"),
                ("users", "id"),
                Cardinality::OneToOne,
            ));
        assert!(implicit_relationships(&schema).is_empty());
    }

    #[test]
    fn test_implicit_dedups_same_pair() {
        // Known limitation: two FKs to the same table yield one inferred edge.
        let schema = SchemaDefinition::new("s", Default::default())
            .table(TableDefinition::new("users"))
            .table(
                TableDefinition::new("messages")
                    .foreign_key(fk("fk_sender", "sender_id", "users"))
                    .foreign_key(fk("fk_recipient", "recipient_id", "users")),
            );
        assert_eq!(implicit_relationships(&schema), vec![("users", "messages")]);
    }

    #[test]
    fn test_primary_key_marker_wins_over_unique() {
        let schema = SchemaDefinition::new("s", Default::default()).table(
            TableDefinition::new("people")
                .column(
                    ColumnDefinition::new("id", ColumnType::Integer)
                        .primary_key()
                        .unique(),
                )
                .column(ColumnDefinition::new("first name", ColumnType::Text).unique()),
        );
        let diagram = DiagramCompiler::new().compile(&schema);
        assert_eq!(
            diagram,
            "erDiagram\n    people {\n        int id \"PK\"\n        text first_name \"UK\"\n    }\n"
        );
    }

    #[test]
    fn test_explicit_label_fallback() {
        let rel = RelationshipDefinition::new(("a", "id"), ("b", "a_id"), Cardinality::OneToMany);
        assert_eq!(explicit_label(&rel), "a_to_b");
        let rel = rel.named("!!!");
        assert_eq!(explicit_label(&rel), "a_to_b");
        let rel = rel.named("owns many");
        assert_eq!(explicit_label(&rel), "owns many");
    }
}
