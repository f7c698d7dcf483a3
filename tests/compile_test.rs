use pretty_assertions::assert_eq;
use schemaforge::prelude::*;
use schemaforge::{compile_diagram, compile_sql};

/// Schema as the upstream generator hands it over.
const SHOP_JSON: &str = r#"{
    "id": "shop-1",
    "name": "Shop",
    "description": "Customers and their orders",
    "dialect": "postgresql",
    "tables": [
        {
            "id": "t-customers",
            "name": "customers",
            "columns": [
                {"id": "c1", "name": "id", "type": "serial", "isPrimaryKey": true, "isNullable": false, "isUnique": false},
                {"id": "c2", "name": "email", "type": "varchar", "length": 320, "isPrimaryKey": false, "isNullable": false, "isUnique": true},
                {"id": "c3", "name": "vip", "type": "boolean", "isPrimaryKey": false, "isNullable": false, "isUnique": false, "defaultValue": false}
            ],
            "indexes": [],
            "foreignKeys": []
        },
        {
            "id": "t-orders",
            "name": "orders",
            "columns": [
                {"id": "c4", "name": "id", "type": "bigserial", "isPrimaryKey": true, "isNullable": false, "isUnique": false},
                {"id": "c5", "name": "customer_id", "type": "integer", "isPrimaryKey": false, "isNullable": false, "isUnique": false},
                {"id": "c6", "name": "total", "type": "decimal", "precision": 12, "scale": 2, "isPrimaryKey": false, "isNullable": false, "isUnique": false, "defaultValue": 0},
                {"id": "c7", "name": "placed_at", "type": "timestamptz", "isPrimaryKey": false, "isNullable": false, "isUnique": false, "defaultValue": "CURRENT_TIMESTAMP"},
                {"id": "c8", "name": "note", "type": "text", "isPrimaryKey": false, "isNullable": true, "isUnique": false, "defaultValue": null}
            ],
            "indexes": [
                {"id": "i1", "name": "idx_orders_customer", "columns": ["customer_id"], "isUnique": false}
            ],
            "foreignKeys": [
                {"id": "f1", "name": "fk_orders_customer", "column": "customer_id", "referencedTable": "customers", "referencedColumn": "id", "onDelete": "CASCADE"}
            ]
        }
    ],
    "relationships": [],
    "storedProcedures": [],
    "createdAt": "2026-01-01T00:00:00Z",
    "updatedAt": "2026-01-01T00:00:00Z"
}"#;

fn shop() -> SchemaDefinition {
    serde_json::from_str(SHOP_JSON).expect("fixture should deserialize")
}

fn untimed(dialect: Dialect) -> SqlCompiler {
    SqlCompiler::with_options(CompileOptions {
        timestamp: false,
        dialect: Some(dialect),
    })
}

#[test]
fn test_shop_postgres() {
    assert_eq!(
        untimed(Dialect::Postgresql).compile(&shop()),
        r#"-- Schema: Shop
-- Dialect: PostgreSQL
-- Customers and their orders

-- Tables
CREATE TABLE "customers" (
    "id" SERIAL,
    "email" VARCHAR(320) NOT NULL UNIQUE,
    "vip" BOOLEAN NOT NULL DEFAULT FALSE,
    PRIMARY KEY ("id")
);

CREATE TABLE "orders" (
    "id" BIGSERIAL,
    "customer_id" INTEGER NOT NULL,
    "total" DECIMAL(12,2) NOT NULL DEFAULT 0,
    "placed_at" TIMESTAMPTZ NOT NULL DEFAULT CURRENT_TIMESTAMP,
    "note" TEXT DEFAULT NULL,
    PRIMARY KEY ("id")
);

-- Indexes
CREATE INDEX "idx_orders_customer" ON "orders" ("customer_id");

-- Foreign keys
ALTER TABLE "orders" ADD CONSTRAINT "fk_orders_customer" FOREIGN KEY ("customer_id") REFERENCES "customers" ("id") ON DELETE CASCADE;
"#
    );
}

#[test]
fn test_shop_mysql() {
    let sql = untimed(Dialect::Mysql).compile(&shop());
    assert!(sql.starts_with("-- Schema: Shop\n-- Dialect: MySQL\n"));
    assert!(sql.contains("    `vip` TINYINT(1) NOT NULL DEFAULT 0,\n"));
    assert!(sql.contains("    `id` BIGINT AUTO_INCREMENT,\n"));
    assert!(sql.contains("    `placed_at` TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,\n"));
    assert_eq!(
        sql.matches(") ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;").count(),
        2
    );
}

#[test]
fn test_shop_diagram_covers_foreign_key() {
    assert_eq!(
        compile_diagram(&shop()),
        r#"erDiagram
    customers {
        serial id "PK"
        varchar email "UK"
        boolean vip
    }
    orders {
        bigserial id "PK"
        int customer_id
        decimal total
        timestamptz placed_at
        text note
    }

    customers ||--o{ orders : "has_orders"
"#
    );
}

#[test]
fn test_compilers_are_idempotent() {
    let schema = shop();
    let compiler = untimed(Dialect::Postgresql);
    assert_eq!(compiler.compile(&schema), compiler.compile(&schema));
    assert_eq!(compile_diagram(&schema), compile_diagram(&schema));
}

#[test]
fn test_json_round_trip_keeps_output() {
    let schema = shop();
    let json = serde_json::to_string(&schema).unwrap();
    let back: SchemaDefinition = serde_json::from_str(&json).unwrap();
    assert_eq!(back, schema);
    let compiler = untimed(Dialect::Postgresql);
    assert_eq!(compiler.compile(&back), compiler.compile(&schema));
}

#[test]
fn test_primary_keys_never_print_not_null() {
    for dialect in Dialect::ALL {
        let sql = untimed(dialect).compile(&shop());
        for line in sql.lines() {
            let is_pk_line = line.trim_start().starts_with("\"id\"")
                || line.trim_start().starts_with("`id`");
            if is_pk_line {
                assert!(!line.contains("NOT NULL"), "{}", line);
            }
        }
    }
}

#[test]
fn test_many_to_many_everywhere() {
    let schema = SchemaDefinition::new("Courses", Dialect::Postgresql)
        .table(
            TableDefinition::new("students")
                .column(ColumnDefinition::new("id", ColumnType::Serial).primary_key()),
        )
        .table(
            TableDefinition::new("courses")
                .column(ColumnDefinition::new("id", ColumnType::Serial).primary_key()),
        )
        .relationship(
            RelationshipDefinition::new(
                ("students", "id"),
                ("courses", "id"),
                Cardinality::ManyToMany,
            )
            .named("enrolls in")
            .junction(JunctionTable::for_tables("students", "courses")),
        );

    for dialect in Dialect::ALL {
        let sql = untimed(dialect).compile(&schema);
        let q = if dialect == Dialect::Mysql { "`" } else { "\"" };
        assert!(sql.contains(&format!(
            "PRIMARY KEY ({q}students_id{q}, {q}courses_id{q})"
        )));
        assert_eq!(sql.matches("ON DELETE CASCADE").count(), 2);
    }

    let diagram = compile_diagram(&schema);
    assert!(diagram.ends_with("    students }o--o{ courses : \"enrolls in\"\n"));
}

#[test]
fn test_to_ddl_matches_compile_sql() {
    let schema = SchemaDefinition::new("Empty", Dialect::Mysql);
    let strip = |s: String| {
        s.lines()
            .filter(|l| !l.starts_with("-- Generated:"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    assert_eq!(strip(schema.to_ddl()), strip(compile_sql(&schema)));
}
