use schemaforge::prelude::*;

fn library() -> SchemaDefinition {
    SchemaDefinition::new("City Library", Dialect::Mysql)
        .table(
            TableDefinition::new("books")
                .column(ColumnDefinition::new("id", ColumnType::Serial).primary_key())
                .column(ColumnDefinition::new("title", ColumnType::Varchar).not_null()),
        )
        .table(
            TableDefinition::new("authors")
                .column(ColumnDefinition::new("id", ColumnType::Serial).primary_key()),
        )
        .relationship(
            RelationshipDefinition::new(
                ("authors", "id"),
                ("books", "author_id"),
                Cardinality::OneToMany,
            )
            .named("wrote"),
        )
}

/// Appends a table to whatever schema it is asked to refine.
struct AddsLoans;

impl SchemaGenerator for AddsLoans {
    async fn generate(&self, req: &GenerationRequest) -> ForgeResult<GenerationResponse> {
        Ok(GenerationResponse::ok(SchemaDefinition::new(
            req.prompt.clone(),
            req.dialect,
        )))
    }

    async fn refine(&self, req: &RefinementRequest) -> ForgeResult<GenerationResponse> {
        let schema = req.schema.clone().table(TableDefinition::new("loans"));
        Ok(GenerationResponse::ok(schema))
    }
}

#[test]
fn test_export_all_formats() {
    let dir = tempfile::tempdir().unwrap();
    let mut ws = Workspace::new();
    ws.load(library());

    for format in ExportFormat::ALL {
        ws.export(format).unwrap().write_to(dir.path()).unwrap();
    }

    let sql = std::fs::read_to_string(dir.path().join("city_library.sql")).unwrap();
    assert_eq!(sql, ws.outputs().unwrap().sql);
    let mmd = std::fs::read_to_string(dir.path().join("city_library.mmd")).unwrap();
    assert!(mmd.starts_with("erDiagram\n"));
    let json = std::fs::read_to_string(dir.path().join("city_library.json")).unwrap();
    let back: SchemaDefinition = serde_json::from_str(&json).unwrap();
    assert_eq!(&back, ws.current().unwrap());
}

#[test]
fn test_export_without_schema() {
    let ws = Workspace::new();
    assert!(matches!(ws.export(ExportFormat::Sql), Err(ForgeError::NoSchema)));
}

#[test]
fn test_cardinality_switch_recompiles_both_outputs() {
    let mut ws = Workspace::with_options(CompileOptions {
        timestamp: false,
        dialect: None,
    });
    let rel_id = ws.load(library()).relationships[0].id.clone();
    let before = ws.outputs().unwrap().clone();

    ws.apply(SchemaEdit::SetCardinality {
        relationship_id: rel_id,
        cardinality: Cardinality::ManyToMany,
    })
    .unwrap();
    let after = ws.outputs().unwrap();

    assert!(after.sql.contains("CREATE TABLE `authors_books` ("));
    assert!(after.sql.contains("PRIMARY KEY (`authors_id`, `books_id`)"));
    assert!(after.diagram.contains("authors }o--o{ books : \"wrote\""));

    // Everything before the junction section is untouched.
    let prefix = before.sql.trim_end();
    assert!(after.sql.starts_with(prefix));
}

#[test]
fn test_unknown_relationship() {
    let mut ws = Workspace::new();
    ws.load(library());
    let err = ws
        .apply(SchemaEdit::SetCardinality {
            relationship_id: "nope".into(),
            cardinality: Cardinality::OneToOne,
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Relationship not found: 'nope'");
}

#[tokio::test]
async fn test_generate_then_refine() {
    let mut ws = Workspace::new();
    let req = GenerationRequest::new("Archive", Dialect::Postgresql).context("read-only");
    ws.generate(&AddsLoans, &req).await.unwrap();
    assert_eq!(ws.current().unwrap().name, "Archive");

    let schema = ws.refine(&AddsLoans, "track loans").await.unwrap();
    assert_eq!(schema.tables.len(), 1);
    assert!(ws.outputs().unwrap().sql.contains("CREATE TABLE \"loans\" ("));
}

#[tokio::test]
async fn test_refine_requires_schema() {
    let mut ws = Workspace::new();
    let err = ws.refine(&AddsLoans, "anything").await.unwrap_err();
    assert!(matches!(err, ForgeError::NoSchema));
}
