//! Stored procedures and functions.

use super::compile;
use crate::ir::*;
use pretty_assertions::assert_eq;

fn with_routine(dialect: Dialect, routine: StoredProcedureDefinition) -> String {
    compile(&SchemaDefinition::new("s", dialect).procedure(routine))
}

fn section(sql: &str) -> &str {
    let marker = "-- Stored procedures\n";
    let start = sql.find(marker).unwrap() + marker.len();
    &sql[start..]
}

#[test]
fn test_postgres_function() {
    let routine = StoredProcedureDefinition::new(
        "post_count",
        "BEGIN\n  RETURN (SELECT count(*) FROM posts WHERE user_id = uid);\nEND;\n",
    )
    .param(ProcedureParameter::new("uid", ColumnType::Integer))
    .returns(ReturnType::Scalar(ColumnType::Bigint))
    .comment("Posts written by a user");

    assert_eq!(
        section(&with_routine(Dialect::Postgresql, routine)),
        r#"-- Posts written by a user
CREATE OR REPLACE FUNCTION "post_count"("uid" INTEGER)
RETURNS BIGINT
LANGUAGE plpgsql
AS $$
BEGIN
  RETURN (SELECT count(*) FROM posts WHERE user_id = uid);
END;
$$;
"#
    );
}

#[test]
fn test_postgres_parameters() {
    let routine = StoredProcedureDefinition::new("archive", "SELECT 1;")
        .param(
            ProcedureParameter::new("label", ColumnType::Varchar).default_value("old"),
        )
        .param(
            ProcedureParameter::new("moved", ColumnType::Integer)
                .direction(ParameterDirection::Out),
        )
        .param(
            ProcedureParameter::new("state", ColumnType::Enum)
                .direction(ParameterDirection::Inout),
        )
        .language("sql");
    let sql = with_routine(Dialect::Postgresql, routine);
    assert!(sql.contains(
        "CREATE OR REPLACE FUNCTION \"archive\"(\"label\" VARCHAR(255) DEFAULT 'old', \
         OUT \"moved\" INTEGER, INOUT \"state\" TEXT)\nRETURNS VOID\nLANGUAGE sql\n"
    ));
}

#[test]
fn test_postgres_returns_table() {
    let routine =
        StoredProcedureDefinition::new("recent", "SELECT * FROM posts;").returns(ReturnType::Table);
    assert!(with_routine(Dialect::Postgresql, routine).contains("RETURNS TABLE\n"));
}

#[test]
fn test_postgres_body_with_dollar_quotes() {
    let routine = StoredProcedureDefinition::new("q", "SELECT $$quoted$$;");
    let sql = with_routine(Dialect::Postgresql, routine);
    assert!(sql.contains("AS $body$\nSELECT $$quoted$$;\n$body$;"));
}

#[test]
fn test_mysql_procedure() {
    let routine = StoredProcedureDefinition::new(
        "deactivate",
        "  UPDATE users SET active = 0 WHERE id = uid;",
    )
    .param(ProcedureParameter::new("uid", ColumnType::Integer).default_value(5i64))
    .param(
        ProcedureParameter::new("changed", ColumnType::Boolean)
            .direction(ParameterDirection::Out),
    )
    .returns(ReturnType::Scalar(ColumnType::Integer));

    assert_eq!(
        section(&with_routine(Dialect::Mysql, routine)),
        "DELIMITER //
CREATE PROCEDURE `deactivate`(IN `uid` INT, OUT `changed` TINYINT(1))
BEGIN
  UPDATE users SET active = 0 WHERE id = uid;
END //
DELIMITER ;
"
    );
}

#[test]
fn test_routines_keep_declaration_order() {
    let schema = SchemaDefinition::new("s", Dialect::Postgresql)
        .procedure(StoredProcedureDefinition::new("second_alpha", "SELECT 2;"))
        .procedure(StoredProcedureDefinition::new("first_alpha", "SELECT 1;"));
    let sql = compile(&schema);
    let body = section(&sql);
    assert!(body.find("second_alpha").unwrap() < body.find("first_alpha").unwrap());
    // One blank line between routines.
    assert!(body.contains("SELECT 2;\n$$;\n\nCREATE OR REPLACE FUNCTION \"first_alpha\""));
}
