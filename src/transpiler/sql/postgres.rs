use crate::ir::{
    ColumnDefinition, ColumnType, ParameterDirection, ReturnType,
    StoredProcedureDefinition,
};
use crate::transpiler::routines::{
    DEFAULT_LANGUAGE, body_text, comment_lines, dollar_tag, parameter_decl, routine_type,
};
use crate::transpiler::traits::{DdlGenerator, enum_type_name, quote_string, quote_with};
use crate::transpiler::values::format_default;

/// PostgreSQL generator.
pub struct PostgresGenerator;

impl Default for PostgresGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PostgresGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl DdlGenerator for PostgresGenerator {
    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '"')
    }

    fn bool_literal(&self, val: bool) -> &'static str {
        if val { "TRUE" } else { "FALSE" }
    }

    fn type_keyword(&self, ty: ColumnType) -> &'static str {
        match ty {
            ColumnType::Integer => "INTEGER",
            ColumnType::Bigint => "BIGINT",
            ColumnType::Smallint => "SMALLINT",
            ColumnType::Serial => "SERIAL",
            ColumnType::Bigserial => "BIGSERIAL",
            ColumnType::Varchar => "VARCHAR",
            ColumnType::Text => "TEXT",
            ColumnType::Char => "CHAR",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Date => "DATE",
            ColumnType::Timestamp => "TIMESTAMP",
            ColumnType::Timestamptz => "TIMESTAMPTZ",
            ColumnType::Time => "TIME",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::Float => "REAL",
            ColumnType::Double => "DOUBLE PRECISION",
            ColumnType::Json => "JSON",
            ColumnType::Jsonb => "JSONB",
            ColumnType::Uuid => "UUID",
            ColumnType::Blob => "BYTEA",
            ColumnType::Enum => "TEXT",
        }
    }

    fn enum_column_type(&self, table: &str, column: &ColumnDefinition) -> String {
        self.quote_identifier(&enum_type_name(table, &column.name))
    }

    fn empty_enum_type(&self) -> &'static str {
        "TEXT"
    }

    fn supports_namespaces(&self) -> bool {
        true
    }

    fn declares_enum_types(&self) -> bool {
        true
    }

    fn supports_index_method(&self) -> bool {
        true
    }

    fn inline_column_comment(&self, _comment: &str) -> Option<String> {
        None
    }

    fn table_suffix(&self, _comment: Option<&str>) -> String {
        String::new()
    }

    fn comment_statements(
        &self,
        qualified_table: &str,
        table_comment: Option<&str>,
        columns: &[ColumnDefinition],
    ) -> Vec<String> {
        let mut stmts = Vec::new();
        if let Some(text) = table_comment {
            stmts.push(format!(
                "COMMENT ON TABLE {} IS {};",
                qualified_table,
                quote_string(text)
            ));
        }
        for col in columns {
            if let Some(text) = &col.comment {
                stmts.push(format!(
                    "COMMENT ON COLUMN {}.{} IS {};",
                    qualified_table,
                    self.quote_identifier(&col.name),
                    quote_string(text)
                ));
            }
        }
        stmts
    }

    fn create_routine(&self, routine: &StoredProcedureDefinition) -> String {
        let params = routine
            .parameters
            .iter()
            .map(|p| {
                let mut decl = match p.direction {
                    ParameterDirection::In => String::new(),
                    other => format!("{} ", other.as_sql()),
                };
                decl.push_str(&parameter_decl(self, p));
                if let Some(value) = &p.default_value {
                    decl.push_str(" DEFAULT ");
                    decl.push_str(&format_default(value, self));
                }
                decl
            })
            .collect::<Vec<_>>()
            .join(", ");

        let returns = match routine.return_type.unwrap_or_default() {
            ReturnType::Void => "VOID".to_string(),
            ReturnType::Table => "TABLE".to_string(),
            ReturnType::Scalar(ty) => routine_type(self, ty),
        };

        let language = routine
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE);

        let body = body_text(routine);
        let tag = dollar_tag(body);

        let mut lines = comment_lines(routine);
        lines.push(format!(
            "CREATE OR REPLACE FUNCTION {}({})",
            self.quote_identifier(&routine.name),
            params
        ));
        lines.push(format!("RETURNS {}", returns));
        lines.push(format!("LANGUAGE {}", language));
        lines.push(format!("AS {}", tag));
        lines.push(body.to_string());
        lines.push(format!("{};", tag));
        lines.join("\n")
    }
}
