use crate::ir::{ColumnDefinition, ColumnType, StoredProcedureDefinition};
use crate::transpiler::routines::{body_text, comment_lines, parameter_decl};
use crate::transpiler::traits::{DdlGenerator, quote_string, quote_with};

/// Storage engine and charset appended to every MySQL table.
pub const TABLE_OPTIONS: &str = "ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";

/// Statement delimiter used while a procedure body is being defined.
pub const ROUTINE_DELIMITER: &str = "//";

/// MySQL generator.
pub struct MysqlGenerator;

impl MysqlGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl DdlGenerator for MysqlGenerator {
    fn quote_identifier(&self, name: &str) -> String {
        quote_with(name, '`')
    }

    fn bool_literal(&self, val: bool) -> &'static str {
        if val { "1" } else { "0" }
    }

    fn type_keyword(&self, ty: ColumnType) -> &'static str {
        match ty {
            ColumnType::Integer => "INT",
            ColumnType::Bigint => "BIGINT",
            ColumnType::Smallint => "SMALLINT",
            ColumnType::Serial => "INT AUTO_INCREMENT",
            ColumnType::Bigserial => "BIGINT AUTO_INCREMENT",
            ColumnType::Varchar => "VARCHAR",
            ColumnType::Text => "TEXT",
            ColumnType::Char => "CHAR",
            ColumnType::Boolean => "TINYINT(1)",
            ColumnType::Date => "DATE",
            ColumnType::Timestamp => "DATETIME",
            ColumnType::Timestamptz => "TIMESTAMP",
            ColumnType::Time => "TIME",
            ColumnType::Decimal => "DECIMAL",
            ColumnType::Numeric => "DECIMAL",
            ColumnType::Float => "FLOAT",
            ColumnType::Double => "DOUBLE",
            ColumnType::Json => "JSON",
            ColumnType::Jsonb => "JSON",
            ColumnType::Uuid => "CHAR(36)",
            ColumnType::Blob => "BLOB",
            ColumnType::Enum => "ENUM",
        }
    }

    fn enum_column_type(&self, _table: &str, column: &ColumnDefinition) -> String {
        let values = column
            .enum_values
            .iter()
            .map(|v| quote_string(v))
            .collect::<Vec<_>>()
            .join(", ");
        format!("ENUM({})", values)
    }

    fn empty_enum_type(&self) -> &'static str {
        "VARCHAR(255)"
    }

    fn supports_namespaces(&self) -> bool {
        false
    }

    fn declares_enum_types(&self) -> bool {
        false
    }

    fn supports_index_method(&self) -> bool {
        false
    }

    fn inline_column_comment(&self, comment: &str) -> Option<String> {
        Some(format!("COMMENT {}", quote_string(comment)))
    }

    fn table_suffix(&self, comment: Option<&str>) -> String {
        match comment {
            Some(text) => format!(" {} COMMENT={}", TABLE_OPTIONS, quote_string(text)),
            None => format!(" {}", TABLE_OPTIONS),
        }
    }

    fn comment_statements(
        &self,
        _qualified_table: &str,
        _table_comment: Option<&str>,
        _columns: &[ColumnDefinition],
    ) -> Vec<String> {
        Vec::new()
    }

    fn create_routine(&self, routine: &StoredProcedureDefinition) -> String {
        // MySQL procedures take no parameter defaults and no return type.
        let params = routine
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.direction.as_sql(), parameter_decl(self, p)))
            .collect::<Vec<_>>()
            .join(", ");

        let mut lines = comment_lines(routine);
        lines.push(format!("DELIMITER {}", ROUTINE_DELIMITER));
        lines.push(format!(
            "CREATE PROCEDURE {}({})",
            self.quote_identifier(&routine.name),
            params
        ));
        lines.push("BEGIN".to_string());
        lines.push(body_text(routine).to_string());
        lines.push(format!("END {}", ROUTINE_DELIMITER));
        lines.push("DELIMITER ;".to_string());
        lines.join("\n")
    }
}
