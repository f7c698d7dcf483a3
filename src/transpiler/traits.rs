//! Transpiler traits and utilities.

use crate::ir::{ColumnDefinition, ColumnType, StoredProcedureDefinition};

/// Length used for VARCHAR/CHAR when the column does not specify one.
pub const DEFAULT_LENGTH: u32 = 255;
/// Precision used for DECIMAL/NUMERIC when the column does not specify one.
pub const DEFAULT_PRECISION: u32 = 10;
/// Scale used for DECIMAL/NUMERIC when the column does not specify one.
pub const DEFAULT_SCALE: u32 = 2;

/// Quote an identifier with `quote`, doubling any embedded quote character.
pub fn quote_with(name: &str, quote: char) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    out.push(quote);
    for c in name.chars() {
        if c == quote {
            out.push(quote);
        }
        out.push(c);
    }
    out.push(quote);
    out
}

/// Single-quote a string literal, doubling embedded single quotes.
pub fn quote_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Name of the PostgreSQL type declared for an enum column.
pub fn enum_type_name(table: &str, column: &str) -> String {
    format!("{}_{}_enum", table, column)
}

/// Trait for dialect-specific DDL generation.
///
/// Implementations are small lookup tables; the section builders in
/// [`super::ddl`] never branch on the dialect themselves.
pub trait DdlGenerator {
    /// Quote an identifier (table, column, index or constraint name).
    fn quote_identifier(&self, name: &str) -> String;

    /// Boolean literal (TRUE/FALSE vs 1/0).
    fn bool_literal(&self, val: bool) -> &'static str;

    /// Physical type keyword for a logical type, without length or precision.
    fn type_keyword(&self, ty: ColumnType) -> &'static str;

    /// Column type for an `enum` column with at least one value.
    fn enum_column_type(&self, table: &str, column: &ColumnDefinition) -> String;

    /// Fallback type for an `enum` column with no values.
    fn empty_enum_type(&self) -> &'static str;

    /// Whether table namespaces are emitted (`CREATE SCHEMA`, qualified names).
    fn supports_namespaces(&self) -> bool;

    /// Whether separate enum type declarations are emitted.
    fn declares_enum_types(&self) -> bool;

    /// Whether `USING <method>` is honored on indexes.
    fn supports_index_method(&self) -> bool;

    /// Inline column comment clause, if the dialect puts comments on the column line.
    fn inline_column_comment(&self, comment: &str) -> Option<String>;

    /// Text following the closing parenthesis of CREATE TABLE.
    fn table_suffix(&self, comment: Option<&str>) -> String;

    /// Trailing statements documenting a table (COMMENT ON ...).
    fn comment_statements(
        &self,
        qualified_table: &str,
        table_comment: Option<&str>,
        columns: &[ColumnDefinition],
    ) -> Vec<String>;

    /// Full CREATE statement for a stored procedure or function.
    fn create_routine(&self, routine: &StoredProcedureDefinition) -> String;

    /// Qualify a table name with its namespace where the dialect supports it.
    fn qualify(&self, namespace: Option<&str>, name: &str) -> String {
        match namespace {
            Some(ns) if self.supports_namespaces() => {
                format!("{}.{}", self.quote_identifier(ns), self.quote_identifier(name))
            }
            _ => self.quote_identifier(name),
        }
    }

    /// Complete column type, including length, precision or enum resolution.
    fn column_type(&self, table: &str, column: &ColumnDefinition) -> String {
        let ty = column.column_type;
        if ty == ColumnType::Enum {
            return if column.enum_values.is_empty() {
                self.empty_enum_type().to_string()
            } else {
                self.enum_column_type(table, column)
            };
        }
        self.scalar_type(ty, column.length, column.precision, column.scale)
    }

    /// Type with length or precision applied, for anything but `enum`.
    fn scalar_type(
        &self,
        ty: ColumnType,
        length: Option<u32>,
        precision: Option<u32>,
        scale: Option<u32>,
    ) -> String {
        let keyword = self.type_keyword(ty);
        if ty.takes_length() {
            format!("{}({})", keyword, length.unwrap_or(DEFAULT_LENGTH))
        } else if ty.takes_precision() {
            format!(
                "{}({},{})",
                keyword,
                precision.unwrap_or(DEFAULT_PRECISION),
                scale.unwrap_or(DEFAULT_SCALE)
            )
        } else {
            keyword.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_with_doubles_quote_char() {
        assert_eq!(quote_with("users", '"'), "\"users\"");
        assert_eq!(quote_with("we\"ird", '"'), "\"we\"\"ird\"");
        assert_eq!(quote_with("back`tick", '`'), "`back``tick`");
    }

    #[test]
    fn test_quote_string() {
        assert_eq!(quote_string("O'Brien"), "'O''Brien'");
        assert_eq!(quote_string(""), "''");
    }
}
