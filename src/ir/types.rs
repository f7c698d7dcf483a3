//! Closed vocabularies of the schema IR.
//!
//! Every enum here serializes to the lowercase tag the upstream generator
//! emits, so a schema JSON document loads without any string matching in
//! the compilers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target SQL dialect carried by a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    #[serde(alias = "postgres")]
    Postgresql,
    Mysql,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Postgresql, Dialect::Mysql];

    /// Human-readable label used in output headers.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Postgresql => "PostgreSQL",
            Self::Mysql => "MySQL",
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            Self::Postgresql => "postgresql",
            Self::Mysql => "mysql",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "postgresql" | "postgres" | "pg" => Ok(Self::Postgresql),
            "mysql" => Ok(Self::Mysql),
            other => Err(format!(
                "unknown dialect '{}', expected postgresql or mysql",
                other
            )),
        }
    }
}

/// Logical column type, independent of any dialect.
///
/// Lengths, precision and scale live on the column, not on the type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Integer,
    Bigint,
    Smallint,
    Serial,
    Bigserial,
    Varchar,
    Text,
    Char,
    Boolean,
    Date,
    Timestamp,
    Timestamptz,
    Time,
    Decimal,
    Numeric,
    Float,
    Double,
    Json,
    Jsonb,
    Uuid,
    Blob,
    Enum,
}

impl ColumnType {
    pub const ALL: [ColumnType; 22] = [
        Self::Integer,
        Self::Bigint,
        Self::Smallint,
        Self::Serial,
        Self::Bigserial,
        Self::Varchar,
        Self::Text,
        Self::Char,
        Self::Boolean,
        Self::Date,
        Self::Timestamp,
        Self::Timestamptz,
        Self::Time,
        Self::Decimal,
        Self::Numeric,
        Self::Float,
        Self::Double,
        Self::Json,
        Self::Jsonb,
        Self::Uuid,
        Self::Blob,
        Self::Enum,
    ];

    /// The IR tag, as it appears in schema JSON.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Bigint => "bigint",
            Self::Smallint => "smallint",
            Self::Serial => "serial",
            Self::Bigserial => "bigserial",
            Self::Varchar => "varchar",
            Self::Text => "text",
            Self::Char => "char",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Timestamp => "timestamp",
            Self::Timestamptz => "timestamptz",
            Self::Time => "time",
            Self::Decimal => "decimal",
            Self::Numeric => "numeric",
            Self::Float => "float",
            Self::Double => "double",
            Self::Json => "json",
            Self::Jsonb => "jsonb",
            Self::Uuid => "uuid",
            Self::Blob => "blob",
            Self::Enum => "enum",
        }
    }

    /// Types that take a length suffix.
    pub const fn takes_length(&self) -> bool {
        matches!(self, Self::Varchar | Self::Char)
    }

    /// Types that take a precision/scale suffix.
    pub const fn takes_precision(&self) -> bool {
        matches!(self, Self::Decimal | Self::Numeric)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name() == lower)
            .ok_or_else(|| format!("unknown column type '{}'", s))
    }
}

/// Multiplicity of a relationship between two tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl Cardinality {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::OneToOne => "one-to-one",
            Self::OneToMany => "one-to-many",
            Self::ManyToMany => "many-to-many",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// ON DELETE / ON UPDATE action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReferentialAction {
    #[serde(rename = "CASCADE")]
    Cascade,
    #[serde(rename = "SET NULL")]
    SetNull,
    #[serde(rename = "SET DEFAULT")]
    SetDefault,
    #[serde(rename = "RESTRICT")]
    Restrict,
    #[default]
    #[serde(rename = "NO ACTION")]
    NoAction,
}

impl ReferentialAction {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Index access method (PostgreSQL only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexMethod {
    #[default]
    Btree,
    Hash,
    Gin,
    Gist,
}

impl IndexMethod {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Btree => "BTREE",
            Self::Hash => "HASH",
            Self::Gin => "GIN",
            Self::Gist => "GIST",
        }
    }
}

/// Stored-procedure parameter direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParameterDirection {
    #[default]
    In,
    Out,
    Inout,
}

impl ParameterDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Inout => "INOUT",
        }
    }
}

/// What a stored procedure returns: nothing, a row set, or a scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReturnType {
    #[default]
    Void,
    Table,
    Scalar(ColumnType),
}

impl FromStr for ReturnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "void" => Ok(Self::Void),
            "table" => Ok(Self::Table),
            other => other.parse().map(Self::Scalar),
        }
    }
}

impl TryFrom<String> for ReturnType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReturnType> for String {
    fn from(value: ReturnType) -> Self {
        match value {
            ReturnType::Void => "void".to_string(),
            ReturnType::Table => "table".to_string(),
            ReturnType::Scalar(ty) => ty.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_tags() {
        assert_eq!(
            serde_json::to_string(&ColumnType::Timestamptz).unwrap(),
            "\"timestamptz\""
        );
        let ty: ColumnType = serde_json::from_str("\"bigserial\"").unwrap();
        assert_eq!(ty, ColumnType::Bigserial);
        assert!(serde_json::from_str::<ColumnType>("\"money\"").is_err());
    }

    #[test]
    fn test_column_type_from_str() {
        assert_eq!("JSONB".parse::<ColumnType>(), Ok(ColumnType::Jsonb));
        assert!("int4".parse::<ColumnType>().is_err());
    }

    #[test]
    fn test_cardinality_tags() {
        let c: Cardinality = serde_json::from_str("\"many-to-many\"").unwrap();
        assert_eq!(c, Cardinality::ManyToMany);
        assert_eq!(Cardinality::OneToMany.to_string(), "one-to-many");
    }

    #[test]
    fn test_referential_action_tags() {
        let a: ReferentialAction = serde_json::from_str("\"SET NULL\"").unwrap();
        assert_eq!(a, ReferentialAction::SetNull);
        assert_eq!(ReferentialAction::NoAction.as_sql(), "NO ACTION");
    }

    #[test]
    fn test_return_type() {
        let r: ReturnType = serde_json::from_str("\"void\"").unwrap();
        assert_eq!(r, ReturnType::Void);
        let r: ReturnType = serde_json::from_str("\"integer\"").unwrap();
        assert_eq!(r, ReturnType::Scalar(ColumnType::Integer));
        assert_eq!(
            serde_json::to_string(&ReturnType::Table).unwrap(),
            "\"table\""
        );
    }

    #[test]
    fn test_dialect_parse() {
        assert_eq!("postgres".parse::<Dialect>(), Ok(Dialect::Postgresql));
        assert_eq!("MySQL".parse::<Dialect>(), Ok(Dialect::Mysql));
        assert!("sqlite".parse::<Dialect>().is_err());
        let d: Dialect = serde_json::from_str("\"mysql\"").unwrap();
        assert_eq!(d, Dialect::Mysql);
    }
}
