use super::sql::mysql::MysqlGenerator;
use super::sql::postgres::PostgresGenerator;
use super::traits::DdlGenerator;

pub use crate::ir::Dialect;

impl Dialect {
    /// The DDL generator for this dialect.
    pub fn generator(&self) -> Box<dyn DdlGenerator> {
        match self {
            Dialect::Postgresql => Box::new(PostgresGenerator),
            Dialect::Mysql => Box::new(MysqlGenerator),
        }
    }
}
