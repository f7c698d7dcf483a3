//! Per-dialect DDL generators.

pub mod mysql;
pub mod postgres;
