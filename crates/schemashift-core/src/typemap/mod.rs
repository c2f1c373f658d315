//! Source → target type translation.
//!
//! A [`TypeMapper`] translates one source-dialect column type into a target
//! SQL type and a target-language property type. Rules are kept as data in
//! each mapper; anything no rule recognizes is passed through verbatim and
//! flagged [`MappingStatus::Unmapped`](crate::MappingStatus::Unmapped).

mod oracle;

pub use oracle::OracleToPostgres;

use crate::types::{MappedType, TypeDescriptor};

/// Translates source column types for one (source, target) pair.
pub trait TypeMapper: Send + Sync {
    /// Source dialect identifier (e.g. `oracle`).
    fn source_dialect(&self) -> &str;

    /// Target SQL dialect identifier (e.g. `postgres`).
    fn target_dialect(&self) -> &str;

    /// Target language identifier (e.g. `csharp`).
    fn target_language(&self) -> &str;

    /// Target SQL type for a column. Nullability is ignored.
    fn sql_type(&self, desc: &TypeDescriptor<'_>) -> MappedType;

    /// Target-language property type, widened to the optional form when
    /// `desc.nullable` is set.
    fn property_type(&self, desc: &TypeDescriptor<'_>) -> MappedType;
}

/// Translate a source type to a target SQL type with the default mapper.
pub fn to_target_sql_type(source_type: &str, length: i32, precision: i32, scale: i32) -> MappedType {
    let desc = TypeDescriptor::new(source_type)
        .with_length(length)
        .with_precision(precision, scale);
    OracleToPostgres::new().sql_type(&desc)
}

/// Translate a source type to a property type with the default mapper.
pub fn to_target_property_type(
    source_type: &str,
    precision: i32,
    scale: i32,
    nullable: bool,
) -> MappedType {
    let desc = TypeDescriptor::new(source_type)
        .with_precision(precision, scale)
        .with_nullable(nullable);
    OracleToPostgres::new().property_type(&desc)
}
