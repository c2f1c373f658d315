//! Core contracts for schemashift.
//!
//! This crate turns raw catalog rows into the canonical schema graph and owns
//! the type translation rules shared by every emitter.

pub mod builder;
pub mod error;
pub mod graph;
pub mod row;
pub mod schema;
pub mod typemap;
pub mod types;
pub mod validation;

pub use builder::{
    BuildOptions, BuildOutcome, BuildReport, MetadataConflict, SchemaGraphBuilder, SkippedRow,
    build_schema,
};
pub use error::{Error, Result};
pub use graph::{FkGraphSummary, summarize_fk_graph};
pub use row::{ConstraintKind, RawMetadataRow};
pub use schema::{Column, Schema, Table};
pub use typemap::{OracleToPostgres, TypeMapper, to_target_property_type, to_target_sql_type};
pub use types::{MappedType, MappingStatus, TypeDescriptor, TypeFamily};
pub use validation::{DanglingReference, ValidationReport, validate_schema};
