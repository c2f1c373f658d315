//! Catalog row sources.
//!
//! The core never talks to a database. Rows exported with
//! [`oracle::catalog_query`] are loaded from CSV or JSON files and handed to
//! the schema builder as a fully materialized batch.

pub mod adapter;
pub mod error;
pub mod oracle;
pub mod source;

pub use adapter::CatalogSource;
pub use error::CatalogError;
pub use source::{CsvCatalog, JsonCatalog, catalog_from_path};

pub use schemashift_core::RawMetadataRow;
