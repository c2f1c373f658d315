//! Oracle catalog export.
//!
//! schemashift does not connect to Oracle. Operators run the query returned
//! by [`catalog_query`] with their own tooling and export the result set to
//! CSV or JSON.

mod queries;

pub use queries::{catalog_query, quote_literal};
