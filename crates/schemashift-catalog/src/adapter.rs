use schemashift_core::RawMetadataRow;

use crate::error::CatalogError;

/// Trait implemented by anything that can produce a catalog row batch.
pub trait CatalogSource {
    /// Returns the input format identifier (e.g. `csv`).
    fn format(&self) -> &'static str;

    /// Read every row. Partial batches are never returned.
    fn load(&self) -> Result<Vec<RawMetadataRow>, CatalogError>;
}
