use std::path::{Path, PathBuf};

use jsonschema::JSONSchema;
use schemars::schema_for;
use schemashift_core::RawMetadataRow;
use serde_json::Value;

use super::read_file;
use crate::adapter::CatalogSource;
use crate::error::CatalogError;

/// Catalog export stored as a JSON array of rows.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for JsonCatalog {
    fn format(&self) -> &'static str {
        "json"
    }

    fn load(&self) -> Result<Vec<RawMetadataRow>, CatalogError> {
        let bytes = read_file(&self.path)?;
        let document: Value = serde_json::from_slice(&bytes)?;
        let rows = parse_json_rows(document)?;
        tracing::info!(
            event = "catalog_loaded",
            format = "json",
            path = %self.path.display(),
            rows = rows.len()
        );
        Ok(rows)
    }
}

/// JSON Schema describing a row batch.
pub fn row_schema() -> Value {
    serde_json::to_value(schema_for!(Vec<RawMetadataRow>)).unwrap_or(Value::Null)
}

/// Validate a JSON document against [`row_schema`], then deserialize it.
pub fn parse_json_rows(document: Value) -> Result<Vec<RawMetadataRow>, CatalogError> {
    let schema = row_schema();
    let compiled =
        JSONSchema::compile(&schema).map_err(|err| CatalogError::Schema(err.to_string()))?;

    if let Err(errors) = compiled.validate(&document) {
        let violations = errors
            .map(|error| {
                let path = error.instance_path.to_string();
                let path = if path.is_empty() { "/".to_string() } else { path };
                format!("{path}: {error}")
            })
            .collect::<Vec<_>>();
        tracing::warn!(event = "catalog_rejected", violations = violations.len());
        return Err(CatalogError::RowFormat(violations));
    }

    Ok(serde_json::from_value(document)?)
}
