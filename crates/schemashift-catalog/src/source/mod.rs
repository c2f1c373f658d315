use std::path::Path;

use crate::adapter::CatalogSource;
use crate::error::CatalogError;

mod delimited;
mod json;

pub use delimited::{CsvCatalog, read_csv_rows};
pub use json::{JsonCatalog, parse_json_rows, row_schema};

/// Pick a loader from the file extension (`.csv` or `.json`, any case).
pub fn catalog_from_path(path: impl AsRef<Path>) -> Result<Box<dyn CatalogSource>, CatalogError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => Ok(Box::new(CsvCatalog::new(path))),
        "json" => Ok(Box::new(JsonCatalog::new(path))),
        _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, CatalogError> {
    std::fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}
