use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading catalog rows.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("row schema error: {0}")]
    Schema(String),
    #[error("{} row format violation(s): {}", .0.len(), .0.join("; "))]
    RowFormat(Vec<String>),
    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}
