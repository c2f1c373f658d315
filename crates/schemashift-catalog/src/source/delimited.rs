use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use schemashift_core::RawMetadataRow;

use super::read_file;
use crate::adapter::CatalogSource;
use crate::error::CatalogError;

/// Catalog export stored as CSV with a header row.
#[derive(Debug, Clone)]
pub struct CsvCatalog {
    path: PathBuf,
}

impl CsvCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for CsvCatalog {
    fn format(&self) -> &'static str {
        "csv"
    }

    fn load(&self) -> Result<Vec<RawMetadataRow>, CatalogError> {
        let bytes = read_file(&self.path)?;
        let rows = read_csv_rows(bytes.as_slice())?;
        tracing::info!(
            event = "catalog_loaded",
            format = "csv",
            path = %self.path.display(),
            rows = rows.len()
        );
        Ok(rows)
    }
}

/// Read rows from CSV text.
///
/// Headers are matched case-insensitively against both the row field names
/// and the Oracle catalog column names; unknown columns are ignored.
pub fn read_csv_rows<R: Read>(reader: R) -> Result<Vec<RawMetadataRow>, CatalogError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .flexible(false)
        .from_reader(reader);

    let headers: StringRecord = reader
        .headers()?
        .iter()
        .map(canonical_header)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.deserialize(Some(&headers))?);
    }
    Ok(rows)
}

fn canonical_header(header: &str) -> String {
    let upper = header.trim().to_ascii_uppercase();
    let canonical = match upper.as_str() {
        "OWNER" => "owner",
        "TABLE" | "TABLE_NAME" => "table",
        "COLUMN" | "COLUMN_NAME" => "column",
        "COLUMN_ID" => "column_id",
        "SOURCE_TYPE" | "DATA_TYPE" => "source_type",
        "LENGTH" | "DATA_LENGTH" => "length",
        "PRECISION" | "DATA_PRECISION" => "precision",
        "SCALE" | "DATA_SCALE" => "scale",
        "NULLABLE" => "nullable",
        "CONSTRAINT_TYPE" => "constraint_type",
        "REF_TABLE" | "R_TABLE_NAME" => "ref_table",
        _ => return upper.to_ascii_lowercase(),
    };
    canonical.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracle_headers_are_accepted_in_any_case() {
        let data = "\
table_name,Column_Name,DATA_TYPE,data_length,DATA_PRECISION,DATA_SCALE,NULLABLE,CONSTRAINT_TYPE,R_TABLE_NAME,POSITION
EMP,EMP_ID,NUMBER,22,5,0,N,P,,1
EMP,DEPT_ID,NUMBER,22,5,0,N,R,DEPT,
";
        let rows = read_csv_rows(data.as_bytes()).expect("rows");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].table.as_deref(), Some("EMP"));
        assert_eq!(rows[0].column.as_deref(), Some("EMP_ID"));
        assert_eq!(rows[0].precision, Some(5));
        assert_eq!(rows[0].ref_table, None);
        assert_eq!(rows[1].ref_table.as_deref(), Some("DEPT"));
        assert_eq!(rows[1].constraint_type.as_deref(), Some("R"));
    }

    #[test]
    fn empty_numeric_fields_read_as_missing() {
        let data = "table,column,source_type,length,precision,scale\nT,C,DATE,7,,\n";
        let rows = read_csv_rows(data.as_bytes()).expect("rows");
        assert_eq!(rows[0].length, Some(7));
        assert_eq!(rows[0].precision, None);
        assert_eq!(rows[0].scale, None);
        assert_eq!(rows[0].nullable, None);
    }

    #[test]
    fn malformed_number_is_an_error() {
        let data = "table,column,length\nT,C,wide\n";
        let err = read_csv_rows(data.as_bytes()).err().expect("error");
        assert!(matches!(err, CatalogError::Csv(_)));
    }
}
