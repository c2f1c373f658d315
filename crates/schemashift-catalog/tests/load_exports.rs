use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use schemashift_catalog::{CatalogError, catalog_from_path};
use schemashift_core::build_schema;

const EMP_CSV: &str = "\
OWNER,TABLE_NAME,COLUMN_NAME,COLUMN_ID,DATA_TYPE,DATA_LENGTH,DATA_PRECISION,DATA_SCALE,NULLABLE,CONSTRAINT_TYPE,R_TABLE_NAME
HR,DEPT,DEPT_ID,1,NUMBER,22,5,0,N,P,
HR,EMP,EMP_ID,1,NUMBER,22,5,0,N,P,
HR,EMP,NAME,2,VARCHAR2,30,,,Y,,
HR,EMP,DEPT_ID,3,NUMBER,22,5,0,N,,
HR,EMP,DEPT_ID,3,NUMBER,22,5,0,N,R,DEPT
";

fn scratch_file(name: &str, contents: &str) -> Result<PathBuf> {
    let dir = std::env::temp_dir().join(format!("schemashift-catalog-{}", std::process::id()));
    fs::create_dir_all(&dir).context("creating scratch dir")?;
    let path = dir.join(name);
    fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[test]
fn csv_export_builds_the_expected_schema() -> Result<()> {
    let path = scratch_file("emp.csv", EMP_CSV)?;
    let rows = catalog_from_path(&path)?.load()?;
    assert_eq!(rows.len(), 5);

    let outcome = build_schema(rows)?;
    assert_eq!(outcome.report.rows_merged, 1);

    let schema = outcome.schema;
    assert_eq!(schema.table_names(), vec!["DEPT", "EMP"]);

    let emp = schema.table("EMP").context("EMP table")?;
    assert_eq!(emp.primary_key_columns(), ["EMP_ID".to_string()]);
    assert_eq!(emp.foreign_key_targets(), vec!["DEPT"]);
    assert!(emp.column("NAME").context("NAME column")?.is_nullable());

    let dept = schema.table("DEPT").context("DEPT table")?;
    assert_eq!(dept.incoming_references(), ["EMP".to_string()]);
    Ok(())
}

#[test]
fn json_export_matches_csv_export() -> Result<()> {
    let json = r#"[
  {"OWNER": "HR", "TABLE_NAME": "DEPT", "COLUMN_NAME": "DEPT_ID", "COLUMN_ID": 1, "DATA_TYPE": "NUMBER",
   "DATA_LENGTH": 22, "DATA_PRECISION": 5, "DATA_SCALE": 0, "NULLABLE": "N", "CONSTRAINT_TYPE": "P"},
  {"OWNER": "HR", "TABLE_NAME": "EMP", "COLUMN_NAME": "EMP_ID", "COLUMN_ID": 1, "DATA_TYPE": "NUMBER",
   "DATA_LENGTH": 22, "DATA_PRECISION": 5, "DATA_SCALE": 0, "NULLABLE": "N", "CONSTRAINT_TYPE": "P"},
  {"OWNER": "HR", "TABLE_NAME": "EMP", "COLUMN_NAME": "NAME", "COLUMN_ID": 2, "DATA_TYPE": "VARCHAR2",
   "DATA_LENGTH": 30, "DATA_PRECISION": null, "DATA_SCALE": null, "NULLABLE": "Y", "CONSTRAINT_TYPE": null},
  {"OWNER": "HR", "TABLE_NAME": "EMP", "COLUMN_NAME": "DEPT_ID", "COLUMN_ID": 3, "DATA_TYPE": "NUMBER",
   "DATA_LENGTH": 22, "DATA_PRECISION": 5, "DATA_SCALE": 0, "NULLABLE": "N", "CONSTRAINT_TYPE": null},
  {"OWNER": "HR", "TABLE_NAME": "EMP", "COLUMN_NAME": "DEPT_ID", "COLUMN_ID": 3, "DATA_TYPE": "NUMBER",
   "DATA_LENGTH": 22, "DATA_PRECISION": 5, "DATA_SCALE": 0, "NULLABLE": "N", "CONSTRAINT_TYPE": "R",
   "R_TABLE_NAME": "DEPT"}
]"#;
    let json_path = scratch_file("emp.json", json)?;
    let csv_path = scratch_file("emp-compare.csv", EMP_CSV)?;

    let from_json = catalog_from_path(&json_path)?.load()?;
    let from_csv = catalog_from_path(&csv_path)?.load()?;
    assert_eq!(from_json, from_csv);
    Ok(())
}

#[test]
fn missing_file_reports_the_path() -> Result<()> {
    let path = std::env::temp_dir().join("schemashift-catalog-does-not-exist.csv");
    let err = catalog_from_path(&path)?
        .load()
        .err()
        .context("expected io error")?;

    match err {
        CatalogError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}
