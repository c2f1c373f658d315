use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One row of the catalog join (columns × constraints × referenced constraints).
///
/// The join fans out, so the same `(table, column)` pair can appear several
/// times with different constraint annotations. Field aliases accept the
/// upper-case column names the Oracle export query produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RawMetadataRow {
    /// Schema owner the row was read from.
    #[serde(default, alias = "OWNER")]
    pub owner: Option<String>,
    #[serde(default, alias = "TABLE_NAME")]
    pub table: Option<String>,
    #[serde(default, alias = "COLUMN_NAME")]
    pub column: Option<String>,
    /// Catalog column id, used to order columns independently of row arrival.
    #[serde(default, alias = "COLUMN_ID")]
    pub column_id: Option<i32>,
    #[serde(default, alias = "DATA_TYPE")]
    pub source_type: String,
    #[serde(default, alias = "DATA_LENGTH")]
    pub length: Option<i32>,
    #[serde(default, alias = "DATA_PRECISION")]
    pub precision: Option<i32>,
    #[serde(default, alias = "DATA_SCALE")]
    pub scale: Option<i32>,
    /// Catalog nullability flag (`Y` / `N`).
    #[serde(default, alias = "NULLABLE")]
    pub nullable: Option<String>,
    /// Constraint type code (`P`, `R`, ...).
    #[serde(default, alias = "CONSTRAINT_TYPE")]
    pub constraint_type: Option<String>,
    /// Table owning the constraint referenced by an `R` constraint.
    #[serde(default, alias = "R_TABLE_NAME")]
    pub ref_table: Option<String>,
}

impl RawMetadataRow {
    /// Only an explicit `N` marks a column as NOT NULL.
    pub fn is_nullable(&self) -> bool {
        !matches!(self.nullable.as_deref().map(str::trim), Some("N") | Some("n"))
    }

    pub fn constraint_kind(&self) -> ConstraintKind {
        ConstraintKind::from_code(self.constraint_type.as_deref())
    }

    /// Referenced table name, if the row carries a non-empty one.
    pub fn referenced_table(&self) -> Option<&str> {
        non_empty(self.ref_table.as_deref())
    }

    pub(crate) fn table_name(&self) -> Option<&str> {
        non_empty(self.table.as_deref())
    }

    pub(crate) fn column_name(&self) -> Option<&str> {
        non_empty(self.column.as_deref())
    }
}

/// Constraint participation recorded on a catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    /// Absent or unrecognized code; the row describes a plain column.
    None,
}

impl ConstraintKind {
    pub fn from_code(code: Option<&str>) -> Self {
        match code.map(str::trim) {
            Some("P") => ConstraintKind::PrimaryKey,
            Some("R") => ConstraintKind::ForeignKey,
            _ => ConstraintKind::None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nullable_flag_defaults_to_nullable() {
        let mut row = RawMetadataRow::default();
        assert!(row.is_nullable());

        row.nullable = Some("Y".to_string());
        assert!(row.is_nullable());

        row.nullable = Some("N".to_string());
        assert!(!row.is_nullable());
    }

    #[test]
    fn unknown_constraint_codes_are_plain_columns() {
        assert_eq!(ConstraintKind::from_code(Some("P")), ConstraintKind::PrimaryKey);
        assert_eq!(ConstraintKind::from_code(Some("R")), ConstraintKind::ForeignKey);
        assert_eq!(ConstraintKind::from_code(Some("C")), ConstraintKind::None);
        assert_eq!(ConstraintKind::from_code(Some("U")), ConstraintKind::None);
        assert_eq!(ConstraintKind::from_code(None), ConstraintKind::None);
    }

    #[test]
    fn deserializes_oracle_column_names() {
        let json = r#"{
            "TABLE_NAME": "EMP",
            "COLUMN_NAME": "DEPT_ID",
            "COLUMN_ID": 3,
            "DATA_TYPE": "NUMBER",
            "DATA_PRECISION": 5,
            "DATA_SCALE": 0,
            "NULLABLE": "N",
            "CONSTRAINT_TYPE": "R",
            "R_TABLE_NAME": "DEPT"
        }"#;

        let row: RawMetadataRow = serde_json::from_str(json).expect("deserialize row");
        assert_eq!(row.table.as_deref(), Some("EMP"));
        assert_eq!(row.column_id, Some(3));
        assert_eq!(row.length, None);
        assert!(!row.is_nullable());
        assert_eq!(row.constraint_kind(), ConstraintKind::ForeignKey);
        assert_eq!(row.referenced_table(), Some("DEPT"));
    }
}
