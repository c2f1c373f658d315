/// Columns × constraints × referenced constraints for one owner.
///
/// The join fans out: a column that takes part in several constraints comes
/// back once per constraint. Result column names match the aliases accepted
/// by [`RawMetadataRow`](schemashift_core::RawMetadataRow).
pub fn catalog_query(owner: &str) -> String {
    let owner = quote_literal(&owner.trim().to_uppercase());
    format!(
        r#"SELECT DISTINCT
    cols.OWNER,
    cols.TABLE_NAME,
    cols.COLUMN_NAME,
    cols.COLUMN_ID,
    cols.DATA_TYPE,
    cols.DATA_LENGTH,
    cols.DATA_PRECISION,
    cols.DATA_SCALE,
    cols.NULLABLE,
    cons.CONSTRAINT_TYPE,
    rcons.TABLE_NAME AS R_TABLE_NAME
FROM ALL_TAB_COLUMNS cols
LEFT JOIN ALL_CONS_COLUMNS ccols
    ON cols.TABLE_NAME = ccols.TABLE_NAME
    AND cols.COLUMN_NAME = ccols.COLUMN_NAME
    AND ccols.OWNER = {owner}
LEFT JOIN ALL_CONSTRAINTS cons
    ON ccols.CONSTRAINT_NAME = cons.CONSTRAINT_NAME
    AND cons.OWNER = {owner}
LEFT JOIN ALL_CONSTRAINTS rcons
    ON cons.R_CONSTRAINT_NAME = rcons.CONSTRAINT_NAME
    AND rcons.OWNER = {owner}
WHERE cols.OWNER = {owner}
ORDER BY cols.TABLE_NAME, cols.COLUMN_ID"#
    )
}

/// Quote a value as an Oracle string literal, doubling embedded quotes.
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
