//! Raw catalog rows → canonical [`Schema`].
//!
//! The catalog join fans out across constraint chains, so one column shows up
//! once per constraint it takes part in. The builder folds the rows with a
//! `(table, column)` keyed accumulator: the first row creates the column and
//! later rows only merge constraint flags.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::incoming_references;
use crate::row::{ConstraintKind, RawMetadataRow};
use crate::schema::{Column, Schema, Table};

/// Options passed to the builder at call time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildOptions {
    /// Keep only rows owned by this schema. Rows without an owner are kept.
    pub owner: Option<String>,
    /// Abort on the first invalid row instead of skipping it.
    pub strict: bool,
}

/// A row rejected because it is missing an identifying field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// Zero-based index in the input batch.
    pub index: usize,
    pub reason: String,
}

/// Duplicate rows for one column that disagree on column metadata.
///
/// The first row wins; later values are reported here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataConflict {
    pub table: String,
    pub column: String,
    pub field: String,
    pub kept: String,
    pub ignored: String,
}

/// What happened to the input rows during a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub rows_total: usize,
    pub rows_merged: usize,
    pub rows_filtered: usize,
    pub skipped_rows: Vec<SkippedRow>,
    pub conflicts: Vec<MetadataConflict>,
}

/// Built schema plus the report of rows it did not use verbatim.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub schema: Schema,
    pub report: BuildReport,
}

/// Folds catalog rows into a [`Schema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaGraphBuilder {
    options: BuildOptions,
}

impl SchemaGraphBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    /// Build the canonical schema from one row batch.
    ///
    /// Rows missing a table or column name are skipped and reported, or
    /// returned as [`Error::InvalidRow`] when `strict` is set.
    pub fn build<I>(&self, rows: I) -> Result<BuildOutcome>
    where
        I: IntoIterator<Item = RawMetadataRow>,
    {
        let mut report = BuildReport::default();
        let mut tables: IndexMap<String, IndexMap<String, Column>> = IndexMap::new();

        for (index, row) in rows.into_iter().enumerate() {
            report.rows_total += 1;

            if !self.owned(&row) {
                report.rows_filtered += 1;
                continue;
            }

            let (table_name, column_name) = match (row.table_name(), row.column_name()) {
                (Some(table), Some(column)) => (table.to_string(), column.to_string()),
                (table, _) => {
                    let reason = if table.is_none() {
                        "missing table name"
                    } else {
                        "missing column name"
                    };
                    if self.options.strict {
                        return Err(Error::InvalidRow {
                            index,
                            reason: reason.to_string(),
                        });
                    }
                    tracing::warn!(event = "row_skipped", index, reason);
                    report.skipped_rows.push(SkippedRow {
                        index,
                        reason: reason.to_string(),
                    });
                    continue;
                }
            };

            let columns = tables.entry(table_name.clone()).or_default();
            match columns.get_mut(&column_name) {
                Some(column) => {
                    report.rows_merged += 1;
                    merge_metadata(column, &row, &table_name, &mut report.conflicts);
                    merge_constraint(column, &row);
                }
                None => {
                    let mut column = new_column(column_name.clone(), &row);
                    merge_constraint(&mut column, &row);
                    columns.insert(column_name, column);
                }
            }
        }

        let mut built: IndexMap<String, Table> = tables
            .into_iter()
            .map(|(name, columns)| {
                let mut columns: Vec<Column> = columns.into_values().collect();
                // Stable: columns without a catalog id keep first-seen order.
                columns.sort_by_key(|column| match column.position {
                    Some(position) => (0, position),
                    None => (1, 0),
                });
                (name.clone(), Table::new(name, columns))
            })
            .collect();
        // Same table order as the catalog query, whatever order rows arrive in.
        built.sort_keys();

        let mut incoming = incoming_references(&built);
        for (name, table) in built.iter_mut() {
            if let Some(references) = incoming.swap_remove(name) {
                table.set_incoming_references(references);
            }
        }

        tracing::debug!(
            event = "schema_built",
            tables = built.len(),
            rows = report.rows_total,
            skipped = report.skipped_rows.len(),
            conflicts = report.conflicts.len()
        );

        Ok(BuildOutcome {
            schema: Schema::new(built),
            report,
        })
    }

    fn owned(&self, row: &RawMetadataRow) -> bool {
        match (&self.options.owner, row.owner.as_deref()) {
            (Some(expected), Some(owner)) => owner.trim().eq_ignore_ascii_case(expected.trim()),
            _ => true,
        }
    }
}

/// Build a schema with default options.
pub fn build_schema<I>(rows: I) -> Result<BuildOutcome>
where
    I: IntoIterator<Item = RawMetadataRow>,
{
    SchemaGraphBuilder::default().build(rows)
}

fn new_column(name: String, row: &RawMetadataRow) -> Column {
    Column {
        name,
        position: row.column_id,
        source_type: row.source_type.trim().to_string(),
        length: row.length.unwrap_or(0),
        precision: row.precision.unwrap_or(0),
        scale: row.scale.unwrap_or(0),
        nullable: row.is_nullable(),
        is_primary_key: false,
        foreign_key_targets: Vec::new(),
    }
}

fn merge_constraint(column: &mut Column, row: &RawMetadataRow) {
    match row.constraint_kind() {
        ConstraintKind::PrimaryKey => column.is_primary_key = true,
        ConstraintKind::ForeignKey => {
            if let Some(target) = row.referenced_table() {
                if !column.foreign_key_targets.iter().any(|known| known == target) {
                    column.foreign_key_targets.push(target.to_string());
                }
            }
        }
        ConstraintKind::None => {}
    }
}

fn merge_metadata(
    column: &mut Column,
    row: &RawMetadataRow,
    table: &str,
    conflicts: &mut Vec<MetadataConflict>,
) {
    if column.position.is_none() {
        column.position = row.column_id;
    }

    let incoming = new_column(column.name.clone(), row);
    let mut check = |field: &str, kept: String, ignored: String| {
        if kept != ignored {
            conflicts.push(MetadataConflict {
                table: table.to_string(),
                column: column.name.clone(),
                field: field.to_string(),
                kept,
                ignored,
            });
        }
    };

    check(
        "source_type",
        column.source_type.clone(),
        incoming.source_type.clone(),
    );
    check(
        "length",
        column.length.to_string(),
        incoming.length.to_string(),
    );
    check(
        "precision",
        column.precision.to_string(),
        incoming.precision.to_string(),
    );
    check("scale", column.scale.to_string(), incoming.scale.to_string());
    check(
        "nullable",
        column.nullable.to_string(),
        incoming.nullable.to_string(),
    );
}
