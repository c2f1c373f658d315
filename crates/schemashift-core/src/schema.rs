use indexmap::IndexMap;
use serde::Serialize;

use crate::types::TypeDescriptor;

/// Canonical, de-duplicated schema graph built from catalog rows.
///
/// Tables are ordered by name.
/// Only [`SchemaGraphBuilder`](crate::SchemaGraphBuilder) constructs values of
/// this type; everything is read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    tables: IndexMap<String, Table>,
}

impl Schema {
    pub(crate) fn new(tables: IndexMap<String, Table>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> impl ExactSizeIterator<Item = &Table> {
        self.tables.values()
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names in schema order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.tables.values().map(|table| table.columns.len()).sum()
    }
}

/// A table with its columns in catalog order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
    primary_key_columns: Vec<String>,
    incoming_references: Vec<String>,
}

impl Table {
    pub(crate) fn new(name: String, columns: Vec<Column>) -> Self {
        let primary_key_columns = columns
            .iter()
            .filter(|column| column.is_primary_key)
            .map(|column| column.name.clone())
            .collect();

        Self {
            name,
            columns,
            primary_key_columns,
            incoming_references: Vec::new(),
        }
    }

    pub(crate) fn set_incoming_references(&mut self, references: Vec<String>) {
        self.incoming_references = references;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    /// Primary-key column names in catalog column order.
    pub fn primary_key_columns(&self) -> &[String] {
        &self.primary_key_columns
    }

    pub fn has_primary_key(&self) -> bool {
        !self.primary_key_columns.is_empty()
    }

    pub fn has_composite_key(&self) -> bool {
        self.primary_key_columns.len() > 1
    }

    /// Tables with a foreign key pointing at this table, in schema order.
    pub fn incoming_references(&self) -> &[String] {
        &self.incoming_references
    }

    /// Distinct foreign-key targets across all columns, first-seen order.
    pub fn foreign_key_targets(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = Vec::new();
        for column in &self.columns {
            for target in &column.foreign_key_targets {
                if !targets.contains(&target.as_str()) {
                    targets.push(target.as_str());
                }
            }
        }
        targets
    }
}

/// A single column, merged across every catalog row that mentioned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub(crate) name: String,
    pub(crate) position: Option<i32>,
    pub(crate) source_type: String,
    pub(crate) length: i32,
    pub(crate) precision: i32,
    pub(crate) scale: i32,
    pub(crate) nullable: bool,
    pub(crate) is_primary_key: bool,
    pub(crate) foreign_key_targets: Vec<String>,
}

impl Column {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_type(&self) -> &str {
        &self.source_type
    }

    pub fn length(&self) -> i32 {
        self.length
    }

    pub fn precision(&self) -> i32 {
        self.precision
    }

    pub fn scale(&self) -> i32 {
        self.scale
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_primary_key(&self) -> bool {
        self.is_primary_key
    }

    pub fn foreign_key_targets(&self) -> &[String] {
        &self.foreign_key_targets
    }

    pub fn is_foreign_key(&self) -> bool {
        !self.foreign_key_targets.is_empty()
    }

    /// Type descriptor handed to a [`TypeMapper`](crate::TypeMapper).
    pub fn descriptor(&self) -> TypeDescriptor<'_> {
        TypeDescriptor {
            source_type: &self.source_type,
            length: self.length,
            precision: self.precision,
            scale: self.scale,
            nullable: self.nullable,
        }
    }
}
