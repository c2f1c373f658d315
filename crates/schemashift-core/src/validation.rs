use serde::{Deserialize, Serialize};

use crate::schema::Schema;

/// A foreign key whose target table is not part of the schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DanglingReference {
    pub table: String,
    pub column: String,
    pub target: String,
}

/// Consistency findings for a built schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub dangling_references: Vec<DanglingReference>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.dangling_references.is_empty()
    }
}

/// Validate internal consistency of a built schema.
///
/// Column uniqueness and key ordering are guaranteed by the builder; this
/// checks that every foreign-key target is a table of the same schema, since
/// emitted navigation members would otherwise point at types that are never
/// generated.
pub fn validate_schema(schema: &Schema) -> ValidationReport {
    let mut report = ValidationReport::default();

    for table in schema.tables() {
        for column in table.columns() {
            for target in column.foreign_key_targets() {
                if !schema.contains_table(target) {
                    report.dangling_references.push(DanglingReference {
                        table: table.name().to_string(),
                        column: column.name().to_string(),
                        target: target.clone(),
                    });
                }
            }
        }
    }

    report
}
