use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::{Schema, Table};

/// Summary of the foreign-key graph structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FkGraphSummary {
    pub nodes: usize,
    /// Distinct (referencing table, referenced table) pairs.
    pub edges: usize,
    pub self_references: usize,
    /// Edges whose target is not a table of the schema.
    pub external_targets: usize,
}

/// Summarize the foreign-key graph of a built schema.
pub fn summarize_fk_graph(schema: &Schema) -> FkGraphSummary {
    let mut summary = FkGraphSummary {
        nodes: schema.len(),
        edges: 0,
        self_references: 0,
        external_targets: 0,
    };

    for table in schema.tables() {
        for target in table.foreign_key_targets() {
            summary.edges += 1;
            if target == table.name() {
                summary.self_references += 1;
            }
            if !schema.contains_table(target) {
                summary.external_targets += 1;
            }
        }
    }

    summary
}

/// For every table, the tables whose columns reference it.
///
/// Referencing tables are listed once each, in table order. Targets outside
/// the map are ignored.
pub(crate) fn incoming_references(tables: &IndexMap<String, Table>) -> IndexMap<String, Vec<String>> {
    let mut incoming: IndexMap<String, Vec<String>> = tables
        .keys()
        .map(|name| (name.clone(), Vec::new()))
        .collect();

    for table in tables.values() {
        for target in table.foreign_key_targets() {
            if let Some(sources) = incoming.get_mut(target) {
                if !sources.iter().any(|source| source == table.name()) {
                    sources.push(table.name().to_string());
                }
            }
        }
    }

    incoming
}
