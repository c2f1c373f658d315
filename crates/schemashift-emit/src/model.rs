use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Options for the entity, mapping and context emitters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmitOptions {
    /// Namespace wrapping every generated class, if any.
    pub namespace: Option<String>,
    /// Name of the aggregate `DbContext` class.
    pub context_name: String,
    /// Connection-string name passed to the `DbContext` base constructor.
    pub connection_name: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            namespace: None,
            context_name: "ApplicationDbContext".to_string(),
            connection_name: "PostgresConnection".to_string(),
        }
    }
}

/// Every artifact produced for one schema.
#[derive(Debug, Clone)]
pub struct EmitOutput {
    /// CREATE TABLE / ALTER TABLE script.
    pub ddl: String,
    /// Table name → entity class source, in schema order.
    pub entities: IndexMap<String, String>,
    /// Table name → mapping class source, in schema order.
    pub mappings: IndexMap<String, String>,
    /// Aggregate context registering every mapping.
    pub context: String,
    pub types: TypeReport,
}

/// Which translation produced an unmapped type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeTarget {
    Sql,
    Property,
}

/// A column whose source type matched no translation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedType {
    pub table: String,
    pub column: String,
    pub source_type: String,
    pub target: TypeTarget,
}

/// Type translation summary for a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeReport {
    pub columns_total: usize,
    pub unmapped: Vec<UnmappedType>,
    /// Source type name → number of unmapped occurrences.
    pub unmapped_by_type: IndexMap<String, u64>,
}

impl TypeReport {
    pub fn record_unmapped(&mut self, issue: UnmappedType) {
        *self
            .unmapped_by_type
            .entry(issue.source_type.clone())
            .or_insert(0) += 1;
        self.unmapped.push(issue);
    }

    pub fn is_clean(&self) -> bool {
        self.unmapped.is_empty()
    }
}
