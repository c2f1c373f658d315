use indexmap::IndexMap;
use schemashift_core::{Schema, Table, TypeMapper};

use crate::model::EmitOptions;
use crate::naming::{MemberNames, type_name};
use crate::writer::SourceWriter;

/// Emits one C# entity class per table.
///
/// Each class gets a scalar property per column, a reference navigation per
/// distinct foreign-key target and a collection navigation per table that
/// references it.
pub struct EntityEmitter<'a, M: TypeMapper + ?Sized> {
    mapper: &'a M,
    options: &'a EmitOptions,
}

impl<'a, M: TypeMapper + ?Sized> EntityEmitter<'a, M> {
    pub fn new(mapper: &'a M, options: &'a EmitOptions) -> Self {
        Self { mapper, options }
    }

    /// Table name → class source, in schema order.
    pub fn emit(&self, schema: &Schema) -> IndexMap<String, String> {
        schema
            .tables()
            .map(|table| (table.name().to_string(), self.emit_table(table)))
            .collect()
    }

    pub fn emit_table(&self, table: &Table) -> String {
        let names = MemberNames::for_table(table);
        let namespace = self.options.namespace.as_deref();

        let mut w = SourceWriter::new();
        w.line("using System;");
        w.line("using System.Collections.Generic;");
        w.line("using System.ComponentModel.DataAnnotations;");
        w.line("using System.ComponentModel.DataAnnotations.Schema;");
        w.blank();
        w.line("#nullable enable");
        w.blank();
        w.open_namespace(namespace);
        w.open(format!("public partial class {}", names.class_name()));

        let composite = table.has_composite_key();
        for column in table.columns() {
            let Some(property) = names.property(column.name()) else {
                continue;
            };

            if column.is_primary_key() {
                w.line("[Key]");
                if composite {
                    let order = table
                        .primary_key_columns()
                        .iter()
                        .position(|key| key == column.name())
                        .unwrap_or_default();
                    w.line(format!("[Column(Order = {order})]"));
                }
            }

            let property_type = self.mapper.property_type(&column.descriptor());
            w.line(format!(
                "public {property_type} {property} {{ get; set; }}"
            ));
        }

        let targets = table.foreign_key_targets();
        if !targets.is_empty() {
            w.blank();
        }
        for target in targets {
            let Some(property) = names.reference(target) else {
                continue;
            };
            let target_type = type_name(target);
            if reference_is_optional(table, target) {
                w.line(format!(
                    "public virtual {target_type}? {property} {{ get; set; }}"
                ));
            } else {
                w.line(format!(
                    "public virtual {target_type} {property} {{ get; set; }} = null!;"
                ));
            }
        }

        if !table.incoming_references().is_empty() {
            w.blank();
        }
        for source in table.incoming_references() {
            let Some(property) = names.collection(source) else {
                continue;
            };
            let source_type = type_name(source);
            w.line(format!(
                "public virtual ICollection<{source_type}> {property} {{ get; set; }} = new HashSet<{source_type}>();"
            ));
        }

        w.close();
        w.close_namespace(namespace);
        w.finish()
    }
}

/// A reference is optional only when every column pointing at `target` is nullable.
fn reference_is_optional(table: &Table, target: &str) -> bool {
    table
        .columns()
        .iter()
        .filter(|column| column.foreign_key_targets().iter().any(|t| t == target))
        .all(|column| column.is_nullable())
}
