use std::collections::HashMap;

use indexmap::IndexMap;
use schemashift_core::{Schema, Table, TypeMapper};

use crate::model::EmitOptions;
use crate::naming::MemberNames;
use crate::writer::SourceWriter;

/// Emits one Entity Framework 6 `EntityTypeConfiguration` per table.
pub struct MappingEmitter<'a, M: TypeMapper + ?Sized> {
    mapper: &'a M,
    options: &'a EmitOptions,
}

impl<'a, M: TypeMapper + ?Sized> MappingEmitter<'a, M> {
    pub fn new(mapper: &'a M, options: &'a EmitOptions) -> Self {
        Self { mapper, options }
    }

    /// Table name → mapping class source, in schema order.
    pub fn emit(&self, schema: &Schema) -> IndexMap<String, String> {
        let names: HashMap<&str, MemberNames> = schema
            .tables()
            .map(|table| (table.name(), MemberNames::for_table(table)))
            .collect();

        schema
            .tables()
            .filter_map(|table| {
                let own = names.get(table.name())?;
                Some((table.name().to_string(), self.emit_table(table, own, &names)))
            })
            .collect()
    }

    fn emit_table(
        &self,
        table: &Table,
        own: &MemberNames,
        names: &HashMap<&str, MemberNames>,
    ) -> String {
        let namespace = self.options.namespace.as_deref();
        let class_name = own.class_name();
        let mapping_name = own.mapping_name();

        let mut w = SourceWriter::new();
        w.line("using System.Data.Entity.ModelConfiguration;");
        w.blank();
        w.open_namespace(namespace);
        w.open(format!(
            "public class {mapping_name} : EntityTypeConfiguration<{class_name}>"
        ));
        w.open(format!("public {mapping_name}()"));

        w.line(format!("ToTable(\"{}\");", table.name().to_lowercase()));

        let keys: Vec<&str> = table
            .primary_key_columns()
            .iter()
            .filter_map(|column| own.property(column))
            .collect();
        match keys.as_slice() {
            [] => {}
            [single] => w.line(format!("HasKey(e => e.{single});")),
            many => {
                let members = many
                    .iter()
                    .map(|key| format!("e.{key}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                w.line(format!("HasKey(e => new {{ {members} }});"));
            }
        }

        w.blank();
        for column in table.columns() {
            let Some(property) = own.property(column.name()) else {
                continue;
            };
            let requirement = if column.is_nullable() {
                "IsOptional()"
            } else {
                "IsRequired()"
            };
            let mut config = format!(
                "Property(e => e.{property}).{requirement}.HasColumnName(\"{}\")",
                column.name().to_lowercase()
            );
            let sql_type = self.mapper.sql_type(&column.descriptor());
            if sql_type.is_character() && column.length() > 0 {
                config.push_str(&format!(".HasMaxLength({})", column.length()));
            }
            config.push(';');
            w.line(config);
        }

        for column in table.columns().iter().filter(|column| column.is_foreign_key()) {
            let Some(property) = own.property(column.name()) else {
                continue;
            };
            for target in column.foreign_key_targets() {
                let Some(reference) = own.reference(target) else {
                    continue;
                };
                let relation = if column.is_nullable() {
                    "HasOptional"
                } else {
                    "HasRequired"
                };
                let inverse = names
                    .get(target.as_str())
                    .and_then(|target_names| target_names.collection(table.name()));

                w.blank();
                w.line(format!("{relation}(e => e.{reference})"));
                match inverse {
                    Some(collection) => w.line(format!("    .WithMany(t => t.{collection})")),
                    None => w.line("    .WithMany()"),
                }
                w.line(format!("    .HasForeignKey(e => e.{property});"));
            }
        }

        w.close();
        w.close();
        w.close_namespace(namespace);
        w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use schemashift_core::{OracleToPostgres, RawMetadataRow, build_schema};

    fn row(table: &str, column: &str, column_id: i32) -> RawMetadataRow {
        RawMetadataRow {
            table: Some(table.to_string()),
            column: Some(column.to_string()),
            column_id: Some(column_id),
            source_type: "NUMBER".to_string(),
            precision: Some(5),
            scale: Some(0),
            nullable: Some("N".to_string()),
            ..Default::default()
        }
    }

    fn mappings(rows: Vec<RawMetadataRow>) -> IndexMap<String, String> {
        let schema = build_schema(rows).expect("build").schema;
        let options = EmitOptions::default();
        MappingEmitter::new(&OracleToPostgres::new(), &options).emit(&schema)
    }

    #[test]
    fn composite_key_uses_anonymous_type() {
        let rows = vec![
            RawMetadataRow {
                constraint_type: Some("P".to_string()),
                ..row("LINK", "RIGHT_ID", 2)
            },
            RawMetadataRow {
                constraint_type: Some("P".to_string()),
                ..row("LINK", "LEFT_ID", 1)
            },
        ];

        let out = mappings(rows);
        assert!(out["LINK"].contains("HasKey(e => new { e.LeftId, e.RightId });"));
    }

    #[test]
    fn keyless_table_omits_has_key() {
        let out = mappings(vec![row("AUDIT", "ID", 1)]);
        assert!(!out["AUDIT"].contains("HasKey"));
        assert!(out["AUDIT"].contains("ToTable(\"audit\");"));
    }

    #[test]
    fn max_length_only_for_sized_character_columns() {
        let name = RawMetadataRow {
            source_type: "VARCHAR2".to_string(),
            length: Some(40),
            nullable: Some("Y".to_string()),
            ..row("DEPT", "NAME", 2)
        };
        let notes = RawMetadataRow {
            source_type: "CLOB".to_string(),
            length: Some(4000),
            ..row("DEPT", "NOTES", 3)
        };

        let out = mappings(vec![row("DEPT", "ID", 1), name, notes]);
        let dept = &out["DEPT"];
        assert!(dept.contains(
            "Property(e => e.Name).IsOptional().HasColumnName(\"name\").HasMaxLength(40);"
        ));
        assert!(dept.contains("Property(e => e.Notes).IsRequired().HasColumnName(\"notes\");"));
        assert!(dept.contains("Property(e => e.Id).IsRequired().HasColumnName(\"id\");"));
    }

    #[test]
    fn optional_reference_outside_the_schema_has_no_inverse() {
        let fk = RawMetadataRow {
            nullable: Some("Y".to_string()),
            constraint_type: Some("R".to_string()),
            ref_table: Some("REGION".to_string()),
            ..row("SITE", "REGION_ID", 1)
        };

        let out = mappings(vec![fk]);
        assert_eq!(
            out["SITE"],
            "using System.Data.Entity.ModelConfiguration;\n\
             \n\
             public class SiteMapping : EntityTypeConfiguration<Site>\n\
             {\n    \
                 public SiteMapping()\n    \
                 {\n        \
                     ToTable(\"site\");\n\
             \n        \
                     Property(e => e.RegionId).IsOptional().HasColumnName(\"region_id\");\n\
             \n        \
                     HasOptional(e => e.Region)\n            \
                         .WithMany()\n            \
                         .HasForeignKey(e => e.RegionId);\n    \
                 }\n\
             }\n"
        );
    }
}
