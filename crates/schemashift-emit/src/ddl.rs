use schemashift_core::{Schema, Table, TypeMapper};

use crate::writer::SourceWriter;

/// Emits the target-dialect `CREATE TABLE` script.
///
/// Tables are written in schema order. Referenced tables may be declared
/// after the tables that reference them; the script carries no foreign-key
/// constraints, so no dependency ordering is applied.
pub struct DdlEmitter<'a, M: TypeMapper + ?Sized> {
    mapper: &'a M,
}

impl<'a, M: TypeMapper + ?Sized> DdlEmitter<'a, M> {
    pub fn new(mapper: &'a M) -> Self {
        Self { mapper }
    }

    pub fn emit(&self, schema: &Schema) -> String {
        let mut w = SourceWriter::new();
        for table in schema.tables() {
            self.emit_table(&mut w, table);
            w.blank();
        }
        w.finish()
    }

    fn emit_table(&self, w: &mut SourceWriter, table: &Table) {
        let table_name = table.name().to_lowercase();
        w.line(format!("CREATE TABLE {table_name} ("));

        let count = table.columns().len();
        for (idx, column) in table.columns().iter().enumerate() {
            let sql_type = self.mapper.sql_type(&column.descriptor());
            let mut definition = format!("    {} {}", column.name().to_lowercase(), sql_type);
            if !column.is_nullable() {
                definition.push_str(" NOT NULL");
            }
            if idx + 1 < count {
                definition.push(',');
            }
            w.line(definition);
        }
        w.line(");");

        if table.has_primary_key() {
            let key_columns = table
                .primary_key_columns()
                .iter()
                .map(|column| column.to_lowercase())
                .collect::<Vec<_>>()
                .join(", ");
            w.line(format!(
                "ALTER TABLE {table_name} ADD PRIMARY KEY ({key_columns});"
            ));
        }
    }
}
