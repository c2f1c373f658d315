use crate::model::EmitOptions;
use crate::naming::{mapping_name, type_name};
use crate::writer::SourceWriter;

/// Builds the aggregate `DbContext` that registers every mapping class.
pub struct ContextAggregator<'a> {
    options: &'a EmitOptions,
}

impl<'a> ContextAggregator<'a> {
    pub fn new(options: &'a EmitOptions) -> Self {
        Self { options }
    }

    /// One `Configurations.Add` line per table, in the order given.
    pub fn aggregate<I, S>(&self, table_names: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let namespace = self.options.namespace.as_deref();
        let context_name = &self.options.context_name;

        let mut w = SourceWriter::new();
        w.line("using System.Data.Entity;");
        w.blank();
        w.open_namespace(namespace);
        w.open(format!("public class {context_name} : DbContext"));
        w.open(format!(
            "public {context_name}() : base(\"name={}\")",
            self.options.connection_name
        ));
        w.close();
        w.blank();
        w.open("protected override void OnModelCreating(DbModelBuilder modelBuilder)");
        for table in table_names {
            let mapping = mapping_name(&type_name(table.as_ref()));
            w.line(format!("modelBuilder.Configurations.Add(new {mapping}());"));
        }
        w.line("base.OnModelCreating(modelBuilder);");
        w.close();
        w.close();
        w.close_namespace(namespace);
        w.finish()
    }
}
