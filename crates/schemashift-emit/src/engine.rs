use std::thread;
use std::time::Instant;

use tracing::{info, warn};

use schemashift_core::{Schema, TypeMapper};

use crate::context::ContextAggregator;
use crate::ddl::DdlEmitter;
use crate::entity::EntityEmitter;
use crate::mapping::MappingEmitter;
use crate::model::{EmitOptions, EmitOutput, TypeReport, TypeTarget, UnmappedType};

/// Run every emitter over one schema.
///
/// The DDL, entity and mapping emitters only read `schema`, so they run on
/// scoped threads; the context is aggregated once they have joined.
pub fn emit_all<M>(schema: &Schema, mapper: &M, options: &EmitOptions) -> EmitOutput
where
    M: TypeMapper + ?Sized,
{
    let start = Instant::now();
    info!(
        event = "emit_start",
        tables = schema.len(),
        columns = schema.column_count(),
        source_dialect = mapper.source_dialect(),
        target_dialect = mapper.target_dialect(),
        language = mapper.target_language()
    );

    let (ddl, entities, mappings, types) = thread::scope(|scope| {
        let ddl = scope.spawn(|| DdlEmitter::new(mapper).emit(schema));
        let entities = scope.spawn(|| EntityEmitter::new(mapper, options).emit(schema));
        let mappings = scope.spawn(|| MappingEmitter::new(mapper, options).emit(schema));
        let types = collect_type_report(schema, mapper);

        (
            join(ddl),
            join(entities),
            join(mappings),
            types,
        )
    });

    let context = ContextAggregator::new(options).aggregate(mappings.keys());

    info!(
        event = "emit_finish",
        entities = entities.len(),
        mappings = mappings.len(),
        unmapped = types.unmapped.len(),
        duration_ms = start.elapsed().as_millis() as u64
    );

    EmitOutput {
        ddl,
        entities,
        mappings,
        context,
        types,
    }
}

/// Collect every column whose SQL or property type matched no rule.
pub fn collect_type_report<M>(schema: &Schema, mapper: &M) -> TypeReport
where
    M: TypeMapper + ?Sized,
{
    let mut report = TypeReport::default();
    for table in schema.tables() {
        for column in table.columns() {
            report.columns_total += 1;
            let desc = column.descriptor();
            let checks = [
                (TypeTarget::Sql, mapper.sql_type(&desc)),
                (TypeTarget::Property, mapper.property_type(&desc)),
            ];
            for (target, mapped) in checks {
                if !mapped.is_unmapped() {
                    continue;
                }
                warn!(
                    event = "type_unmapped",
                    table = table.name(),
                    column = column.name(),
                    source_type = column.source_type(),
                    translation = ?target
                );
                report.record_unmapped(UnmappedType {
                    table: table.name().to_string(),
                    column: column.name().to_string(),
                    source_type: column.source_type().to_string(),
                    target,
                });
            }
        }
    }
    report
}

fn join<T>(handle: thread::ScopedJoinHandle<'_, T>) -> T {
    handle
        .join()
        .unwrap_or_else(|payload| std::panic::resume_unwind(payload))
}
