use schemashift_core::{OracleToPostgres, RawMetadataRow, build_schema};
use schemashift_emit::{EmitOptions, emit_all};

fn row(table: &str, column: &str, column_id: i32, source_type: &str) -> RawMetadataRow {
    RawMetadataRow {
        table: Some(table.to_string()),
        column: Some(column.to_string()),
        column_id: Some(column_id),
        source_type: source_type.to_string(),
        length: Some(30),
        precision: Some(5),
        scale: Some(0),
        nullable: Some("N".to_string()),
        ..Default::default()
    }
}

fn main() {
    let rows = vec![
        RawMetadataRow {
            constraint_type: Some("P".to_string()),
            ..row("DEPT", "DEPT_ID", 1, "NUMBER")
        },
        RawMetadataRow {
            nullable: Some("Y".to_string()),
            ..row("DEPT", "DNAME", 2, "VARCHAR2")
        },
        RawMetadataRow {
            constraint_type: Some("P".to_string()),
            ..row("EMP", "EMP_ID", 1, "NUMBER")
        },
        RawMetadataRow {
            nullable: Some("Y".to_string()),
            ..row("EMP", "NAME", 2, "VARCHAR2")
        },
        RawMetadataRow {
            constraint_type: Some("R".to_string()),
            ref_table: Some("DEPT".to_string()),
            ..row("EMP", "DEPT_ID", 3, "NUMBER")
        },
    ];

    let schema = build_schema(rows).expect("build schema").schema;
    let output = emit_all(&schema, &OracleToPostgres::new(), &EmitOptions::default());

    println!("{}", output.ddl);
    for (table, source) in output.entities.iter().chain(output.mappings.iter()) {
        println!("// {table}\n{source}");
    }
    println!("{}", output.context);
}
