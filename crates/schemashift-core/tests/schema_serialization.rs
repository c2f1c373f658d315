use schemashift_core::{RawMetadataRow, build_schema};

fn row(table: &str, column: &str, column_id: i32, constraint: Option<&str>) -> RawMetadataRow {
    RawMetadataRow {
        owner: Some("HR".to_string()),
        table: Some(table.to_string()),
        column: Some(column.to_string()),
        column_id: Some(column_id),
        source_type: "NUMBER".to_string(),
        length: Some(22),
        precision: Some(5),
        scale: Some(0),
        nullable: Some("N".to_string()),
        constraint_type: constraint.map(str::to_string),
        ref_table: None,
    }
}

#[test]
fn serializes_schema_deterministically() {
    let rows = vec![row("DEPT", "DEPT_ID", 1, Some("P"))];
    let schema = build_schema(rows).expect("build schema").schema;

    let json = serde_json::to_string_pretty(&schema).expect("serialize schema");
    let expected = r#"{
  "tables": {
    "DEPT": {
      "name": "DEPT",
      "columns": [
        {
          "name": "DEPT_ID",
          "position": 1,
          "source_type": "NUMBER",
          "length": 22,
          "precision": 5,
          "scale": 0,
          "nullable": false,
          "is_primary_key": true,
          "foreign_key_targets": []
        }
      ],
      "primary_key_columns": [
        "DEPT_ID"
      ],
      "incoming_references": []
    }
  }
}"#;
    pretty_assertions::assert_eq!(json, expected);
}

#[test]
fn json_rows_round_trip_through_the_builder() {
    let json = r#"[
        {"table": "EMP", "column": "EMP_ID", "column_id": 1, "source_type": "NUMBER",
         "precision": 5, "scale": 0, "nullable": "N", "constraint_type": "P"},
        {"table": "EMP", "column": "NAME", "column_id": 2, "source_type": "VARCHAR2",
         "length": 30, "nullable": "Y"}
    ]"#;

    let rows: Vec<RawMetadataRow> = serde_json::from_str(json).expect("parse rows");
    let schema = build_schema(rows).expect("build schema").schema;

    let emp = schema.table("EMP").expect("emp table");
    assert_eq!(emp.primary_key_columns(), ["EMP_ID"]);
    assert!(emp.column("NAME").expect("name").is_nullable());
}
