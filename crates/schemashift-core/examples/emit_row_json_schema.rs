use schemars::schema_for;
use schemashift_core::RawMetadataRow;

fn main() {
    let schema = schema_for!(Vec<RawMetadataRow>);
    let json = serde_json::to_string_pretty(&schema).expect("serialize json schema");
    println!("{json}");
}
