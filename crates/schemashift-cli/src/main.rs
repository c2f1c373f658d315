mod registry;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use registry::{
    RegistryError, RunContext, RunReport, init_run_logging, start_run, write_artifacts,
    write_report, write_schema,
};
use schemashift_catalog::oracle::catalog_query;
use schemashift_catalog::source::row_schema;
use schemashift_catalog::{CatalogError, catalog_from_path};
use schemashift_core::{
    Error as CoreError, OracleToPostgres, SchemaGraphBuilder, TypeMapper, summarize_fk_graph,
    validate_schema,
};
use schemashift_emit::emit_all;
use settings::{Settings, SettingsError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("strict mode: {0}")]
    Strict(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "schemashift",
    version,
    about = "Translate Oracle catalog exports into PostgreSQL DDL and EF6 C# code"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the schema from a catalog export and write every artifact.
    Translate(TranslateArgs),
    /// Print the Oracle query whose result set the loaders accept.
    CatalogQuery(CatalogQueryArgs),
    /// Print the JSON Schema of the catalog row format.
    RowSchema,
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Settings file (defaults to ./schemashift.toml when present).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Catalog export (.csv or .json).
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,
    /// Keep only rows owned by this schema.
    #[arg(long)]
    owner: Option<String>,
    /// Output directory for runs.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
    /// Fail on invalid rows, unmapped types or dangling references.
    #[arg(long, default_value_t = false)]
    strict: bool,
    /// Namespace for generated C# classes.
    #[arg(long)]
    namespace: Option<String>,
    /// Name of the generated DbContext class.
    #[arg(long)]
    context_name: Option<String>,
    /// Connection-string name passed to the DbContext.
    #[arg(long)]
    connection_name: Option<String>,
}

#[derive(Args, Debug)]
struct CatalogQueryArgs {
    /// Schema owner to export.
    #[arg(long)]
    owner: String,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Translate(args) => run_translate(args),
        Command::CatalogQuery(args) => {
            println!("{}", catalog_query(&args.owner));
            Ok(())
        }
        Command::RowSchema => {
            println!("{}", serde_json::to_string_pretty(&row_schema())?);
            Ok(())
        }
    }
}

fn resolve_settings(args: TranslateArgs) -> Result<Settings, CliError> {
    let mut settings = Settings::discover(args.config.as_deref())?;

    if args.input.is_some() {
        settings.input = args.input;
    }
    if args.owner.is_some() {
        settings.owner = args.owner;
    }
    if let Some(out_dir) = args.out_dir {
        settings.out_dir = out_dir;
    }
    if args.strict {
        settings.strict = true;
    }
    if args.namespace.is_some() {
        settings.namespace = args.namespace;
    }
    if let Some(context_name) = args.context_name {
        settings.context_name = context_name;
    }
    if let Some(connection_name) = args.connection_name {
        settings.connection_name = connection_name;
    }

    if settings.context_name.trim().is_empty() {
        return Err(CliError::InvalidConfig(
            "context name must not be empty".to_string(),
        ));
    }
    Ok(settings)
}

fn run_translate(args: TranslateArgs) -> Result<(), CliError> {
    let settings = resolve_settings(args)?;
    let input = settings.input.clone().ok_or_else(|| {
        CliError::InvalidConfig("catalog input is required (--input or `input`)".to_string())
    })?;

    let mapper = OracleToPostgres::new();
    let run_id = Uuid::new_v4().to_string();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at: chrono::Utc::now(),
        source_dialect: mapper.source_dialect().to_string(),
        target_dialect: mapper.target_dialect().to_string(),
        target_language: mapper.target_language().to_string(),
        settings: settings.clone(),
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        input = %input.display(),
        run_dir = %run_paths.root.display()
    );
    let timer = Instant::now();

    let rows = catalog_from_path(&input)?.load()?;
    let outcome = SchemaGraphBuilder::new(settings.build_options()).build(rows)?;
    let schema = outcome.schema;
    let build = outcome.report;

    if !build.skipped_rows.is_empty() {
        tracing::warn!(event = "rows_skipped", count = build.skipped_rows.len());
    }
    for conflict in &build.conflicts {
        tracing::warn!(
            event = "metadata_conflict",
            table = %conflict.table,
            column = %conflict.column,
            field = %conflict.field,
            kept = %conflict.kept,
            ignored = %conflict.ignored
        );
    }

    let validation = validate_schema(&schema);
    for dangling in &validation.dangling_references {
        tracing::warn!(
            event = "dangling_reference",
            table = %dangling.table,
            column = %dangling.column,
            referenced_table = %dangling.target
        );
    }
    let fk_graph = summarize_fk_graph(&schema);

    write_schema(&run_paths, &schema)?;
    tracing::info!(event = "schema_written", path = %run_paths.schema_path.display());

    let output = emit_all(&schema, &mapper, &settings.emit_options());
    let artifacts = write_artifacts(&run_paths, &output, &settings.context_name)?;
    tracing::info!(event = "artifacts_written", count = artifacts.len());

    let strict_failure = strict_failure(&settings, &output.types, &validation);
    let duration_ms = timer.elapsed().as_millis() as u64;
    let report = RunReport {
        run_id: &run_id,
        status: if strict_failure.is_some() { "failed" } else { "success" },
        tables: schema.len(),
        columns: schema.column_count(),
        build: &build,
        types: &output.types,
        validation: &validation,
        fk_graph: &fk_graph,
        artifacts: &artifacts,
        duration_ms,
    };
    write_report(&run_paths, &report)?;
    tracing::info!(event = "report_written", path = %run_paths.report_path.display());

    tracing::info!(
        event = "run_finished",
        status = report.status,
        duration_ms = duration_ms
    );

    match strict_failure {
        Some(message) => Err(CliError::Strict(message)),
        None => Ok(()),
    }
}

fn strict_failure(
    settings: &Settings,
    types: &schemashift_emit::TypeReport,
    validation: &schemashift_core::ValidationReport,
) -> Option<String> {
    if !settings.strict {
        return None;
    }
    let mut problems = Vec::new();
    if !types.is_clean() {
        problems.push(format!("{} unmapped column type(s)", types.unmapped.len()));
    }
    if !validation.is_clean() {
        problems.push(format!(
            "{} dangling foreign-key reference(s)",
            validation.dangling_references.len()
        ));
    }
    (!problems.is_empty()).then(|| problems.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translate_args(argv: &[&str]) -> TranslateArgs {
        let mut full = vec!["schemashift", "translate"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).expect("parse").command {
            Command::Translate(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn flags_override_the_settings_file() {
        let dir = std::env::temp_dir().join(format!("schemashift-cli-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("dir");
        let config = dir.join("schemashift.toml");
        std::fs::write(
            &config,
            "owner = \"HR\"\ninput = \"hr.csv\"\nnamespace = \"Hr.Data\"\n",
        )
        .expect("write config");

        let config_arg = config.to_string_lossy().to_string();
        let args = translate_args(&[
            "--config",
            &config_arg,
            "--owner",
            "SALES",
            "--strict",
            "--context-name",
            "SalesContext",
        ]);
        let settings = resolve_settings(args).expect("settings");

        assert_eq!(settings.owner.as_deref(), Some("SALES"));
        assert_eq!(settings.input, Some(PathBuf::from("hr.csv")));
        assert_eq!(settings.namespace.as_deref(), Some("Hr.Data"));
        assert_eq!(settings.context_name, "SalesContext");
        assert!(settings.strict);

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn strict_mode_reports_unmapped_types_and_dangling_references() {
        let settings = Settings {
            strict: true,
            ..Settings::default()
        };
        let mut types = schemashift_emit::TypeReport::default();
        types.record_unmapped(schemashift_emit::UnmappedType {
            table: "SHAPE".to_string(),
            column: "GEOM".to_string(),
            source_type: "SDO_GEOMETRY".to_string(),
            target: schemashift_emit::TypeTarget::Sql,
        });
        let validation = schemashift_core::ValidationReport::default();

        let message = strict_failure(&settings, &types, &validation).expect("failure");
        assert_eq!(message, "1 unmapped column type(s)");

        let relaxed = Settings::default();
        assert_eq!(strict_failure(&relaxed, &types, &validation), None);
    }

    #[test]
    fn catalog_query_requires_owner() {
        assert!(Cli::try_parse_from(["schemashift", "catalog-query"]).is_err());
        assert!(Cli::try_parse_from(["schemashift", "catalog-query", "--owner", "HR"]).is_ok());
    }
}
