use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use serde::Serialize;

use schemashift_core::{BuildReport, FkGraphSummary, Schema, ValidationReport};
use schemashift_emit::naming::{mapping_name, type_name};
use schemashift_emit::{EmitOutput, TypeReport};

use super::atomic::{write_bytes_atomic, write_json_atomic};
use super::RegistryResult;
use crate::settings::Settings;

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub source_dialect: String,
    pub target_dialect: String,
    pub target_language: String,
    pub settings: Settings,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig<'a> {
    pub run_id: &'a str,
    pub started_at: String,
    pub source_dialect: &'a str,
    pub target_dialect: &'a str,
    pub target_language: &'a str,
    pub settings: &'a Settings,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Summary of one translation run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub run_id: &'a str,
    pub status: &'a str,
    pub tables: usize,
    pub columns: usize,
    pub build: &'a BuildReport,
    pub types: &'a TypeReport,
    pub validation: &'a ValidationReport,
    pub fk_graph: &'a FkGraphSummary,
    pub artifacts: &'a [PathBuf],
    pub duration_ms: u64,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub schema_path: PathBuf,
    pub report_path: PathBuf,
    pub logs_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx
        .settings
        .out_dir
        .join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let paths = RunPaths {
        config_path: root.join("config.json"),
        schema_path: root.join("schema.json"),
        report_path: root.join("report.json"),
        logs_path: root.join("logs.ndjson"),
        root,
    };

    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        source_dialect: &ctx.source_dialect,
        target_dialect: &ctx.target_dialect,
        target_language: &ctx.target_language,
        settings: &ctx.settings,
        git: collect_git_info(),
    };
    write_json_atomic(&paths.config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.logs_path)?;

    Ok(paths)
}

pub fn write_schema(paths: &RunPaths, schema: &Schema) -> RegistryResult<()> {
    write_json_atomic(&paths.schema_path, schema)
}

pub fn write_report(paths: &RunPaths, report: &RunReport<'_>) -> RegistryResult<()> {
    write_json_atomic(&paths.report_path, report)
}

/// Write every emitted artifact under the run root.
///
/// Returns the written paths relative to the run root, in write order.
pub fn write_artifacts(
    paths: &RunPaths,
    output: &EmitOutput,
    context_name: &str,
) -> RegistryResult<Vec<PathBuf>> {
    let mut written = Vec::new();
    let mut write = |relative: PathBuf, text: &str| -> RegistryResult<()> {
        write_bytes_atomic(&paths.root.join(&relative), text.as_bytes())?;
        tracing::debug!(event = "artifact_written", path = %relative.display());
        written.push(relative);
        Ok(())
    };

    write(Path::new("script").join("create.sql"), &output.ddl)?;
    for (table, source) in &output.entities {
        write(
            Path::new("entities").join(format!("{}.cs", type_name(table))),
            source,
        )?;
    }
    for (table, source) in &output.mappings {
        write(
            Path::new("mappings").join(format!("{}.cs", mapping_name(&type_name(table)))),
            source,
        )?;
    }
    write(
        Path::new("context").join(format!("{context_name}.cs")),
        &output.context,
    )?;

    Ok(written)
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}
