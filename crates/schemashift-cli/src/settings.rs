use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use schemashift_core::BuildOptions;
use schemashift_emit::EmitOptions;

/// Settings file picked up from the working directory when `--config` is absent.
pub const DEFAULT_SETTINGS_FILE: &str = "schemashift.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Run settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Keep only catalog rows owned by this schema.
    pub owner: Option<String>,
    /// Catalog export (`.csv` or `.json`).
    pub input: Option<PathBuf>,
    /// Parent directory for run directories.
    pub out_dir: PathBuf,
    pub strict: bool,
    pub namespace: Option<String>,
    pub context_name: String,
    pub connection_name: String,
}

impl Default for Settings {
    fn default() -> Self {
        let emit = EmitOptions::default();
        Self {
            owner: None,
            input: None,
            out_dir: PathBuf::from("runs"),
            strict: false,
            namespace: emit.namespace,
            context_name: emit.context_name,
            connection_name: emit.connection_name,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit`, else [`DEFAULT_SETTINGS_FILE`] if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_SETTINGS_FILE);
        if fallback.is_file() {
            return Self::load(fallback);
        }
        Ok(Self::default())
    }

    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            owner: self.owner.clone(),
            strict: self.strict,
        }
    }

    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            namespace: self.namespace.clone(),
            context_name: self.context_name.clone(),
            connection_name: self.connection_name.clone(),
        }
    }
}
