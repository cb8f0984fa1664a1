//! Configuration file support for pkgtree.
//!
//! Provides YAML-based configuration through `pkgtree.config.yml` files,
//! including data structures, file loading, validation and the merge with
//! command-line options.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use pkgtree::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use pkgtree::application::dto::OutputFormat;
use pkgtree::dependency_tree::services::RenderOptions;
use pkgtree::ports::outbound::OutputPresenter;
use pkgtree::shared::{DepTreeError, Result};

pub const CONFIG_FILENAME: &str = "pkgtree.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub format: Option<String>,
    /// Virtual environment, relative paths resolve against the project directory
    pub venv: Option<PathBuf>,
    pub lockfile: Option<bool>,
    /// Report file, relative paths resolve against the project directory
    pub output: Option<PathBuf>,
    pub show_cycles: Option<bool>,
    pub show_absent: Option<bool>,
    pub strict: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(format) = &config.format {
        format
            .parse::<OutputFormat>()
            .map_err(|message| DepTreeError::Validation {
                message: format!(
                    "Invalid config: {}\n\n💡 Hint: Set 'format' to 'text' or 'json'.",
                    message
                ),
            })?;
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Effective options after merging the config file under the CLI flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub format: OutputFormat,
    pub venv: Option<PathBuf>,
    pub lockfile: bool,
    /// Report file; `None` writes to stdout
    pub output: Option<PathBuf>,
    pub render: RenderOptions,
    pub strict: bool,
}

impl Settings {
    /// CLI values win; boolean flags can only switch an option on.
    pub fn resolve(args: &Args, config: Option<ConfigFile>, project_path: &Path) -> Result<Self> {
        let config = config.unwrap_or_default();

        let format = match (args.format, config.format.as_deref()) {
            (Some(format), _) => format,
            (None, Some(format)) => format
                .parse::<OutputFormat>()
                .map_err(|message| DepTreeError::Validation { message })?,
            (None, None) => OutputFormat::default(),
        };

        let venv = args
            .venv
            .clone()
            .or_else(|| config.venv.map(|venv| project_path.join(venv)));
        let output = args
            .output
            .clone()
            .or_else(|| config.output.map(|output| project_path.join(output)));

        Ok(Self {
            format,
            venv,
            lockfile: args.lockfile || config.lockfile.unwrap_or(false),
            output,
            render: RenderOptions {
                show_cycles: args.show_cycles || config.show_cycles.unwrap_or(false),
                show_absent: args.show_absent || config.show_absent.unwrap_or(false),
            },
            strict: args.strict || config.strict.unwrap_or(false),
        })
    }

    /// Where the formatted report goes
    pub fn presenter(&self) -> Box<dyn OutputPresenter> {
        match &self.output {
            Some(path) => Box::new(FileSystemWriter::new(path.clone())),
            None => Box::new(StdoutPresenter::new()),
        }
    }
}
