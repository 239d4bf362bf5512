//! Configuration system for exportgraph with multi-source loading.
//!
//! Merges settings from CLI args, environment variables, and config files.
//! Priority: CLI > Environment > File > Defaults

mod conversions;
mod defaults;
mod loading;
mod types;
mod validation;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use defaults::*;
pub use loading::{CONFIG_FILE_NAME, ENV_PREFIX};
pub use types::*;

/// exportgraph configuration - loaded from exportgraph.config.json, the
/// environment, and CLI args.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ExportGraphConfig {
    /// Directories whose exports are registered, relative to the project root
    #[serde(default = "default_export_dirs")]
    pub export_dirs: Vec<PathBuf>,

    /// Directories whose imports are traced, relative to the project root
    #[serde(default = "default_consumer_dirs")]
    pub consumer_dirs: Vec<PathBuf>,

    /// File extensions to scan, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Directory names never descended into
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Output format (json, dot)
    #[serde(default = "default_format")]
    pub format: Format,

    /// Output file; stdout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Trace consumer modules in parallel
    #[serde(default)]
    pub parallel: bool,
}

impl Default for ExportGraphConfig {
    fn default() -> Self {
        Self::default_config()
    }
}
