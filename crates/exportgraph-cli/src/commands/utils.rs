//! Shared utilities for command implementations.

use crate::config::{ConfigOverrides, ExportGraphConfig};
use crate::error::{AnalysisError, CliError, Result, ResultExt};
use exportgraph_extract::DiscoveryOptions;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Resolve a path relative to a working directory.
///
/// If the path is absolute, returns it unchanged. Otherwise, joins it with
/// the working directory.
pub fn resolve_path(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

/// Get the current working directory.
pub fn get_cwd() -> Result<PathBuf> {
    std::env::current_dir()
        .with_hint("The working directory is no longer accessible; pass --cwd explicitly")
}

/// Project root: `--cwd` resolved against the process directory, or the
/// process directory itself.
///
/// # Errors
///
/// Returns `CliError::FileNotFound` when the path does not exist and
/// `CliError::InvalidArgument` when it is not a directory.
pub fn project_root(cwd: Option<&Path>) -> Result<PathBuf> {
    let process_cwd = get_cwd()?;
    let root = match cwd {
        Some(dir) => resolve_path(dir, &process_cwd),
        None => process_cwd,
    };

    if !fs::metadata(&root).with_path(&root)?.is_dir() {
        return Err(CliError::InvalidArgument(format!(
            "--cwd is not a directory: {}",
            root.display()
        )));
    }

    Ok(root)
}

/// Load and validate configuration for a command.
pub fn load_config(
    overrides: &ConfigOverrides,
    root: &Path,
    config_path: Option<&Path>,
) -> Result<ExportGraphConfig> {
    let config = ExportGraphConfig::load(overrides, root, config_path)?;
    config.validate()?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}

/// Discovery options derived from the configuration.
pub fn discovery_options(config: &ExportGraphConfig) -> DiscoveryOptions {
    DiscoveryOptions::default()
        .with_extensions(config.extensions.iter().cloned())
        .with_exclude_dirs(config.exclude.iter().cloned())
}

/// Write command output to a file, creating parent directories as needed.
///
/// # Errors
///
/// Returns `AnalysisError::OutputNotWritable` when the path is a directory or
/// permission is denied, and an error naming the parent when it cannot be
/// created.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if path.is_dir() {
        return Err(AnalysisError::OutputNotWritable(path.to_path_buf()).into());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .context(format!("Failed to create output directory {}", parent.display()))?;
        }
    }

    fs::write(path, contents).map_err(|err| match err.kind() {
        ErrorKind::PermissionDenied => AnalysisError::OutputNotWritable(path.to_path_buf()).into(),
        _ => CliError::Io(err),
    })
}

/// Ensure text output ends with exactly one trailing newline.
pub fn with_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}
