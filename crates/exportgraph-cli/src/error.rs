//! Error handling for the exportgraph CLI.
//!
//! Errors are layered with `thiserror`:
//! - [`CliError`] is what commands return; engine, extractor and I/O errors
//!   convert into it via `#[from]`
//! - [`ConfigError`] and [`AnalysisError`] carry a `Hint:` line telling the
//!   user what to change
//! - [`ResultExt`] attaches paths, hints and context at call sites
//!
//! `main` turns the final error into a `miette::Report` with
//! [`cli_error_to_miette`].
//!
//! # Example
//!
//! ```rust,no_run
//! use exportgraph_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_config(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_path(path)
//!         .with_hint("Pass --config with an existing file")
//! }
//! ```

mod miette;

use std::path::PathBuf;
use thiserror::Error;

use exportgraph_extract::ExtractError;

pub use self::miette::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid values, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Analysis errors (unknown module, unwritable output, etc.)
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from the export graph engine
    #[error("Export graph error: {0}")]
    Core(#[from] exportgraph::Error),

    /// Errors from source discovery and parsing
    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file doesn't exist at the expected location
    #[error("Config file not found: {}\n\nHint: Create an exportgraph.config.json file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField {
        /// Name of the missing field
        field: String,
        /// Helpful hint for providing the field
        hint: String,
    },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Errors raised while running an analysis command.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The requested module is not part of the export scope
    #[error("Module not found in export scope: {module}\n\nHint: {hint}")]
    ModuleNotFound {
        /// Module id as given by the user
        module: String,
        /// Helpful hint for locating the module
        hint: String,
    },

    /// Output path cannot be written
    #[error("Output path is not writable: {}\n\nHint: Check that the parent directory exists and is writable, or omit --output to print to stdout", .0.display())]
    OutputNotWritable(PathBuf),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a `Hint:` line to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message with `msg`.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound(PathBuf::from("exportgraph.config.json"));
        let msg = err.to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("exportgraph.config.json"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_analysis_error_module_not_found() {
        let err = AnalysisError::ModuleNotFound {
            module: "src/shared/missing.ts".to_string(),
            hint: "Check --exports".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Module not found in export scope"));
        assert!(msg.contains("src/shared/missing.ts"));
        assert!(msg.contains("Hint: Check --exports"));
    }

    #[test]
    fn test_cli_error_from_config_error() {
        let config_err = ConfigError::NotFound(PathBuf::from("test.json"));
        let cli_err: CliError = config_err.into();
        assert!(matches!(cli_err, CliError::Config(_)));
    }

    #[test]
    fn test_cli_error_from_extract_error() {
        let extract_err = ExtractError::Parse {
            path: PathBuf::from("src/bad.ts"),
            message: "Unexpected token".to_string(),
        };
        let cli_err: CliError = extract_err.into();
        assert!(matches!(cli_err, CliError::Extract(_)));
        assert!(cli_err.to_string().contains("src/bad.ts"));
    }

    #[test]
    fn test_cli_error_from_core_error() {
        let core_err = exportgraph::Error::InvalidModuleId(exportgraph::ModuleIdError::Empty);
        let cli_err: CliError = core_err.into();
        assert!(matches!(cli_err, CliError::Core(_)));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/path.txt").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_with_path_keeps_other_errors() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));

        let err = result.with_path("/test/path.txt").unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_result_ext_with_hint() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::NotFound(PathBuf::from("test.json")));

        let err = result.with_hint("Try creating the file").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("Hint: Try creating the file"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::NotFound(PathBuf::from("test.json")));

        let err = result.context("Failed to load settings").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to load settings: "));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "format".to_string(),
            value: "yaml".to_string(),
            hint: "Must be 'json' or 'dot'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid value for 'format'"));
        assert!(msg.contains("yaml"));
        assert!(msg.contains("Must be 'json' or 'dot'"));
    }
}
