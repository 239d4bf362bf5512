//! Miette diagnostic conversion for CLI errors.

use ::miette::Report;
use exportgraph_extract::ExtractError;

use crate::error::CliError;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => ::miette::miette!("Configuration error: {}", e),
        CliError::Extract(e) => extract_error_to_miette(e),
        CliError::Core(e) => ::miette::miette!("Export graph error: {}", e),
        _ => ::miette::miette!("{}", err),
    }
}

/// Convert ExtractError to miette Report
pub fn extract_error_to_miette(err: ExtractError) -> Report {
    match err {
        ExtractError::Io { path, source } if source.kind() == std::io::ErrorKind::NotFound => {
            ::miette::miette!(
                "Directory not found: {}\n\nHint: Check --exports/--consumers or exportDirs/consumerDirs in exportgraph.config.json",
                path.display()
            )
        }
        ExtractError::Io { path, source } => {
            ::miette::miette!("Failed to read {}: {}", path.display(), source)
        }
        ExtractError::Walk { path, source } => ::miette::miette!(
            "Failed to scan {}: {}\n\nHint: Check directory permissions and symlinks",
            path.display(),
            source
        ),
        other => ::miette::miette!("{}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_missing_directory_gets_hint() {
        let err = CliError::Extract(ExtractError::io(
            PathBuf::from("src/app"),
            std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
        ));
        let report = cli_error_to_miette(err).to_string();
        assert!(report.contains("Directory not found: src/app"));
        assert!(report.contains("Hint:"));
    }

    #[test]
    fn test_other_errors_keep_their_message() {
        let report = cli_error_to_miette(CliError::InvalidArgument("bad".into())).to_string();
        assert_eq!(report, "Invalid argument: bad");
    }
}
