use crate::cli::parse_extension;
use crate::config::ExportGraphConfig;
use crate::error::{ConfigError, Result};

impl ExportGraphConfig {
    /// Validate configuration for logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.export_dirs.is_empty() {
            return Err(ConfigError::MissingField {
                field: "exportDirs".to_string(),
                hint: "Provide at least one directory with --exports or exportDirs".to_string(),
            }
            .into());
        }

        if self.consumer_dirs.is_empty() {
            return Err(ConfigError::MissingField {
                field: "consumerDirs".to_string(),
                hint: "Provide at least one directory with --consumers or consumerDirs"
                    .to_string(),
            }
            .into());
        }

        if self.extensions.is_empty() {
            return Err(ConfigError::MissingField {
                field: "extensions".to_string(),
                hint: "List at least one file extension, e.g. [\"ts\", \"tsx\"]".to_string(),
            }
            .into());
        }

        for ext in &self.extensions {
            if let Some(stripped) = ext.strip_prefix('.') {
                return Err(ConfigError::InvalidValue {
                    field: "extensions".to_string(),
                    value: ext.clone(),
                    hint: format!("Write extensions without the leading dot: \"{}\"", stripped),
                }
                .into());
            }
            if let Err(message) = parse_extension(ext) {
                return Err(ConfigError::InvalidValue {
                    field: "extensions".to_string(),
                    value: ext.clone(),
                    hint: message,
                }
                .into());
            }
        }

        if let Some(name) = self.exclude.iter().find(|name| name.is_empty() || name.contains('/')) {
            return Err(ConfigError::InvalidValue {
                field: "exclude".to_string(),
                value: name.clone(),
                hint: "Exclude entries are directory names, not paths".to_string(),
            }
            .into());
        }

        Ok(())
    }
}
