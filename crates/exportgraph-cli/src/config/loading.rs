use crate::commands::utils::resolve_path;
use crate::config::defaults::*;
use crate::config::{ConfigOverrides, ExportGraphConfig};
use crate::error::{ConfigError, Result};
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use std::path::Path;

/// Config file looked up in the project root when `--config` is not given.
pub const CONFIG_FILE_NAME: &str = "exportgraph.config.json";

/// Prefix of environment overrides (`EXPORTGRAPH_FORMAT=dot`, ...).
pub const ENV_PREFIX: &str = "EXPORTGRAPH_";

/// Keys read from the environment, after the prefix is stripped.
const ENV_KEYS: &[&str] = &[
    "export_dirs",
    "consumer_dirs",
    "extensions",
    "exclude",
    "format",
    "output",
    "parallel",
];

impl ExportGraphConfig {
    /// Load configuration from multiple sources.
    /// Priority: CLI args > environment variables > config file > defaults
    ///
    /// `config_path` is resolved against `cwd`; without it,
    /// `exportgraph.config.json` in `cwd` is used when present.
    pub fn load(
        overrides: &ConfigOverrides,
        cwd: &Path,
        config_path: Option<&Path>,
    ) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default_config()));

        let config_file = match config_path {
            Some(path) => {
                let path = resolve_path(path, cwd);
                if !path.is_file() {
                    return Err(ConfigError::NotFound(path).into());
                }
                Some(path)
            }
            None => {
                let default_path = cwd.join(CONFIG_FILE_NAME);
                default_path.is_file().then_some(default_path)
            }
        };

        if let Some(path) = &config_file {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        // EXPORTGRAPH_FORMAT, EXPORTGRAPH_EXPORT_DIRS, ... keyed like the config file
        figment = figment.merge(
            Env::prefixed(ENV_PREFIX)
                .only(ENV_KEYS)
                .map(|key| match key.as_str().to_ascii_lowercase().as_str() {
                    "export_dirs" => "exportDirs".into(),
                    "consumer_dirs" => "consumerDirs".into(),
                    other => other.to_string().into(),
                })
                .lowercase(false),
        );

        figment = figment.merge(Serialized::defaults(overrides));

        figment.extract().map_err(|e| {
            ConfigError::InvalidValue {
                field: "configuration".to_string(),
                value: e.to_string(),
                hint: format!("Check {} syntax and field types", CONFIG_FILE_NAME),
            }
            .into()
        })
    }

    /// Get default configuration values.
    pub(crate) fn default_config() -> Self {
        Self {
            export_dirs: default_export_dirs(),
            consumer_dirs: default_consumer_dirs(),
            extensions: default_extensions(),
            exclude: default_exclude(),
            format: default_format(),
            output: None,
            parallel: false,
        }
    }
}
