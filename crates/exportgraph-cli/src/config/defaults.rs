use std::path::PathBuf;

use exportgraph::DEFAULT_EXTENSIONS;
use exportgraph_extract::DEFAULT_EXCLUDE_DIRS;

use crate::config::types::Format;

pub fn default_export_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("src")]
}

pub fn default_consumer_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("src")]
}

pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect()
}

pub fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUDE_DIRS.iter().map(|dir| dir.to_string()).collect()
}

pub fn default_format() -> Format {
    Format::Json
}
