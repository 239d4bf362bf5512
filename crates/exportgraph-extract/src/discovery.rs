//! Source file discovery.

use std::path::{Path, PathBuf};

use exportgraph::DEFAULT_EXTENSIONS;
use walkdir::{DirEntry, WalkDir};

use crate::error::{ExtractError, Result};

/// Directories never descended into.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &["node_modules", ".git", "dist", "build", "target"];

/// Which files count as modules during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    /// File extensions without the leading dot. Multi-part extensions such as
    /// `d.ts` are matched against the end of the file name.
    pub extensions: Vec<String>,
    /// Directory names skipped wherever they appear below a scanned dir.
    pub exclude_dirs: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|dir| dir.to_string()).collect(),
        }
    }
}

impl DiscoveryOptions {
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true when `path` ends in one of the configured extensions.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
            return false;
        };
        self.extensions.iter().any(|ext| {
            file_name
                .strip_suffix(ext.as_str())
                .and_then(|stem| stem.strip_suffix('.'))
                .is_some_and(|stem| !stem.is_empty())
        })
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        entry.depth() > 0
            && entry.file_type().is_dir()
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.exclude_dirs.iter().any(|dir| dir == name))
    }
}

/// Every matching file under `root/dir` for each of `dirs`, sorted and
/// deduplicated.
///
/// # Errors
///
/// Returns [`ExtractError::Io`] when a directory does not exist and
/// [`ExtractError::Walk`] when traversal fails.
pub fn discover_sources<P>(root: &Path, dirs: &[P], options: &DiscoveryOptions) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
{
    let mut files = Vec::new();

    for dir in dirs {
        let start = root.join(dir);
        if !start.is_dir() {
            return Err(ExtractError::io(
                start,
                std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
            ));
        }

        for entry in WalkDir::new(&start)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !options.is_excluded(entry))
        {
            let entry = entry.map_err(|source| ExtractError::Walk {
                path: start.clone(),
                source,
            })?;
            if entry.file_type().is_file() && options.matches(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }

    files.sort();
    files.dedup();

    tracing::debug!(dirs = dirs.len(), files = files.len(), "discovered source files");
    Ok(files)
}
