//! Stable module identifiers.

use std::fmt;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when constructing a [`ModuleId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModuleIdError {
    /// The identifier was empty after normalization.
    #[error("module id cannot be empty")]
    Empty,

    /// The path does not live under the analysis root.
    #[error("path {path} is outside the analysis root {root}")]
    OutsideRoot { path: String, root: String },
}

/// Identifier of a single module: a project-relative path using `/` separators.
///
/// Ordering is plain lexicographic ordering of the path string, which is what
/// the aggregated output is sorted by.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    /// Create a module id from a path string, normalizing separators.
    ///
    /// ```rust
    /// use exportgraph::ModuleId;
    ///
    /// let id = ModuleId::new("src\\shared\\index.ts")?;
    /// assert_eq!(id.as_str(), "src/shared/index.ts");
    /// # Ok::<(), exportgraph::ModuleIdError>(())
    /// ```
    pub fn new(path: impl Into<String>) -> Result<Self, ModuleIdError> {
        let mut path = path.into();
        if path.contains('\\') {
            path = path.replace('\\', "/");
        }
        if path.is_empty() {
            return Err(ModuleIdError::Empty);
        }
        Ok(Self(path))
    }

    /// Create a module id for `path` relative to `root`.
    pub fn from_path(root: &Path, path: &Path) -> Result<Self, ModuleIdError> {
        let relative = path
            .strip_prefix(root)
            .map_err(|_| ModuleIdError::OutsideRoot {
                path: path.display().to_string(),
                root: root.display().to_string(),
            })?;

        let joined = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/");

        Self::new(joined)
    }

    /// The path string backing this id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory portion of the id (`""` for top-level modules).
    pub fn parent(&self) -> &str {
        self.0.rsplit_once('/').map_or("", |(dir, _)| dir)
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
