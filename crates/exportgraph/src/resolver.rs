//! Re-export chain resolution.
//!
//! Follows `(module, name)` through named re-exports, import-then-export
//! rebindings and wildcard re-exports until it reaches a declaration that is
//! not itself forwarded. Every top-level call owns a fresh visited set, so a
//! cyclic re-export structure terminates as "unresolved" instead of looping.

use std::collections::{BTreeMap, BTreeSet};

use rustc_hash::FxHashSet as HashSet;
use serde::{Deserialize, Serialize};

use super::registry::{ExportEntry, ExportKey, ExportKind, ExportRegistry};
use super::ModuleId;

/// Terminal declaration site of an export plus the modules traversed to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedExport {
    pub original_module: ModuleId,
    pub original_name: String,
    /// Intermediary modules, outermost first; empty iff the export was
    /// declared directly.
    pub re_export_chain: Vec<ModuleId>,
}

impl ResolvedExport {
    fn direct(module: &ModuleId, name: &str) -> Self {
        Self {
            original_module: module.clone(),
            original_name: name.to_string(),
            re_export_chain: Vec::new(),
        }
    }

    /// True when no re-export was traversed.
    pub fn is_direct(&self) -> bool {
        self.re_export_chain.is_empty()
    }

    /// Registry key of the original declaration.
    pub fn key(&self) -> ExportKey {
        ExportKey::new(self.original_module.clone(), self.original_name.clone())
    }
}

/// Resolves exports against a read-only [`ExportRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct ExportResolver<'r> {
    registry: &'r ExportRegistry,
}

impl<'r> ExportResolver<'r> {
    pub fn new(registry: &'r ExportRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r ExportRegistry {
        self.registry
    }

    /// Resolve `module::name` to its original declaration.
    ///
    /// Returns `None` for unknown names, re-exports from unresolvable
    /// specifiers, and cycles.
    pub fn resolve(&self, module: &ModuleId, name: &str) -> Option<ResolvedExport> {
        let mut visited = HashSet::default();
        self.resolve_with_visited(module, name, &mut visited)
    }

    /// Resolve with a caller-owned cycle guard.
    ///
    /// Keys are added to `visited` before recursing; a key seen twice makes the
    /// whole branch unresolved.
    pub fn resolve_with_visited(
        &self,
        module: &ModuleId,
        name: &str,
        visited: &mut HashSet<ExportKey>,
    ) -> Option<ResolvedExport> {
        if !visited.insert(ExportKey::new(module.clone(), name)) {
            tracing::trace!(module = %module, name, "re-export cycle");
            return None;
        }

        let Some(entry) = self.registry.get(module, name) else {
            return self.resolve_through_wildcard(module, name, visited);
        };

        match &entry.kind {
            ExportKind::Local | ExportKind::Default => Some(ResolvedExport::direct(module, name)),
            ExportKind::ReExport {
                source: Some(source),
                source_name,
            } => self.follow(module, source, source_name.as_deref().unwrap_or(name), visited),
            ExportKind::ReExport { source: None, .. } => None,
            ExportKind::ImportThenExport {
                source,
                source_name,
            } => self.follow(module, source, source_name, visited),
            // Only reachable by asking for the sentinel name itself.
            ExportKind::Wildcard { .. } => None,
        }
    }

    fn follow(
        &self,
        module: &ModuleId,
        source: &ModuleId,
        source_name: &str,
        visited: &mut HashSet<ExportKey>,
    ) -> Option<ResolvedExport> {
        let mut resolved = self.resolve_with_visited(source, source_name, visited)?;
        resolved.re_export_chain.insert(0, module.clone());
        Some(resolved)
    }

    /// Explicit entries always win; wildcards are consulted only for names the
    /// module does not declare itself.
    fn resolve_through_wildcard(
        &self,
        module: &ModuleId,
        name: &str,
        visited: &mut HashSet<ExportKey>,
    ) -> Option<ResolvedExport> {
        let ExportEntry {
            kind: ExportKind::Wildcard { sources },
            ..
        } = self.registry.wildcard(module)?
        else {
            return None;
        };

        sources
            .iter()
            .find_map(|source| self.follow(module, source, name, visited))
    }

    /// Every export visible on `module`, keyed by exported name.
    ///
    /// Candidate names are the explicit names of every module reachable
    /// through `export *`; each is then resolved from `module`, so the listing
    /// always agrees with [`resolve`](Self::resolve). Explicit names shadow
    /// wildcard names even when the explicit entry itself does not resolve.
    pub fn exports_of(&self, module: &ModuleId) -> BTreeMap<String, ResolvedExport> {
        let mut names = BTreeSet::new();
        let mut seen_modules = HashSet::default();
        let mut pending = vec![module.clone()];

        while let Some(current) = pending.pop() {
            if !seen_modules.insert(current.clone()) {
                continue;
            }
            for entry in self.registry.module_entries(&current) {
                match &entry.kind {
                    ExportKind::Wildcard { sources } => pending.extend(sources.iter().cloned()),
                    _ => {
                        names.insert(entry.name.clone());
                    }
                }
            }
        }

        names
            .into_iter()
            .filter_map(|name| {
                let resolved = self.resolve(module, &name)?;
                Some((name, resolved))
            })
            .collect()
    }
}
