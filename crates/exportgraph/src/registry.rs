//! Export registry: one entry per `(module, exported name)`.
//!
//! The registry is a flat, insertion-ordered map rather than a pointer graph.
//! Re-export edges are stored as keys of the target entry, so cyclic re-export
//! structures are representable and resolution can guard against them with a
//! visited set.

use std::fmt;

use indexmap::{Equivalent, IndexMap};
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use super::facts::{ExportBinding, ExportBindingKind, ImportKind, ModuleFacts};
use super::specifier::{SpecifierResolver, is_relative};
use super::ModuleId;

/// Sentinel name under which a module's wildcard re-export is stored.
pub const WILDCARD: &str = "*";

/// Composite `module::name` registry key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ExportKey {
    pub module: ModuleId,
    pub name: String,
}

impl ExportKey {
    pub fn new(module: ModuleId, name: impl Into<String>) -> Self {
        Self {
            module,
            name: name.into(),
        }
    }
}

impl fmt::Display for ExportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.module, self.name)
    }
}

/// Borrowed form of [`ExportKey`] for allocation-free lookups.
///
/// Hashes identically to `ExportKey` because the derived impls hash the same
/// field sequence (`ModuleId`'s string, then the name).
#[derive(Hash)]
pub(crate) struct KeyRef<'a> {
    module: &'a ModuleId,
    name: &'a str,
}

impl<'a> KeyRef<'a> {
    pub(crate) fn new(module: &'a ModuleId, name: &'a str) -> Self {
        Self { module, name }
    }
}

impl Equivalent<ExportKey> for KeyRef<'_> {
    fn equivalent(&self, key: &ExportKey) -> bool {
        *self.module == key.module && self.name == key.name
    }
}

/// How an export came to exist in its module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ExportKind {
    /// Declared in this module.
    Local,
    /// `export default ...` in this module.
    Default,
    /// `export { name } from './source'`; `source` is `None` when the
    /// specifier did not resolve to a known module.
    #[serde(rename_all = "camelCase")]
    ReExport {
        source: Option<ModuleId>,
        source_name: Option<String>,
    },
    /// `import { x } from './source'; export { x }`
    #[serde(rename_all = "camelCase")]
    ImportThenExport {
        source: ModuleId,
        source_name: String,
    },
    /// `export * from './source'`, stored under the [`WILDCARD`] key. Every
    /// wildcard of the module is kept, in declaration order.
    Wildcard { sources: Vec<ModuleId> },
}

/// One declared export fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportEntry {
    pub module: ModuleId,
    pub name: String,
    #[serde(flatten)]
    pub kind: ExportKind,
}

impl ExportEntry {
    /// Returns true for every form that forwards another module's export.
    pub fn is_re_export(&self) -> bool {
        matches!(
            self.kind,
            ExportKind::ReExport { .. }
                | ExportKind::ImportThenExport { .. }
                | ExportKind::Wildcard { .. }
        )
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self.kind, ExportKind::Wildcard { .. })
    }

    /// First module this entry forwards to, if any.
    pub fn source_module(&self) -> Option<&ModuleId> {
        match &self.kind {
            ExportKind::Local | ExportKind::Default => None,
            ExportKind::ReExport { source, .. } => source.as_ref(),
            ExportKind::ImportThenExport { source, .. } => Some(source),
            ExportKind::Wildcard { sources } => sources.first(),
        }
    }

    /// Name read on the source module; `None` means "same as `name`".
    pub fn source_name(&self) -> Option<&str> {
        match &self.kind {
            ExportKind::ReExport { source_name, .. } => source_name.as_deref(),
            ExportKind::ImportThenExport { source_name, .. } => Some(source_name),
            _ => None,
        }
    }

    pub fn key(&self) -> ExportKey {
        ExportKey::new(self.module.clone(), self.name.clone())
    }
}

/// Immutable registry of export entries for the export-scope modules.
#[derive(Debug, Clone, Default)]
pub struct ExportRegistry {
    entries: IndexMap<ExportKey, ExportEntry>,
    by_module: HashMap<ModuleId, Vec<String>>,
}

impl ExportRegistry {
    /// Build a registry from facts, in the order given.
    pub fn build<R>(modules: &[ModuleFacts], resolver: &R) -> Self
    where
        R: SpecifierResolver + ?Sized,
    {
        let mut builder = RegistryBuilder::new(resolver);
        for module in modules {
            builder.add_module(module);
        }
        builder.build()
    }

    pub fn get(&self, module: &ModuleId, name: &str) -> Option<&ExportEntry> {
        self.entries.get(&KeyRef::new(module, name))
    }

    pub fn contains(&self, module: &ModuleId, name: &str) -> bool {
        self.entries.contains_key(&KeyRef::new(module, name))
    }

    /// The wildcard entry of `module`, if it re-exports anything with `export *`.
    pub fn wildcard(&self, module: &ModuleId) -> Option<&ExportEntry> {
        self.get(module, WILDCARD)
    }

    /// All entries in registration order.
    pub fn entries(&self) -> impl Iterator<Item = &ExportEntry> {
        self.entries.values()
    }

    /// Entries declared by `module`, in registration order.
    pub fn module_entries<'a>(
        &'a self,
        module: &'a ModuleId,
    ) -> impl Iterator<Item = &'a ExportEntry> + 'a {
        self.by_module
            .get(module)
            .into_iter()
            .flatten()
            .filter_map(move |name| self.get(module, name))
    }

    /// Modules that registered at least one entry.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleId> {
        self.by_module.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert_if_absent(&mut self, entry: ExportEntry) -> bool {
        if self.contains(&entry.module, &entry.name) {
            return false;
        }
        self.by_module
            .entry(entry.module.clone())
            .or_default()
            .push(entry.name.clone());
        self.entries.insert(entry.key(), entry);
        true
    }
}

/// Accumulates modules into an [`ExportRegistry`].
///
/// Each module is processed in a fixed precedence order; a later step never
/// overwrites a key an earlier step set:
///
/// 1. `export { .. } from` and `export * from`
/// 2. `export { .. }` without a source (import-then-export or local)
/// 3. inline local declarations
/// 4. `export default`
pub struct RegistryBuilder<'r, R: ?Sized> {
    resolver: &'r R,
    registry: ExportRegistry,
}

impl<'r, R> RegistryBuilder<'r, R>
where
    R: SpecifierResolver + ?Sized,
{
    pub fn new(resolver: &'r R) -> Self {
        Self {
            resolver,
            registry: ExportRegistry::default(),
        }
    }

    /// Register every export declared by `facts`.
    pub fn add_module(&mut self, facts: &ModuleFacts) {
        let module = &facts.id;
        let before = self.registry.len();

        for export in &facts.exports {
            if let Some(specifier) = export.specifier.as_deref() {
                self.add_sourced_re_export(module, export, specifier);
            }
        }

        for export in &facts.exports {
            if export.kind == ExportBindingKind::NamedReExport && export.specifier.is_none() {
                self.add_local_re_export(facts, export);
            }
        }

        for export in &facts.exports {
            if export.kind != ExportBindingKind::LocalDeclaration {
                continue;
            }
            // Declarations surfaced from another file are re-exports, not locals.
            if export.declared_in.as_ref().is_some_and(|origin| origin != module) {
                continue;
            }
            self.registry.insert_if_absent(ExportEntry {
                module: module.clone(),
                name: export.exported.clone(),
                kind: ExportKind::Local,
            });
        }

        if facts
            .exports
            .iter()
            .any(|export| export.kind == ExportBindingKind::DefaultAssignment)
        {
            self.registry.insert_if_absent(ExportEntry {
                module: module.clone(),
                name: "default".to_string(),
                kind: ExportKind::Default,
            });
        }

        tracing::trace!(
            module = %module,
            registered = self.registry.len() - before,
            "registered module exports"
        );
    }

    fn add_sourced_re_export(&mut self, module: &ModuleId, export: &ExportBinding, specifier: &str) {
        let source = self.resolver.resolve(module, specifier);

        match export.kind {
            ExportBindingKind::WildcardReExport => {
                let Some(source) = source else {
                    tracing::trace!(module = %module, specifier, "dropping unresolved wildcard re-export");
                    return;
                };
                self.add_wildcard_source(module, source);
            }
            ExportBindingKind::NamedReExport => {
                let source_name = export
                    .imported
                    .clone()
                    .filter(|imported| *imported != export.exported);
                self.registry.insert_if_absent(ExportEntry {
                    module: module.clone(),
                    name: export.exported.clone(),
                    kind: ExportKind::ReExport {
                        source,
                        source_name,
                    },
                });
            }
            ExportBindingKind::LocalDeclaration | ExportBindingKind::DefaultAssignment => {}
        }
    }

    fn add_wildcard_source(&mut self, module: &ModuleId, source: ModuleId) {
        let key = KeyRef::new(module, WILDCARD);
        if let Some(entry) = self.registry.entries.get_mut(&key) {
            if let ExportKind::Wildcard { sources } = &mut entry.kind {
                if !sources.contains(&source) {
                    sources.push(source);
                }
            }
            return;
        }

        self.registry.insert_if_absent(ExportEntry {
            module: module.clone(),
            name: WILDCARD.to_string(),
            kind: ExportKind::Wildcard {
                sources: vec![source],
            },
        });
    }

    fn add_local_re_export(&mut self, facts: &ModuleFacts, export: &ExportBinding) {
        let module = &facts.id;
        let local = export.local.as_deref().unwrap_or(&export.exported);

        let kind = match facts.import_for_local(local) {
            Some(import) if import.kind != ImportKind::Namespace && is_relative(&import.specifier) => {
                // Namespace imports are excluded above: the namespace object itself
                // originates in this module.
                let source_name = import
                    .source_export_name()
                    .unwrap_or(local)
                    .to_string();
                match self.resolver.resolve(module, &import.specifier) {
                    Some(source) => ExportKind::ImportThenExport {
                        source,
                        source_name,
                    },
                    None => ExportKind::ReExport {
                        source: None,
                        source_name: Some(source_name),
                    },
                }
            }
            _ => ExportKind::Local,
        };

        self.registry.insert_if_absent(ExportEntry {
            module: module.clone(),
            name: export.exported.clone(),
            kind,
        });
    }

    pub fn build(self) -> ExportRegistry {
        tracing::debug!(
            modules = self.registry.by_module.len(),
            entries = self.registry.len(),
            "built export registry"
        );
        self.registry
    }
}
