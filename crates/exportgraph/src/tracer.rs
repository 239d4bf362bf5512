//! Consumer tracing: attributes every import binding to an original export.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::facts::{ImportKind, ModuleFacts};
use super::registry::{ExportKey, ExportRegistry, KeyRef};
use super::resolver::ExportResolver;
use super::specifier::SpecifierResolver;
use super::ModuleId;

/// A module that consumes an export, and the re-exporting modules the import
/// passed through on the way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Consumer {
    pub module: ModuleId,
    /// Outermost first; `None` when imported straight from the declaring module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<Vec<ModuleId>>,
}

impl Consumer {
    pub fn direct(module: ModuleId) -> Self {
        Self { module, via: None }
    }

    pub fn via(module: ModuleId, chain: Vec<ModuleId>) -> Self {
        Self {
            module,
            via: (!chain.is_empty()).then_some(chain),
        }
    }
}

/// Original export key → consumer records, in discovery order.
///
/// May hold several records for the same consumer module; the aggregator
/// deduplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsumerMap {
    consumers: IndexMap<ExportKey, Vec<Consumer>>,
}

impl ConsumerMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: ExportKey, consumer: Consumer) {
        self.consumers.entry(key).or_default().push(consumer);
    }

    /// Records for the original export `module::name`.
    pub fn get(&self, module: &ModuleId, name: &str) -> &[Consumer] {
        self.consumers
            .get(&KeyRef::new(module, name))
            .map_or(&[], Vec::as_slice)
    }

    /// Append every record of `other`, keeping `self`'s records first.
    pub fn merge(&mut self, other: ConsumerMap) {
        for (key, consumers) in other.consumers {
            self.consumers.entry(key).or_default().extend(consumers);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ExportKey, &[Consumer])> {
        self.consumers
            .iter()
            .map(|(key, consumers)| (key, consumers.as_slice()))
    }

    /// Number of distinct exports with at least one record.
    pub fn len(&self) -> usize {
        self.consumers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consumers.is_empty()
    }

    /// Total records, duplicates included.
    pub fn record_count(&self) -> usize {
        self.consumers.values().map(Vec::len).sum()
    }
}

/// Scans consumer-scope modules and attributes their imports.
pub struct ConsumerTracer<'a, R: ?Sized> {
    resolver: ExportResolver<'a>,
    specifiers: &'a R,
}

impl<'a, R> ConsumerTracer<'a, R>
where
    R: SpecifierResolver + ?Sized,
{
    pub fn new(registry: &'a ExportRegistry, specifiers: &'a R) -> Self {
        Self {
            resolver: ExportResolver::new(registry),
            specifiers,
        }
    }

    /// Trace every module sequentially.
    pub fn trace(&self, modules: &[ModuleFacts]) -> ConsumerMap {
        let mut map = ConsumerMap::new();
        for module in modules {
            self.trace_module(module, &mut map);
        }
        tracing::debug!(
            modules = modules.len(),
            exports = map.len(),
            records = map.record_count(),
            "traced consumers"
        );
        map
    }

    /// Trace modules on the rayon pool.
    ///
    /// Each module produces its own fragment; fragments are merged in module
    /// order, so the result equals [`trace`](Self::trace).
    pub fn trace_parallel(&self, modules: &[ModuleFacts]) -> ConsumerMap
    where
        R: Sync,
    {
        let fragments: Vec<ConsumerMap> = modules
            .par_iter()
            .map(|module| {
                let mut fragment = ConsumerMap::new();
                self.trace_module(module, &mut fragment);
                fragment
            })
            .collect();

        let mut map = ConsumerMap::new();
        for fragment in fragments {
            map.merge(fragment);
        }
        tracing::debug!(
            modules = modules.len(),
            exports = map.len(),
            records = map.record_count(),
            "traced consumers in parallel"
        );
        map
    }

    /// Attribute the imports of one module into `map`.
    pub fn trace_module(&self, facts: &ModuleFacts, map: &mut ConsumerMap) {
        for import in &facts.imports {
            let Some(target) = self.specifiers.resolve(&facts.id, &import.specifier) else {
                tracing::trace!(
                    module = %facts.id,
                    specifier = %import.specifier,
                    "skipping unresolved import"
                );
                continue;
            };

            match import.kind {
                ImportKind::Default | ImportKind::Named => {
                    if let Some(name) = import.source_export_name() {
                        self.record_consumer(&facts.id, &target, name, map);
                    }
                }
                // Namespace members are only visible at their use sites.
                ImportKind::Namespace => {
                    for access in facts
                        .property_accesses
                        .iter()
                        .filter(|access| access.base == import.local)
                    {
                        self.record_consumer(&facts.id, &target, &access.property, map);
                    }
                }
            }
        }
    }

    fn record_consumer(
        &self,
        consumer: &ModuleId,
        imported_module: &ModuleId,
        name: &str,
        map: &mut ConsumerMap,
    ) {
        if consumer == imported_module {
            return;
        }

        let Some(resolved) = self.resolver.resolve(imported_module, name) else {
            tracing::trace!(
                module = %consumer,
                from = %imported_module,
                name,
                "dropping import that does not resolve to an export"
            );
            return;
        };

        // Reached its own export through a barrel.
        if resolved.original_module == *consumer {
            return;
        }

        let key = resolved.key();
        map.record(key, Consumer::via(consumer.clone(), resolved.re_export_chain));
    }
}
