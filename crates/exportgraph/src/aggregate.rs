//! Dependency aggregation: registry + consumer map → canonical sorted rows.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet as HashSet;
use serde::{Deserialize, Serialize};

use super::registry::{ExportKey, ExportRegistry};
use super::resolver::ExportResolver;
use super::tracer::{Consumer, ConsumerMap};
use super::ModuleId;

/// One original export and the modules that consume it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDependencyInfo {
    pub module: ModuleId,
    pub name: String,
    pub consumer_count: usize,
    /// Sorted by module, one record per consumer module.
    pub consumers: Vec<Consumer>,
}

impl ExportDependencyInfo {
    pub fn is_unused(&self) -> bool {
        self.consumers.is_empty()
    }

    pub fn key(&self) -> ExportKey {
        ExportKey::new(self.module.clone(), self.name.clone())
    }
}

/// Merge the registry and traced consumers into output rows.
///
/// Every resolvable registry entry collapses onto its original export, so an
/// export reachable under several aliases is reported once. Rows are sorted by
/// `(module, name)` and do not depend on scan order.
pub fn aggregate(registry: &ExportRegistry, consumers: &ConsumerMap) -> Vec<ExportDependencyInfo> {
    let resolver = ExportResolver::new(registry);
    let mut seen: HashSet<ExportKey> = HashSet::default();
    let mut rows = Vec::new();

    for entry in registry.entries().filter(|entry| !entry.is_wildcard()) {
        let Some(resolved) = resolver.resolve(&entry.module, &entry.name) else {
            tracing::trace!(export = %entry.key(), "skipping unresolvable export");
            continue;
        };

        let key = resolved.key();
        if !seen.insert(key.clone()) {
            continue;
        }

        let consumers = dedup_consumers(consumers.get(&key.module, &key.name));
        rows.push(ExportDependencyInfo {
            consumer_count: consumers.len(),
            consumers,
            module: key.module,
            name: key.name,
        });
    }

    rows.sort_by(|a, b| (&a.module, &a.name).cmp(&(&b.module, &b.name)));

    tracing::debug!(rows = rows.len(), "aggregated export dependencies");
    rows
}

/// One record per consumer module, sorted by module.
///
/// A record carrying a `via` chain replaces an earlier one without; otherwise
/// the first record wins.
fn dedup_consumers(records: &[Consumer]) -> Vec<Consumer> {
    let mut by_module: BTreeMap<&ModuleId, &Consumer> = BTreeMap::new();

    for record in records {
        by_module
            .entry(&record.module)
            .and_modify(|kept| {
                if kept.via.is_none() && record.via.is_some() {
                    *kept = record;
                }
            })
            .or_insert(record);
    }

    by_module.into_values().cloned().collect()
}
