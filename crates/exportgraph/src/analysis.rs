//! End-to-end analysis: registry → consumer trace → aggregation.

use std::collections::BTreeMap;

use rustc_hash::FxHashSet as HashSet;
use serde::{Deserialize, Serialize};

use super::aggregate::{ExportDependencyInfo, aggregate};
use super::facts::ModuleFacts;
use super::registry::ExportRegistry;
use super::resolver::{ExportResolver, ResolvedExport};
use super::specifier::SpecifierResolver;
use super::tracer::{Consumer, ConsumerMap, ConsumerTracer};
use super::ModuleId;

/// Knobs for [`ExportGraph::analyze`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Trace consumer modules on the rayon pool.
    pub parallel: bool,
}

impl AnalysisOptions {
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Summary counts for a finished analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStatistics {
    /// Distinct modules across both scopes.
    pub modules: usize,
    /// Original exports reported.
    pub exports: usize,
    pub consumed_exports: usize,
    pub unused_exports: usize,
    /// Deduplicated consumer → export edges.
    pub consumer_edges: usize,
}

/// Result of analyzing an export scope against a consumer scope.
#[derive(Debug, Clone)]
pub struct ExportGraph {
    registry: ExportRegistry,
    consumers: ConsumerMap,
    dependencies: Vec<ExportDependencyInfo>,
    module_count: usize,
}

impl ExportGraph {
    /// Run the full pipeline.
    ///
    /// `export_scope` modules populate the registry; `consumer_scope` modules
    /// are scanned for imports. A module may appear in both.
    pub fn analyze<R>(
        export_scope: &[ModuleFacts],
        consumer_scope: &[ModuleFacts],
        resolver: &R,
        options: AnalysisOptions,
    ) -> Self
    where
        R: SpecifierResolver + Sync + ?Sized,
    {
        let registry = ExportRegistry::build(export_scope, resolver);

        let tracer = ConsumerTracer::new(&registry, resolver);
        let consumers = if options.parallel {
            tracer.trace_parallel(consumer_scope)
        } else {
            tracer.trace(consumer_scope)
        };

        let dependencies = aggregate(&registry, &consumers);

        let module_count = export_scope
            .iter()
            .chain(consumer_scope)
            .map(|facts| &facts.id)
            .collect::<HashSet<_>>()
            .len();

        tracing::debug!(
            export_modules = export_scope.len(),
            consumer_modules = consumer_scope.len(),
            exports = dependencies.len(),
            "export graph analyzed"
        );

        Self {
            registry,
            consumers,
            dependencies,
            module_count,
        }
    }

    pub fn registry(&self) -> &ExportRegistry {
        &self.registry
    }

    /// Raw consumer records before deduplication.
    pub fn consumers(&self) -> &ConsumerMap {
        &self.consumers
    }

    /// Canonical rows sorted by `(module, name)`.
    pub fn dependencies(&self) -> &[ExportDependencyInfo] {
        &self.dependencies
    }

    pub fn into_dependencies(self) -> Vec<ExportDependencyInfo> {
        self.dependencies
    }

    /// Rows with no consumers.
    pub fn unused_exports(&self) -> impl Iterator<Item = &ExportDependencyInfo> {
        self.dependencies.iter().filter(|row| row.is_unused())
    }

    /// Resolve an export, possibly an alias, to its original declaration.
    pub fn resolve(&self, module: &ModuleId, name: &str) -> Option<ResolvedExport> {
        ExportResolver::new(&self.registry).resolve(module, name)
    }

    /// Row for the export `module::name`, following aliases.
    pub fn dependency(&self, module: &ModuleId, name: &str) -> Option<&ExportDependencyInfo> {
        let resolved = self.resolve(module, name)?;
        self.dependencies
            .binary_search_by(|row| {
                (&row.module, row.name.as_str())
                    .cmp(&(&resolved.original_module, resolved.original_name.as_str()))
            })
            .ok()
            .map(|index| &self.dependencies[index])
    }

    /// Deduplicated consumers of `module::name`, following aliases.
    pub fn consumers_of(&self, module: &ModuleId, name: &str) -> &[Consumer] {
        self.dependency(module, name)
            .map_or(&[], |row| row.consumers.as_slice())
    }

    /// Every name `module` exposes, resolved to its original declaration.
    pub fn exports_of(&self, module: &ModuleId) -> BTreeMap<String, ResolvedExport> {
        ExportResolver::new(&self.registry).exports_of(module)
    }

    pub fn statistics(&self) -> GraphStatistics {
        let unused_exports = self.unused_exports().count();
        GraphStatistics {
            modules: self.module_count,
            exports: self.dependencies.len(),
            consumed_exports: self.dependencies.len() - unused_exports,
            unused_exports,
            consumer_edges: self.dependencies.iter().map(|row| row.consumer_count).sum(),
        }
    }
}
