//! # exportgraph
//!
//! Export-level dependency graphs for JavaScript/TypeScript module trees.
//!
//! Given the declared imports and exports of a set of modules, this crate
//! answers "which modules consume this export, and through which re-exports?"
//! at the granularity of individual exported names rather than whole files.
//!
//! The crate is pure: no parser, no file system. Source facts come from an
//! extractor (see the `exportgraph-extract` crate) or from JSON.
//!
//! ## Pipeline
//!
//! ```text
//!  export-scope facts ──► RegistryBuilder ──► ExportRegistry (immutable)
//!                                                  │
//!                                          ExportResolver
//!                                         (visited-set guard)
//!                                                  │
//!  consumer-scope facts ──► ConsumerTracer ──► ConsumerMap
//!                                                  │
//!                                              aggregate
//!                                                  │
//!                                                  ▼
//!                                    Vec<ExportDependencyInfo>
//!                                  (deduplicated, sorted rows)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use exportgraph::{
//!     AnalysisOptions, ExportBinding, ExportGraph, ImportBinding, ModuleFacts, ModuleId,
//!     ModuleSet,
//! };
//!
//! # fn main() -> exportgraph::Result<()> {
//! let utils = ModuleFacts::new(ModuleId::new("src/utils.ts")?)
//!     .with_export(ExportBinding::local("helper"));
//! let barrel = ModuleFacts::new(ModuleId::new("src/index.ts")?)
//!     .with_export(ExportBinding::re_export_from("helper", "utilHelper", "./utils"));
//! let app = ModuleFacts::new(ModuleId::new("src/app.ts")?)
//!     .with_import(ImportBinding::named("utilHelper", "utilHelper", "./index"));
//!
//! let exports = vec![utils, barrel];
//! let consumers = vec![app];
//! let universe = ModuleSet::from_modules(
//!     exports.iter().chain(&consumers).map(|facts| facts.id.clone()),
//! );
//!
//! let graph = ExportGraph::analyze(&exports, &consumers, &universe, AnalysisOptions::default());
//! let helper = graph.consumers_of(&ModuleId::new("src/utils.ts")?, "helper");
//! assert_eq!(helper[0].module.as_str(), "src/app.ts");
//! assert_eq!(helper[0].via.as_deref(), Some(&[ModuleId::new("src/index.ts")?][..]));
//! # Ok(())
//! # }
//! ```
//!
//! ## Failure Policy
//!
//! Resolution never fails loudly. Imports of external packages, specifiers
//! that name no known module, dead-end re-exports and re-export cycles are all
//! dropped from the result. The graph under-reports rather than aborting.

pub mod aggregate;
pub mod analysis;
pub mod facts;
pub mod module_id;
pub mod output;
pub mod registry;
pub mod resolver;
pub mod specifier;
pub mod tracer;

pub use aggregate::{ExportDependencyInfo, aggregate};
pub use analysis::{AnalysisOptions, ExportGraph, GraphStatistics};
pub use facts::{
    ExportBinding, ExportBindingKind, ImportBinding, ImportKind, ModuleFacts, PropertyAccess,
};
pub use module_id::{ModuleId, ModuleIdError};
pub use output::{to_dot, to_json};
pub use registry::{ExportEntry, ExportKey, ExportKind, ExportRegistry, RegistryBuilder, WILDCARD};
pub use resolver::{ExportResolver, ResolvedExport};
pub use specifier::{DEFAULT_EXTENSIONS, ModuleSet, SpecifierResolver, is_relative};
pub use tracer::{Consumer, ConsumerMap, ConsumerTracer};

/// Error types for exportgraph operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Output could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A module id could not be constructed.
    #[error("Invalid module id: {0}")]
    InvalidModuleId(#[from] ModuleIdError),
}

/// Result type alias for exportgraph operations.
pub type Result<T> = std::result::Result<T, Error>;
