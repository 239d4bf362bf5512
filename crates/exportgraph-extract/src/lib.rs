//! # exportgraph-extract
//!
//! Turns JavaScript/TypeScript sources into [`ModuleFacts`] for the
//! `exportgraph` engine.
//!
//! - [`extract_module_facts`] parses one module with oxc and records its
//!   imports, exports and `ident.prop` member accesses.
//! - [`discover_sources`] walks directories for source files.
//! - [`Project::load`] discovers the export and consumer scopes of a project
//!   root and parses every file once, in parallel.
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use exportgraph::AnalysisOptions;
//! use exportgraph_extract::{DiscoveryOptions, Project};
//!
//! # fn main() -> exportgraph_extract::Result<()> {
//! let project = Project::load(
//!     Path::new("."),
//!     &["src/shared"],
//!     &["src/app"],
//!     &DiscoveryOptions::default(),
//! )?;
//! let graph = project.analyze(AnalysisOptions::default());
//! for row in graph.unused_exports() {
//!     println!("unused: {}::{}", row.module, row.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod discovery;
pub mod error;
pub mod parse;
pub mod project;

pub use discovery::{DEFAULT_EXCLUDE_DIRS, DiscoveryOptions, discover_sources};
pub use error::{ExtractError, Result};
pub use exportgraph::ModuleFacts;
pub use parse::{extract_module_facts, source_type_for};
pub use project::{Project, SkippedFile};
