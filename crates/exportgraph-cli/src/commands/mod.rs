//! Command implementations for the exportgraph CLI.
//!
//! - [`analyze`] - Build and serialize the export dependency graph
//! - [`exports`] - Show the resolved export surface of one module
//!
//! Each command provides an `execute` function that takes the parsed
//! arguments and returns a Result.

pub mod analyze;
pub mod exports;
pub(crate) mod utils;

pub use analyze::execute as analyze_execute;
pub use exports::execute as exports_execute;
