//! exportgraph CLI - who consumes each export, and through which re-exports.
//!
//! This crate wires the `exportgraph` engine and the `exportgraph-extract`
//! front end into a command-line tool with layered configuration, structured
//! logging and actionable error messages.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`commands`] - `analyze` and `exports` implementations
//! - [`config`] - `exportgraph.config.json` + environment + flag layering
//! - [`error`] - error types with hints, converted to miette reports
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - colored status messages and the analysis summary
//!
//! # Example
//!
//! ```rust
//! use exportgraph_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     // CLI command implementations...
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{AnalysisError, CliError, ConfigError, Result, ResultExt};
