//! Command-line interface definition for exportgraph.
//!
//! # Command Structure
//!
//! - `exportgraph analyze` - Trace every export of the export scope to its consumers
//! - `exportgraph exports` - Show the resolved export surface of one module

mod commands;
pub mod enums;
mod tests;
mod validation;

use clap::Parser;

pub use commands::{AnalyzeArgs, Command, ExportsArgs};
pub use enums::*;
pub use validation::parse_extension;

/// exportgraph - export-level dependency graphs for JavaScript/TypeScript
#[derive(Parser, Debug)]
#[command(
    name = "exportgraph",
    version,
    about = "Find which modules consume each export",
    long_about = "exportgraph resolves every export of a set of shared modules to its original\n\
                  declaration, following re-export chains and barrel files, and reports which\n\
                  consumer modules import it and through which intermediaries."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    ///
    /// Shows discovery, parsing and resolution details.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    ///
    /// Outputs plain text without ANSI color codes. Useful for logging to
    /// files or systems that don't support colored terminal output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
