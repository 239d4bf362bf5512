use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::enums::*;
use crate::cli::validation::parse_extension;

/// Available exportgraph subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the export dependency graph
    ///
    /// Registers every export declared in the export directories, traces the
    /// imports of the consumer directories back to the original declarations,
    /// and writes one record per export with its consumers.
    Analyze(AnalyzeArgs),

    /// List the resolved exports of a single module
    ///
    /// Shows, for each name the module exports, where it is originally
    /// declared and which modules forward it.
    Exports(ExportsArgs),
}

/// Arguments for the analyze command
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Directories whose exports are tracked (repeatable)
    ///
    /// Examples:
    ///   exportgraph analyze --exports src/shared --consumers src/app
    #[arg(long = "exports", value_name = "DIR")]
    pub export_dirs: Vec<PathBuf>,

    /// Directories whose imports are traced (repeatable)
    #[arg(long = "consumers", value_name = "DIR")]
    pub consumer_dirs: Vec<PathBuf>,

    /// File extensions to scan, without the leading dot (repeatable)
    #[arg(short = 'e', long = "ext", value_name = "EXT", value_parser = parse_extension)]
    pub extensions: Vec<String>,

    /// Directory names to skip while scanning (repeatable)
    #[arg(long, value_name = "NAME")]
    pub exclude: Vec<String>,

    /// Output format
    ///
    /// - json: one record per export with its consumers
    /// - dot: Graphviz digraph of consumer -> export edges
    #[arg(short = 'f', long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Only report exports that have no consumers
    #[arg(long)]
    pub unused: bool,

    /// Trace consumer modules in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Path to a config file (defaults to exportgraph.config.json in --cwd)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root; module ids are relative to it
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}

/// Arguments for the exports command
#[derive(Args, Debug, Default)]
pub struct ExportsArgs {
    /// Module to inspect, relative to --cwd (e.g. src/shared/index.ts)
    #[arg(required = true, value_name = "MODULE")]
    pub module: String,

    /// Directories whose exports are registered (repeatable)
    #[arg(long = "exports", value_name = "DIR")]
    pub export_dirs: Vec<PathBuf>,

    /// Path to a config file (defaults to exportgraph.config.json in --cwd)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Project root; module ids are relative to it
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,
}
