//! exportgraph CLI entry point.
//!
//! Parses arguments, sets up logging and colors, and dispatches to a command.

use clap::Parser;
use exportgraph_cli::{cli, commands, error, logger, ui};
use miette::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Analyze(analyze_args) => commands::analyze_execute(analyze_args),
        cli::Command::Exports(exports_args) => commands::exports_execute(exports_args),
    };

    result.map_err(error::cli_error_to_miette)
}
