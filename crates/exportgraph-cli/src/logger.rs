//! Logging setup for the exportgraph CLI.
//!
//! Logs go to stderr through `tracing-subscriber`, so stdout stays reserved
//! for the serialized graph.
//!
//! - `--verbose`: debug level for the exportgraph crates
//! - `--quiet`: errors only
//! - otherwise `RUST_LOG`, falling back to info
//!
//! ```rust,no_run
//! use exportgraph_cli::logger::init_logger;
//!
//! init_logger(false, false, false);
//! tracing::info!("starting analysis");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "exportgraph=debug,exportgraph_extract=debug,exportgraph_cli=debug";
const QUIET_FILTER: &str = "error";
const DEFAULT_FILTER: &str = "exportgraph=info,exportgraph_extract=info,exportgraph_cli=info";

/// Pick the filter directives for the given flags.
///
/// `verbose` wins over `quiet`; clap already rejects passing both.
pub fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

/// Initialize the tracing subscriber.
///
/// Call once, before any logging occurs.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize the subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .compact();

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
