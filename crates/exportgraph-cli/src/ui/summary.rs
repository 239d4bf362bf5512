//! Analysis summary printed after a run.

use console::Term;
use exportgraph::{GraphStatistics, ModuleId};
use owo_colors::OwoColorize;
use std::time::Duration;

use super::colors_enabled;

/// Render a re-export chain outermost first: `a.ts -> b.ts`.
///
/// ```
/// use exportgraph::ModuleId;
/// use exportgraph_cli::ui::format_chain;
///
/// let chain = [ModuleId::new("src/index.ts")?, ModuleId::new("src/barrel.ts")?];
/// assert_eq!(format_chain(&chain), "src/index.ts -> src/barrel.ts");
/// # Ok::<(), exportgraph::ModuleIdError>(())
/// ```
pub fn format_chain(chain: &[ModuleId]) -> String {
    chain
        .iter()
        .map(ModuleId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Format duration in human-readable format (ms, s, m:s).
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

fn summary_rows(stats: &GraphStatistics) -> [(&'static str, usize); 5] {
    [
        ("Modules", stats.modules),
        ("Exports", stats.exports),
        ("Consumed", stats.consumed_exports),
        ("Unused", stats.unused_exports),
        ("Consumer edges", stats.consumer_edges),
    ]
}

/// Print the analysis summary table to stderr.
pub fn print_summary(stats: &GraphStatistics, elapsed: Duration) {
    let width = (Term::stderr().size().1 as usize).min(60);
    let colors = colors_enabled();

    if colors {
        eprintln!("\n{}", "Export Graph Summary".bold().underline());
    } else {
        eprintln!("\nExport Graph Summary");
    }
    eprintln!("{}", "─".repeat(width));

    for (label, count) in summary_rows(stats) {
        let label = format!("{:<16}", label);
        if colors && label.starts_with("Unused") && count > 0 {
            eprintln!("  {} {}", label.bold(), count.yellow());
        } else if colors {
            eprintln!("  {} {}", label.bold(), count.cyan());
        } else {
            eprintln!("  {} {}", label, count);
        }
    }

    eprintln!("{}", "─".repeat(width));
    let took = format_duration(elapsed);
    if colors {
        eprintln!("  {} {}", "Analyzed in".bold(), took.green());
    } else {
        eprintln!("  Analyzed in {}", took);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_chain() {
        assert_eq!(format_chain(&[]), "");
        let chain = [
            ModuleId::new("a.ts").unwrap(),
            ModuleId::new("b.ts").unwrap(),
            ModuleId::new("c.ts").unwrap(),
        ];
        assert_eq!(format_chain(&chain), "a.ts -> b.ts -> c.ts");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
    }

    #[test]
    fn test_summary_rows_follow_statistics() {
        let stats = GraphStatistics {
            modules: 4,
            exports: 3,
            consumed_exports: 2,
            unused_exports: 1,
            consumer_edges: 5,
        };
        let rows = summary_rows(&stats);
        assert_eq!(rows[0], ("Modules", 4));
        assert_eq!(rows[3], ("Unused", 1));
        assert_eq!(rows[4], ("Consumer edges", 5));
    }

    #[test]
    fn test_print_summary_does_not_panic() {
        print_summary(&GraphStatistics::default(), Duration::from_millis(3));
    }
}
