//! `exportgraph analyze`: trace every export to its consumers.

use std::time::Instant;

use exportgraph::{AnalysisOptions, ExportDependencyInfo, to_dot, to_json};
use exportgraph_extract::Project;

use crate::cli::AnalyzeArgs;
use crate::commands::utils::{
    discovery_options, load_config, project_root, resolve_path, with_trailing_newline,
    write_output,
};
use crate::config::{ConfigOverrides, Format};
use crate::error::Result;
use crate::ui;

/// Execute the analyze command.
///
/// Loads the export and consumer scopes, runs the analysis and writes the
/// serialized rows to stdout or the configured output file. Files that fail to
/// parse are reported as warnings and contribute nothing.
pub fn execute(args: AnalyzeArgs) -> Result<()> {
    let root = project_root(args.cwd.as_deref())?;
    let config = load_config(&ConfigOverrides::from(&args), &root, args.config.as_deref())?;
    let started = Instant::now();

    let project = Project::load(
        &root,
        &config.export_dirs,
        &config.consumer_dirs,
        &discovery_options(&config),
    )?;

    for skipped in project.skipped() {
        ui::warning(&format!("Skipped {}: {}", skipped.path.display(), skipped.error));
    }
    if project.export_scope().is_empty() {
        ui::warning("No source files found in the export directories");
    }

    let graph = project.analyze(AnalysisOptions::default().parallel(config.parallel));
    tracing::info!(
        exports = graph.dependencies().len(),
        consumers = project.consumer_scope().len(),
        "analysis complete"
    );

    let rows: Vec<ExportDependencyInfo> = if args.unused {
        graph.unused_exports().cloned().collect()
    } else {
        graph.dependencies().to_vec()
    };
    let rendered = with_trailing_newline(render(&rows, config.format)?);

    match &config.output {
        Some(path) => {
            let path = resolve_path(path, &root);
            write_output(&path, &rendered)?;
            ui::success(&format!("Wrote {} export(s) to {}", rows.len(), path.display()));
        }
        None => print!("{}", rendered),
    }

    ui::print_summary(&graph.statistics(), started.elapsed());
    Ok(())
}

/// Serialize rows in the requested format.
pub fn render(rows: &[ExportDependencyInfo], format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => to_json(rows)?,
        Format::Dot => to_dot(rows),
    })
}
