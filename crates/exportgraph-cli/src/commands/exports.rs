//! `exportgraph exports`: the resolved export surface of one module.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use exportgraph::{AnalysisOptions, ModuleId, ResolvedExport};
use exportgraph_extract::Project;

use crate::cli::ExportsArgs;
use crate::commands::utils::{discovery_options, load_config, project_root, resolve_path};
use crate::config::ConfigOverrides;
use crate::error::{AnalysisError, CliError, Result};
use crate::ui;

/// Execute the exports command.
///
/// Prints one line per exported name: where it is originally declared and,
/// for re-exports, the modules it passes through.
pub fn execute(args: ExportsArgs) -> Result<()> {
    let root = project_root(args.cwd.as_deref())?;
    let config = load_config(&ConfigOverrides::from(&args), &root, args.config.as_deref())?;

    let module_path = resolve_path(Path::new(&args.module), &root);
    let module = ModuleId::from_path(&root, &module_path)
        .map_err(|err| CliError::InvalidArgument(format!("{}: {}", args.module, err)))?;

    let no_consumers: &[PathBuf] = &[];
    let project = Project::load(&root, &config.export_dirs, no_consumers, &discovery_options(&config))?;

    if !project.export_scope().iter().any(|facts| facts.id == module) {
        let dirs: Vec<String> = config
            .export_dirs
            .iter()
            .map(|dir| dir.display().to_string())
            .collect();
        return Err(AnalysisError::ModuleNotFound {
            module: module.to_string(),
            hint: format!(
                "Give the path relative to the project root and make sure it lives under one of: {}",
                dirs.join(", ")
            ),
        }
        .into());
    }

    let graph = project.analyze(AnalysisOptions::default());
    let exports = graph.exports_of(&module);

    if exports.is_empty() {
        ui::info(&format!("{} has no resolvable exports", module));
        return Ok(());
    }

    let mut output = String::new();
    for (name, resolved) in &exports {
        let _ = writeln!(output, "{}", describe(name, resolved));
    }
    print!("{}", output);

    ui::success(&format!("{} export(s) in {}", exports.len(), module));
    Ok(())
}

/// One line: `name  ->  origin::original (via a -> b)`.
pub fn describe(name: &str, resolved: &ResolvedExport) -> String {
    let mut line = format!(
        "{}  ->  {}::{}",
        name, resolved.original_module, resolved.original_name
    );
    if !resolved.is_direct() {
        let _ = write!(line, " (via {})", ui::format_chain(&resolved.re_export_chain));
    }
    line
}
