//! Loading a project from disk into export and consumer fact sets.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use exportgraph::{AnalysisOptions, ExportGraph, ModuleFacts, ModuleId, ModuleSet};
use rayon::prelude::*;

use crate::discovery::{DiscoveryOptions, discover_sources};
use crate::error::{ExtractError, Result};
use crate::parse::extract_module_facts;

/// A file that was discovered but could not be turned into facts.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: ExtractError,
}

/// Parsed export and consumer scopes of one project root.
#[derive(Debug)]
pub struct Project {
    root: PathBuf,
    modules: ModuleSet,
    export_scope: Vec<ModuleFacts>,
    consumer_scope: Vec<ModuleFacts>,
    skipped: Vec<SkippedFile>,
}

impl Project {
    /// Discover and parse both scopes under `root`.
    ///
    /// Every file is parsed once even when it belongs to both scopes. Files
    /// that fail to read or parse are logged and kept as modules with no
    /// facts, so imports of them still resolve but contribute nothing.
    ///
    /// # Errors
    ///
    /// Fails only when discovery fails (missing directory, unreadable tree).
    pub fn load<E, C>(
        root: &Path,
        export_dirs: &[E],
        consumer_dirs: &[C],
        options: &DiscoveryOptions,
    ) -> Result<Self>
    where
        E: AsRef<Path>,
        C: AsRef<Path>,
    {
        let export_files = discover_sources(root, export_dirs, options)?;
        let consumer_files = discover_sources(root, consumer_dirs, options)?;

        let mut export_ids = Vec::with_capacity(export_files.len());
        let mut consumer_ids = Vec::with_capacity(consumer_files.len());
        let mut files: BTreeMap<ModuleId, PathBuf> = BTreeMap::new();

        for (paths, ids) in [
            (export_files, &mut export_ids),
            (consumer_files, &mut consumer_ids),
        ] {
            for path in paths {
                let id = ModuleId::from_path(root, &path)?;
                ids.push(id.clone());
                files.entry(id).or_insert(path);
            }
        }

        let parsed: Vec<(ModuleId, std::result::Result<ModuleFacts, ExtractError>)> = files
            .par_iter()
            .map(|(id, path)| (id.clone(), load_file(id, path)))
            .collect();

        let mut facts = BTreeMap::new();
        let mut skipped = Vec::new();
        for (id, result) in parsed {
            match result {
                Ok(module) => {
                    facts.insert(id, module);
                }
                Err(error) => {
                    let path = files.get(&id).cloned().unwrap_or_else(|| id.as_str().into());
                    tracing::warn!(path = %path.display(), %error, "skipping unparseable file");
                    facts.insert(id.clone(), ModuleFacts::new(id));
                    skipped.push(SkippedFile { path, error });
                }
            }
        }

        let modules = ModuleSet::from_modules(facts.keys().cloned())
            .with_extensions(options.extensions.iter().cloned());

        let select = |ids: &[ModuleId]| -> Vec<ModuleFacts> {
            ids.iter().filter_map(|id| facts.get(id).cloned()).collect()
        };
        let export_scope = select(&export_ids);
        let consumer_scope = select(&consumer_ids);

        tracing::debug!(
            root = %root.display(),
            modules = modules.len(),
            exports = export_scope.len(),
            consumers = consumer_scope.len(),
            skipped = skipped.len(),
            "loaded project"
        );

        Ok(Self {
            root: root.to_path_buf(),
            modules,
            export_scope,
            consumer_scope,
            skipped,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every discovered module, used for specifier resolution.
    pub fn modules(&self) -> &ModuleSet {
        &self.modules
    }

    pub fn export_scope(&self) -> &[ModuleFacts] {
        &self.export_scope
    }

    pub fn consumer_scope(&self) -> &[ModuleFacts] {
        &self.consumer_scope
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Run the export graph analysis over the loaded scopes.
    pub fn analyze(&self, options: AnalysisOptions) -> ExportGraph {
        ExportGraph::analyze(
            &self.export_scope,
            &self.consumer_scope,
            &self.modules,
            options,
        )
    }
}

fn load_file(id: &ModuleId, path: &Path) -> Result<ModuleFacts> {
    let source = fs::read_to_string(path).map_err(|error| ExtractError::io(path, error))?;
    extract_module_facts(id.clone(), path, &source)
}
