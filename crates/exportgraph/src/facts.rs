//! Per-module source facts consumed by the engine.
//!
//! These types are the boundary between a source-fact extractor (a parser
//! front-end) and the resolution engine. They carry declared imports and
//! exports exactly as written, with specifiers left unresolved; the engine
//! resolves specifiers against a [`SpecifierResolver`](crate::SpecifierResolver).
//!
//! All types derive serde so fact sets produced elsewhere can be loaded from
//! JSON.

use serde::{Deserialize, Serialize};

use super::ModuleId;

/// Everything the engine needs to know about one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleFacts {
    pub id: ModuleId,
    #[serde(default)]
    pub imports: Vec<ImportBinding>,
    #[serde(default)]
    pub exports: Vec<ExportBinding>,
    /// `base.property` member accesses found anywhere in the module body.
    #[serde(default)]
    pub property_accesses: Vec<PropertyAccess>,
}

impl ModuleFacts {
    /// Facts for a module with no imports, exports or accesses yet.
    pub fn new(id: ModuleId) -> Self {
        Self {
            id,
            imports: Vec::new(),
            exports: Vec::new(),
            property_accesses: Vec::new(),
        }
    }

    pub fn with_import(mut self, import: ImportBinding) -> Self {
        self.imports.push(import);
        self
    }

    pub fn with_export(mut self, export: ExportBinding) -> Self {
        self.exports.push(export);
        self
    }

    pub fn with_access(mut self, base: impl Into<String>, property: impl Into<String>) -> Self {
        self.property_accesses.push(PropertyAccess {
            base: base.into(),
            property: property.into(),
        });
        self
    }

    /// Find the import binding that introduced `local` into this module.
    pub fn import_for_local(&self, local: &str) -> Option<&ImportBinding> {
        self.imports.iter().find(|import| import.local == local)
    }
}

/// Shape of an import binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportKind {
    /// `import Foo from './foo'`
    Default,
    /// `import { foo as bar } from './foo'`
    Named,
    /// `import * as ns from './foo'`
    Namespace,
}

/// One local binding introduced by an import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportBinding {
    /// Local name the binding is visible under.
    pub local: String,
    pub kind: ImportKind,
    /// Module specifier exactly as written.
    pub specifier: String,
    /// Export name on the source module for named imports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported: Option<String>,
    #[serde(default)]
    pub is_type_only: bool,
}

impl ImportBinding {
    /// `import local from 'specifier'`
    pub fn default(local: impl Into<String>, specifier: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            kind: ImportKind::Default,
            specifier: specifier.into(),
            imported: None,
            is_type_only: false,
        }
    }

    /// `import { imported as local } from 'specifier'`
    pub fn named(
        imported: impl Into<String>,
        local: impl Into<String>,
        specifier: impl Into<String>,
    ) -> Self {
        Self {
            local: local.into(),
            kind: ImportKind::Named,
            specifier: specifier.into(),
            imported: Some(imported.into()),
            is_type_only: false,
        }
    }

    /// `import * as local from 'specifier'`
    pub fn namespace(local: impl Into<String>, specifier: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            kind: ImportKind::Namespace,
            specifier: specifier.into(),
            imported: None,
            is_type_only: false,
        }
    }

    pub fn type_only(mut self) -> Self {
        self.is_type_only = true;
        self
    }

    /// The export name this binding reads from its source module.
    ///
    /// Namespace imports read no single export and return `None`.
    pub fn source_export_name(&self) -> Option<&str> {
        match self.kind {
            ImportKind::Default => Some("default"),
            ImportKind::Named => Some(self.imported.as_deref().unwrap_or(&self.local)),
            ImportKind::Namespace => None,
        }
    }
}

/// Shape of an export declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExportBindingKind {
    /// `export const/function/class/type/interface/enum X`
    LocalDeclaration,
    /// `export { X as Y } from './m'` or `export { X as Y }`
    NamedReExport,
    /// `export * from './m'`
    WildcardReExport,
    /// `export default ...`
    DefaultAssignment,
}

/// One exported name declared by a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBinding {
    /// Local binding referenced by `export { local as exported }` without a source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    /// Name visible to importers (`"default"` for default exports, `"*"` for wildcards).
    pub exported: String,
    pub kind: ExportBindingKind,
    /// Source specifier for `export ... from` forms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifier: Option<String>,
    /// Name on the source module for `export { imported as exported } from`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported: Option<String>,
    /// File the declaration originates from, when the extractor resolved it
    /// through a declaration helper. `None` means this module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declared_in: Option<ModuleId>,
}

impl ExportBinding {
    /// `export const name = ...` and friends.
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            local: None,
            exported: name.into(),
            kind: ExportBindingKind::LocalDeclaration,
            specifier: None,
            imported: None,
            declared_in: None,
        }
    }

    /// `export { imported as exported } from 'specifier'`
    pub fn re_export_from(
        imported: impl Into<String>,
        exported: impl Into<String>,
        specifier: impl Into<String>,
    ) -> Self {
        Self {
            local: None,
            exported: exported.into(),
            kind: ExportBindingKind::NamedReExport,
            specifier: Some(specifier.into()),
            imported: Some(imported.into()),
            declared_in: None,
        }
    }

    /// `export { local as exported }`
    pub fn re_export_local(local: impl Into<String>, exported: impl Into<String>) -> Self {
        Self {
            local: Some(local.into()),
            exported: exported.into(),
            kind: ExportBindingKind::NamedReExport,
            specifier: None,
            imported: None,
            declared_in: None,
        }
    }

    /// `export * from 'specifier'`
    pub fn wildcard(specifier: impl Into<String>) -> Self {
        Self {
            local: None,
            exported: "*".to_string(),
            kind: ExportBindingKind::WildcardReExport,
            specifier: Some(specifier.into()),
            imported: None,
            declared_in: None,
        }
    }

    /// `export default ...`
    pub fn default_assignment() -> Self {
        Self {
            local: None,
            exported: "default".to_string(),
            kind: ExportBindingKind::DefaultAssignment,
            specifier: None,
            imported: None,
            declared_in: None,
        }
    }

    pub fn declared_in(mut self, origin: ModuleId) -> Self {
        self.declared_in = Some(origin);
        self
    }
}

/// A `base.property` member access.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyAccess {
    pub base: String,
    pub property: String,
}
