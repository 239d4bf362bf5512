//! Source-fact extraction from a single JavaScript/TypeScript module.

use std::path::Path;

use exportgraph::{ExportBinding, ImportBinding, ModuleFacts, ModuleId};
use oxc_allocator::Allocator;
use oxc_ast::ast::{
    BindingPattern, BindingPatternKind, ComputedMemberExpression, Declaration,
    ExportAllDeclaration, ExportNamedDeclaration, Expression, ImportDeclaration,
    ImportDeclarationSpecifier, JSXMemberExpression, JSXMemberExpressionObject, ModuleDeclaration,
    ModuleExportName, Program, StaticMemberExpression, TSQualifiedName, TSTypeName,
};
use oxc_ast_visit::{Visit, walk};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::error::{ExtractError, Result};

/// Source type for `path`, falling back to an ES module for unknown extensions.
pub fn source_type_for(path: &Path) -> SourceType {
    SourceType::from_path(path).unwrap_or(SourceType::mjs())
}

/// Parse `source` and collect its imports, exports and member accesses.
///
/// `path` selects the dialect (TS, JSX, declaration file) and is used in
/// error messages; `id` becomes the module id of the returned facts.
///
/// # Errors
///
/// Returns [`ExtractError::Parse`] if the source has syntax errors.
pub fn extract_module_facts(id: ModuleId, path: &Path, source: &str) -> Result<ModuleFacts> {
    let allocator = Allocator::default();
    let parsed = Parser::new(&allocator, source, source_type_for(path)).parse();

    if parsed.panicked || !parsed.errors.is_empty() {
        let message = parsed
            .errors
            .iter()
            .map(|error| error.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ExtractError::Parse {
            path: path.to_path_buf(),
            message,
        });
    }

    let mut facts = ModuleFacts::new(id);
    collect_declarations(&parsed.program, &mut facts);

    let mut accesses = AccessCollector { facts: &mut facts };
    accesses.visit_program(&parsed.program);

    tracing::trace!(
        module = %facts.id,
        imports = facts.imports.len(),
        exports = facts.exports.len(),
        accesses = facts.property_accesses.len(),
        "extracted module facts"
    );

    Ok(facts)
}

/// Walk top-level module declarations.
fn collect_declarations(program: &Program<'_>, facts: &mut ModuleFacts) {
    for statement in &program.body {
        let Some(declaration) = statement.as_module_declaration() else {
            continue;
        };

        match declaration {
            ModuleDeclaration::ImportDeclaration(import) => collect_import(import, facts),
            ModuleDeclaration::ExportNamedDeclaration(export) => collect_named_export(export, facts),
            ModuleDeclaration::ExportAllDeclaration(export) => collect_export_all(export, facts),
            // `export =` is the TypeScript spelling of a default export
            ModuleDeclaration::ExportDefaultDeclaration(_)
            | ModuleDeclaration::TSExportAssignment(_) => {
                facts.exports.push(ExportBinding::default_assignment());
            }
            _ => {}
        }
    }
}

fn collect_import(import: &ImportDeclaration<'_>, facts: &mut ModuleFacts) {
    // Side-effect imports bind nothing.
    let Some(specifiers) = &import.specifiers else {
        return;
    };
    let source = import.source.value.to_string();
    let declaration_is_type = import.import_kind.is_type();

    for specifier in specifiers {
        let binding = match specifier {
            ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => {
                ImportBinding::default(default.local.name.to_string(), source.clone())
            }
            ImportDeclarationSpecifier::ImportNamespaceSpecifier(namespace) => {
                ImportBinding::namespace(namespace.local.name.to_string(), source.clone())
            }
            ImportDeclarationSpecifier::ImportSpecifier(named) => {
                let binding = ImportBinding::named(
                    export_name(&named.imported),
                    named.local.name.to_string(),
                    source.clone(),
                );
                if named.import_kind.is_type() {
                    binding.type_only()
                } else {
                    binding
                }
            }
        };

        facts.imports.push(if declaration_is_type {
            binding.type_only()
        } else {
            binding
        });
    }
}

fn collect_named_export(export: &ExportNamedDeclaration<'_>, facts: &mut ModuleFacts) {
    if let Some(declaration) = &export.declaration {
        for name in declared_names(declaration) {
            facts.exports.push(ExportBinding::local(name));
        }
    }

    let source = export.source.as_ref().map(|source| source.value.to_string());
    for specifier in &export.specifiers {
        let local = export_name(&specifier.local);
        let exported = export_name(&specifier.exported);
        facts.exports.push(match &source {
            Some(source) => ExportBinding::re_export_from(local, exported, source.clone()),
            None => ExportBinding::re_export_local(local, exported),
        });
    }
}

fn collect_export_all(export: &ExportAllDeclaration<'_>, facts: &mut ModuleFacts) {
    match &export.exported {
        // `export * as ns from` creates the namespace object in this module.
        Some(name) => facts.exports.push(ExportBinding::local(export_name(name))),
        None => facts
            .exports
            .push(ExportBinding::wildcard(export.source.value.to_string())),
    }
}

fn export_name(name: &ModuleExportName<'_>) -> String {
    match name {
        ModuleExportName::IdentifierName(ident) => ident.name.to_string(),
        ModuleExportName::IdentifierReference(ident) => ident.name.to_string(),
        ModuleExportName::StringLiteral(literal) => literal.value.to_string(),
    }
}

/// Names bound by an exported declaration.
fn declared_names(declaration: &Declaration<'_>) -> Vec<String> {
    let mut names = Vec::new();
    match declaration {
        Declaration::VariableDeclaration(variable) => {
            for declarator in &variable.declarations {
                collect_binding_names(&declarator.id, &mut names);
            }
        }
        Declaration::FunctionDeclaration(function) => {
            names.extend(function.id.as_ref().map(|id| id.name.to_string()));
        }
        Declaration::ClassDeclaration(class) => {
            names.extend(class.id.as_ref().map(|id| id.name.to_string()));
        }
        Declaration::TSTypeAliasDeclaration(alias) => names.push(alias.id.name.to_string()),
        Declaration::TSInterfaceDeclaration(interface) => {
            names.push(interface.id.name.to_string());
        }
        Declaration::TSEnumDeclaration(enumeration) => {
            names.push(enumeration.id.name.to_string());
        }
        Declaration::TSModuleDeclaration(module) => names.push(module.id.name().to_string()),
        _ => {}
    }
    names
}

/// Every identifier bound by a (possibly destructuring) pattern.
fn collect_binding_names(pattern: &BindingPattern<'_>, names: &mut Vec<String>) {
    match &pattern.kind {
        BindingPatternKind::BindingIdentifier(ident) => names.push(ident.name.to_string()),
        BindingPatternKind::ObjectPattern(object) => {
            for property in &object.properties {
                collect_binding_names(&property.value, names);
            }
            if let Some(rest) = &object.rest {
                collect_binding_names(&rest.argument, names);
            }
        }
        BindingPatternKind::ArrayPattern(array) => {
            for element in array.elements.iter().flatten() {
                collect_binding_names(element, names);
            }
            if let Some(rest) = &array.rest {
                collect_binding_names(&rest.argument, names);
            }
        }
        BindingPatternKind::AssignmentPattern(assignment) => {
            collect_binding_names(&assignment.left, names);
        }
    }
}

/// Records `ident.prop` accesses anywhere in the module.
///
/// Covers value member expressions, string-keyed computed access
/// (`ns["prop"]`), TypeScript qualified type names (`ns.Type`) and JSX member
/// tags (`<ns.Component />`).
struct AccessCollector<'f> {
    facts: &'f mut ModuleFacts,
}

impl AccessCollector<'_> {
    fn record(&mut self, base: &str, property: &str) {
        self.facts.property_accesses.push(exportgraph::PropertyAccess {
            base: base.to_string(),
            property: property.to_string(),
        });
    }
}

impl<'f, 'ast> Visit<'ast> for AccessCollector<'f> {
    fn visit_static_member_expression(&mut self, it: &StaticMemberExpression<'ast>) {
        if let Expression::Identifier(object) = &it.object {
            self.record(&object.name, &it.property.name);
        }
        walk::walk_static_member_expression(self, it);
    }

    fn visit_computed_member_expression(&mut self, it: &ComputedMemberExpression<'ast>) {
        if let (Expression::Identifier(object), Expression::StringLiteral(property)) =
            (&it.object, &it.expression)
        {
            self.record(&object.name, &property.value);
        }
        walk::walk_computed_member_expression(self, it);
    }

    fn visit_ts_qualified_name(&mut self, it: &TSQualifiedName<'ast>) {
        if let TSTypeName::IdentifierReference(left) = &it.left {
            self.record(&left.name, &it.right.name);
        }
        walk::walk_ts_qualified_name(self, it);
    }

    fn visit_jsx_member_expression(&mut self, it: &JSXMemberExpression<'ast>) {
        if let JSXMemberExpressionObject::IdentifierReference(object) = &it.object {
            self.record(&object.name, &it.property.name);
        }
        walk::walk_jsx_member_expression(self, it);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exportgraph::{ExportBindingKind, ImportKind, PropertyAccess};

    fn extract(path: &str, source: &str) -> ModuleFacts {
        extract_module_facts(ModuleId::new(path).unwrap(), Path::new(path), source).unwrap()
    }

    fn exported(facts: &ModuleFacts) -> Vec<(&str, ExportBindingKind)> {
        facts
            .exports
            .iter()
            .map(|export| (export.exported.as_str(), export.kind))
            .collect()
    }

    #[test]
    fn test_imports_of_every_shape() {
        let facts = extract(
            "src/app.ts",
            r#"
            import React from 'react';
            import { a, b as c } from './lib';
            import * as ns from './ns';
            import type { T } from './types';
            import { type U, V } from './mixed';
            import './side-effect';
            "#,
        );

        let imports: Vec<_> = facts
            .imports
            .iter()
            .map(|i| (i.local.as_str(), i.kind, i.specifier.as_str(), i.is_type_only))
            .collect();
        assert_eq!(
            imports,
            [
                ("React", ImportKind::Default, "react", false),
                ("a", ImportKind::Named, "./lib", false),
                ("c", ImportKind::Named, "./lib", false),
                ("ns", ImportKind::Namespace, "./ns", false),
                ("T", ImportKind::Named, "./types", true),
                ("U", ImportKind::Named, "./mixed", true),
                ("V", ImportKind::Named, "./mixed", false),
            ]
        );
        assert_eq!(facts.imports[2].imported.as_deref(), Some("b"));
    }

    #[test]
    fn test_local_declarations() {
        let facts = extract(
            "src/lib.ts",
            r#"
            export const x = 1, y = 2;
            export function f() {}
            export class C {}
            export type Alias = string;
            export interface Shape {}
            export enum Color { Red }
            export namespace Space {}
            export default 42;
            "#,
        );

        assert_eq!(
            exported(&facts),
            [
                ("x", ExportBindingKind::LocalDeclaration),
                ("y", ExportBindingKind::LocalDeclaration),
                ("f", ExportBindingKind::LocalDeclaration),
                ("C", ExportBindingKind::LocalDeclaration),
                ("Alias", ExportBindingKind::LocalDeclaration),
                ("Shape", ExportBindingKind::LocalDeclaration),
                ("Color", ExportBindingKind::LocalDeclaration),
                ("Space", ExportBindingKind::LocalDeclaration),
                ("default", ExportBindingKind::DefaultAssignment),
            ]
        );
    }

    #[test]
    fn test_destructuring_exports_bind_every_name() {
        let facts = extract(
            "src/lib.ts",
            "export const { a, b: renamed, c = 1, ...rest } = obj; export const [d, [e], ...f] = arr;",
        );
        let names: Vec<_> = facts.exports.iter().map(|e| e.exported.as_str()).collect();
        assert_eq!(names, ["a", "renamed", "c", "rest", "d", "e", "f"]);
    }

    #[test]
    fn test_re_exports() {
        let facts = extract(
            "src/index.ts",
            r#"
            export { helper as utilHelper, UserId } from './primitives';
            export * from './all';
            export * as grouped from './grouped';
            import { GroupId } from './primitives';
            export type { GroupId };
            export { GroupId as Gid };
            "#,
        );

        let first = &facts.exports[0];
        assert_eq!(first.kind, ExportBindingKind::NamedReExport);
        assert_eq!(first.imported.as_deref(), Some("helper"));
        assert_eq!(first.exported, "utilHelper");
        assert_eq!(first.specifier.as_deref(), Some("./primitives"));

        assert_eq!(facts.exports[2].kind, ExportBindingKind::WildcardReExport);
        assert_eq!(facts.exports[2].specifier.as_deref(), Some("./all"));

        assert_eq!(facts.exports[3].exported, "grouped");
        assert_eq!(facts.exports[3].kind, ExportBindingKind::LocalDeclaration);

        let gid = &facts.exports[5];
        assert_eq!(gid.kind, ExportBindingKind::NamedReExport);
        assert_eq!(gid.local.as_deref(), Some("GroupId"));
        assert_eq!(gid.exported, "Gid");
        assert_eq!(gid.specifier, None);
    }

    #[test]
    fn test_property_accesses() {
        let facts = extract(
            "src/app.tsx",
            r#"
            import * as U from './utils';
            const a = U.format(U.parse("x"));
            const b = U["quoted"];
            let t: U.Options;
            const el = <U.Button />;
            foo.bar.baz;
            "#,
        );

        let accesses: Vec<_> = facts
            .property_accesses
            .iter()
            .filter(|access| access.base == "U")
            .map(|access| access.property.as_str())
            .collect();
        assert_eq!(accesses, ["format", "parse", "quoted", "Options", "Button"]);
        assert!(facts.property_accesses.contains(&PropertyAccess {
            base: "foo".into(),
            property: "bar".into(),
        }));
        assert!(!facts.property_accesses.iter().any(|access| access.property == "baz"));
    }

    #[test]
    fn test_ts_export_assignment_is_default() {
        let facts = extract("src/legacy.ts", "const x = 1; export = x;");
        assert_eq!(exported(&facts), [("default", ExportBindingKind::DefaultAssignment)]);
    }

    #[test]
    fn test_syntax_errors_are_reported() {
        let error = extract_module_facts(
            ModuleId::new("src/broken.ts").unwrap(),
            Path::new("src/broken.ts"),
            "export const = ;",
        )
        .unwrap_err();
        assert!(matches!(error, ExtractError::Parse { .. }));
        assert!(error.to_string().contains("src/broken.ts"));
    }

    #[test]
    fn test_source_type_follows_extension() {
        assert!(source_type_for(Path::new("a.tsx")).is_jsx());
        assert!(source_type_for(Path::new("a.d.ts")).is_typescript_definition());
        assert!(source_type_for(Path::new("a.vue")).is_module());
    }
}
