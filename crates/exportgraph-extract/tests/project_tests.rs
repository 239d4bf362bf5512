//! Integration tests: real source trees on disk through the full pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use exportgraph::{AnalysisOptions, Consumer, ModuleId};
use exportgraph_extract::{DiscoveryOptions, ExtractError, Project};
use tempfile::TempDir;

/// Create a test project with the given files.
fn create_test_project(temp: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let root = temp.path().to_path_buf();

    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|_| panic!("Failed to create parent directory for {path}"));
        }
        fs::write(&file_path, content).unwrap_or_else(|_| panic!("Failed to write file {path}"));
    }

    root
}

fn id(path: &str) -> ModuleId {
    ModuleId::new(path).unwrap()
}

fn primitives_project(temp: &TempDir) -> PathBuf {
    create_test_project(
        temp,
        &[
            (
                "src/shared/primitives.ts",
                r#"
                export type UserId = string;
                export type GroupId = string;
                export const DEFAULT_VALUE = 0;
                export function helper() { return DEFAULT_VALUE; }
                "#,
            ),
            (
                "src/shared/barrel.ts",
                r#"
                export { UserId } from './primitives';
                export { helper as utilHelper } from './primitives';
                "#,
            ),
            (
                "src/shared/reexporter.ts",
                r#"
                import { GroupId, DEFAULT_VALUE } from './primitives';
                export type { GroupId };
                export { DEFAULT_VALUE as REEXPORTED_VALUE };
                "#,
            ),
            (
                "src/app/consumer.ts",
                r#"
                import type { UserId } from '../shared/barrel';
                import type { GroupId } from '../shared/reexporter';
                import { DEFAULT_VALUE } from '../shared/primitives';
                import { utilHelper } from '../shared/barrel';

                export const run = (u: UserId, g: GroupId) => utilHelper() + DEFAULT_VALUE;
                "#,
            ),
        ],
    )
}

#[test]
fn test_primitives_scenario_from_disk() {
    let temp = TempDir::new().unwrap();
    let root = primitives_project(&temp);

    let project = Project::load(&root, &["src/shared"], &["src/app"], &DiscoveryOptions::default())
        .unwrap();
    assert!(project.skipped().is_empty());
    assert_eq!(project.export_scope().len(), 3);
    assert_eq!(project.consumer_scope().len(), 1);

    let graph = project.analyze(AnalysisOptions::default());
    let primitives = id("src/shared/primitives.ts");
    let consumer = id("src/app/consumer.ts");

    assert_eq!(
        graph.consumers_of(&primitives, "UserId"),
        [Consumer::via(consumer.clone(), vec![id("src/shared/barrel.ts")])]
    );
    assert_eq!(
        graph.consumers_of(&primitives, "GroupId"),
        [Consumer::via(consumer.clone(), vec![id("src/shared/reexporter.ts")])]
    );
    assert_eq!(
        graph.consumers_of(&primitives, "helper"),
        [Consumer::via(consumer.clone(), vec![id("src/shared/barrel.ts")])]
    );
    assert_eq!(
        graph.consumers_of(&primitives, "DEFAULT_VALUE"),
        [Consumer::direct(consumer)]
    );
}

#[test]
fn test_namespace_imports_and_index_files() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("lib/index.ts", "export * from './math';"),
            (
                "lib/math.ts",
                "export const add = 1; export const sub = 2; export const mul = 3;",
            ),
            (
                "app/main.ts",
                "import * as M from '../lib'; console.log(M.add, M['mul']);",
            ),
        ],
    );

    let project =
        Project::load(&root, &["lib"], &["app"], &DiscoveryOptions::default()).unwrap();
    let graph = project.analyze(AnalysisOptions::default().parallel(true));

    let math = id("lib/math.ts");
    assert_eq!(
        graph.consumers_of(&math, "add"),
        [Consumer::via(id("app/main.ts"), vec![id("lib/index.ts")])]
    );
    assert_eq!(graph.consumers_of(&math, "mul").len(), 1);
    let unused: Vec<_> = graph.unused_exports().map(|row| row.name.as_str()).collect();
    assert_eq!(unused, ["sub"]);
}

#[test]
fn test_unparseable_files_are_skipped_not_fatal() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("lib/good.ts", "export const ok = true;"),
            ("lib/bad.ts", "export const = ;"),
            ("app/main.ts", "import { ok } from '../lib/good'; import { x } from '../lib/bad';"),
        ],
    );

    let project =
        Project::load(&root, &["lib"], &["app"], &DiscoveryOptions::default()).unwrap();
    assert_eq!(project.skipped().len(), 1);
    assert!(project.skipped()[0].path.ends_with(Path::new("lib/bad.ts")));
    assert!(matches!(project.skipped()[0].error, ExtractError::Parse { .. }));

    let graph = project.analyze(AnalysisOptions::default());
    assert_eq!(graph.dependencies().len(), 1);
    assert_eq!(graph.consumers_of(&id("lib/good.ts"), "ok").len(), 1);
}

#[test]
fn test_external_packages_are_omitted() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(
        &temp,
        &[
            ("lib/index.ts", "export { useState } from 'react'; export * from 'lodash';"),
            ("app/main.ts", "import { useState } from '../lib';"),
        ],
    );

    let project =
        Project::load(&root, &["lib"], &["app"], &DiscoveryOptions::default()).unwrap();
    let graph = project.analyze(AnalysisOptions::default());

    assert!(graph.dependencies().is_empty());
    assert!(graph.consumers().is_empty());
}

#[test]
fn test_missing_scope_dir_fails() {
    let temp = TempDir::new().unwrap();
    let root = create_test_project(&temp, &[("lib/a.ts", "export const a = 1;")]);

    let result = Project::load(&root, &["lib"], &["nope"], &DiscoveryOptions::default());
    assert!(matches!(result, Err(ExtractError::Io { .. })));
}
