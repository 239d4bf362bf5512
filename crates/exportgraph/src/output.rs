//! Serializers for aggregated dependency rows.

use std::collections::BTreeSet;
use std::fmt::Write;

use super::aggregate::ExportDependencyInfo;
use super::{ModuleId, Result};

/// Helper to escape labels for DOT format.
fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

fn via_label(via: &[ModuleId]) -> String {
    let chain: Vec<&str> = via.iter().map(ModuleId::as_str).collect();
    format!("via {}", chain.join(" -> "))
}

/// Pretty JSON array of `{module, name, consumerCount, consumers}`.
pub fn to_json(rows: &[ExportDependencyInfo]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}

/// Graphviz digraph with one node per export and one per consumer module.
///
/// Edges point from the consumer to the export it uses and carry the via
/// chain as a label when the import went through re-exports.
pub fn to_dot(rows: &[ExportDependencyInfo]) -> String {
    let mut output = String::from("digraph ExportGraph {\n");
    output.push_str("    rankdir=LR;\n");

    for row in rows {
        let _ = writeln!(
            output,
            "    \"{}\" [shape=box];",
            escape_label(&row.key().to_string())
        );
    }

    let consumer_modules: BTreeSet<&ModuleId> = rows
        .iter()
        .flat_map(|row| row.consumers.iter().map(|consumer| &consumer.module))
        .collect();
    for module in consumer_modules {
        let _ = writeln!(output, "    \"{}\";", escape_label(module.as_str()));
    }

    for row in rows {
        let export = escape_label(&row.key().to_string());
        for consumer in &row.consumers {
            let from = escape_label(consumer.module.as_str());
            match &consumer.via {
                Some(via) => {
                    let _ = writeln!(
                        output,
                        "    \"{from}\" -> \"{export}\" [label=\"{}\"];",
                        escape_label(&via_label(via))
                    );
                }
                None => {
                    let _ = writeln!(output, "    \"{from}\" -> \"{export}\";");
                }
            }
        }
    }

    output.push_str("}\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracer::Consumer;

    fn id(path: &str) -> ModuleId {
        ModuleId::new(path).unwrap()
    }

    fn rows() -> Vec<ExportDependencyInfo> {
        vec![
            ExportDependencyInfo {
                module: id("lib/a.ts"),
                name: "x".into(),
                consumer_count: 2,
                consumers: vec![
                    Consumer::via(id("app/main.ts"), vec![id("lib/index.ts"), id("lib/b.ts")]),
                    Consumer::direct(id("app/other.ts")),
                ],
            },
            ExportDependencyInfo {
                module: id("lib/a.ts"),
                name: "unused".into(),
                consumer_count: 0,
                consumers: vec![],
            },
        ]
    }

    #[test]
    fn json_uses_camel_case_and_omits_empty_via() {
        let json = to_json(&rows()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["module"], "lib/a.ts");
        assert_eq!(value[0]["consumerCount"], 2);
        assert_eq!(
            value[0]["consumers"][0]["via"],
            serde_json::json!(["lib/index.ts", "lib/b.ts"])
        );
        assert!(value[0]["consumers"][1].get("via").is_none());
        assert_eq!(value[1]["consumers"], serde_json::json!([]));
    }

    #[test]
    fn dot_renders_nodes_and_labelled_edges() {
        let dot = to_dot(&rows());

        assert!(dot.starts_with("digraph ExportGraph {\n"));
        assert!(dot.contains("\"lib/a.ts::x\" [shape=box];"));
        assert!(dot.contains("\"lib/a.ts::unused\" [shape=box];"));
        assert!(dot.contains(
            "\"app/main.ts\" -> \"lib/a.ts::x\" [label=\"via lib/index.ts -> lib/b.ts\"];"
        ));
        assert!(dot.contains("\"app/other.ts\" -> \"lib/a.ts::x\";"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn dot_escapes_quotes() {
        assert_eq!(escape_label(r#"a"b"#), r#"a\"b"#);
        assert_eq!(escape_label(r"a\b"), r"a\\b");
    }
}
