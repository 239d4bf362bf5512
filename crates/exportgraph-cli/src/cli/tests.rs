#[cfg(test)]
mod tests {
    use crate::cli::validation::parse_extension;
    use crate::cli::{Cli, Command, OutputFormat};
    use clap::{Parser, ValueEnum};
    use std::path::PathBuf;

    #[test]
    fn test_parse_extension_strips_leading_dot() {
        assert_eq!(parse_extension("ts"), Ok("ts".to_string()));
        assert_eq!(parse_extension(".tsx"), Ok("tsx".to_string()));
        assert_eq!(parse_extension("d.ts"), Ok("d.ts".to_string()));
        assert_eq!(parse_extension(".d.ts"), Ok("d.ts".to_string()));
    }

    #[test]
    fn test_parse_extension_rejects_invalid() {
        assert_eq!(parse_extension(""), Err("Extension cannot be empty".to_string()));
        assert!(parse_extension(".").is_err());
        assert!(parse_extension("..ts").is_err());
        assert!(parse_extension("ts.").is_err());
        assert!(parse_extension("src/ts").is_err());
        assert!(parse_extension("t s").is_err());
    }

    #[test]
    fn test_analyze_with_repeated_dirs() {
        let cli = Cli::try_parse_from([
            "exportgraph",
            "analyze",
            "--exports",
            "src/shared",
            "--exports",
            "src/lib",
            "--consumers",
            "src/app",
            "-f",
            "dot",
            "-o",
            "graph.dot",
            "--unused",
            "--parallel",
        ])
        .unwrap();

        match cli.command {
            Command::Analyze(args) => {
                assert_eq!(
                    args.export_dirs,
                    vec![PathBuf::from("src/shared"), PathBuf::from("src/lib")]
                );
                assert_eq!(args.consumer_dirs, vec![PathBuf::from("src/app")]);
                assert_eq!(args.format, Some(OutputFormat::Dot));
                assert_eq!(args.output, Some(PathBuf::from("graph.dot")));
                assert!(args.unused);
                assert!(args.parallel);
                assert!(args.config.is_none());
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_defaults_leave_config_fields_unset() {
        let cli = Cli::try_parse_from(["exportgraph", "analyze"]).unwrap();

        match cli.command {
            Command::Analyze(args) => {
                assert!(args.export_dirs.is_empty());
                assert!(args.consumer_dirs.is_empty());
                assert!(args.extensions.is_empty());
                assert!(args.format.is_none());
                assert!(!args.unused);
                assert!(!args.parallel);
            }
            _ => panic!("Expected Analyze command"),
        }
    }

    #[test]
    fn test_analyze_extensions_are_validated() {
        let cli =
            Cli::try_parse_from(["exportgraph", "analyze", "--ext", ".ts", "-e", "tsx"]).unwrap();
        match cli.command {
            Command::Analyze(args) => assert_eq!(args.extensions, vec!["ts", "tsx"]),
            _ => panic!("Expected Analyze command"),
        }

        let result = Cli::try_parse_from(["exportgraph", "analyze", "--ext", "a/b"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_format_rejected() {
        let result = Cli::try_parse_from(["exportgraph", "analyze", "-f", "yaml"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_exports_requires_module() {
        assert!(Cli::try_parse_from(["exportgraph", "exports"]).is_err());

        let cli = Cli::try_parse_from([
            "exportgraph",
            "exports",
            "src/shared/index.ts",
            "--exports",
            "src/shared",
            "--cwd",
            "/project",
        ])
        .unwrap();
        match cli.command {
            Command::Exports(args) => {
                assert_eq!(args.module, "src/shared/index.ts");
                assert_eq!(args.export_dirs, vec![PathBuf::from("src/shared")]);
                assert_eq!(args.cwd, Some(PathBuf::from("/project")));
            }
            _ => panic!("Expected Exports command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from(["exportgraph", "analyze", "--verbose", "--no-color"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.no_color);

        let cli = Cli::try_parse_from(["exportgraph", "-q", "exports", "a.ts"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        let result = Cli::try_parse_from(["exportgraph", "analyze", "-v", "-q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_output_format_values() {
        let names: Vec<_> = OutputFormat::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        assert_eq!(names, vec!["json", "dot"]);
        assert_eq!(OutputFormat::default(), OutputFormat::Json);
    }
}
