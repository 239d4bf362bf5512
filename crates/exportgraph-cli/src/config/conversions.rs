use crate::cli::{AnalyzeArgs, ExportsArgs, OutputFormat};
use crate::config::types::*;

// Conversion implementations: CLI args -> config layers

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => Format::Json,
            OutputFormat::Dot => Format::Dot,
        }
    }
}

fn non_empty<T: Clone>(values: &[T]) -> Option<Vec<T>> {
    (!values.is_empty()).then(|| values.to_vec())
}

impl From<&AnalyzeArgs> for ConfigOverrides {
    fn from(args: &AnalyzeArgs) -> Self {
        Self {
            export_dirs: non_empty(&args.export_dirs),
            consumer_dirs: non_empty(&args.consumer_dirs),
            extensions: non_empty(&args.extensions),
            exclude: non_empty(&args.exclude),
            format: args.format.map(Into::into),
            output: args.output.clone(),
            parallel: args.parallel.then_some(true),
        }
    }
}

impl From<&ExportsArgs> for ConfigOverrides {
    fn from(args: &ExportsArgs) -> Self {
        Self {
            export_dirs: non_empty(&args.export_dirs),
            ..Self::default()
        }
    }
}
