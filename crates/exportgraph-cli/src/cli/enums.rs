use clap::ValueEnum;

/// Serialization of the analysis result
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON records
    ///
    /// One `{module, name, consumerCount, consumers}` object per original export,
    /// sorted by module then name.
    #[default]
    #[value(name = "json")]
    Json,

    /// Graphviz DOT digraph
    ///
    /// Consumer modules point at the exports they use; edges through
    /// re-exports are labelled with the intermediary chain.
    #[value(name = "dot")]
    Dot,
}
