use clap::Parser;

/// Builds and validates hierarchical election identifiers.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// The election type key, for example 'local', 'parl' or 'sp'. Run with
    /// --list-types to see every known key.
    #[clap(value_parser)]
    pub election_type: Option<String>,

    /// The poll date, in YYYY-MM-DD format.
    #[clap(short, long, value_parser)]
    pub date: Option<String>,

    /// The election subtype code, for types that have subtypes (for example
    /// 'c' or 'r' for the Scottish Parliament).
    #[clap(short, long, value_parser)]
    pub subtype: Option<String>,

    /// The name or slug of the organisation running the contest. Free text
    /// is normalised to a slug ('Test Org' becomes 'test-org').
    #[clap(short, long, value_parser)]
    pub organisation: Option<String>,

    /// The name or slug of the organisational division being contested.
    #[clap(long, value_parser)]
    pub division: Option<String>,

    /// ('by', 'by election', 'by-election' or 'election') Marks the contest
    /// as a by-election or as an ordinary scheduled election.
    #[clap(short, long, value_parser)]
    pub contest_type: Option<String>,

    /// (group, subtype-group, organisation-group or ballot) If specified,
    /// only the identifier at this level is printed and missing inputs are
    /// an error. By default every level that can be built is printed.
    #[clap(short, long, value_parser)]
    pub level: Option<String>,

    /// (file path) A JSON datapackage of election type definitions that
    /// replaces the built-in table. See the library manual for the format.
    #[clap(long, value_parser)]
    pub datapackage: Option<String>,

    /// (file path) A reference file containing the expected identifiers as a
    /// JSON array. If provided, electid will check that the produced
    /// identifiers match the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// Prints the identifiers as a JSON array instead of one per line.
    #[clap(long, takes_value = false)]
    pub json: bool,

    /// Lists the known election types and exits.
    #[clap(long, takes_value = false)]
    pub list_types: bool,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
