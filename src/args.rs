use clap::Parser;

/// This is a roll-call program. It builds a roster out of name lists, tracks who is
/// present and exports the result sheet.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The JSON file describing the session: the documents to import,
    /// the statuses to apply and where to write the result. See the manual for the format.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, repeatable) A Word (.docx) or Excel (.xlsx) document containing names.
    /// Added after the sources of the --config file.
    #[clap(short, long, value_parser)]
    pub input: Vec<String>,

    /// (text, optional) Names separated by commas, tabs or line breaks.
    #[clap(short, long, value_parser)]
    pub names: Option<String>,

    /// (directory, 'stdout' or empty) If specified, the result sheet is written in this
    /// directory, or printed if 'stdout'. Setting this option overrides the output
    /// directory of the --config file.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (default xlsx) The format of the result sheet: xlsx or csv.
    #[clap(long, value_parser)]
    pub format: Option<String>,

    /// (file path) A reference file containing the JSON summary of a session. If provided,
    /// rollcall will check that the computed summary matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// If passed as an argument, starts an interactive shell on the roster once all the
    /// inputs are imported.
    #[clap(long, takes_value = false)]
    pub interactive: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
