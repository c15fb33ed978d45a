use clap::Parser;

/// This program ranks teams event by event from a scoring sheet.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file describing the score sheet, the rules and the outputs.
    /// Paths inside the file are relative to its directory. The other flags override it.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference ranks.csv file. If provided, tranks will check that the
    /// computed rank table matches the reference, and print the differences otherwise.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (directory path, 'stdout' or empty) If specified, ranks.csv, top.csv and slides.json
    /// are written to this directory. With 'stdout', the rank table is printed instead.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) The score sheet: one row per team, one column per event.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (csv or xlsx) The type of the input. Guessed from the file extension by default.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// (text, repeatable) Events whose name contains this text are won by the lowest score.
    /// Replaces the default list ("Scrambler", "Robot Tour").
    #[clap(long, value_parser)]
    pub lower_is_better: Option<Vec<String>>,

    /// (default 6) Teams ranked at or above this rank appear on the leaderboards.
    #[clap(long, value_parser)]
    pub cutoff: Option<u32>,

    /// (scores or ranks) Prints the score sheet, or the ranks, as a table.
    #[clap(long, value_parser)]
    pub view: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
