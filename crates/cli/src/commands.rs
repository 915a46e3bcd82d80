use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Show the state and record count of a search
    Status {
        #[arg(long, help = "Search ID returned when the search was submitted")]
        search_id: String,
    },
    /// Write every result record of a search as JSON lines
    Results {
        #[arg(long, help = "Search ID returned when the search was submitted")]
        search_id: String,

        #[arg(
            long,
            help = "Known record count; skips the status lookup when given"
        )]
        count: Option<u64>,

        #[arg(long, help = "Records requested per window (overrides ARIEL_WINDOW)")]
        window: Option<usize>,

        #[arg(
            long,
            help = "Fail on a mid-scroll fetch error instead of stopping quietly"
        )]
        strict: bool,

        #[arg(
            long,
            help = "If specified, writes the records to this file instead of stdout"
        )]
        output: Option<String>,
    },
}
