use clap::Parser;

#[derive(Parser)]
#[command(name = "numgen")]
#[command(about = "Pick obfuscated numbers from a range!")]
pub struct Cli {
    #[arg(long, help = "Lower bound, inclusive", default_value_t = 1)]
    pub start: i64,
    #[arg(long, help = "Upper bound, inclusive", default_value_t = 100)]
    pub end: i64,
    #[arg(long, help = "Number of pool segments", default_value_t = 5)]
    pub segments: usize,
    #[arg(long, help = "Number of picks to produce", default_value_t = 10)]
    pub count: u64,
    #[arg(long, help = "Verbose output", default_value_t = false)]
    pub verbose: bool,
    #[arg(
        long,
        help = "Output compact text format (less bytes on the wire)",
        default_value_t = false
    )]
    pub compact: bool,
    #[arg(
        long,
        help = "Print a distribution summary after the last pick",
        default_value_t = false
    )]
    pub stats: bool,
}
