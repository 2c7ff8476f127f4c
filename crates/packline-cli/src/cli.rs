use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "packline")]
#[command(about = "Production line packing traceability", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a scripted simulation demo and print the resulting state
    Demo(DemoArgs),

    /// Open an interactive traceability session
    Session(SessionArgs),
}

#[derive(Args)]
pub struct DemoArgs {
    /// Number of simulation ticks to run
    #[arg(long, default_value_t = 12)]
    pub ticks: u32,

    /// RNG seed (default from config; fixed seeds reproduce runs exactly)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of production lines to seed
    #[arg(long, default_value_t = 2)]
    pub lines: usize,

    /// Cases per production line
    #[arg(long, default_value_t = 4)]
    pub cases_per_line: usize,

    /// Capacity of each case
    #[arg(long, default_value_t = 6)]
    pub capacity: usize,

    /// Print the final repository state as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SessionArgs {
    /// RNG seed for the background simulation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of production lines to seed
    #[arg(long, default_value_t = 2)]
    pub lines: usize,

    /// Cases per production line
    #[arg(long, default_value_t = 4)]
    pub cases_per_line: usize,

    /// Capacity of each case
    #[arg(long, default_value_t = 6)]
    pub capacity: usize,
}
