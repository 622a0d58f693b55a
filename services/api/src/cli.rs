use crate::commands::{run_query, run_stats, QueryArgs, StatsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use college_finder::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "EAPCET College Finder",
    about = "Find engineering colleges within reach of an admission-exam rank",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank eligible colleges from a catalog file and print them
    Query(QueryArgs),
    /// Print headline statistics for a catalog file
    Stats(StatsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Catalog file (.csv or .json) to serve; overrides FINDER_CATALOG
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Query(args) => run_query(args),
        Command::Stats(args) => run_stats(args),
    }
}
