use crate::render::{run_export, run_rows, ExportArgs, RowsArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use workforce_dashboard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Workforce Dashboard",
    about = "Normalize personnel rosters into utilisation rows, serve them, and export them as CSV",
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
    /// Print the normalized workforce table
    Rows(RowsArgs),
    /// Write the normalized workforce table as CSV
    Export(ExportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    #[command(flatten)]
    pub(crate) roster: RosterArgs,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RosterArgs {
    /// Roster JSON file (defaults to WORKFORCE_ROSTER_PATH, then the bundled sample)
    #[arg(long)]
    pub(crate) roster: Option<PathBuf>,
    /// Take the person from whichever block is active instead of preferring employees
    #[arg(long)]
    pub(crate) active_block: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rows(args) => run_rows(args),
        Command::Export(args) => run_export(args),
    }
}
