use crate::reports::{run_calibrate, run_recommend, CalibrateArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use machine_advisor::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Machine Advisor",
    about = "Rank computers against usage profiles from the command line or over HTTP",
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
    /// Print the shortlist and narrative for a usage profile
    Recommend(RecommendArgs),
    /// Compare a profile's stored weights with proposed ones
    Calibrate(CalibrateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Calibrate(args) => run_calibrate(args),
    }
}
