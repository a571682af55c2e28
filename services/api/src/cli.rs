use crate::commands::{run_inspect, run_predict, run_recommend, InspectArgs, PredictArgs, RecommendArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use engagement_agent::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Engagement Agent",
    about = "Serve and exercise next-best-action recommendations from the command line",
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
    /// Print a single recommendation for a stored user
    Recommend(RecommendArgs),
    /// Print one raw prediction from the mock prediction client
    Predict(PredictArgs),
    /// Validate every stored user record and report activity recency
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the CSV file user records are loaded from
    #[arg(long)]
    pub(crate) user_data: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Recommend(args) => run_recommend(args),
        Command::Predict(args) => run_predict(args),
        Command::Inspect(args) => run_inspect(args),
    }
}
