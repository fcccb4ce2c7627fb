use crate::demo::{run_demo, run_match_scores, DemoArgs, MatchScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use dealbridge::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Deal Bridge Marketplace",
    about = "Demonstrate and run the business acquisition marketplace from the command line",
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
    /// Inspect buyer/seller compatibility scoring
    Matches {
        #[command(subcommand)]
        command: MatchesCommand,
    },
    /// Run an end-to-end CLI demo covering matching and acquisition tracking
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum MatchesCommand {
    /// Score the sample buyer against the sample seller roster
    Score(MatchScoreArgs),
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
        Command::Matches {
            command: MatchesCommand::Score(args),
        } => run_match_scores(args),
        Command::Demo(args) => run_demo(args),
    }
}
