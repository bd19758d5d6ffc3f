use crate::demo::{run_demo, run_tracks, DemoArgs, TracksArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use uptick_admissions::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Uptick Admissions",
    about = "Run the Uptick admissions API or walk the application wizard from the command line",
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
    /// Fill the application wizard with a sample applicant and submit it
    Demo(DemoArgs),
    /// Print the tool catalogue offered for each track
    Tracks(TracksArgs),
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
        Command::Demo(args) => run_demo(args).await,
        Command::Tracks(args) => run_tracks(args),
    }
}
