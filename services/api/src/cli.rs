use crate::commands::{run_health, run_profiles, run_submit, ProfilesArgs, RemoteArgs, SubmitArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_alert::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Job Alert Config",
    about = "Run the job-alert configuration service or submit preferences from the command line",
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
    /// Fill in the configuration form and submit it to the service
    Submit(SubmitArgs),
    /// Show stored profiles, or a single profile with --email
    Profiles(ProfilesArgs),
    /// Check that the configuration service is reachable
    Health(RemoteArgs),
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
        Command::Submit(args) => run_submit(args).await,
        Command::Profiles(args) => run_profiles(args).await,
        Command::Health(args) => run_health(args).await,
    }
}
