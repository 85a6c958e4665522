mod commands;
mod exit;

use clap::{Parser, Subcommand};
use commands::TargetArgs;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gdc-deploy",
    about = "Deploy the current directory to Cloud Run from source"
)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    target: TargetArgs,

    // `deploy` when omitted
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Deploy the current directory (gcloud run deploy --source=.)
    Deploy {
        /// Print the gcloud command instead of running it
        #[arg(long)]
        dry_run: bool,
        /// Print the dry-run command as JSON
        #[arg(long, requires = "dry_run")]
        json: bool,
    },
    /// List configured deploy targets
    Targets,
    /// Show the URL of the deployed service
    Status,
    /// Check gcloud setup and project readiness
    Doctor,
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("warn"),
    };
    // stdout belongs to gcloud
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let cli = Cli::parse();

    let command = match cli.command {
        Some(command) => command,
        None => Commands::Deploy {
            dry_run: false,
            json: false,
        },
    };

    let result = match command {
        Commands::Deploy { dry_run, json } => commands::deploy(&cli.target, dry_run, json).await,
        Commands::Targets => commands::targets(&cli.target),
        Commands::Status => commands::status(&cli.target).await,
        Commands::Doctor => commands::doctor(&cli.target).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => exit::report(&err),
    }
}
