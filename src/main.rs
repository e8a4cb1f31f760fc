use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clubfin::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List every club with its data tier
    Clubs,
    /// Show financial detail for one club
    Club {
        /// Club name, e.g. "Aldershot Town"
        name: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => clubfin::cli::setup::setup(),
        Some(Commands::Clubs) => clubfin::run_command(clubfin::AppCommand::Clubs, config_path).await,
        Some(Commands::Club { name }) => {
            clubfin::run_command(clubfin::AppCommand::Club { name }, config_path).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
