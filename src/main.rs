use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use mmt::core::log::init_logging;
use mmt::core::{Metal, Mood};
use std::process::ExitCode;

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

impl From<Commands> for mmt::AppCommand {
    fn from(cmd: Commands) -> mmt::AppCommand {
        match cmd {
            Commands::InitDb => mmt::AppCommand::InitDb,
            Commands::Show => mmt::AppCommand::Show,
            Commands::Mood { mood } => mmt::AppCommand::Mood(mood),
            Commands::Price { metal, price } => mmt::AppCommand::Price { metal, price },
            Commands::FetchGold => mmt::AppCommand::FetchGold,
            Commands::Interactive => mmt::AppCommand::Interactive,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Create the tracker tables in the configured database
    InitDb,
    /// Display recorded moods, metal prices and charts
    Show,
    /// Record how you feel right now
    Mood {
        #[arg(value_enum)]
        mood: Mood,
    },
    /// Record a metal price per gram
    Price {
        #[arg(value_enum)]
        metal: Metal,
        /// Price per gram, must be greater than zero
        #[arg(allow_negative_numbers = true)]
        price: f64,
    },
    /// Fetch the latest gold futures close and record it in USD per gram
    FetchGold,
    /// Pick actions from a menu until you quit
    Interactive,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => mmt::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(mmt::Outcome::Completed)
        }
    };

    match result {
        Ok(mmt::Outcome::Completed) => Ok(ExitCode::SUCCESS),
        Ok(mmt::Outcome::ActionFailed) => Ok(ExitCode::FAILURE),
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            Err(e)
        }
    }
}

fn setup() -> Result<mmt::Outcome> {
    let path = mmt::cli::setup::setup()?;
    println!("Created default configuration at {}", path.display());
    Ok(mmt::Outcome::Completed)
}
