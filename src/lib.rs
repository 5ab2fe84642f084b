pub mod cli;
pub mod core;
pub mod providers;
pub mod store;

use crate::cli::actions::Action;
use crate::core::config::AppConfig;
use crate::core::{Metal, Mood};
use crate::providers::yahoo_finance::YahooFinanceProvider;
use crate::store::PostgresStore;
use anyhow::{Context, Result};
use tracing::{debug, info};

pub enum AppCommand {
    InitDb,
    Show,
    Mood(Mood),
    Price { metal: Metal, price: f64 },
    FetchGold,
    Interactive,
}

/// How a command ended once its output was printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The action failed; its error was shown inline above the tables.
    ActionFailed,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<Outcome> {
    info!("Mood & metal tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = PostgresStore::new(&config.database);
    let yahoo = &config.providers.yahoo;
    let quotes = YahooFinanceProvider::new(&yahoo.base_url);

    let action = match command {
        AppCommand::InitDb => {
            store
                .apply_schema()
                .await
                .context("Failed to create tracker tables")?;
            println!(
                "{}",
                cli::ui::style_text("Tracker tables are ready.", cli::ui::StyleType::Success)
            );
            return Ok(Outcome::Completed);
        }
        AppCommand::Interactive => {
            cli::interactive::run(&store, &quotes, &yahoo.gold_ticker).await?;
            return Ok(Outcome::Completed);
        }
        AppCommand::Show => Action::Refresh,
        AppCommand::Mood(mood) => Action::RecordMood(mood),
        AppCommand::Price { metal, price } => Action::SaveMetalPrice { metal, price },
        AppCommand::FetchGold => Action::FetchGold,
    };

    let screen = cli::render_cycle(
        &action,
        &store,
        &quotes,
        &yahoo.gold_ticker,
        cli::ui::terminal_width(),
    )
    .await;
    println!("{screen}");

    if screen.action_failed() {
        Ok(Outcome::ActionFailed)
    } else {
        Ok(Outcome::Completed)
    }
}
