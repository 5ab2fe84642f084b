//! Menu-driven loop: pick an action, render, repeat until Quit or Esc.

use super::actions::Action;
use super::{dashboard, render_cycle, ui};
use crate::core::{Metal, Mood, QuoteProvider, TrackerStore};
use anyhow::{Context, Result};
use dialoguer::{Input, Select};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum MenuChoice {
    Mood(Mood),
    SaveMetalPrice,
    FetchGold,
    Refresh,
    Quit,
}

fn menu(gold_ticker: &str) -> Vec<(String, MenuChoice)> {
    let mut items: Vec<(String, MenuChoice)> = Mood::ALL
        .iter()
        .map(|mood| (format!("{} {}", mood.emoji(), mood), MenuChoice::Mood(*mood)))
        .collect();
    items.push((
        "💰 Add metal price (manual)".to_string(),
        MenuChoice::SaveMetalPrice,
    ));
    items.push((
        format!("⚡ Fetch & save gold ({gold_ticker})"),
        MenuChoice::FetchGold,
    ));
    items.push(("🔄 Refresh".to_string(), MenuChoice::Refresh));
    items.push(("Quit".to_string(), MenuChoice::Quit));
    items
}

/// Blocks on terminal input; returns `None` when the user quits.
fn prompt_action(gold_ticker: &str) -> Result<Option<Action>> {
    let items = menu(gold_ticker);
    let labels: Vec<&str> = items.iter().map(|(label, _)| label.as_str()).collect();

    let selection = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact_opt()
        .context("Failed to read menu selection")?;

    let Some(choice) = selection.map(|index| items[index].1) else {
        return Ok(None);
    };

    let action = match choice {
        MenuChoice::Mood(mood) => Action::RecordMood(mood),
        MenuChoice::SaveMetalPrice => {
            let metal_index = Select::new()
                .with_prompt("Metal")
                .items(&Metal::ALL.map(|m| m.name()))
                .default(0)
                .interact()
                .context("Failed to read metal selection")?;
            let price: f64 = Input::new()
                .with_prompt("Price per gram")
                .interact_text()
                .context("Failed to read price")?;
            Action::SaveMetalPrice {
                metal: Metal::ALL[metal_index],
                price,
            }
        }
        MenuChoice::FetchGold => Action::FetchGold,
        MenuChoice::Refresh => Action::Refresh,
        MenuChoice::Quit => return Ok(None),
    };
    Ok(Some(action))
}

pub async fn run(
    store: &dyn TrackerStore,
    quotes: &dyn QuoteProvider,
    gold_ticker: &str,
) -> Result<()> {
    println!("{}", ui::style_text("📊 Finance & Mood Tracker", ui::StyleType::Title));
    println!("{}", dashboard::render(store, ui::terminal_width()).await);

    loop {
        let ticker = gold_ticker.to_string();
        let action = tokio::task::spawn_blocking(move || prompt_action(&ticker))
            .await
            .context("Prompt task failed")??;

        let Some(action) = action else {
            debug!("Leaving interactive mode");
            return Ok(());
        };

        let width = ui::terminal_width();
        let screen = render_cycle(&action, store, quotes, gold_ticker, width).await;
        println!("{}", ui::separator(width));
        println!("{screen}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_offers_every_mood_then_actions() {
        let items = menu("GC=F");
        let choices: Vec<MenuChoice> = items.iter().map(|(_, c)| *c).collect();

        assert_eq!(
            &choices[..5],
            &Mood::ALL.map(MenuChoice::Mood),
            "moods come first, in display order"
        );
        assert_eq!(
            &choices[5..],
            &[
                MenuChoice::SaveMetalPrice,
                MenuChoice::FetchGold,
                MenuChoice::Refresh,
                MenuChoice::Quit
            ]
        );
        assert_eq!(items[0].0, "😊 Happy");
        assert!(items[6].0.contains("GC=F"));
    }
}
