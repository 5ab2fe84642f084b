use super::{chart, ui};
use crate::core::analytics::{gold_trend, mood_frequency};
use crate::core::{MetalPriceEntry, MoodEntry, TrackerStore};
use comfy_table::{Cell, Table};
use std::fmt::Write as _;

pub const NO_GOLD_PLACEHOLDER: &str = "No Gold records yet to chart.";

pub fn metal_price_table(entries: &[MetalPriceEntry]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("metalname"),
        ui::header_cell("sizepergram"),
        ui::header_cell("daterecorded"),
    ]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.metal_name),
            ui::price_cell(entry.price_per_gram),
            ui::timestamp_cell(&entry.recorded_at),
        ]);
    }
    table
}

pub fn mood_table(entries: &[MoodEntry]) -> Table {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("mode"), ui::header_cell("timestamp")]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.mood),
            ui::timestamp_cell(&entry.recorded_at),
        ]);
    }
    table
}

fn section(output: &mut String, title: &str) {
    let _ = write!(
        output,
        "\n{}\n\n",
        ui::style_text(title, ui::StyleType::Title)
    );
}

/// Reads both tables and renders them together with the derived charts.
///
/// A failed read shows its error in place of the table and skips the chart
/// built from it.
pub async fn render(store: &dyn TrackerStore, width: u16) -> String {
    let metal_prices = store.fetch_all_metal_price_entries().await;
    let moods = store.fetch_all_mood_entries().await;

    let mut output = String::new();

    section(&mut output, "💰 Metal Price Records");
    match &metal_prices {
        Ok(entries) => output.push_str(&metal_price_table(entries).to_string()),
        Err(e) => output.push_str(&ui::style_text(&e.to_string(), ui::StyleType::Error)),
    }
    output.push('\n');

    section(&mut output, "🧠 Mood Records");
    match &moods {
        Ok(entries) => output.push_str(&mood_table(entries).to_string()),
        Err(e) => output.push_str(&ui::style_text(&e.to_string(), ui::StyleType::Error)),
    }
    output.push('\n');

    if let Ok(entries) = &metal_prices {
        section(&mut output, "📈 Gold Price Trend (USD/gram)");
        let trend = gold_trend(entries);
        if trend.is_empty() {
            output.push_str(&ui::style_text(NO_GOLD_PLACEHOLDER, ui::StyleType::Info));
        } else {
            output.push_str(&chart::gold_trend_chart(&trend, width));
        }
        output.push('\n');
    }

    if let Ok(entries) = &moods {
        if !entries.is_empty() {
            section(&mut output, "📊 Mood Frequency");
            output.push_str(&chart::mood_frequency_chart(&mood_frequency(entries), width));
            output.push('\n');
        }
    }

    output
}
