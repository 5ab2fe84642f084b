use chrono::NaiveDateTime;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Success,
    Error,
    Info,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Success => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Info => style(text).cyan(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Two decimals from 1.0 up; smaller prices keep every stored digit.
pub fn format_price(price: f64) -> String {
    if price.abs() >= 1.0 {
        format!("{price:.2}")
    } else {
        price.to_string()
    }
}

pub fn price_cell(price: f64) -> Cell {
    Cell::new(format_price(price)).set_alignment(CellAlignment::Right)
}

pub fn timestamp_cell(recorded_at: &NaiveDateTime) -> Cell {
    Cell::new(recorded_at.format(TIMESTAMP_FORMAT)).fg(Color::DarkGrey)
}

/// Creates a spinner shown while a network call is in flight.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Terminal width, or 80 columns when stdout is not a terminal.
pub fn terminal_width() -> u16 {
    console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w)
        .unwrap_or(80)
}

/// A separator line of the given width.
pub fn separator(width: u16) -> String {
    "─".repeat(width as usize)
}
