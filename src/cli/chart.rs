//! Terminal charts.
//!
//! Widgets are drawn into an off-screen `ratatui` buffer and flattened to
//! plain text, so charts can be printed inline between tables.

use crate::cli::ui::TIMESTAMP_FORMAT;
use crate::core::analytics::{MoodCount, TrendPoint};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, BarChart, Block, Chart, Dataset, GraphType, Widget};

pub const GOLD_CHART_TITLE: &str = "Gold (USD/gram) over time";
pub const MOOD_CHART_TITLE: &str = "Mood counts";

const CHART_HEIGHT: u16 = 18;
const MIN_WIDTH: u16 = 40;
const MAX_WIDTH: u16 = 120;
const MIN_BAR_WIDTH: u16 = 5;
const MAX_BAR_WIDTH: u16 = 24;

fn render_to_string(widget: impl Widget, width: u16, height: u16) -> String {
    let area = Rect::new(0, 0, width, height);
    let mut buffer = Buffer::empty(area);
    widget.render(area, &mut buffer);

    buffer
        .content
        .chunks(width as usize)
        .map(|row| {
            row.iter()
                .map(|cell| cell.symbol())
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `[min, max]` of the finite values, widened when all values coincide.
fn bounds(values: impl Iterator<Item = f64>, pad: f64) -> [f64; 2] {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() || !max.is_finite() {
        return [0.0, 1.0];
    }
    if (max - min).abs() < f64::EPSILON {
        [min - pad, max + pad]
    } else {
        [min, max]
    }
}

/// Line chart of gold price per gram against time. Expects a non-empty,
/// ascending trend. Points with a non-finite price are left out.
pub fn gold_trend_chart(trend: &[TrendPoint], width: u16) -> String {
    let width = width.clamp(MIN_WIDTH, MAX_WIDTH);
    let points: Vec<(f64, f64)> = trend
        .iter()
        .filter(|p| p.price_per_gram.is_finite())
        .map(|p| (p.recorded_at.and_utc().timestamp() as f64, p.price_per_gram))
        .collect();

    let x_bounds = bounds(points.iter().map(|(x, _)| *x), 3600.0);
    let y_bounds = bounds(points.iter().map(|(_, y)| *y), 1.0);

    let x_labels = match (trend.first(), trend.last()) {
        (Some(first), Some(last)) => vec![
            first.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            last.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
        ],
        _ => Vec::new(),
    };
    let y_labels = vec![
        format!("{:.2}", y_bounds[0]),
        format!("{:.2}", (y_bounds[0] + y_bounds[1]) / 2.0),
        format!("{:.2}", y_bounds[1]),
    ];

    let dataset = Dataset::default()
        .name("Gold")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Yellow))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(Block::bordered().title(GOLD_CHART_TITLE))
        .x_axis(
            Axis::default()
                .title("Date")
                .bounds(x_bounds)
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("USD per gram")
                .bounds(y_bounds)
                .labels(y_labels),
        );

    render_to_string(chart, width, CHART_HEIGHT)
}

/// Bar chart with one bar per mood label.
///
/// Bars are as wide as the longest label, up to `MAX_BAR_WIDTH`. When the
/// terminal cannot fit every bar, the leading bars are shown and the title
/// says how many were left out; it also notes labels cut to the bar width.
pub fn mood_frequency_chart(frequency: &[MoodCount], width: u16) -> String {
    let longest = frequency
        .iter()
        .map(|c| c.mood.chars().count())
        .max()
        .unwrap_or(0);
    let bar_width = u16::try_from(longest)
        .unwrap_or(u16::MAX)
        .clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH);

    // Border takes two columns; each bar is followed by a one-column gap
    let available = width.clamp(MIN_WIDTH, MAX_WIDTH);
    let fits = usize::from((available - 2 + 1) / (bar_width + 1)).max(1);
    let shown = &frequency[..frequency.len().min(fits)];

    let mut notes = Vec::new();
    if shown.len() < frequency.len() {
        notes.push(format!("showing {} of {}", shown.len(), frequency.len()));
    }
    if longest > usize::from(bar_width) {
        notes.push("labels truncated".to_string());
    }
    let title = if notes.is_empty() {
        MOOD_CHART_TITLE.to_string()
    } else {
        format!("{MOOD_CHART_TITLE} ({})", notes.join(", "))
    };

    let bars: Vec<(&str, u64)> = shown
        .iter()
        .map(|c| (c.mood.as_str(), c.count))
        .collect();

    let needed = (bars.len() as u16).saturating_mul(bar_width + 1) + 2;
    let title_width = u16::try_from(title.chars().count() + 2).unwrap_or(u16::MAX);
    let width = needed.max(title_width).clamp(MIN_WIDTH, available);

    let chart = BarChart::default()
        .block(Block::bordered().title(title))
        .bar_width(bar_width)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .data(bars.as_slice());

    render_to_string(chart, width, CHART_HEIGHT / 2 + 4)
}
