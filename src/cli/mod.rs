//! Terminal presentation layer

pub mod actions;
pub mod chart;
pub mod dashboard;
pub mod interactive;
pub mod setup;
pub mod ui;

use crate::core::{QuoteProvider, TrackerStore};
use actions::{Action, Notice};
use std::fmt::Display;

/// Output of one render cycle.
#[derive(Debug, Clone)]
pub struct Screen {
    pub notice: Option<Notice>,
    pub body: String,
}

impl Screen {
    pub fn action_failed(&self) -> bool {
        self.notice.as_ref().is_some_and(Notice::is_error)
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(notice) = &self.notice {
            writeln!(f, "{notice}")?;
        }
        write!(f, "{}", self.body)
    }
}

/// Performs the pending action, then re-reads both tables and redraws.
pub async fn render_cycle(
    action: &Action,
    store: &dyn TrackerStore,
    quotes: &dyn QuoteProvider,
    gold_ticker: &str,
    width: u16,
) -> Screen {
    let notice = actions::perform(action, store, quotes, gold_ticker).await;
    let body = dashboard::render(store, width).await;
    Screen { notice, body }
}
