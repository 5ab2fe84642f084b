//! Core domain types and abstractions

pub mod analytics;
pub mod config;
pub mod entry;
pub mod error;
pub mod log;
pub mod price;
pub mod store;

// Re-export main types for cleaner imports
pub use entry::{Metal, MetalPriceEntry, Mood, MoodEntry};
pub use error::TrackerError;
pub use price::{
    GOLD_FUTURES_TICKER, QuoteProvider, TROY_OUNCE_IN_GRAMS, fetch_latest_gold_usd_per_gram,
};
pub use store::TrackerStore;
