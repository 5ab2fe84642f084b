//! Storage gateway abstraction

use crate::core::entry::{MetalPriceEntry, MoodEntry};
use crate::core::error::TrackerError;
use async_trait::async_trait;

/// Append-only access to the two tracker tables.
///
/// Implementations stamp each insert with the current time and return full
/// tables ordered newest first. Nothing is ever updated or deleted.
#[async_trait]
pub trait TrackerStore: Send + Sync {
    async fn record_mood(&self, label: &str) -> Result<(), TrackerError>;

    async fn record_metal_price(&self, name: &str, price_per_gram: f64)
    -> Result<(), TrackerError>;

    async fn fetch_all_mood_entries(&self) -> Result<Vec<MoodEntry>, TrackerError>;

    async fn fetch_all_metal_price_entries(&self) -> Result<Vec<MetalPriceEntry>, TrackerError>;
}
