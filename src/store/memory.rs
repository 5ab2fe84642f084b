use crate::core::entry::{MetalPriceEntry, MoodEntry};
use crate::core::error::TrackerError;
use crate::core::store::TrackerStore;
use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-process store with the same ordering rules as the database gateway.
#[derive(Clone, Default)]
pub struct MemoryStore {
    moods: Arc<Mutex<Vec<MoodEntry>>>,
    metal_prices: Arc<Mutex<Vec<MetalPriceEntry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; among equal timestamps the later insert comes first.
fn newest_first<T: Clone>(rows: &[T], recorded_at: impl Fn(&T) -> NaiveDateTime) -> Vec<T> {
    let mut sorted: Vec<T> = rows.iter().rev().cloned().collect();
    sorted.sort_by_key(|row| std::cmp::Reverse(recorded_at(row)));
    sorted
}

#[async_trait]
impl TrackerStore for MemoryStore {
    async fn record_mood(&self, label: &str) -> Result<(), TrackerError> {
        let mut moods = self.moods.lock().await;
        moods.push(MoodEntry {
            mood: label.to_string(),
            recorded_at: Local::now().naive_local(),
        });
        debug!(label, "Memory store PUT mood");
        Ok(())
    }

    async fn record_metal_price(
        &self,
        name: &str,
        price_per_gram: f64,
    ) -> Result<(), TrackerError> {
        let mut metal_prices = self.metal_prices.lock().await;
        metal_prices.push(MetalPriceEntry {
            metal_name: name.to_string(),
            price_per_gram,
            recorded_at: Local::now().naive_local(),
        });
        debug!(name, price_per_gram, "Memory store PUT metal price");
        Ok(())
    }

    async fn fetch_all_mood_entries(&self) -> Result<Vec<MoodEntry>, TrackerError> {
        let moods = self.moods.lock().await;
        Ok(newest_first(moods.as_slice(), |m| m.recorded_at))
    }

    async fn fetch_all_metal_price_entries(&self) -> Result<Vec<MetalPriceEntry>, TrackerError> {
        let metal_prices = self.metal_prices.lock().await;
        Ok(newest_first(metal_prices.as_slice(), |m| m.recorded_at))
    }
}
