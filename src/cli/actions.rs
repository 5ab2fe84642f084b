use crate::cli::ui;
use crate::core::{
    Metal, Mood, QuoteProvider, TrackerError, TrackerStore, fetch_latest_gold_usd_per_gram,
};
use std::fmt::Display;
use tracing::debug;

/// A user action that may mutate the store before the next render.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    RecordMood(Mood),
    SaveMetalPrice { metal: Metal, price: f64 },
    FetchGold,
    Refresh,
}

/// Acknowledgment or error shown where the action was triggered.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::Success(msg) => write!(f, "{}", ui::style_text(msg, ui::StyleType::Success)),
            Notice::Error(msg) => write!(f, "{}", ui::style_text(msg, ui::StyleType::Error)),
        }
    }
}

/// Runs a single action against the store and the quote feed.
///
/// `Refresh` touches nothing and yields no notice.
pub async fn perform(
    action: &Action,
    store: &dyn TrackerStore,
    quotes: &dyn QuoteProvider,
    gold_ticker: &str,
) -> Option<Notice> {
    debug!(?action, "Performing action");
    let notice = match action {
        Action::RecordMood(mood) => record_mood(store, *mood).await,
        Action::SaveMetalPrice { metal, price } => save_metal_price(store, *metal, *price).await,
        Action::FetchGold => fetch_and_save_gold(store, quotes, gold_ticker).await,
        Action::Refresh => return None,
    };
    Some(notice)
}

async fn record_mood(store: &dyn TrackerStore, mood: Mood) -> Notice {
    match store.record_mood(mood.label()).await {
        Ok(()) => Notice::Success(format!("Saved: {}", mood.label())),
        Err(e) => Notice::Error(e.to_string()),
    }
}

async fn save_metal_price(store: &dyn TrackerStore, metal: Metal, price: f64) -> Notice {
    // Also rejects NaN and infinities
    if !(price.is_finite() && price > 0.0) {
        return Notice::Error(TrackerError::Validation.to_string());
    }

    match store.record_metal_price(metal.name(), price).await {
        Ok(()) => Notice::Success(format!("Saved: {metal} = {price} per gram")),
        Err(e) => Notice::Error(e.to_string()),
    }
}

async fn fetch_and_save_gold(
    store: &dyn TrackerStore,
    quotes: &dyn QuoteProvider,
    gold_ticker: &str,
) -> Notice {
    let spinner = ui::new_spinner(&format!("Fetching latest {gold_ticker} close..."));
    let fetched = fetch_latest_gold_usd_per_gram(quotes, gold_ticker).await;
    spinner.finish_and_clear();

    let per_gram = match fetched {
        Ok(per_gram) => per_gram,
        Err(TrackerError::FeedUnavailable { .. }) => {
            return Notice::Error("No data returned from Yahoo Finance.".to_string());
        }
        Err(e) => return Notice::Error(format!("Fetch failed: {e}")),
    };

    match store.record_metal_price(Metal::Gold.name(), per_gram).await {
        Ok(()) => Notice::Success(format!("Saved Gold ≈ {per_gram:.2} USD/gram")),
        Err(e) => Notice::Error(format!("Fetch failed: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MetalPriceEntry, MoodEntry};
    use crate::store::MemoryStore;
    use async_trait::async_trait;

    struct FixedQuote(Result<f64, fn() -> TrackerError>);

    #[async_trait]
    impl QuoteProvider for FixedQuote {
        async fn latest_close(&self, _ticker: &str) -> Result<f64, TrackerError> {
            self.0.map_err(|make| make())
        }
    }

    /// Fails the test if any gateway method is reached.
    struct UntouchableStore;

    #[async_trait]
    impl TrackerStore for UntouchableStore {
        async fn record_mood(&self, _label: &str) -> Result<(), TrackerError> {
            panic!("record_mood must not be called");
        }

        async fn record_metal_price(&self, _name: &str, _price: f64) -> Result<(), TrackerError> {
            panic!("record_metal_price must not be called");
        }

        async fn fetch_all_mood_entries(&self) -> Result<Vec<MoodEntry>, TrackerError> {
            panic!("fetch_all_mood_entries must not be called");
        }

        async fn fetch_all_metal_price_entries(
            &self,
        ) -> Result<Vec<MetalPriceEntry>, TrackerError> {
            panic!("fetch_all_metal_price_entries must not be called");
        }
    }

    struct UnreachableStore;

    #[async_trait]
    impl TrackerStore for UnreachableStore {
        async fn record_mood(&self, _label: &str) -> Result<(), TrackerError> {
            Err(TrackerError::Connectivity("connection refused".into()))
        }

        async fn record_metal_price(&self, _name: &str, _price: f64) -> Result<(), TrackerError> {
            Err(TrackerError::Connectivity("connection refused".into()))
        }

        async fn fetch_all_mood_entries(&self) -> Result<Vec<MoodEntry>, TrackerError> {
            Err(TrackerError::Connectivity("connection refused".into()))
        }

        async fn fetch_all_metal_price_entries(
            &self,
        ) -> Result<Vec<MetalPriceEntry>, TrackerError> {
            Err(TrackerError::Connectivity("connection refused".into()))
        }
    }

    fn unavailable() -> TrackerError {
        TrackerError::FeedUnavailable {
            ticker: "GC=F".into(),
        }
    }

    fn offline() -> TrackerError {
        TrackerError::FeedRequest("Request error: connection refused".into())
    }

    #[tokio::test]
    async fn test_record_mood_acknowledges_label() {
        let store = MemoryStore::new();
        let quotes = FixedQuote(Ok(2000.0));

        let notice = perform(&Action::RecordMood(Mood::Excited), &store, &quotes, "GC=F").await;
        assert_eq!(notice, Some(Notice::Success("Saved: Excited".into())));

        let moods = store.fetch_all_mood_entries().await.unwrap();
        assert_eq!(moods.len(), 1);
        assert_eq!(moods[0].mood, "Excited");
    }

    #[tokio::test]
    async fn test_non_positive_prices_never_reach_the_store() {
        let quotes = FixedQuote(Ok(2000.0));
        for price in [0.0, -1.0, -0.01, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let action = Action::SaveMetalPrice {
                metal: Metal::Silver,
                price,
            };
            let notice = perform(&action, &UntouchableStore, &quotes, "GC=F").await;
            assert_eq!(notice, Some(Notice::Error("Enter a valid price.".into())));
        }
    }

    #[tokio::test]
    async fn test_parsed_infinity_is_rejected() {
        let store = MemoryStore::new();
        store.record_metal_price("Gold", 64.3).await.unwrap();
        let quotes = FixedQuote(Ok(2000.0));
        let price: f64 = "inf".parse().unwrap();

        let action = Action::SaveMetalPrice {
            metal: Metal::Gold,
            price,
        };
        let notice = perform(&action, &store, &quotes, "GC=F").await;
        assert_eq!(notice, Some(Notice::Error("Enter a valid price.".into())));

        let prices = store.fetch_all_metal_price_entries().await.unwrap();
        assert_eq!(prices.len(), 1);
        assert!((prices[0].price_per_gram - 64.3).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_positive_price_is_saved() {
        let store = MemoryStore::new();
        let quotes = FixedQuote(Ok(2000.0));
        let action = Action::SaveMetalPrice {
            metal: Metal::Gold,
            price: 65.5,
        };

        let notice = perform(&action, &store, &quotes, "GC=F").await;
        assert_eq!(
            notice,
            Some(Notice::Success("Saved: Gold = 65.5 per gram".into()))
        );

        let prices = store.fetch_all_metal_price_entries().await.unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].metal_name, "Gold");
        assert!((prices[0].price_per_gram - 65.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_fetch_gold_persists_converted_price() {
        let store = MemoryStore::new();
        let quotes = FixedQuote(Ok(2000.0));

        let notice = perform(&Action::FetchGold, &store, &quotes, "GC=F").await;
        assert_eq!(
            notice,
            Some(Notice::Success("Saved Gold ≈ 64.30 USD/gram".into()))
        );

        let prices = store.fetch_all_metal_price_entries().await.unwrap();
        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].metal_name, "Gold");
        assert!((prices[0].price_per_gram - 2000.0 / 31.1035).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_fetch_gold_without_data_saves_nothing() {
        let store = MemoryStore::new();
        let quotes = FixedQuote(Err(unavailable));

        let notice = perform(&Action::FetchGold, &store, &quotes, "GC=F").await;
        assert_eq!(
            notice,
            Some(Notice::Error("No data returned from Yahoo Finance.".into()))
        );
        assert!(store.fetch_all_metal_price_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_gold_transport_failure_is_shown_verbatim() {
        let quotes = FixedQuote(Err(offline));

        let notice = perform(&Action::FetchGold, &UntouchableStore, &quotes, "GC=F").await;
        assert_eq!(
            notice,
            Some(Notice::Error(
                "Fetch failed: Request error: connection refused".into()
            ))
        );
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces_as_error_notice() {
        let quotes = FixedQuote(Ok(2000.0));

        let notice = perform(&Action::RecordMood(Mood::Sad), &UnreachableStore, &quotes, "GC=F")
            .await
            .unwrap();
        assert!(notice.is_error());
        assert_eq!(
            notice,
            Notice::Error("Database unreachable: connection refused".into())
        );
    }

    #[tokio::test]
    async fn test_refresh_has_no_notice() {
        let quotes = FixedQuote(Ok(2000.0));
        assert!(
            perform(&Action::Refresh, &UntouchableStore, &quotes, "GC=F")
                .await
                .is_none()
        );
    }
}
