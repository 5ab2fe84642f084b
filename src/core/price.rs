//! Quote feed abstraction and unit conversion

use crate::core::error::TrackerError;
use async_trait::async_trait;
use tracing::debug;

/// Grams in one troy ounce.
pub const TROY_OUNCE_IN_GRAMS: f64 = 31.1035;

/// Default Yahoo Finance ticker for COMEX gold futures, quoted in USD per troy ounce.
pub const GOLD_FUTURES_TICKER: &str = "GC=F";

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Latest available daily close for `ticker`.
    async fn latest_close(&self, ticker: &str) -> Result<f64, TrackerError>;
}

/// Fetches the latest gold close (USD per troy ounce) and converts it to USD per gram.
pub async fn fetch_latest_gold_usd_per_gram(
    provider: &dyn QuoteProvider,
    ticker: &str,
) -> Result<f64, TrackerError> {
    let close = provider.latest_close(ticker).await?;
    let per_gram = close / TROY_OUNCE_IN_GRAMS;
    debug!(close, per_gram, "Converted gold quote to USD/gram");
    Ok(per_gram)
}
