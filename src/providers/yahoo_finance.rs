use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::error::TrackerError;
use crate::core::price::QuoteProvider;

// YahooFinanceProvider implementation for QuoteProvider
pub struct YahooFinanceProvider {
    base_url: String,
}

impl YahooFinanceProvider {
    pub fn new(base_url: &str) -> Self {
        YahooFinanceProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct YahooChartResponse {
    chart: ChartResult,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    result: Option<Vec<ChartItem>>,
}

#[derive(Deserialize, Debug)]
struct ChartItem {
    indicators: Option<Indicators>,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Deserialize, Debug)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

/// Last non-null close of the first series, if any.
fn last_close(item: &ChartItem) -> Option<f64> {
    item.indicators
        .as_ref()
        .and_then(|inds| inds.quote.first())
        .and_then(|q| q.close.as_ref())
        .and_then(|closes| closes.iter().rev().find_map(|c| *c))
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    #[instrument(
        name = "YahooQuoteFetch",
        skip(self),
        fields(ticker = %ticker)
    )]
    async fn latest_close(&self, ticker: &str) -> Result<f64, TrackerError> {
        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&range=1d",
            self.base_url, ticker
        );
        debug!("Requesting quote data from {}", url);

        let client = reqwest::Client::builder().user_agent("mmt/1.0").build()?;
        let response = client.get(&url).send().await.map_err(|e| {
            TrackerError::FeedRequest(format!("Request error: {e} for ticker: {ticker}"))
        })?;

        if !response.status().is_success() {
            return Err(TrackerError::FeedRequest(format!(
                "HTTP error: {} for ticker: {}",
                response.status(),
                ticker
            )));
        }

        let text = response.text().await?;
        let data: YahooChartResponse = serde_json::from_str(&text).map_err(|e| {
            TrackerError::FeedRequest(format!("Failed to parse JSON response for {ticker}: {e}"))
        })?;

        let close = data
            .chart
            .result
            .as_ref()
            .and_then(|items| items.first())
            .and_then(last_close)
            .ok_or_else(|| TrackerError::FeedUnavailable {
                ticker: ticker.to_string(),
            })?;

        debug!(close, "Received latest close");
        Ok(close)
    }
}
