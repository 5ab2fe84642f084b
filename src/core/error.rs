//! Error taxonomy shared by the storage gateway, the quote feed and the
//! presentation layer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    /// The database could not be reached, or the connection dropped mid-call.
    #[error("Database unreachable: {0}")]
    Connectivity(String),

    /// The database rejected a statement, or a row did not match the schema.
    #[error("Database rejected the statement: {0}")]
    Schema(String),

    /// The quote service answered but had no bars for the requested period.
    #[error("No data returned from Yahoo Finance for {ticker}")]
    FeedUnavailable { ticker: String },

    /// Transport, HTTP or decoding failure while talking to the quote service.
    #[error("{0}")]
    FeedRequest(String),

    /// A manual price entry that is not strictly positive.
    #[error("Enter a valid price.")]
    Validation,
}

impl From<reqwest::Error> for TrackerError {
    fn from(err: reqwest::Error) -> Self {
        TrackerError::FeedRequest(format!("Request error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_fixed() {
        let err = TrackerError::Validation;
        assert_eq!(err.to_string(), "Enter a valid price.");
    }

    #[test]
    fn test_feed_unavailable_names_ticker() {
        let err = TrackerError::FeedUnavailable {
            ticker: "GC=F".into(),
        };
        assert_eq!(
            err.to_string(),
            "No data returned from Yahoo Finance for GC=F"
        );
    }
}
