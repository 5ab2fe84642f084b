//! PostgreSQL storage gateway.
//!
//! Every call opens its own connection, runs one statement and closes the
//! connection again before returning, whether the statement succeeded or not.

use crate::core::config::DatabaseConfig;
use crate::core::entry::{MetalPriceEntry, MoodEntry};
use crate::core::error::TrackerError;
use crate::core::store::TrackerStore;
use async_trait::async_trait;
use chrono::Local;
use std::error::Error as _;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls, Row};
use tracing::{debug, instrument};

/// Schema contract shared with `mmt init-db`.
pub const SCHEMA: &str = include_str!("../../migrations/V1__tracker_schema.sql");

const INSERT_MOOD: &str = r#"INSERT INTO "modelog" ("mode", "timestamp") VALUES ($1, $2)"#;
const INSERT_METAL_PRICE: &str = r#"INSERT INTO "metalprice" ("metalname", "sizepergram", "daterecorded") VALUES ($1, $2, $3)"#;
const SELECT_MOODS: &str = r#"SELECT "mode", "timestamp" FROM "modelog" ORDER BY "timestamp" DESC"#;
const SELECT_METAL_PRICES: &str = r#"SELECT "metalname", "sizepergram", "daterecorded" FROM "metalprice" ORDER BY "daterecorded" DESC"#;

pub struct PostgresStore {
    config: tokio_postgres::Config,
}

/// An open connection plus the task driving it.
struct Session {
    client: Client,
    driver: JoinHandle<()>,
}

impl Session {
    /// Drops the client, which terminates the connection, and waits for the
    /// driver task to finish.
    async fn close(self) {
        drop(self.client);
        if let Err(e) = self.driver.await {
            debug!(error = %e, "Connection task panicked");
        }
        debug!("Closed database connection");
    }
}

fn map_pg_error(err: tokio_postgres::Error) -> TrackerError {
    if let Some(db_err) = err.as_db_error() {
        return TrackerError::Schema(format!("{} ({})", db_err.message(), db_err.code().code()));
    }
    let io_failure = err
        .source()
        .is_some_and(|source| source.downcast_ref::<std::io::Error>().is_some());
    if err.is_closed() || io_failure {
        TrackerError::Connectivity(err.to_string())
    } else {
        TrackerError::Schema(err.to_string())
    }
}

fn mood_from_row(row: &Row) -> Result<MoodEntry, tokio_postgres::Error> {
    Ok(MoodEntry {
        mood: row.try_get(0)?,
        recorded_at: row.try_get(1)?,
    })
}

fn metal_price_from_row(row: &Row) -> Result<MetalPriceEntry, tokio_postgres::Error> {
    Ok(MetalPriceEntry {
        metal_name: row.try_get(0)?,
        price_per_gram: row.try_get(1)?,
        recorded_at: row.try_get(2)?,
    })
}

impl PostgresStore {
    pub fn new(config: &DatabaseConfig) -> Self {
        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&config.host)
            .port(config.port)
            .dbname(&config.dbname)
            .user(&config.user)
            .application_name("mmt");
        if !config.password.is_empty() {
            pg_config.password(&config.password);
        }
        Self { config: pg_config }
    }

    async fn open(&self) -> Result<Session, TrackerError> {
        let (client, connection) = self
            .config
            .connect(NoTls)
            .await
            .map_err(|e| TrackerError::Connectivity(e.to_string()))?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                debug!(error = %e, "Database connection ended with error");
            }
        });
        debug!("Opened database connection");

        Ok(Session { client, driver })
    }

    /// Creates the tracker tables if they do not exist yet.
    #[instrument(name = "ApplySchema", skip(self))]
    pub async fn apply_schema(&self) -> Result<(), TrackerError> {
        let session = self.open().await?;
        let result = session.client.batch_execute(SCHEMA).await;
        session.close().await;
        result.map_err(map_pg_error)
    }
}

#[async_trait]
impl TrackerStore for PostgresStore {
    #[instrument(name = "RecordMood", skip(self), fields(label = %label))]
    async fn record_mood(&self, label: &str) -> Result<(), TrackerError> {
        let recorded_at = Local::now().naive_local();
        let session = self.open().await?;
        let result = session
            .client
            .execute(INSERT_MOOD, &[&label, &recorded_at])
            .await;
        session.close().await;

        let inserted = result.map_err(map_pg_error)?;
        debug!(inserted, "Recorded mood");
        Ok(())
    }

    #[instrument(name = "RecordMetalPrice", skip(self), fields(name = %name))]
    async fn record_metal_price(
        &self,
        name: &str,
        price_per_gram: f64,
    ) -> Result<(), TrackerError> {
        let recorded_at = Local::now().naive_local();
        let session = self.open().await?;
        let result = session
            .client
            .execute(INSERT_METAL_PRICE, &[&name, &price_per_gram, &recorded_at])
            .await;
        session.close().await;

        let inserted = result.map_err(map_pg_error)?;
        debug!(inserted, price_per_gram, "Recorded metal price");
        Ok(())
    }

    #[instrument(name = "FetchMoods", skip(self))]
    async fn fetch_all_mood_entries(&self) -> Result<Vec<MoodEntry>, TrackerError> {
        let session = self.open().await?;
        let result = session.client.query(SELECT_MOODS, &[]).await;
        session.close().await;

        let rows = result.map_err(map_pg_error)?;
        debug!(rows = rows.len(), "Fetched mood entries");
        rows.iter()
            .map(mood_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_pg_error)
    }

    #[instrument(name = "FetchMetalPrices", skip(self))]
    async fn fetch_all_metal_price_entries(&self) -> Result<Vec<MetalPriceEntry>, TrackerError> {
        let session = self.open().await?;
        let result = session.client.query(SELECT_METAL_PRICES, &[]).await;
        session.close().await;

        let rows = result.map_err(map_pg_error)?;
        debug!(rows = rows.len(), "Fetched metal price entries");
        rows.iter()
            .map(metal_price_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_pg_error)
    }
}
