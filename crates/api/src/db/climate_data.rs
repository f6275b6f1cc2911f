use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    ConnectOptions, Connection,
};
use surfs_up_core::is_file;
use utoipa::ToSchema;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Climate database not found at: {0}")]
    MissingDatabase(String),
    #[error("Failed to query climate database: {0}")]
    Query(#[from] sqlx::Error),
}

/// Read-only queries over the `measurement` and `station` tables.
#[async_trait]
pub trait ClimateData: Sync + Send {
    /// Every (date, prcp) pair across all stations, in table order.
    async fn precipitation(&self) -> Result<Vec<DailyPrecipitation>, Error>;
    /// Every station identifier, in table order.
    async fn station_ids(&self) -> Result<Vec<String>, Error>;
    /// Temperature observations recorded by `station` on or after `since`.
    async fn temperature_observations(
        &self,
        station: &str,
        since: &str,
    ) -> Result<Vec<TemperatureObservation>, Error>;
    /// MIN/AVG/MAX of tobs over `date >= start`, `None` when nothing matches.
    async fn temperature_stats(&self, start: &str) -> Result<Option<TemperatureStats>, Error>;
    /// MIN/AVG/MAX of tobs over `start <= date <= end`, `None` when nothing matches.
    async fn temperature_stats_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Option<TemperatureStats>, Error>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPrecipitation {
    pub date: String,
    pub prcp: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureObservation {
    pub date: String,
    pub tobs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureStats {
    #[serde(rename = "TMIN")]
    pub min: f64,
    #[serde(rename = "TAVG")]
    pub avg: f64,
    #[serde(rename = "TMAX")]
    pub max: f64,
}

impl TemperatureStats {
    /// SQLite answers an aggregate over zero rows with a single all-NULL row,
    /// so a NULL in any column means there was nothing to aggregate.
    fn from_aggregate(row: (Option<f64>, Option<f64>, Option<f64>)) -> Option<Self> {
        match row {
            (Some(min), Some(avg), Some(max)) => Some(Self { min, avg, max }),
            _ => None,
        }
    }
}

pub struct ClimateAccess {
    options: SqliteConnectOptions,
}

impl ClimateAccess {
    /// Builds connect options for the database at `path` and checks it answers a query.
    pub async fn new(path: &str) -> Result<Self, Error> {
        if !is_file(path) {
            return Err(Error::MissingDatabase(path.to_owned()));
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .read_only(true)
            .create_if_missing(false);

        let access = Self { options };
        let mut conn = access.open_connection().await?;
        sqlx::query("SELECT 1").execute(&mut conn).await?;
        conn.close().await?;

        Ok(access)
    }

    /// Opens a fresh connection per call, nothing is shared between requests
    pub async fn open_connection(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }
}

#[async_trait]
impl ClimateData for ClimateAccess {
    async fn precipitation(&self) -> Result<Vec<DailyPrecipitation>, Error> {
        let mut conn = self.open_connection().await?;
        let rows: Vec<(String, Option<f64>)> =
            sqlx::query_as("SELECT date, prcp FROM measurement")
                .fetch_all(&mut conn)
                .await?;
        conn.close().await?;

        debug!("precipitation rows: {}", rows.len());
        Ok(rows
            .into_iter()
            .map(|(date, prcp)| DailyPrecipitation { date, prcp })
            .collect())
    }

    async fn station_ids(&self) -> Result<Vec<String>, Error> {
        let mut conn = self.open_connection().await?;
        let stations: Vec<String> = sqlx::query_scalar("SELECT station FROM station")
            .fetch_all(&mut conn)
            .await?;
        conn.close().await?;

        Ok(stations)
    }

    async fn temperature_observations(
        &self,
        station: &str,
        since: &str,
    ) -> Result<Vec<TemperatureObservation>, Error> {
        let mut conn = self.open_connection().await?;
        let rows: Vec<(String, f64)> =
            sqlx::query_as("SELECT date, tobs FROM measurement WHERE station = ? AND date >= ?")
                .bind(station)
                .bind(since)
                .fetch_all(&mut conn)
                .await?;
        conn.close().await?;

        debug!(
            "temperature observations for {} since {}: {}",
            station,
            since,
            rows.len()
        );
        Ok(rows
            .into_iter()
            .map(|(date, tobs)| TemperatureObservation { date, tobs })
            .collect())
    }

    async fn temperature_stats(&self, start: &str) -> Result<Option<TemperatureStats>, Error> {
        let mut conn = self.open_connection().await?;
        let row: Option<(Option<f64>, Option<f64>, Option<f64>)> = sqlx::query_as(
            "SELECT CAST(MIN(tobs) AS REAL), AVG(tobs), CAST(MAX(tobs) AS REAL)
             FROM measurement WHERE date >= ?",
        )
        .bind(start)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        Ok(row.and_then(TemperatureStats::from_aggregate))
    }

    async fn temperature_stats_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Option<TemperatureStats>, Error> {
        let mut conn = self.open_connection().await?;
        let row: Option<(Option<f64>, Option<f64>, Option<f64>)> = sqlx::query_as(
            "SELECT CAST(MIN(tobs) AS REAL), AVG(tobs), CAST(MAX(tobs) AS REAL)
             FROM measurement WHERE date BETWEEN ? AND ?",
        )
        .bind(start)
        .bind(end)
        .fetch_optional(&mut conn)
        .await?;
        conn.close().await?;

        Ok(row.and_then(TemperatureStats::from_aggregate))
    }
}
