use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{
    dataset::{
        precipitation_by_date, temperature_by_date, tobs_window_start, DateSeries,
        MOST_ACTIVE_STATION,
    },
    routes::error::{ApiError, ErrorBody},
    AppState, TemperatureStats,
};

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Precipitation keyed by measurement date, null where unrecorded", content_type = "application/json", body = std::collections::BTreeMap<String, f64>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the climate database")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DateSeries<Option<f64>>>, ApiError> {
    let rows = state.climate_db.precipitation().await?;
    Ok(Json(precipitation_by_date(rows)))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Identifiers of every station", content_type = "application/json", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the climate database")
    ))]
pub async fn stations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    let stations = state.climate_db.station_ids().await?;
    Ok(Json(stations))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperature observations of the most active station over the last year of data, keyed by date", content_type = "application/json", body = std::collections::BTreeMap<String, f64>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the climate database")
    ))]
pub async fn tobs(State(state): State<Arc<AppState>>) -> Result<Json<DateSeries<f64>>, ApiError> {
    let since = tobs_window_start()?;
    let rows = state
        .climate_db
        .temperature_observations(MOST_ACTIVE_STATION, &since)
        .await?;
    Ok(Json(temperature_by_date(rows)))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/start/{start}",
    params(
         ("start" = String, Path, description = "First date (inclusive), YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature stats from the start date onward", content_type = "application/json", body = TemperatureStats),
        (status = NOT_FOUND, description = "No measurements on or after the start date", content_type = "application/json", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the climate database")
    ))]
pub async fn start_stats(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<TemperatureStats>, ApiError> {
    state
        .climate_db
        .temperature_stats(&start)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No data found for start date: {}", start)))
}

#[utoipa::path(
    get,
    path = "/api/v1.0/start/{start}/end/{end}",
    params(
         ("start" = String, Path, description = "First date (inclusive), YYYY-MM-DD"),
         ("end" = String, Path, description = "Last date (inclusive), YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "Temperature stats between the start and end dates", content_type = "application/json", body = TemperatureStats),
        (status = NOT_FOUND, description = "No measurements between the start and end dates", content_type = "application/json", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to query the climate database")
    ))]
pub async fn start_end_stats(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<TemperatureStats>, ApiError> {
    state
        .climate_db
        .temperature_stats_between(&start, &end)
        .await?
        .map(Json)
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No data found for start date: {} and end date: {}",
                start, end
            ))
        })
}
