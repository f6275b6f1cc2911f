use crate::helpers::{get, get_json, spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;
use surfs_up::{
    dataset::MOST_ACTIVE_STATION, DailyPrecipitation, Error, TemperatureObservation,
    TemperatureStats,
};

#[tokio::test]
async fn root_lists_available_routes() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, body) = get(&test_app.app, "/").await;
    assert_eq!(status, StatusCode::OK);

    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("Available Routes:"));
    assert!(page.contains("/api/v1.0/precipitation"));
    assert!(page.contains("/api/v1.0/stations"));
    assert!(page.contains("/api/v1.0/tobs"));
    assert!(page.contains("/api/v1.0/start/2010-01-01/end/2017-08-23"));
}

#[tokio::test]
async fn precipitation_keeps_last_value_per_date() {
    let mut climate_db = MockClimateAccess::new();
    climate_db.expect_precipitation().times(1).returning(|| {
        Ok(vec![
            DailyPrecipitation {
                date: String::from("2017-08-22"),
                prcp: Some(0.0),
            },
            DailyPrecipitation {
                date: String::from("2017-08-22"),
                prcp: Some(0.5),
            },
            DailyPrecipitation {
                date: String::from("2017-08-23"),
                prcp: None,
            },
        ])
    });
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"2017-08-22": 0.5, "2017-08-23": null}));
}

#[tokio::test]
async fn stations_returns_ids_in_query_order() {
    let mut climate_db = MockClimateAccess::new();
    climate_db.expect_station_ids().times(1).returning(|| {
        Ok(vec![
            String::from("USC00519397"),
            String::from("USC00513117"),
        ])
    });
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(["USC00519397", "USC00513117"]));
}

#[tokio::test]
async fn tobs_queries_most_active_station_over_last_year() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_observations()
        .withf(|station, since| station == MOST_ACTIVE_STATION && since == "2016-08-23")
        .times(1)
        .returning(|_, _| {
            Ok(vec![TemperatureObservation {
                date: String::from("2017-08-18"),
                tobs: 79.0,
            }])
        });
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"2017-08-18": 79.0}));
}

#[tokio::test]
async fn tobs_with_no_rows_is_an_empty_object() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_observations()
        .times(1)
        .returning(|_, _| Ok(vec![]));
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn start_stats_pass_the_path_date_through_verbatim() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_stats()
        .withf(|start| start == "2016-8-1")
        .times(1)
        .returning(|_| {
            Ok(Some(TemperatureStats {
                min: 58.0,
                avg: 74.59,
                max: 87.0,
            }))
        });
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/start/2016-8-1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"TMIN": 58.0, "TAVG": 74.59, "TMAX": 87.0}));
}

#[tokio::test]
async fn start_stats_without_data_is_not_found() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_stats()
        .times(1)
        .returning(|_| Ok(None));
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let (status, body) = get_json(&test_app.app, "/api/v1.0/start/2020-01-01").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "No data found for start date: 2020-01-01"})
    );
}

#[tokio::test]
async fn start_end_stats_without_data_names_both_dates() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_stats_between()
        .withf(|start, end| start == "2018-01-01" && end == "2019-01-01")
        .times(1)
        .returning(|_, _| Ok(None));
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let (status, body) =
        get_json(&test_app.app, "/api/v1.0/start/2018-01-01/end/2019-01-01").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"error": "No data found for start date: 2018-01-01 and end date: 2019-01-01"})
    );
}

#[tokio::test]
async fn data_source_failure_is_a_server_error() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_station_ids()
        .times(1)
        .returning(|| Err(Error::MissingDatabase(String::from("hawaii.sqlite"))));
    let test_app = spawn_app(Arc::new(climate_db)).await;

    let (status, _) = get(&test_app.app, "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn docs_are_served() {
    let test_app = spawn_app(Arc::new(MockClimateAccess::new())).await;

    let (status, _) = get(&test_app.app, "/docs").await;

    assert_eq!(status, StatusCode::OK);
}
