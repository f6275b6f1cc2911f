//! Fixed facts about the frozen Hawaii dataset and the shaping of query rows
//! into date-keyed JSON objects.

use std::collections::BTreeMap;

use time::{
    macros::{date, format_description},
    Date, Duration,
};

use crate::{DailyPrecipitation, TemperatureObservation};

/// Most recent measurement date in the dataset.
pub const LATEST_DATE: Date = date!(2017-08-23);

/// Length of the temperature observation window ending at [`LATEST_DATE`].
pub const TOBS_WINDOW_DAYS: i64 = 365;

/// Station with the most recorded observations in the full dataset.
pub const MOST_ACTIVE_STATION: &str = "USC00519281";

/// Dates map to JSON object keys; keys serialize in ascending order.
pub type DateSeries<T> = BTreeMap<String, T>;

/// First day (inclusive) of the temperature observation window, formatted the
/// way the `measurement.date` column stores it so the bound compares as text.
pub fn tobs_window_start() -> Result<String, time::error::Format> {
    let start = LATEST_DATE - Duration::days(TOBS_WINDOW_DAYS);
    start.format(format_description!("[year]-[month]-[day]"))
}

/// Later rows replace earlier rows that share a date.
pub fn precipitation_by_date(rows: Vec<DailyPrecipitation>) -> DateSeries<Option<f64>> {
    rows.into_iter().map(|row| (row.date, row.prcp)).collect()
}

/// Later rows replace earlier rows that share a date.
pub fn temperature_by_date(rows: Vec<TemperatureObservation>) -> DateSeries<f64> {
    rows.into_iter().map(|row| (row.date, row.tobs)).collect()
}
