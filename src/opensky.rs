use reqwest::StatusCode;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::departures::{complete_records, missing_column, DepartureRecord, RawDeparture};
use crate::error::{AppError, Result};
use crate::http::CLIENT;
use crate::window::TimeWindow;

/// Fetches departures for `airport` within `window`.
///
/// An empty vector means the API answered with no flights. Rows missing an
/// origin, destination or callsign are dropped.
#[instrument(level = "info", skip(base_url))]
pub async fn fetch_departures(
    base_url: &str,
    airport: &str,
    window: &TimeWindow,
) -> Result<Vec<DepartureRecord>> {
    let url = format!("{}/flights/departure", base_url);
    let begin = window.start.to_string();
    let end = window.end.to_string();
    info!(url = %url, airport, begin = %begin, end = %end, "Requesting departures from OpenSky");

    let start_time = std::time::Instant::now();
    let response = CLIENT
        .get(&url)
        .query(&[("airport", airport), ("begin", begin.as_str()), ("end", end.as_str())])
        .send()
        .await?;
    let status = response.status();
    info!(
        status = %status,
        duration_ms = start_time.elapsed().as_millis(),
        "OpenSky request completed"
    );

    match status {
        StatusCode::OK => {}
        StatusCode::NOT_FOUND => {
            warn!(airport, "OpenSky reported unknown airport or region");
            return Err(AppError::InvalidRegion);
        }
        other => {
            warn!(status = %other, "OpenSky returned an error status");
            return Err(AppError::UpstreamError(other.as_u16()));
        }
    }

    let body = response.text().await?;
    let records = parse_departures(&body)?;
    debug!(body_len = body.len(), records = records.len(), "Decoded departures");
    Ok(records)
}

/// Decodes a departures body.
///
/// A key that no row carries is a malformed response; a row that merely
/// lacks a value is dropped.
pub fn parse_departures(body: &str) -> Result<Vec<DepartureRecord>> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(body).map_err(parse_error)?;
    if let Some(key) = missing_column(&objects) {
        return Err(AppError::ParseError(format!("no row has the field `{}`", key)));
    }

    let rows = objects
        .into_iter()
        .map(|row| serde_json::from_value::<RawDeparture>(Value::Object(row)))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(parse_error)?;

    let total = rows.len();
    let records = complete_records(rows);
    if records.len() < total {
        debug!(dropped = total - records.len(), "Dropped incomplete departure rows");
    }
    Ok(records)
}

fn parse_error(err: serde_json::Error) -> AppError {
    AppError::ParseError(err.to_string())
}
