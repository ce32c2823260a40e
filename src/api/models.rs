use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use crate::airports::Airport;
use crate::chart::bar_chart_svg;
use crate::dashboard::FetchResult;
use crate::departures::{DepartureRecord, DestinationFrequency};
use crate::window::TimeWindow;

#[derive(Deserialize)]
pub struct FetchRequest {
    pub airport: String,
    /// Defaults to today (UTC).
    pub date: Option<NaiveDate>,
    /// Defaults to noon.
    pub hour: Option<u32>,
}

#[derive(Serialize)]
pub struct DeparturesResponse {
    pub airport: String,
    pub window: TimeWindow,
    pub records: Vec<DepartureRecord>,
    pub frequencies: Vec<DestinationFrequency>,
    pub chart_svg: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl From<FetchResult> for DeparturesResponse {
    fn from(result: FetchResult) -> Self {
        // A chart failure only costs the chart; the table is still shown.
        let chart_svg = if result.frequencies.is_empty() {
            None
        } else {
            bar_chart_svg(&result.frequencies)
                .inspect_err(|e| warn!(error = %e, "Chart rendering failed"))
                .ok()
        };
        Self {
            airport: result.airport,
            window: result.window,
            records: result.records,
            frequencies: result.frequencies,
            chart_svg,
            fetched_at: result.fetched_at,
        }
    }
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct AirportOption {
    pub label: String,
    pub icao: &'static str,
}

impl From<&Airport> for AirportOption {
    fn from(airport: &Airport) -> Self {
        Self {
            label: airport.label(),
            icao: airport.icao,
        }
    }
}

#[derive(Serialize)]
pub struct AirportsResponse {
    pub airports: Vec<AirportOption>,
    pub default_date: NaiveDate,
    pub default_hour: u32,
}
