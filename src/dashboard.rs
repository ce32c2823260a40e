//! State shared between the fetch and summary actions.
//!
//! Every fetch attempt clears the held result before going to the network,
//! so a failed fetch never leaves stale departures next to its error. The
//! summary action only reads the result.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::departures::{
    destination_frequencies, frequency_table, top, DepartureRecord, DestinationFrequency,
};
use crate::error::{AppError, Result};
use crate::llm::{build_prompt, Summarizer};
use crate::opensky::fetch_departures;
use crate::window::TimeWindow;

/// Number of destinations handed to the summarizer.
pub const SUMMARY_TOP_N: usize = 5;

pub const NO_DATA_NOTICE: &str = "No flight data available for this airport and time.";
pub const FETCH_FIRST_WARNING: &str = "Please fetch flight data first before generating summary.";
pub const DATA_CHANGED_WARNING: &str =
    "Flight data changed while the summary was being generated. Please generate it again.";

#[derive(Debug, Clone, Serialize)]
pub struct FetchResult {
    pub airport: String,
    pub window: TimeWindow,
    pub records: Vec<DepartureRecord>,
    pub frequencies: Vec<DestinationFrequency>,
    pub fetched_at: DateTime<Utc>,
}

impl FetchResult {
    pub fn new(airport: String, window: TimeWindow, records: Vec<DepartureRecord>) -> Self {
        let frequencies = destination_frequencies(&records);
        Self {
            airport,
            window,
            records,
            frequencies,
            fetched_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Default)]
struct State {
    result: Option<FetchResult>,
    summary: Option<String>,
    /// Bumped whenever `result` is replaced or cleared.
    generation: u64,
}

impl State {
    fn replace(&mut self, result: Option<FetchResult>) {
        self.result = result;
        self.summary = None;
        self.generation += 1;
    }
}

pub struct Dashboard {
    opensky_base_url: String,
    summarizer: Arc<dyn Summarizer>,
    state: RwLock<State>,
}

impl Dashboard {
    pub fn new(opensky_base_url: impl Into<String>, summarizer: Arc<dyn Summarizer>) -> Self {
        Self {
            opensky_base_url: opensky_base_url.into(),
            summarizer,
            state: RwLock::new(State::default()),
        }
    }

    /// Fetches departures and replaces the held result.
    ///
    /// An empty result is returned as-is but not kept, so the summary action
    /// still sees "no data".
    pub async fn fetch(&self, airport: &str, window: TimeWindow) -> Result<FetchResult> {
        self.clear().await;

        let records = fetch_departures(&self.opensky_base_url, airport, &window)
            .await
            .inspect_err(|e| warn!(airport, error = %e, "Fetch failed"))?;

        let result = FetchResult::new(airport.to_string(), window, records);
        info!(
            airport,
            records = result.records.len(),
            destinations = result.frequencies.len(),
            "Fetch completed"
        );

        if !result.is_empty() {
            self.store(result.clone()).await;
        }
        Ok(result)
    }

    /// Replaces the held result and drops any summary of the previous one.
    pub async fn store(&self, result: FetchResult) {
        self.state.write().await.replace(Some(result));
    }

    pub async fn clear(&self) {
        self.state.write().await.replace(None);
    }

    pub async fn current(&self) -> Option<FetchResult> {
        self.state.read().await.result.clone()
    }

    pub async fn latest_summary(&self) -> Option<String> {
        self.state.read().await.summary.clone()
    }

    /// Summarizes the top destinations of the held result.
    ///
    /// Fails with a precondition warning, without calling the summarizer,
    /// when nothing has been fetched. A summary whose result was replaced
    /// while the summarizer ran is discarded with the same kind of warning.
    pub async fn generate_summary(&self) -> Result<String> {
        let (prompt, generation) = {
            let state = self.state.read().await;
            match state.result.as_ref().filter(|r| !r.is_empty()) {
                Some(result) => (
                    build_prompt(&frequency_table(top(&result.frequencies, SUMMARY_TOP_N))),
                    state.generation,
                ),
                None => {
                    warn!("Summary requested before any departures were fetched");
                    return Err(AppError::Precondition(FETCH_FIRST_WARNING.to_string()));
                }
            }
        };

        let summary = self
            .summarizer
            .summarize(&prompt)
            .await
            .inspect_err(|e| warn!(error = %e, "Summary generation failed"))?;

        let mut state = self.state.write().await;
        if state.generation != generation {
            warn!(
                started = generation,
                current = state.generation,
                "Flight data changed during summary generation; discarding summary"
            );
            return Err(AppError::Precondition(DATA_CHANGED_WARNING.to_string()));
        }
        info!(summary_len = summary.len(), "Summary generated");
        state.summary = Some(summary.clone());
        Ok(summary)
    }
}
