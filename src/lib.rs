pub mod airports;
pub mod api;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod departures;
pub mod error;
pub mod http;
pub mod llm;
pub mod opensky;
pub mod window;

use std::sync::Arc;
use config::Config;
use dashboard::Dashboard;
use llm::{OpenAiSummarizer, Summarizer};

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let summarizer = Arc::new(OpenAiSummarizer::from_config(&config));
        Self::with_summarizer(config, summarizer)
    }

    pub fn with_summarizer(config: Config, summarizer: Arc<dyn Summarizer>) -> Self {
        let dashboard = Dashboard::new(config.opensky_base_url.clone(), summarizer);
        Self {
            config: Arc::new(config),
            dashboard: Arc::new(dashboard),
        }
    }
}
