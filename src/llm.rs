use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::http::CLIENT;

pub const SYSTEM_PROMPT: &str = "You summarize aviation data.";

/// Turns a prompt into a plain-text summary.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &str) -> Result<String>;
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

/// Chat-completion client for OpenAI-compatible endpoints.
pub struct OpenAiSummarizer {
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiSummarizer {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.openai_base_url.clone(),
            config.openai_model.clone(),
            config.openai_api_key.clone(),
        )
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::LlmError("OPENAI_API_KEY is not set".to_string()))?;

        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".into(),
                    content: SYSTEM_PROMPT.into(),
                },
                Message {
                    role: "user".into(),
                    content: prompt.into(),
                },
            ],
        };

        info!(model = %self.model, prompt_len = prompt.len(), "Calling chat completion API");
        let res = CLIENT
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::LlmError(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(status = %status, body_len = body.len(), "Chat completion API returned an error");
            return Err(AppError::LlmError(format!(
                "{} ({})",
                error_detail(&body, status),
                status.as_u16()
            )));
        }

        let json: serde_json::Value = res
            .json()
            .await
            .map_err(|e| AppError::LlmError(e.to_string()))?;

        let reply = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| AppError::LlmError("Invalid response format from LLM".to_string()))?
            .to_string();

        Ok(reply)
    }
}

/// Vendor error message when the body is the usual JSON error object,
/// otherwise the status reason.
fn error_detail(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string())
}

pub fn build_prompt(frequency_table: &str) -> String {
    let mut result = String::with_capacity(frequency_table.len() + 160);
    result.push_str("You are a data analyst. Based on the following arrival airport frequency data:\n\n");
    result.push_str(frequency_table);
    result.push_str("\n\nSummarize the flight demand trends in plain English.");
    result
}
