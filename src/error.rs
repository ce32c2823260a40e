use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};

use crate::api::response;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to fetch data: {0}")]
    FetchError(String),

    #[error("Invalid ICAO code or data not available for this region.")]
    InvalidRegion,

    #[error("API Error {0}: Unable to fetch data.")]
    UpstreamError(u16),

    #[error("Error processing data: {0}")]
    ParseError(String),

    #[error("OpenAI API error: {0}")]
    LlmError(String),

    #[error("{0}")]
    Precondition(String),

    #[error("Chart rendering failed: {0}")]
    ChartError(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::FetchError(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidRegion => StatusCode::NOT_FOUND,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::ParseError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::LlmError(_) => StatusCode::BAD_GATEWAY,
            AppError::Precondition(_) => StatusCode::CONFLICT,
            AppError::ChartError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Preconditions are shown as warnings rather than errors.
    pub fn is_warning(&self) -> bool {
        matches!(self, AppError::Precondition(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();
        if self.is_warning() {
            response::warning::<()>(status, message).into_response()
        } else {
            response::error::<()>(status, message).into_response()
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::FetchError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_match_dashboard_wording() {
        assert_eq!(
            AppError::InvalidRegion.to_string(),
            "Invalid ICAO code or data not available for this region."
        );
        assert_eq!(
            AppError::UpstreamError(500).to_string(),
            "API Error 500: Unable to fetch data."
        );
        assert!(AppError::ParseError("expected value".into())
            .to_string()
            .starts_with("Error processing data: "));
    }

    #[test]
    fn status_codes() {
        assert_eq!(AppError::InvalidRegion.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::UpstreamError(503).status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(AppError::Precondition("x".into()).status_code(), StatusCode::CONFLICT);
        assert!(AppError::Precondition("x".into()).is_warning());
        assert!(!AppError::LlmError("x".into()).is_warning());
    }
}
