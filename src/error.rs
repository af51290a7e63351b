use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generative::ModelError;
use crate::response::ResponseParseError;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failure while talking to the model or interpreting what it returned.
#[derive(Error, Debug)]
pub enum MediationError {
    #[error("Model request failed: {0}")]
    Model(#[from] ModelError),

    #[error("Failed to parse model response: {0}")]
    Parse(#[from] ResponseParseError),

    #[error("Failed to decode attachment {index}: {source}")]
    Attachment {
        index: usize,
        #[source]
        source: base64::DecodeError,
    },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing '{0}' field")]
    MissingField(&'static str),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Recommendation failed: {0}")]
    Recommendation(MediationError),

    #[error("Analysis failed: {0}")]
    Analysis(MediationError),
}

impl AppError {
    pub fn missing_api_key() -> Self {
        AppError::Configuration("GEMINI_API_KEY is not set".to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge
        } else {
            AppError::BadRequest(rejection.body_text())
        }
    }
}

const CONFIGURATION_MESSAGE: &str = "Server configuration error";
const RECOMMENDATION_MESSAGE: &str = "Failed to get recommendation";
const ANALYSIS_MESSAGE: &str = "Internal analysis failure";

fn log_mediation_error(operation: &str, err: &MediationError) {
    match err {
        MediationError::Parse(e) => {
            tracing::error!("{}: model response is not valid JSON: {}", operation, e)
        }
        MediationError::Model(e) => tracing::error!("{}: model call failed: {}", operation, e),
        MediationError::Attachment { index, source } => tracing::error!(
            "{}: attachment {} is not valid base64: {}",
            operation,
            index,
            source
        ),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingField(_) => {
                tracing::warn!("Bad request: {}", self);
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::PayloadTooLarge => {
                tracing::warn!("Rejected oversized request body");
                (StatusCode::PAYLOAD_TOO_LARGE, self.to_string())
            }
            AppError::Configuration(detail) => {
                tracing::error!("Configuration error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    CONFIGURATION_MESSAGE.to_string(),
                )
            }
            AppError::Recommendation(e) => {
                log_mediation_error("Recommendation", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    RECOMMENDATION_MESSAGE.to_string(),
                )
            }
            AppError::Analysis(e) => {
                log_mediation_error("Analysis", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ANALYSIS_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn error_body(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_field_is_client_error() {
        let (status, body) = error_body(AppError::MissingField("symptoms")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing 'symptoms' field");
    }

    #[tokio::test]
    async fn test_configuration_detail_is_hidden() {
        let (status, body) =
            error_body(AppError::Configuration("GEMINI_API_KEY is not set".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], CONFIGURATION_MESSAGE);
    }

    #[tokio::test]
    async fn test_upstream_detail_is_hidden() {
        let err = MediationError::Model(ModelError::Network("connection refused".into()));
        let (status, body) = error_body(AppError::Analysis(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], ANALYSIS_MESSAGE);

        let err = MediationError::Model(ModelError::EmptyResponse);
        let (status, body) = error_body(AppError::Recommendation(err)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], RECOMMENDATION_MESSAGE);
        assert_ne!(body["error"], CONFIGURATION_MESSAGE);
    }
}
