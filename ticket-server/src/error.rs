// ticket-server/src/error.rs
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

/// Failures talking to the WeCom API
#[derive(Debug, Error)]
pub enum WecomError {
    #[error("missing credentials: corp_id and corp_secret must both be set")]
    MissingCredentials,

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to create request: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to create request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to read response: {0}")]
    BodyRead(#[source] reqwest::Error),

    #[error("failed to parse JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("upstream rejected request, errcode {code}: {message}")]
    UpstreamRejected { code: i64, message: String },
}

impl ResponseError for WecomError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}
