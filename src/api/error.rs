//! Error type shared by the HTTP API clients

use thiserror::Error;

/// Comprehensive error type for API operations
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// 400 Bad Request
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// 404 Not Found
    #[error("Not Found: {0}")]
    NotFound(String),
    /// 429 Too Many Requests (rate limited)
    #[error("Rate Limited. Retry after {retry_after_secs} s")]
    RateLimited { retry_after_secs: u64 },
    /// 5xx Server Error
    #[error("Server Error ({0}): {1}")]
    ServerError(u16, String),
    /// Other HTTP errors
    #[error("HTTP Error ({0}): {1}")]
    HttpError(u16, String),
    /// Network/request error
    #[error("Request Error: {0}")]
    RequestError(String),
    /// Deserialization error
    #[error("Deserialization Error: {0}")]
    DeserializationError(String),
}

impl ApiError {
    /// Classify a non-2xx response by status code, consuming the body for context
    pub async fn from_response(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let retry_after_secs = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        let body_text = response.text().await.unwrap_or_default();

        match status.as_u16() {
            400 => {
                // The body is usually a JSON object with an error message
                if let Ok(err_json) = serde_json::from_str::<serde_json::Value>(&body_text) {
                    let message = err_json
                        .get("error")
                        .and_then(|v| v.as_str())
                        .unwrap_or(&body_text);
                    ApiError::BadRequest(message.to_string())
                } else {
                    ApiError::BadRequest(body_text)
                }
            }
            404 => ApiError::NotFound(body_text),
            429 => ApiError::RateLimited {
                retry_after_secs: retry_after_secs.unwrap_or(60),
            },
            code @ 500..=599 => ApiError::ServerError(code, body_text),
            code => ApiError::HttpError(code, body_text),
        }
    }
}
