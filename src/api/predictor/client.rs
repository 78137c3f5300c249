use reqwest::Client as HttpClient;
use std::collections::HashMap;

use super::models::{HealthResponse, PredictionResponse};
use crate::api::error::ApiError;

/// Client for the local price prediction service
///
/// The service is external and its availability is not guaranteed; callers
/// are expected to treat failures as advisory.
#[derive(Debug, Clone)]
pub struct PredictorClient {
    http_client: HttpClient,
    base_url: String,
}

impl PredictorClient {
    const DEFAULT_BASE_URL: &'static str = "http://localhost:5000";

    /// Create a client against the default local endpoint
    pub fn new() -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// POST /predict_auto
    ///
    /// Sends the current price per asset id and receives a predicted price
    /// per asset id back.
    pub async fn predict(
        &self,
        current_prices: &HashMap<String, f64>,
    ) -> Result<PredictionResponse, ApiError> {
        let url = format!("{}/predict_auto", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .json(current_prices)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        response
            .json::<PredictionResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /health
    ///
    /// Availability probe. Only used to log whether the service is reachable.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        response
            .json::<HealthResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

impl Default for PredictorClient {
    fn default() -> Self {
        Self::new()
    }
}
