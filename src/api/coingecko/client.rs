use reqwest::Client as HttpClient;

use super::models::{MarketChartResponse, MarketRow};
use crate::api::error::ApiError;

/// CoinGecko API client for public market data
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http_client: HttpClient,
    base_url: String,
}

impl CoinGeckoClient {
    const DEFAULT_BASE_URL: &'static str = "https://api.coingecko.com/api/v3";

    /// Create a client against the public CoinGecko API
    pub fn new() -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a client with a custom base URL (for testing or a mirror)
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url,
        }
    }

    /// GET /coins/markets
    ///
    /// Retrieves current market rows for the given asset ids, ordered by
    /// market cap. One row per id, assuming all ids are valid.
    ///
    /// # Arguments
    /// * `ids` - CoinGecko asset ids, e.g. "bitcoin"
    ///
    /// # Returns
    /// * `Ok(Vec<MarketRow>)` - Raw market rows
    /// * `Err(ApiError)` - Error classified by status code
    pub async fn fetch_markets(&self, ids: &[&str]) -> Result<Vec<MarketRow>, ApiError> {
        let url = format!("{}/coins/markets", self.base_url);
        let ids_csv = ids.join(",");
        let per_page = ids.len().to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("vs_currency", "usd"),
                ("ids", ids_csv.as_str()),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
            ])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        response
            .json::<Vec<MarketRow>>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /coins/{id}/market_chart
    ///
    /// Retrieves one year of daily price samples for a single asset.
    ///
    /// # Arguments
    /// * `asset_id` - CoinGecko asset id, e.g. "bitcoin"
    ///
    /// # Returns
    /// * `Ok(MarketChartResponse)` - Raw `[timestamp_ms, price]` pairs
    /// * `Err(ApiError)` - Error classified by status code
    pub async fn fetch_market_chart(&self, asset_id: &str) -> Result<MarketChartResponse, ApiError> {
        let url = format!("{}/coins/{}/market_chart", self.base_url, asset_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("vs_currency", "usd"),
                ("days", "365"),
                ("interval", "daily"),
            ])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }

        response
            .json::<MarketChartResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}
