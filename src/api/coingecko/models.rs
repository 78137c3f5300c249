use serde::Deserialize;

/// One row of the `GET /coins/markets` response
///
/// The change fields can be null for thinly traded assets, so they stay
/// optional until the service layer maps them.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketRow {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    pub price_change_24h: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}

/// Payload of the `GET /coins/{id}/market_chart` response
#[derive(Debug, Clone, Deserialize)]
pub struct MarketChartResponse {
    /// `[timestamp_ms, price]` pairs, one per day
    pub prices: Vec<(i64, f64)>,
}
