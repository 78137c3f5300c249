//! Live market quote models

/// A current price snapshot for one tracked asset
#[derive(Debug, Clone, PartialEq)]
pub struct AssetQuote {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    pub price_change_24h: f64,
    pub price_change_percentage_24h: f64,
}
