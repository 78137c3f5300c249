//! Historical price series models

use chrono::{DateTime, Utc};

/// A single daily price sample
#[derive(Debug, Clone)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

/// Mean price for one calendar month, derived from the daily samples
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPoint {
    /// Sort key in "YYYY-MM" form
    pub key: String,
    /// Axis label in "Mon YYYY" form
    pub label: String,
    pub avg_price: f64,
}
