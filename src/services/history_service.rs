use chrono::{DateTime, Datelike, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, error};

use crate::api::coingecko::CoinGeckoClient;
use crate::models::{MonthlyPoint, PricePoint};

/// Fetch one year of daily price samples for an asset, sorted by timestamp
pub async fn fetch_history(
    client: &CoinGeckoClient,
    asset_id: &str,
) -> Result<Vec<PricePoint>, String> {
    let chart = client.fetch_market_chart(asset_id).await.map_err(|e| {
        error!("Historical data fetch failed for {}: {}", asset_id, e);
        "Failed to load chart data".to_string()
    })?;

    let mut points: Vec<PricePoint> = chart
        .prices
        .into_iter()
        .filter_map(|(timestamp_ms, price)| {
            DateTime::from_timestamp_millis(timestamp_ms)
                .map(|timestamp| PricePoint { timestamp, price })
        })
        .collect();

    // Samples arrive oldest-first from the API, but the chart depends on it
    points.sort_by_key(|p| p.timestamp);

    debug!("Fetched {} daily samples for {}", points.len(), asset_id);
    Ok(points)
}

/// Collapse daily samples into the arithmetic mean per calendar month
///
/// Output is chronological; keying by (year, month) makes the map ordering
/// and the chart ordering the same thing.
pub fn aggregate_monthly(points: &[PricePoint]) -> Vec<MonthlyPoint> {
    let mut by_month: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();

    for point in points {
        let key = (point.timestamp.year(), point.timestamp.month());
        by_month.entry(key).or_default().push(point.price);
    }

    by_month
        .into_iter()
        .map(|((year, month), prices)| {
            let avg_price = prices.iter().sum::<f64>() / prices.len() as f64;
            let label = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_else(|| format!("{:04}-{:02}", year, month));
            MonthlyPoint {
                key: format!("{:04}-{:02}", year, month),
                label,
                avg_price,
            }
        })
        .collect()
}
