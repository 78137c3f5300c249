use tracing::{debug, error};

use crate::api::coingecko::{CoinGeckoClient, MarketRow};
use crate::models::AssetQuote;

/// The fixed set of assets shown on the dashboard
pub const TRACKED_ASSETS: [&str; 4] = ["bitcoin", "ethereum", "litecoin", "tether"];

/// Map one raw market row into a quote
///
/// Symbols arrive lowercase from the API; the change fields can be null and
/// fall back to zero.
pub fn quote_from_row(row: MarketRow) -> AssetQuote {
    AssetQuote {
        id: row.id,
        name: row.name,
        symbol: row.symbol.to_uppercase(),
        current_price: row.current_price,
        price_change_24h: row.price_change_24h.unwrap_or(0.0),
        price_change_percentage_24h: row.price_change_percentage_24h.unwrap_or(0.0),
    }
}

/// Fetch fresh quotes for all tracked assets
///
/// This is the fatal path of a refresh cycle: on failure the dashboard shows
/// the returned message and keeps whatever it rendered last.
pub async fn fetch_quotes(client: &CoinGeckoClient) -> Result<Vec<AssetQuote>, String> {
    let rows = client.fetch_markets(&TRACKED_ASSETS).await.map_err(|e| {
        error!("Market data fetch failed: {}", e);
        "Failed to fetch cryptocurrency data. Please try again.".to_string()
    })?;

    debug!("Fetched {} market rows", rows.len());
    Ok(rows.into_iter().map(quote_from_row).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, symbol: &str, price: f64) -> MarketRow {
        MarketRow {
            id: id.to_string(),
            name: id.to_string(),
            symbol: symbol.to_string(),
            current_price: price,
            price_change_24h: Some(12.5),
            price_change_percentage_24h: Some(-1.2),
        }
    }

    #[test]
    fn quote_mapping_uppercases_symbol() {
        let quote = quote_from_row(row("bitcoin", "btc", 50000.0));
        assert_eq!(quote.symbol, "BTC");
        assert_eq!(quote.current_price, 50000.0);
        assert_eq!(quote.price_change_percentage_24h, -1.2);
    }

    #[test]
    fn quote_mapping_defaults_null_changes_to_zero() {
        let mut raw = row("tether", "usdt", 1.0);
        raw.price_change_24h = None;
        raw.price_change_percentage_24h = None;

        let quote = quote_from_row(raw);
        assert_eq!(quote.price_change_24h, 0.0);
        assert_eq!(quote.price_change_percentage_24h, 0.0);
    }
}
