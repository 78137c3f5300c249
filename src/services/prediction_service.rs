use std::collections::HashMap;
use tracing::{debug, warn};

use crate::api::predictor::PredictorClient;
use crate::models::{AssetQuote, PredictionSet};

/// Build the id -> current price payload the prediction service expects
pub fn build_payload(quotes: &[AssetQuote]) -> HashMap<String, f64> {
    quotes
        .iter()
        .map(|q| (q.id.clone(), q.current_price))
        .collect()
}

/// Request predicted prices for the given quotes
///
/// Failure here is advisory: the caller keeps rendering live quotes and
/// surfaces the returned message as a warning.
pub async fn fetch_predictions(
    client: &PredictorClient,
    quotes: &[AssetQuote],
) -> Result<PredictionSet, String> {
    let payload = build_payload(quotes);

    let response = client.predict(&payload).await.map_err(|e| {
        warn!("Prediction fetch failed: {}", e);
        "Unable to fetch predictions. Displaying live prices only.".to_string()
    })?;

    debug!("Received {} predictions", response.predictions.len());
    Ok(PredictionSet::new(response.predictions))
}
