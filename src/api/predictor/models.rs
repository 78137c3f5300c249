use serde::Deserialize;
use std::collections::HashMap;

/// Response from POST /predict_auto
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionResponse {
    pub predictions: HashMap<String, f64>,
}

/// Response from GET /health
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_response_deserializes_id_price_map() {
        let json = r#"{"predictions": {"bitcoin": 52000.0, "ethereum": 3100.5}}"#;

        let resp: PredictionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.predictions.len(), 2);
        assert_eq!(resp.predictions.get("bitcoin"), Some(&52000.0));
    }
}
