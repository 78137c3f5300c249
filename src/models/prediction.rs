//! Price prediction models

use std::collections::HashMap;

/// Predicted prices keyed by asset id, as returned by the prediction service
#[derive(Debug, Clone, Default)]
pub struct PredictionSet {
    predictions: HashMap<String, f64>,
}

impl PredictionSet {
    pub fn new(predictions: HashMap<String, f64>) -> Self {
        Self { predictions }
    }

    /// Predicted price for an asset, if the model produced one
    pub fn price_for(&self, asset_id: &str) -> Option<f64> {
        self.predictions.get(asset_id).copied()
    }
}
