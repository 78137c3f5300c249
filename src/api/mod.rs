//! HTTP clients for the external services
//!
//! Two independent clients: CoinGecko for public market data and the local
//! prediction service for model output. Both classify failures into the
//! shared [`ApiError`] type.

pub mod coingecko;
pub mod error;
pub mod predictor;

pub use coingecko::CoinGeckoClient;
pub use error::ApiError;
pub use predictor::PredictorClient;
