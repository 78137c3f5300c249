//! Data models shared across the data client, services and dashboard
//!
//! Each model represents one of the record shapes flowing from the external
//! APIs into the rendered state.

pub mod history;
pub mod prediction;
pub mod quote;

// Re-export commonly used types for convenience
pub use history::{MonthlyPoint, PricePoint};
pub use prediction::PredictionSet;
pub use quote::AssetQuote;
