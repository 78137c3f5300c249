pub mod format;

pub use format::{format_signed_pct, format_usd, prediction_delta_pct};
