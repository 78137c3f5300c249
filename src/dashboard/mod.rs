//! Dashboard controller and terminal presentation

pub mod app;
pub mod state;
pub mod ui;

pub use app::run;
pub use state::{DashboardState, FetchOutcome};
