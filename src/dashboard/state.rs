//! Controller state for the dashboard
//!
//! All mutation happens on the event loop; spawned fetch tasks only report
//! back through [`FetchOutcome`] messages. Every fetch carries a generation
//! number so an out-of-order completion can never overwrite newer state.

use chrono::{DateTime, Local};
use tracing::debug;

use crate::models::{AssetQuote, MonthlyPoint, PredictionSet};

/// Everything a completed refresh cycle hands back to the controller
#[derive(Debug)]
pub struct RefreshData {
    pub quotes: Vec<AssetQuote>,
    /// None when the prediction service failed; `warning` explains it
    pub predictions: Option<PredictionSet>,
    pub warning: Option<String>,
}

/// Message from a spawned fetch task back to the event loop
#[derive(Debug)]
pub enum FetchOutcome {
    Refresh {
        generation: u64,
        result: Result<RefreshData, String>,
    },
    History {
        generation: u64,
        asset_id: String,
        result: Result<Vec<MonthlyPoint>, String>,
    },
}

/// State of the open chart overlay
#[derive(Debug)]
pub struct ChartView {
    pub asset_id: String,
    pub asset_name: String,
    pub loading: bool,
    pub monthly: Vec<MonthlyPoint>,
    pub error: Option<String>,
    pub snapshot_note: Option<String>,
    generation: u64,
}

/// UI-ready state owned by the event loop
#[derive(Debug)]
pub struct DashboardState {
    pub quotes: Vec<AssetQuote>,
    pub predictions: Option<PredictionSet>,
    pub loading: bool,
    pub refreshing: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Local>>,
    pub chart: Option<ChartView>,
    next_generation: u64,
    applied_refresh_generation: u64,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            quotes: Vec::new(),
            predictions: None,
            loading: true,
            refreshing: false,
            error: None,
            last_updated: None,
            chart: None,
            next_generation: 0,
            applied_refresh_generation: 0,
        }
    }

    /// Start a refresh cycle; the returned generation must accompany the outcome
    pub fn begin_refresh(&mut self) -> u64 {
        self.error = None;
        self.refreshing = true;
        self.next_generation += 1;
        self.next_generation
    }

    /// Open the chart overlay for an asset and start its history fetch
    pub fn begin_chart(&mut self, asset_id: String, asset_name: String) -> u64 {
        self.next_generation += 1;
        self.chart = Some(ChartView {
            asset_id,
            asset_name,
            loading: true,
            monthly: Vec::new(),
            error: None,
            snapshot_note: None,
            generation: self.next_generation,
        });
        self.next_generation
    }

    /// Dismiss the chart overlay, discarding its fetched data
    pub fn close_chart(&mut self) {
        self.chart = None;
    }

    /// Apply a fetch outcome, dropping anything stale
    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Refresh { generation, result } => {
                if generation < self.applied_refresh_generation {
                    debug!("Dropping stale refresh result (generation {})", generation);
                    return;
                }
                self.applied_refresh_generation = generation;
                self.refreshing = false;
                self.loading = false;

                match result {
                    Ok(data) => {
                        self.quotes = data.quotes;
                        self.predictions = data.predictions;
                        self.error = data.warning;
                        self.last_updated = Some(Local::now());
                    }
                    Err(message) => {
                        // Quotes from the previous cycle stay on screen
                        self.error = Some(message);
                    }
                }
            }
            FetchOutcome::History {
                generation,
                asset_id,
                result,
            } => {
                let Some(chart) = self.chart.as_mut() else {
                    debug!("Dropping history result for {}: chart closed", asset_id);
                    return;
                };
                if chart.generation != generation || chart.asset_id != asset_id {
                    debug!("Dropping history result for {}: selection changed", asset_id);
                    return;
                }

                chart.loading = false;
                match result {
                    Ok(points) => chart.monthly = points,
                    Err(message) => chart.error = Some(message),
                }
            }
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn quote(id: &str, price: f64) -> AssetQuote {
        AssetQuote {
            id: id.to_string(),
            name: id.to_string(),
            symbol: id.to_uppercase(),
            current_price: price,
            price_change_24h: 0.0,
            price_change_percentage_24h: 0.0,
        }
    }

    fn predictions(pairs: &[(&str, f64)]) -> PredictionSet {
        let map: HashMap<String, f64> =
            pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        PredictionSet::new(map)
    }

    #[test]
    fn successful_refresh_populates_state_and_clears_flags() {
        let mut state = DashboardState::new();
        let generation = state.begin_refresh();
        assert!(state.refreshing);

        state.apply(FetchOutcome::Refresh {
            generation,
            result: Ok(RefreshData {
                quotes: vec![quote("bitcoin", 50000.0), quote("ethereum", 3000.0)],
                predictions: Some(predictions(&[("bitcoin", 52000.0)])),
                warning: None,
            }),
        });

        assert_eq!(state.quotes.len(), 2);
        assert!(!state.loading);
        assert!(!state.refreshing);
        assert!(state.error.is_none());
        assert!(state.last_updated.is_some());
        assert_eq!(
            state.predictions.as_ref().and_then(|p| p.price_for("bitcoin")),
            Some(52000.0)
        );
    }

    #[test]
    fn prediction_failure_keeps_quotes_and_sets_warning() {
        let mut state = DashboardState::new();
        let generation = state.begin_refresh();

        state.apply(FetchOutcome::Refresh {
            generation,
            result: Ok(RefreshData {
                quotes: vec![quote("bitcoin", 50000.0)],
                predictions: None,
                warning: Some("Unable to fetch predictions. Displaying live prices only.".to_string()),
            }),
        });

        assert_eq!(state.quotes.len(), 1);
        assert!(state.predictions.is_none());
        let banner = state.error.as_deref().unwrap();
        assert!(banner.contains("predictions"));
    }

    #[test]
    fn fatal_refresh_failure_retains_previous_quotes() {
        let mut state = DashboardState::new();
        let first = state.begin_refresh();
        state.apply(FetchOutcome::Refresh {
            generation: first,
            result: Ok(RefreshData {
                quotes: vec![quote("bitcoin", 50000.0)],
                predictions: None,
                warning: None,
            }),
        });
        let stamp = state.last_updated;

        let second = state.begin_refresh();
        state.apply(FetchOutcome::Refresh {
            generation: second,
            result: Err("Failed to fetch cryptocurrency data. Please try again.".to_string()),
        });

        assert_eq!(state.quotes.len(), 1);
        assert!(!state.refreshing);
        assert!(state.error.as_deref().unwrap().contains("try again"));
        assert_eq!(state.last_updated, stamp);
    }

    #[test]
    fn stale_refresh_result_is_dropped() {
        let mut state = DashboardState::new();
        let slow = state.begin_refresh();
        let fast = state.begin_refresh();

        state.apply(FetchOutcome::Refresh {
            generation: fast,
            result: Ok(RefreshData {
                quotes: vec![quote("bitcoin", 51000.0)],
                predictions: None,
                warning: None,
            }),
        });

        // The older cycle completes afterwards; its data must not win
        state.apply(FetchOutcome::Refresh {
            generation: slow,
            result: Ok(RefreshData {
                quotes: vec![quote("bitcoin", 49000.0)],
                predictions: None,
                warning: None,
            }),
        });

        assert_eq!(state.quotes[0].current_price, 51000.0);
    }

    #[test]
    fn history_applies_only_to_the_current_selection() {
        let mut state = DashboardState::new();
        let generation = state.begin_chart("bitcoin".to_string(), "Bitcoin".to_string());

        state.apply(FetchOutcome::History {
            generation,
            asset_id: "bitcoin".to_string(),
            result: Ok(vec![MonthlyPoint {
                key: "2025-07".to_string(),
                label: "Jul 2025".to_string(),
                avg_price: 48000.0,
            }]),
        });

        let chart = state.chart.as_ref().unwrap();
        assert!(!chart.loading);
        assert_eq!(chart.monthly.len(), 1);
    }

    #[test]
    fn history_for_a_superseded_selection_is_dropped() {
        let mut state = DashboardState::new();
        let old = state.begin_chart("bitcoin".to_string(), "Bitcoin".to_string());
        let _new = state.begin_chart("ethereum".to_string(), "Ethereum".to_string());

        state.apply(FetchOutcome::History {
            generation: old,
            asset_id: "bitcoin".to_string(),
            result: Ok(vec![MonthlyPoint {
                key: "2025-07".to_string(),
                label: "Jul 2025".to_string(),
                avg_price: 48000.0,
            }]),
        });

        let chart = state.chart.as_ref().unwrap();
        assert_eq!(chart.asset_id, "ethereum");
        assert!(chart.loading);
        assert!(chart.monthly.is_empty());
    }

    #[test]
    fn history_after_dismiss_is_dropped() {
        let mut state = DashboardState::new();
        let generation = state.begin_chart("bitcoin".to_string(), "Bitcoin".to_string());
        state.close_chart();

        state.apply(FetchOutcome::History {
            generation,
            asset_id: "bitcoin".to_string(),
            result: Err("Failed to load chart data".to_string()),
        });

        assert!(state.chart.is_none());
    }

    #[test]
    fn history_error_surfaces_in_the_chart_view() {
        let mut state = DashboardState::new();
        let generation = state.begin_chart("bitcoin".to_string(), "Bitcoin".to_string());

        state.apply(FetchOutcome::History {
            generation,
            asset_id: "bitcoin".to_string(),
            result: Err("Failed to load chart data".to_string()),
        });

        let chart = state.chart.as_ref().unwrap();
        assert!(!chart.loading);
        assert_eq!(chart.error.as_deref(), Some("Failed to load chart data"));
    }
}
