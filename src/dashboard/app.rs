//! Terminal lifecycle and event loop
//!
//! A single-threaded loop multiplexes the redraw tick, the 60-second poll
//! interval and the channel of fetch outcomes. Network work runs in spawned
//! tasks so the interface never blocks on it.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedSender};
use tracing::{debug, info};

use crate::api::{CoinGeckoClient, PredictorClient};
use crate::dashboard::state::{DashboardState, FetchOutcome, RefreshData};
use crate::dashboard::ui;
use crate::services::{chart_service, history_service, market_service, prediction_service};

/// How often the dashboard re-polls the market data API
const POLL_INTERVAL: Duration = Duration::from_secs(60);
/// Redraw and input cadence
const TICK_INTERVAL: Duration = Duration::from_millis(100);

const SNAPSHOT_WIDTH: u32 = 1200;
const SNAPSHOT_HEIGHT: u32 = 700;

/// Run the dashboard until the user quits
pub async fn run(market: CoinGeckoClient, predictor: PredictorClient) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, market, predictor).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    market: CoinGeckoClient,
    predictor: PredictorClient,
) -> io::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = DashboardState::new();

    // The first tick fires immediately and covers the initial load
    let mut poll = tokio::time::interval(POLL_INTERVAL);
    let mut tick = tokio::time::interval(TICK_INTERVAL);

    loop {
        tokio::select! {
            _ = poll.tick() => {
                debug!("Poll interval elapsed, starting refresh cycle");
                let generation = state.begin_refresh();
                spawn_refresh(market.clone(), predictor.clone(), generation, tx.clone());
            }
            Some(outcome) = rx.recv() => {
                state.apply(outcome);
            }
            _ = tick.tick() => {
                if drain_input(&mut state, &market, &predictor, &tx)? {
                    info!("Quit requested");
                    return Ok(());
                }
                terminal.draw(|f| ui::draw(f, &state))?;
            }
        }
    }
}

/// Handle all pending keyboard input; true means quit
fn drain_input(
    state: &mut DashboardState,
    market: &CoinGeckoClient,
    predictor: &PredictorClient,
    tx: &UnboundedSender<FetchOutcome>,
) -> io::Result<bool> {
    while event::poll(Duration::ZERO)? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if handle_key(state, market, predictor, tx, key) {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

fn handle_key(
    state: &mut DashboardState,
    market: &CoinGeckoClient,
    predictor: &PredictorClient,
    tx: &UnboundedSender<FetchOutcome>,
    key: KeyEvent,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Esc => state.close_chart(),
        KeyCode::Char('r') => {
            // No second manual cycle while one is already running
            if !state.refreshing {
                info!("Manual refresh requested");
                let generation = state.begin_refresh();
                spawn_refresh(market.clone(), predictor.clone(), generation, tx.clone());
            }
        }
        KeyCode::Char('s') => {
            if let Some(chart) = state.chart.as_mut() {
                if !chart.monthly.is_empty() {
                    chart.snapshot_note = Some(
                        match chart_service::save_snapshot(
                            &chart.asset_id,
                            &chart.asset_name,
                            &chart.monthly,
                            SNAPSHOT_WIDTH,
                            SNAPSHOT_HEIGHT,
                        ) {
                            Ok(path) => format!("Saved {}", path),
                            Err(message) => message,
                        },
                    );
                }
            }
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            if let Some(quote) = state.quotes.get(index) {
                let asset_id = quote.id.clone();
                let asset_name = quote.name.clone();
                debug!("Opening chart for {}", asset_id);
                let generation = state.begin_chart(asset_id.clone(), asset_name);
                spawn_history(market.clone(), generation, asset_id, tx.clone());
            }
        }
        _ => {}
    }
    false
}

fn spawn_refresh(
    market: CoinGeckoClient,
    predictor: PredictorClient,
    generation: u64,
    tx: UnboundedSender<FetchOutcome>,
) {
    tokio::spawn(async move {
        let result = run_refresh(&market, &predictor).await;
        // The loop may have shut down; nothing left to notify then
        let _ = tx.send(FetchOutcome::Refresh { generation, result });
    });
}

/// One refresh cycle: quotes are fatal, predictions are advisory
async fn run_refresh(
    market: &CoinGeckoClient,
    predictor: &PredictorClient,
) -> Result<RefreshData, String> {
    let quotes = market_service::fetch_quotes(market).await?;

    match prediction_service::fetch_predictions(predictor, &quotes).await {
        Ok(predictions) => Ok(RefreshData {
            quotes,
            predictions: Some(predictions),
            warning: None,
        }),
        Err(warning) => Ok(RefreshData {
            quotes,
            predictions: None,
            warning: Some(warning),
        }),
    }
}

fn spawn_history(
    market: CoinGeckoClient,
    generation: u64,
    asset_id: String,
    tx: UnboundedSender<FetchOutcome>,
) {
    tokio::spawn(async move {
        let result = history_service::fetch_history(&market, &asset_id)
            .await
            .map(|points| {
                let monthly = history_service::aggregate_monthly(&points);
                if let (Some(first), Some(last)) = (monthly.first(), monthly.last()) {
                    debug!(
                        "Aggregated {} months for {} ({} to {})",
                        monthly.len(),
                        asset_id,
                        first.key,
                        last.key
                    );
                }
                monthly
            });
        let _ = tx.send(FetchOutcome::History {
            generation,
            asset_id,
            result,
        });
    });
}
