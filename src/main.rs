use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod dashboard;
mod models;
mod services;
mod utils;

use api::{CoinGeckoClient, PredictorClient};

const LOG_FILE: &str = "coindeck.log";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv::dotenv().ok();

    // The terminal belongs to the UI, so tracing goes to a file
    let log_file = std::fs::File::create(LOG_FILE).expect("Failed to create log file");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("coindeck=debug".parse().unwrap()),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    info!("📈 Starting Coindeck...");
    info!("  ==========================================================");
    info!("   C O I N D E C K");
    info!("   Real-time crypto prices with ML-powered predictions");
    info!("  ==========================================================");
    info!("");

    let market = match std::env::var("COINGECKO_API_URL") {
        Ok(url) => {
            info!("Using market data API at {}", url);
            CoinGeckoClient::with_base_url(url)
        }
        Err(_) => CoinGeckoClient::new(),
    };

    let predictor = match std::env::var("PREDICTION_API_URL") {
        Ok(url) => {
            info!("Using prediction service at {}", url);
            PredictorClient::with_base_url(url)
        }
        Err(_) => PredictorClient::new(),
    };

    // Advisory probe only; the dashboard runs either way
    match predictor.health().await {
        Ok(health) => info!("Prediction service reachable (status: {})", health.status),
        Err(e) => warn!("Prediction service not reachable at startup: {}", e),
    }

    if let Err(e) = dashboard::run(market, predictor).await {
        error!("Dashboard error: {}", e);
    }
}
