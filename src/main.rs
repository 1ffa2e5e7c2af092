use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use listing_scout::api::{router, ApiState};
use listing_scout::config::Config;
use listing_scout::error::Result;
use listing_scout::fetcher::build_client;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    if cfg.api_key_configured() {
        info!("Upstream listings API: {} (province={})", cfg.listings_api_url, cfg.province);
    } else {
        warn!("REPLIERS_API_KEY not set; /api/properties will return a configuration error");
    }

    let client = build_client()?;
    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let app = router(ApiState {
        cfg: Arc::new(cfg),
        client,
    });

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("HTTP API listening on {bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
