use std::time::Duration;

use axum::Router;
use common::say::SayClient;
use configs::AppConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, SayState};
use service::prices::PriceStore;

/// Build the price service router from configuration.
pub fn prices_app(cfg: &AppConfig) -> Router {
    let store = PriceStore::from_config(&cfg.prices);
    info!(
        id_strategy = ?store.id_strategy(),
        seeded = cfg.prices.seed,
        "price store initialised"
    );
    routes::build_prices_router(store, routes::build_cors())
}

/// Build the relay router from configuration.
pub fn say_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let client = SayClient::new(&cfg.say.function_url, Duration::from_secs(cfg.say.timeout_secs))
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let state = SayState { client, default_keyword: cfg.say.default_keyword.clone() };
    Ok(routes::build_say_router(state, routes::build_cors()))
}

async fn bind(addr: &str) -> Result<TcpListener, StartupError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

async fn serve(listener: TcpListener, app: Router) -> Result<(), StartupError> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StartupError::Any(e.into()))
}

/// Run the price service until Ctrl+C.
pub async fn run_prices(cfg: AppConfig) -> Result<(), StartupError> {
    let app = prices_app(&cfg);
    let addr = cfg.server.bind_addr();
    let listener = bind(&addr).await?;
    info!(%addr, docs = routes::DOCS_PATH, "price service listening");
    serve(listener, app).await
}

/// Run the relay service until Ctrl+C.
pub async fn run_say(cfg: AppConfig) -> Result<(), StartupError> {
    let app = say_app(&cfg)?;
    let addr = cfg.say.bind_addr();
    let listener = bind(&addr).await?;
    info!(%addr, function_url = %cfg.say.function_url, "say relay listening");
    serve(listener, app).await
}
