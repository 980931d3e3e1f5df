//! HTTP service boundary for the estimating core.
//!
//! Minimal JSON API, CORS-open:
//! - `GET /health` — liveness probe
//! - `POST /extract` — parsed document text in, candidate tasks out
//! - `POST /pricing/scrape` — pricing lookup; misses are data, not 5xx

mod handlers;
mod routes;

pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::Arc;

use crate::config::Settings;
use crate::extraction::RuleSet;
use crate::pricing;

/// Shared state for the web server. Everything here is read-only after
/// startup, so concurrent requests need no coordination.
#[derive(Clone)]
pub struct AppState {
    pub rules: Arc<RuleSet>,
    pub settings: Arc<Settings>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(settings: Settings, rules: RuleSet) -> Self {
        let http = pricing::build_client(&settings);
        Self {
            rules: Arc::new(rules),
            settings: Arc::new(settings),
            http,
        }
    }
}

/// Start the web server.
pub async fn serve(settings: Settings, rules: RuleSet, host: &str, port: u16) -> anyhow::Result<()> {
    let state = AppState::new(settings, rules);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
