use axum::{
    routing::{get, post},
    Router,
};
use parking_lot::RwLock;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    compose_alert, feed_data, health_check, lake_dashboard, lake_details, list_lakes, AppState,
};
use crate::charts::ChartRegistry;
use crate::feed::{self, FeedSnapshot};

/// Where the measurement feed comes from.
#[derive(Debug, Clone, Default)]
pub enum FeedSource {
    /// One-shot HTTP GET of the JSON feed.
    Url(String),
    /// Local actual + forecast CSV files, concatenated in that order.
    CsvPair {
        actual: PathBuf,
        forecast: PathBuf,
    },
    /// No source configured; the dashboard serves its empty state.
    #[default]
    None,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub feed_source: FeedSource,
    pub authority_email: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            feed_source: FeedSource::None,
            authority_email: "water-authority@example.org".to_string(),
        }
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Raw feed, as the data provider shaped it
        .route("/api/data", get(feed_data))
        // Map markers and details panel
        .route("/api/lakes", get(list_lakes))
        .route("/api/lakes/:name", get(lake_details))
        // Derived dashboard payloads
        .route("/api/lakes/:name/dashboard", get(lake_dashboard))
        // Mail-alert composition
        .route("/api/alerts", post(compose_alert))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Load the session's feed snapshot. Any failure leaves the dashboard in its
/// empty state for the whole session; there is no retry.
async fn load_feed(source: &FeedSource) -> FeedSnapshot {
    let result = match source {
        FeedSource::Url(url) => feed::fetch(url).await,
        FeedSource::CsvPair { actual, forecast } => feed::load_csv_pair(actual, forecast),
        FeedSource::None => {
            tracing::warn!("no feed source configured; serving the empty state");
            return FeedSnapshot::empty();
        }
    };

    match result {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(error = %e, "feed unavailable; serving the empty state for this session");
            FeedSnapshot::empty()
        }
    }
}

/// Run the HTTP server
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let feed = load_feed(&config.feed_source).await;

    let state = Arc::new(AppState {
        feed,
        charts: RwLock::new(ChartRegistry::new()),
        authority_email: config.authority_email.clone(),
    });

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Starting Lakewatch server on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Lakewatch server stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");

    tracing::info!("Shutdown signal received");
}
