//! Lakewatch Server
//!
//! Run with: cargo run
//!
//! Environment variables:
//! - LAKEWATCH_HOST: Bind address (default: 0.0.0.0)
//! - LAKEWATCH_PORT: Port number (default: 8080)
//! - LAKEWATCH_FEED_URL: HTTP JSON feed to fetch once at startup
//! - LAKEWATCH_ACTUAL_CSV / LAKEWATCH_FORECAST_CSV: local CSV feed pair,
//!   used when no feed URL is set
//! - LAKEWATCH_AUTHORITY_EMAIL: recipient of composed water-quality alerts
//! - RUST_LOG: Log level (default: info)
//!
//! With no feed source configured (or when loading fails) the server still
//! runs and serves the dashboard's empty state for the whole session.

use lakewatch::api::{run_server, FeedSource, ServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lakewatch=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse configuration from environment
    let host = std::env::var("LAKEWATCH_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("LAKEWATCH_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);
    let authority_email = std::env::var("LAKEWATCH_AUTHORITY_EMAIL")
        .unwrap_or_else(|_| "water-authority@example.org".to_string());

    // Feed source: a URL wins over the CSV pair
    let feed_source = match std::env::var("LAKEWATCH_FEED_URL") {
        Ok(url) => FeedSource::Url(url),
        Err(_) => {
            let actual = std::env::var("LAKEWATCH_ACTUAL_CSV").ok();
            let forecast = std::env::var("LAKEWATCH_FORECAST_CSV").ok();
            match (actual, forecast) {
                (Some(actual), Some(forecast)) => FeedSource::CsvPair {
                    actual: actual.into(),
                    forecast: forecast.into(),
                },
                _ => FeedSource::None,
            }
        }
    };

    let config = ServerConfig {
        host,
        port,
        feed_source,
        authority_email,
    };

    tracing::info!("Lakewatch configuration:");
    tracing::info!("  Host: {}:{}", config.host, config.port);
    match &config.feed_source {
        FeedSource::Url(url) => tracing::info!("  Feed: {}", url),
        FeedSource::CsvPair { actual, forecast } => {
            tracing::info!("  Feed: {} + {}", actual.display(), forecast.display())
        }
        FeedSource::None => tracing::info!("  Feed: none (empty state)"),
    }
    tracing::info!("  Alert recipient: {}", config.authority_email);

    println!(
        r#"
  _       _                      _       _
 | | __ _| | _______      ____ _| |_ ___| |__
 | |/ _` | |/ / _ \ \ /\ / / _` | __/ __| '_ \
 | | (_| |   <  __/\ V  V / (_| | || (__| | | |
 |_|\__,_|_|\_\___| \_/\_/ \__,_|\__\___|_| |_|

 Lake Water-Quality Dashboard Service
 Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );

    run_server(config).await
}
