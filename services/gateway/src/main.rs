mod config;
mod error;
mod handlers;
mod models;
mod router;
mod state;

use config::GatewayConfig;
use router::create_router;
use scoring_engine::config::ScoringData;
use scoring_engine::session::Session;
use state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use types::catalog::MetricCatalog;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    tracing::info!("Starting CVSS calculator gateway");

    let config = GatewayConfig::from_env()?;

    let data = match &config.scoring_data {
        Some(path) => ScoringData::from_path(path)?,
        None => {
            tracing::warn!(
                "CVSS_SCORING_DATA not set, only selections without impact can be scored"
            );
            ScoringData::default()
        }
    };

    let mut session = Session::new(Arc::new(MetricCatalog::cvss_v4()), Arc::new(data));
    session.subscribe(|event| {
        tracing::debug!(
            session_id = %event.session_id,
            kind = ?event.kind,
            vector = %event.vector,
            macro_vector = %event.macro_vector,
            "Session event"
        );
    });

    let app = create_router(AppState::new(session));

    // Bind and serve
    let listener = TcpListener::bind(config.bind_addr).await?;

    tracing::info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
