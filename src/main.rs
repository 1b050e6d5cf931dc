// SPDX-License-Identifier: MIT

//! TEAMe API Server
//!
//! Social login through LINE, team and PDCA-cycle storage in Firestore,
//! and a GraphQL API for the TEAMe digital practice notebook.

use std::sync::Arc;
use teame_api::{
    config::Config,
    db::FirestoreDb,
    graphql,
    services::{FileStore, LineClient},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting TEAMe API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id)
        .await
        .expect("Failed to connect to Firestore");

    let line = LineClient::new(&config);
    let files = FileStore::new(db.clone());
    let schema = graphql::build_schema(db.clone(), line.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        line,
        files,
        schema,
    });

    // Build router
    let app = teame_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("teame_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
