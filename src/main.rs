use std::sync::Arc;

use axum::Router;
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use scout_events_server::config::Config;
use scout_events_server::db::Database;
use scout_events_server::routes::create_routes;
use scout_events_server::AppState;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");

    let db = Database::connect(
        &config.database_url,
        config.db_max_connections,
        config.seed_options(),
    )
    .await
    .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    // Requests retry the initialization if it fails here.
    match db.ready().await {
        Ok(_) => tracing::info!("Schema ready"),
        Err(e) => tracing::warn!(error = %e, "Schema initialization deferred"),
    }

    let addr = config.bind_addr;
    let state = Arc::new(AppState::new(config, db));
    let app: Router = create_routes(state);

    tracing::info!("🚀 Server running at http://{}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
