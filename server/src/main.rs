//! POS Server binary.

use pos_engine::Collection;
use pos_server::config::Config;
use pos_server::db::CollectionStore;
use pos_server::AppState;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pos_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    tracing::info!("Starting POS Server on {}:{}", config.host, config.port);

    // Prepare the data directory
    let store = CollectionStore::new(&config.data_dir);
    store
        .ensure_initialized(Collection::ALL.iter().map(|c| c.name()))
        .await?;
    tracing::info!("Data stored in {}", config.data_dir.display());

    let app = pos_server::app(AppState { store }, &config.static_dir);

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
