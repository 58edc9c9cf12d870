use std::sync::Arc;

use moodful_recs::{
    api::{create_router, AppState},
    config::Config,
    services::HttpCatalogProvider,
    store::JsonFileRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodful_recs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Initialize application state
    let repository = Arc::new(JsonFileRepository::open(&config.data_dir).await?);
    let catalog_provider = Arc::new(HttpCatalogProvider::from_config(&config)?);
    let bind_addr = config.bind_addr();
    let state = AppState::new(repository, catalog_provider, config);

    // Create the router with all routes
    let app = create_router(state);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
