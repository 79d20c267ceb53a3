use anyhow::Result;
use tracing::info;

use localized_api::{
    api::{self, AppState},
    config::Config,
    db::Database,
    i18n::{Locale, MessageCatalog},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("localized_api=info".parse()?),
        )
        .init();

    info!("Starting localized API server");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Open the backing store
    let db = Database::connect(&config.database_url).await?;
    info!("Connected to database at {}", config.database_url);

    // Message catalog and default locale are fixed for the process lifetime
    let catalog = MessageCatalog::builtin(Locale::new(&config.default_locale));
    info!("Default locale: {}", catalog.default_locale());

    let state = AppState::new(db, catalog);
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Listening on port {}", config.port);
    axum::serve(listener, app).await?;

    Ok(())
}
