use customsflow::auth::AuthKeys;
use customsflow::config::Config;
use customsflow::{AppState, create_router};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Inizializza il logging (RUST_LOG per il filtro, default info)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Carica la configurazione dalle variabili d'ambiente
    let config = Config::from_env()?;
    config.print_info();

    // Crea il pool di connessioni e applica le migrazioni
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!().run(&pool).await?;

    // Costruisce lo stato condiviso e il router
    let state = Arc::new(AppState::new(pool, AuthKeys::from_config(&config)));
    let app = create_router(state).layer(CorsLayer::permissive());

    // Avvia il server
    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
