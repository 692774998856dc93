//! Configurazione - Caricamento da variabili d'ambiente
//!
//! Tutti i valori arrivano dall'ambiente (con dotenv come comodita' di
//! sviluppo). I segreti JWT hanno un default insicuro per lo sviluppo locale:
//! un deployment DEVE sovrascriverli, e il server lo segnala a voce alta.

use dotenv::dotenv;
use std::env;
use tracing::warn;

/// Default di sviluppo per i segreti: mai usare in produzione
pub const DEV_ACCESS_SECRET: &str = "dev-access-secret-change-me";
pub const DEV_REFRESH_SECRET: &str = "dev-refresh-secret-change-me";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub access_token_secret: String,
    pub refresh_token_secret: String,
    pub server_host: String,
    pub server_port: u16,
    pub max_connections: u32,
    pub app_env: String,
}

impl Config {
    /// Carica la configurazione dalle variabili d'ambiente
    /// Chiama dotenv() automaticamente
    pub fn from_env() -> Result<Self, String> {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL must be set in .env file".to_string())?;

        let access_token_secret = env::var("ACCESS_TOKEN_SECRET").unwrap_or_else(|_| {
            warn!("ACCESS_TOKEN_SECRET not set, using development default (not secure!)");
            DEV_ACCESS_SECRET.to_string()
        });

        let refresh_token_secret = env::var("REFRESH_TOKEN_SECRET").unwrap_or_else(|_| {
            warn!("REFRESH_TOKEN_SECRET not set, using development default (not secure!)");
            DEV_REFRESH_SECRET.to_string()
        });

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| "Invalid SERVER_PORT: must be a number between 0-65535".to_string())?;

        let max_connections = env::var("MAX_DB_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()
            .map_err(|_| "Invalid MAX_DB_CONNECTIONS: must be a positive number".to_string())?;

        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            database_url,
            access_token_secret,
            refresh_token_secret,
            server_host,
            server_port,
            max_connections,
            app_env,
        })
    }

    /// Stampa la configurazione (nascondendo i segreti)
    pub fn print_info(&self) {
        tracing::info!("Environment: {}", self.app_env);
        tracing::info!(
            "Server Address: {}:{}",
            self.server_host,
            self.server_port
        );
        tracing::info!("Database: {}", Self::mask_url(&self.database_url));
        tracing::info!("Max DB Connections: {}", self.max_connections);
        if self.access_token_secret == DEV_ACCESS_SECRET
            || self.refresh_token_secret == DEV_REFRESH_SECRET
        {
            warn!("JWT secrets: USING DEVELOPMENT DEFAULTS (INSECURE!)");
        } else {
            tracing::info!("JWT secrets: custom secrets configured");
        }
    }

    /// Maschera l'URL del database per il logging
    fn mask_url(url: &str) -> String {
        if let Some(at_pos) = url.find('@') {
            if let Some(scheme_end) = url.find("://") {
                let scheme = &url[..scheme_end + 3];
                let after_at = &url[at_pos..];
                return format!("{}***{}", scheme, after_at);
            }
        }
        url.to_string()
    }
}
