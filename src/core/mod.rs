//! Core Module - Componenti infrastrutturali dell'applicazione
//!
//! Questo modulo contiene tutti i componenti "core" dell'applicazione:
//! - Autenticazione, emissione e verifica dei token JWT
//! - Configurazione
//! - Gestione errori
//! - Stato applicazione

pub mod auth;
pub mod config;
pub mod error;
pub mod state;

// Re-exports per facilitare l'import
pub use auth::{
    AuthKeys, Claims, TokenType, authentication_middleware, shipment_access_middleware,
};
pub use config::Config;
pub use error::AppError;
pub use state::AppState;
