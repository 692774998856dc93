//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod alert;
pub mod auth;
pub mod chat;
pub mod document;
pub mod hs_code;
pub mod shipment;
pub mod tariff;
pub mod user;

// Re-exports per facilitare l'import
pub use alert::{create_alert, deactivate_alert, list_alerts};
pub use auth::{login_user, logout_user, refresh_tokens, register_user};
pub use chat::{get_chat_history, send_chat_message};
pub use document::{delete_document, get_document, list_documents, upload_document};
pub use hs_code::{get_hs_code, search_hs_codes};
pub use shipment::{
    add_tracking_event, cancel_shipment, create_shipment, get_shipment, list_shipments,
    list_tracking_events, track_by_number, update_shipment,
};
pub use tariff::estimate_tariff;
pub use user::{delete_my_account, get_my_profile, update_my_profile};

use crate::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
