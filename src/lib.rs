//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
};
use std::sync::Arc;

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    use services::*;

    Router::new()
        .route("/", get(root))
        .route("/tracking/{tracking_number}", get(track_by_number))
        .nest("/auth", configure_auth_routes())
        .nest("/users", configure_user_routes(state.clone()))
        .nest("/shipments", configure_shipment_routes(state.clone()))
        .nest("/tariff", configure_tariff_routes(state.clone()))
        .nest("/hs-codes", configure_hs_code_routes(state.clone()))
        .nest("/alerts", configure_alert_routes(state.clone()))
        .nest("/chat", configure_chat_routes(state.clone()))
        .with_state(state)
}

/// Configura le routes di autenticazione (register, login, refresh, logout)
fn configure_auth_routes() -> Router<Arc<AppState>> {
    use services::*;
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/refresh", post(refresh_tokens))
        .route("/logout", post(logout_user))
}

/// Configura le routes per la gestione del profilo utente
fn configure_user_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route(
            "/me",
            get(get_my_profile)
                .patch(update_my_profile)
                .delete(delete_my_account),
        )
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes per la gestione delle spedizioni
fn configure_shipment_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::{authentication_middleware, shipment_access_middleware};
    use services::*;

    // Rotte sulla collezione: basta l'autenticazione
    let collection_routes = Router::new()
        .route("/", get(list_shipments).post(create_shipment))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authentication_middleware,
        ));

    // Rotte sulla singola spedizione: autenticazione + controllo di accesso
    // (proprietario o admin), che carica la spedizione nelle extensions
    // DELETE su una spedizione = annullamento (soft): la riga e la sua
    // storia di tracking restano
    let item_routes = Router::new()
        .route(
            "/{shipment_id}",
            get(get_shipment)
                .patch(update_shipment)
                .delete(cancel_shipment),
        )
        .route(
            "/{shipment_id}/events",
            get(list_tracking_events).post(add_tracking_event),
        )
        .route(
            "/{shipment_id}/documents",
            get(list_documents)
                .post(upload_document)
                // Un file da 5 MiB diventa ~6,9 MB in base64: alziamo il limite
                // del body oltre il default di 2 MB, così il controllo di
                // MAX_DOCUMENT_BYTES nel servizio può rispondere 400
                .layer(DefaultBodyLimit::max(8 * 1024 * 1024)),
        )
        .route(
            "/{shipment_id}/documents/{document_id}",
            get(get_document).delete(delete_document),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            shipment_access_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ));

    collection_routes.merge(item_routes)
}

/// Configura le routes del calcolatore tariffario
fn configure_tariff_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/estimate", post(estimate_tariff))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes della nomenclatura HS
fn configure_hs_code_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(search_hs_codes))
        .route("/{code}", get(get_hs_code))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes degli avvisi regolatori
fn configure_alert_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_alerts).post(create_alert))
        .route("/{alert_id}", delete(deactivate_alert))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}

/// Configura le routes della chat assistita
fn configure_chat_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/messages", get(get_chat_history).post(send_chat_message))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
