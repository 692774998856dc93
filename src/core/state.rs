//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository, le chiavi di firma dei token e lo stato
//! condiviso necessario per gestire l'applicazione.

use crate::core::auth::AuthKeys;
use crate::repositories::{
    AlertRepository, ChatMessageRepository, DocumentRepository, HsCodeRepository,
    RefreshTokenRepository, ShipmentRepository, TrackingEventRepository, UserRepository,
};
use sqlx::SqlitePool;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti
    pub user: UserRepository,

    /// Repository per il ledger dei refresh token
    pub refresh_token: RefreshTokenRepository,

    /// Repository per la gestione delle spedizioni
    pub shipment: ShipmentRepository,

    /// Repository per gli eventi di tracking (append-only)
    pub tracking: TrackingEventRepository,

    /// Repository per la nomenclatura HS (sola lettura)
    pub hs_code: HsCodeRepository,

    /// Repository per i documenti doganali
    pub document: DocumentRepository,

    /// Repository per gli avvisi regolatori
    pub alert: AlertRepository,

    /// Repository per lo storico della chat assistita
    pub chat: ChatMessageRepository,

    /// Chiavi e durate per la firma dei token (iniettate alla costruzione,
    /// mai lette dall'ambiente a runtime: i test passano segreti deterministici)
    pub auth: AuthKeys,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito e le chiavi di firma.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni SQLite condiviso
    /// * `auth` - Chiavi segrete per la firma di access e refresh token
    ///
    /// # Returns
    /// Nuova istanza di AppState con tutti i repository inizializzati
    pub fn new(pool: SqlitePool, auth: AuthKeys) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            refresh_token: RefreshTokenRepository::new(pool.clone()),
            shipment: ShipmentRepository::new(pool.clone()),
            tracking: TrackingEventRepository::new(pool.clone()),
            hs_code: HsCodeRepository::new(pool.clone()),
            document: DocumentRepository::new(pool.clone()),
            alert: AlertRepository::new(pool.clone()),
            chat: ChatMessageRepository::new(pool),
            auth,
        }
    }
}
