//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.
//!
//! Nota su sqlx: le query usano l'API runtime (`sqlx::query_as::<_, T>` con
//! entity `#[derive(FromRow)]`) invece delle macro compile-time, cosi' il
//! crate compila senza un database raggiungibile. Placeholder posizionali `?`,
//! `execute` per INSERT/UPDATE/DELETE, `fetch_optional`/`fetch_all`/`fetch_one`
//! a seconda della cardinalita' attesa, e `await?` per propagare l'errore al
//! service che lo mappa sullo status HTTP adeguato.

// Dichiarazione dei sotto-moduli
pub mod alert;
pub mod chat_message;
pub mod document;
pub mod hs_code;
pub mod refresh_token;
pub mod shipment;
pub mod tracking_event;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use alert::AlertRepository;
pub use chat_message::ChatMessageRepository;
pub use document::DocumentRepository;
pub use hs_code::HsCodeRepository;
pub use refresh_token::RefreshTokenRepository;
pub use shipment::ShipmentRepository;
pub use tracking_event::TrackingEventRepository;
pub use user::UserRepository;
