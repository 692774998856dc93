//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella nel database.

pub mod alert;
pub mod chat_message;
pub mod document;
pub mod enums;
pub mod hs_code;
pub mod refresh_token;
pub mod shipment;
pub mod tracking_event;
pub mod user;

// Re-exports per facilitare l'import
pub use alert::Alert;
pub use chat_message::ChatMessage;
pub use document::Document;
pub use enums::{AlertSeverity, ChatSender, ShipmentStatus, UserRole};
pub use hs_code::HsCode;
pub use refresh_token::RefreshToken;
pub use shipment::Shipment;
pub use tracking_event::TrackingEvent;
pub use user::User;
