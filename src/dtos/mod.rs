//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod alert;
pub mod auth;
pub mod chat;
pub mod document;
pub mod hs_code;
pub mod query;
pub mod shipment;
pub mod tariff;
pub mod user;

// Re-exports per facilitare l'import
pub use alert::{AlertDTO, CreateAlertDTO};
pub use auth::{LoginDTO, RefreshRequestDTO, TokenPairDTO};
pub use chat::{ChatExchangeDTO, ChatMessageDTO, ChatRequestDTO};
pub use document::{DocumentDTO, UploadDocumentDTO};
pub use hs_code::HsCodeDTO;
pub use query::{AlertsQuery, ChatHistoryQuery, HsCodeSearchQuery};
pub use shipment::{
    CreateShipmentDTO, CreateTrackingEventDTO, NewShipmentRecord, ShipmentDTO, TrackingEventDTO,
    TrackingInfoDTO, UpdateShipmentDTO,
};
pub use tariff::{TariffEstimateDTO, TariffEstimateRequestDTO};
pub use user::{CreateUserDTO, RegisterUserDTO, UpdateProfileDTO, UpdateUserDTO, UserDTO};
