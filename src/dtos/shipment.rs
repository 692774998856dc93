//! Shipment DTOs - Data Transfer Objects per spedizioni e tracking

use crate::entities::{Shipment, ShipmentStatus, TrackingEvent};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref COUNTRY_CODE_RE: Regex = Regex::new("^[A-Z]{2}$").expect("valid regex literal");
}

/// Struct per gestire io col client
#[derive(Serialize, Deserialize, Debug)]
pub struct ShipmentDTO {
    pub shipment_id: i64,
    pub owner_id: i64,
    pub tracking_number: String,
    pub origin_country: String,
    pub destination_country: String,
    pub description: String,
    pub declared_value: f64,
    pub weight_kg: f64,
    pub status: ShipmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Shipment> for ShipmentDTO {
    fn from(value: Shipment) -> Self {
        Self {
            shipment_id: value.shipment_id,
            owner_id: value.owner_id,
            tracking_number: value.tracking_number,
            origin_country: value.origin_country,
            destination_country: value.destination_country,
            description: value.description,
            declared_value: value.declared_value,
            weight_kg: value.weight_kg,
            status: value.status,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// DTO per creare una nuova spedizione (tracking number e status li assegna il server)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateShipmentDTO {
    #[validate(regex(path = *COUNTRY_CODE_RE, message = "must be an ISO-2 country code"))]
    pub origin_country: String,
    #[validate(regex(path = *COUNTRY_CODE_RE, message = "must be an ISO-2 country code"))]
    pub destination_country: String,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub declared_value: f64,
    #[validate(range(min = 0.0))]
    pub weight_kg: f64,
}

/// DTO interno per l'inserimento (owner e tracking number assegnati dal service)
#[derive(Debug, Clone)]
pub struct NewShipmentRecord {
    pub owner_id: i64,
    pub tracking_number: String,
    pub origin_country: String,
    pub destination_country: String,
    pub description: String,
    pub declared_value: f64,
    pub weight_kg: f64,
}

/// DTO per l'aggiornamento parziale di una spedizione ancora PENDING
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct UpdateShipmentDTO {
    #[validate(length(min = 1, max = 500))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub declared_value: Option<f64>,
    #[validate(range(min = 0.0))]
    pub weight_kg: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TrackingEventDTO {
    pub event_id: i64,
    pub shipment_id: i64,
    pub status: ShipmentStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<TrackingEvent> for TrackingEventDTO {
    fn from(value: TrackingEvent) -> Self {
        Self {
            event_id: value.event_id,
            shipment_id: value.shipment_id,
            status: value.status,
            location: value.location,
            notes: value.notes,
            created_at: value.created_at,
        }
    }
}

/// DTO per appendere un evento di tracking (solo admin)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateTrackingEventDTO {
    pub status: ShipmentStatus,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

/// Vista pubblica del tracking: niente dati del proprietario
#[derive(Serialize, Deserialize, Debug)]
pub struct TrackingInfoDTO {
    pub tracking_number: String,
    pub status: ShipmentStatus,
    pub origin_country: String,
    pub destination_country: String,
    pub events: Vec<TrackingEventDTO>,
}
