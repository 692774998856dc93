//! Shipment entity - Entità spedizione

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::ShipmentStatus;

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Shipment {
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
