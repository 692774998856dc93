//! TrackingEvent entity - Evento di tracking (append-only)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::ShipmentStatus;

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct TrackingEvent {
    pub event_id: i64,
    pub shipment_id: i64,
    pub status: ShipmentStatus,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
