//! TrackingEventRepository - Eventi di tracking, append-only

use crate::entities::{ShipmentStatus, TrackingEvent};
use chrono::Utc;
use sqlx::{Error, SqlitePool};

const EVENT_COLUMNS: &str = "event_id, shipment_id, status, location, notes, created_at";

// TRACKING EVENT REPO
pub struct TrackingEventRepository {
    connection_pool: SqlitePool,
}

impl TrackingEventRepository {
    pub fn new(connection_pool: SqlitePool) -> TrackingEventRepository {
        Self { connection_pool }
    }

    /// Appende un evento alla storia della spedizione. Gli eventi non si
    /// aggiornano ne' si cancellano mai.
    pub async fn append(
        &self,
        shipment_id: &i64,
        status: &ShipmentStatus,
        location: Option<&str>,
        notes: Option<&str>,
    ) -> Result<TrackingEvent, Error> {
        let result = sqlx::query(
            "INSERT INTO tracking_events (shipment_id, status, location, notes, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(shipment_id)
        .bind(status)
        .bind(location)
        .bind(notes)
        .bind(Utc::now())
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();

        let event = sqlx::query_as::<_, TrackingEvent>(&format!(
            "SELECT {EVENT_COLUMNS} FROM tracking_events WHERE event_id = ?"
        ))
        .bind(new_id)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(event)
    }

    /// Storia della spedizione, dal piu' recente al piu' vecchio
    pub async fn list_by_shipment(&self, shipment_id: &i64) -> Result<Vec<TrackingEvent>, Error> {
        let events = sqlx::query_as::<_, TrackingEvent>(&format!(
            "SELECT {EVENT_COLUMNS} FROM tracking_events WHERE shipment_id = ? \
             ORDER BY created_at DESC, event_id DESC"
        ))
        .bind(shipment_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(events)
    }
}
