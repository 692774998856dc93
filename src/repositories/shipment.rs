//! ShipmentRepository - Repository per la gestione delle spedizioni

use super::{Create, Read, Update};
use crate::dtos::{NewShipmentRecord, UpdateShipmentDTO};
use crate::entities::{Shipment, ShipmentStatus};
use chrono::Utc;
use sqlx::{Error, SqlitePool};

const SHIPMENT_COLUMNS: &str = "shipment_id, owner_id, tracking_number, origin_country, \
     destination_country, description, declared_value, weight_kg, status, created_at, updated_at";

// SHIPMENT REPO
pub struct ShipmentRepository {
    connection_pool: SqlitePool,
}

impl ShipmentRepository {
    pub fn new(connection_pool: SqlitePool) -> ShipmentRepository {
        Self { connection_pool }
    }

    /// Lookup pubblico per il tracking: il tracking number e' univoco
    pub async fn find_by_tracking_number(
        &self,
        tracking_number: &str,
    ) -> Result<Option<Shipment>, Error> {
        let shipment = sqlx::query_as::<_, Shipment>(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments WHERE tracking_number = ?"
        ))
        .bind(tracking_number)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(shipment)
    }

    /// Tutte le spedizioni dell'utente, le piu' recenti per prime
    pub async fn list_by_owner(&self, owner_id: &i64) -> Result<Vec<Shipment>, Error> {
        let shipments = sqlx::query_as::<_, Shipment>(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments WHERE owner_id = ? \
             ORDER BY created_at DESC, shipment_id DESC"
        ))
        .bind(owner_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(shipments)
    }

    /// Tutte le spedizioni (vista admin)
    pub async fn list_all(&self) -> Result<Vec<Shipment>, Error> {
        let shipments = sqlx::query_as::<_, Shipment>(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments ORDER BY created_at DESC, shipment_id DESC"
        ))
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(shipments)
    }

    /// Cambia lo stato della spedizione e ritorna la riga aggiornata
    pub async fn set_status(
        &self,
        shipment_id: &i64,
        status: &ShipmentStatus,
    ) -> Result<Shipment, Error> {
        sqlx::query("UPDATE shipments SET status = ?, updated_at = ? WHERE shipment_id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(shipment_id)
            .execute(&self.connection_pool)
            .await?;

        self.read(shipment_id).await?.ok_or(Error::RowNotFound)
    }
}

impl Create<Shipment, NewShipmentRecord> for ShipmentRepository {
    async fn create(&self, data: &NewShipmentRecord) -> Result<Shipment, Error> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO shipments (owner_id, tracking_number, origin_country, destination_country, \
             description, declared_value, weight_kg, status, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(data.owner_id)
        .bind(&data.tracking_number)
        .bind(&data.origin_country)
        .bind(&data.destination_country)
        .bind(&data.description)
        .bind(data.declared_value)
        .bind(data.weight_kg)
        .bind(ShipmentStatus::Pending)
        .bind(now)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();

        self.read(&new_id).await?.ok_or(Error::RowNotFound)
    }
}

impl Read<Shipment, i64> for ShipmentRepository {
    async fn read(&self, id: &i64) -> Result<Option<Shipment>, Error> {
        let shipment = sqlx::query_as::<_, Shipment>(&format!(
            "SELECT {SHIPMENT_COLUMNS} FROM shipments WHERE shipment_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(shipment)
    }
}

impl Update<Shipment, UpdateShipmentDTO, i64> for ShipmentRepository {
    async fn update(&self, id: &i64, data: &UpdateShipmentDTO) -> Result<Shipment, Error> {
        // COALESCE: i campi None lasciano il valore esistente
        sqlx::query(
            "UPDATE shipments SET \
                description = COALESCE(?, description), \
                declared_value = COALESCE(?, declared_value), \
                weight_kg = COALESCE(?, weight_kg), \
                updated_at = ? \
             WHERE shipment_id = ?",
        )
        .bind(&data.description)
        .bind(data.declared_value)
        .bind(data.weight_kg)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}
