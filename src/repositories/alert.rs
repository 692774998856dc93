//! AlertRepository - Avvisi regolatori

use crate::dtos::CreateAlertDTO;
use crate::entities::Alert;
use chrono::Utc;
use sqlx::{Error, SqlitePool};

const ALERT_COLUMNS: &str = "alert_id, title, body, severity, country, active, published_at";

// ALERT REPO
pub struct AlertRepository {
    connection_pool: SqlitePool,
}

impl AlertRepository {
    pub fn new(connection_pool: SqlitePool) -> AlertRepository {
        Self { connection_pool }
    }

    /// Pubblica un nuovo avviso
    pub async fn insert(&self, data: &CreateAlertDTO) -> Result<Alert, Error> {
        let result = sqlx::query(
            "INSERT INTO alerts (title, body, severity, country, active, published_at) \
             VALUES (?, ?, ?, ?, 1, ?)",
        )
        .bind(&data.title)
        .bind(&data.body)
        .bind(&data.severity)
        .bind(&data.country)
        .bind(Utc::now())
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();

        let alert = sqlx::query_as::<_, Alert>(&format!(
            "SELECT {ALERT_COLUMNS} FROM alerts WHERE alert_id = ?"
        ))
        .bind(new_id)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(alert)
    }

    /// Avvisi attivi, i piu' recenti per primi. Con un country filtra gli
    /// avvisi di quel paese piu' quelli globali (country NULL); senza filtro
    /// ritorna tutti gli attivi.
    pub async fn list_active(&self, country: Option<&str>) -> Result<Vec<Alert>, Error> {
        let alerts = match country {
            Some(country) => {
                sqlx::query_as::<_, Alert>(&format!(
                    "SELECT {ALERT_COLUMNS} FROM alerts \
                     WHERE active = 1 AND (country IS NULL OR country = ?) \
                     ORDER BY published_at DESC, alert_id DESC"
                ))
                .bind(country)
                .fetch_all(&self.connection_pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Alert>(&format!(
                    "SELECT {ALERT_COLUMNS} FROM alerts WHERE active = 1 \
                     ORDER BY published_at DESC, alert_id DESC"
                ))
                .fetch_all(&self.connection_pool)
                .await?
            }
        };

        Ok(alerts)
    }

    /// Disattiva un avviso (soft, idempotente)
    pub async fn deactivate(&self, alert_id: &i64) -> Result<(), Error> {
        sqlx::query("UPDATE alerts SET active = 0 WHERE alert_id = ?")
            .bind(alert_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }
}
