//! Alert entity - Avviso regolatorio

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::AlertSeverity;

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Alert {
    pub alert_id: i64,
    pub title: String,
    pub body: String,
    pub severity: AlertSeverity,
    // None = avviso globale, Some(ISO-2) = specifico per paese
    pub country: Option<String>,
    pub active: bool,
    pub published_at: DateTime<Utc>,
}
