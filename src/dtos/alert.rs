//! Alert DTOs - Data Transfer Objects per gli avvisi regolatori

use crate::entities::{Alert, AlertSeverity};
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

lazy_static! {
    static ref COUNTRY_CODE_RE: Regex = Regex::new("^[A-Z]{2}$").expect("valid regex literal");
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AlertDTO {
    pub alert_id: i64,
    pub title: String,
    pub body: String,
    pub severity: AlertSeverity,
    pub country: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl From<Alert> for AlertDTO {
    fn from(value: Alert) -> Self {
        Self {
            alert_id: value.alert_id,
            title: value.title,
            body: value.body,
            severity: value.severity,
            country: value.country,
            published_at: value.published_at,
        }
    }
}

/// DTO per pubblicare un nuovo avviso (solo admin)
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct CreateAlertDTO {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub body: String,
    pub severity: AlertSeverity,
    #[validate(regex(path = *COUNTRY_CODE_RE, message = "must be an ISO-2 country code"))]
    pub country: Option<String>,
}
