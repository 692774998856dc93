//! Query DTOs - Data Transfer Objects per query parameters

use serde::{Deserialize, Serialize};

/// DTO per query parameters di ricerca nella nomenclatura HS
#[derive(Serialize, Deserialize, Debug)]
pub struct HsCodeSearchQuery {
    pub search: String,
}

/// DTO per query parameters di filtro degli avvisi
#[derive(Serialize, Deserialize, Debug)]
pub struct AlertsQuery {
    #[serde(default)]
    pub country: Option<String>,
}

/// DTO per query parameters dello storico chat
#[derive(Serialize, Deserialize, Debug)]
pub struct ChatHistoryQuery {
    #[serde(default)]
    pub limit: Option<i64>,
}
