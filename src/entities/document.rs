//! Document entity - Documento doganale allegato a una spedizione

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct Document {
    pub document_id: i64,
    pub shipment_id: i64,
    pub file_name: String,
    pub content_type: String,
    // il contenuto resta nel DB; le liste lo caricano vuoto
    #[serde(skip_serializing)]
    pub content: Vec<u8>,
    pub uploaded_by: i64,
    pub created_at: DateTime<Utc>,
}
