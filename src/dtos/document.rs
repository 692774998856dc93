//! Document DTOs - Data Transfer Objects per i documenti doganali
//!
//! Il contenuto binario viaggia come base64 nel JSON; nelle liste `data`
//! resta vuoto (solo metadati).

use crate::entities::Document;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct DocumentDTO {
    pub document_id: i64,
    pub shipment_id: i64,
    pub file_name: String,
    pub content_type: String,
    pub uploaded_by: i64,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl From<Document> for DocumentDTO {
    // conversione per le liste: solo metadati, niente contenuto
    fn from(value: Document) -> Self {
        Self {
            document_id: value.document_id,
            shipment_id: value.shipment_id,
            file_name: value.file_name,
            content_type: value.content_type,
            uploaded_by: value.uploaded_by,
            created_at: value.created_at,
            data: None,
        }
    }
}

impl DocumentDTO {
    /// Conversione per il download: include il contenuto in base64
    pub fn with_content(value: Document) -> Self {
        let data = BASE64.encode(&value.content);
        let mut dto = Self::from(value);
        dto.data = Some(data);
        dto
    }
}

/// DTO per l'upload di un documento
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct UploadDocumentDTO {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[validate(length(min = 1, max = 100))]
    pub content_type: String,
    /// Contenuto del file, base64
    pub data: String,
}
