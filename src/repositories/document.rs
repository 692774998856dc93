//! DocumentRepository - Documenti doganali allegati alle spedizioni

use super::Delete;
use crate::entities::Document;
use chrono::Utc;
use sqlx::{Error, SqlitePool};

const DOCUMENT_COLUMNS: &str =
    "document_id, shipment_id, file_name, content_type, content, uploaded_by, created_at";

// DOCUMENT REPO
pub struct DocumentRepository {
    connection_pool: SqlitePool,
}

impl DocumentRepository {
    pub fn new(connection_pool: SqlitePool) -> DocumentRepository {
        Self { connection_pool }
    }

    /// Salva un nuovo documento (contenuto gia' decodificato dal base64)
    pub async fn insert(
        &self,
        shipment_id: &i64,
        file_name: &str,
        content_type: &str,
        content: &[u8],
        uploaded_by: &i64,
    ) -> Result<Document, Error> {
        let result = sqlx::query(
            "INSERT INTO documents (shipment_id, file_name, content_type, content, uploaded_by, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(shipment_id)
        .bind(file_name)
        .bind(content_type)
        .bind(content)
        .bind(uploaded_by)
        .bind(Utc::now())
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();

        let document = sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE document_id = ?"
        ))
        .bind(new_id)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(document)
    }

    /// Lettura completa, contenuto incluso (per il download)
    pub async fn read(&self, document_id: &i64) -> Result<Option<Document>, Error> {
        let document = sqlx::query_as::<_, Document>(&format!(
            "SELECT {DOCUMENT_COLUMNS} FROM documents WHERE document_id = ?"
        ))
        .bind(document_id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(document)
    }

    /// Lista dei documenti della spedizione, SENZA caricare i blob
    /// (x'' e' il blob vuoto di SQLite)
    pub async fn list_by_shipment(&self, shipment_id: &i64) -> Result<Vec<Document>, Error> {
        let documents = sqlx::query_as::<_, Document>(
            "SELECT document_id, shipment_id, file_name, content_type, x'' AS content, \
             uploaded_by, created_at \
             FROM documents WHERE shipment_id = ? ORDER BY created_at DESC, document_id DESC",
        )
        .bind(shipment_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(documents)
    }
}

impl Delete<i64> for DocumentRepository {
    async fn delete(&self, document_id: &i64) -> Result<(), Error> {
        sqlx::query("DELETE FROM documents WHERE document_id = ?")
            .bind(document_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }
}
