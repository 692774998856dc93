//! Document services - Documenti doganali allegati alle spedizioni
//!
//! Il controllo di accesso e' lo stesso della spedizione: chi puo' vedere
//! la spedizione puo' vedere i suoi documenti (middleware a monte).

use crate::core::{AppError, AppState};
use crate::dtos::{DocumentDTO, UploadDocumentDTO};
use crate::entities::{Shipment, User};
use crate::repositories::Delete;
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Dimensione massima di un documento decodificato
const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

#[instrument(skip(state, current_user, shipment, body), fields(shipment_id = %shipment.shipment_id))]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Extension(shipment): Extension<Shipment>,
    Json(body): Json<UploadDocumentDTO>, // JSON body
) -> Result<(StatusCode, Json<DocumentDTO>), AppError> {
    debug!("Uploading document");
    // 1. Validare nome file e content type
    // 2. Decodificare il base64; payload malformato -> 400
    // 3. Rifiutare contenuti oltre il limite
    // 4. Salvare e ritornare 201 con i metadati

    body.validate()?;

    let content = BASE64.decode(&body.data).map_err(|_| {
        warn!("Document upload with malformed base64 payload");
        AppError::bad_request("Document data is not valid base64")
    })?;

    if content.is_empty() {
        return Err(AppError::bad_request("Document must not be empty"));
    }

    if content.len() > MAX_DOCUMENT_BYTES {
        warn!(
            "Document upload of {} bytes exceeds the limit",
            content.len()
        );
        return Err(AppError::bad_request("Document exceeds the 5 MiB limit"));
    }

    let document = state
        .document
        .insert(
            &shipment.shipment_id,
            &body.file_name,
            &body.content_type,
            &content,
            &current_user.user_id,
        )
        .await?;

    info!(
        "Document {} uploaded to shipment {}",
        document.document_id, shipment.shipment_id
    );
    Ok((StatusCode::CREATED, Json(DocumentDTO::from(document))))
}

#[instrument(skip(state, shipment), fields(shipment_id = %shipment.shipment_id))]
pub async fn list_documents(
    State(state): State<Arc<AppState>>,
    Extension(shipment): Extension<Shipment>, // ottenuto dal middleware di accesso
) -> Result<Json<Vec<DocumentDTO>>, AppError> {
    debug!("Listing documents");
    let documents = state.document.list_by_shipment(&shipment.shipment_id).await?;

    Ok(Json(documents.into_iter().map(DocumentDTO::from).collect()))
}

#[instrument(skip(state, shipment), fields(shipment_id = %shipment.shipment_id))]
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Extension(shipment): Extension<Shipment>,
    Path((_, document_id)): Path<(i64, i64)>, // estratti dal path della request
) -> Result<Json<DocumentDTO>, AppError> {
    debug!("Fetching document");
    let document = state
        .document
        .read(&document_id)
        .await?
        // un documento di un'altra spedizione non esiste, per questo path
        .filter(|document| document.shipment_id == shipment.shipment_id)
        .ok_or_else(|| AppError::not_found("Document not found"))?;

    Ok(Json(DocumentDTO::with_content(document)))
}

#[instrument(skip(state, shipment), fields(shipment_id = %shipment.shipment_id))]
pub async fn delete_document(
    State(state): State<Arc<AppState>>,
    Extension(shipment): Extension<Shipment>,
    Path((_, document_id)): Path<(i64, i64)>, // estratti dal path della request
) -> Result<StatusCode, AppError> {
    debug!("Deleting document");
    state
        .document
        .read(&document_id)
        .await?
        .filter(|document| document.shipment_id == shipment.shipment_id)
        .ok_or_else(|| AppError::not_found("Document not found"))?;

    state.document.delete(&document_id).await?;

    info!("Document {} deleted", document_id);
    Ok(StatusCode::NO_CONTENT)
}
