//! HS code services - Consultazione della nomenclatura doganale

use crate::core::{AppError, AppState};
use crate::dtos::{HsCodeDTO, HsCodeSearchQuery};
use axum::extract::{Json, Path, Query, State};
use std::sync::Arc;
use tracing::{debug, instrument};

#[instrument(skip(state))]
pub async fn search_hs_codes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HsCodeSearchQuery>, // query parameters
) -> Result<Json<Vec<HsCodeDTO>>, AppError> {
    debug!("Searching HS codes");
    // Ricerca vuota: nessun senso scansionare l'intera nomenclatura
    let term = query.search.trim();
    if term.is_empty() {
        return Err(AppError::bad_request("Search term must not be blank"));
    }

    let results = state.hs_code.search(term).await?;

    Ok(Json(results.into_iter().map(HsCodeDTO::from).collect()))
}

#[instrument(skip(state))]
pub async fn get_hs_code(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>, // estratto dal path della request
) -> Result<Json<HsCodeDTO>, AppError> {
    debug!("Fetching HS code");
    let hs_code = state
        .hs_code
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::not_found("HS code not found"))?;

    Ok(Json(HsCodeDTO::from(hs_code)))
}
