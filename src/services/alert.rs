//! Alert services - Avvisi regolatori

use crate::core::auth::require_admin;
use crate::core::{AppError, AppState};
use crate::dtos::{AlertDTO, AlertsQuery, CreateAlertDTO};
use crate::entities::User;
use axum::{
    Extension,
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

#[instrument(skip(state))]
pub async fn list_alerts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AlertsQuery>, // query parameters
) -> Result<Json<Vec<AlertDTO>>, AppError> {
    debug!("Listing active alerts");
    // Il filtro per paese include sempre gli avvisi globali (country NULL)
    let alerts = state.alert.list_active(query.country.as_deref()).await?;

    Ok(Json(alerts.into_iter().map(AlertDTO::from).collect()))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn create_alert(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateAlertDTO>, // JSON body
) -> Result<(StatusCode, Json<AlertDTO>), AppError> {
    debug!("Publishing alert");
    require_admin(&current_user)?;
    body.validate()?;

    let alert = state.alert.insert(&body).await?;

    info!("Alert {} published", alert.alert_id);
    Ok((StatusCode::CREATED, Json(AlertDTO::from(alert))))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn deactivate_alert(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(alert_id): Path<i64>, // estratto dal path della request
) -> Result<StatusCode, AppError> {
    debug!("Deactivating alert");
    require_admin(&current_user)?;

    // idempotente: disattivare un avviso gia' inattivo non e' un errore
    state.alert.deactivate(&alert_id).await?;

    info!("Alert {} deactivated", alert_id);
    Ok(StatusCode::NO_CONTENT)
}
