//! Shipment services - Ciclo di vita delle spedizioni e tracking

use crate::core::auth::require_admin;
use crate::core::{AppError, AppState};
use crate::dtos::{
    CreateShipmentDTO, CreateTrackingEventDTO, NewShipmentRecord, ShipmentDTO, TrackingEventDTO,
    TrackingInfoDTO, UpdateShipmentDTO,
};
use crate::entities::{Shipment, ShipmentStatus, User, UserRole};
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::repositories::{Create, Update};

/// Genera un tracking number univoco, leggibile e non enumerabile
fn generate_tracking_number() -> String {
    let uuid = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("CF-{}", &uuid[..12])
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn create_shipment(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<CreateShipmentDTO>, // JSON body
) -> Result<(StatusCode, Json<ShipmentDTO>), AppError> {
    debug!("Creating shipment");
    // 1. Validare il DTO (country ISO-2, valori non negativi)
    // 2. Generare il tracking number lato server
    // 3. Inserire la spedizione in stato PENDING
    // 4. Appendere il primo evento di tracking
    // 5. Ritornare 201 con la spedizione

    body.validate()?;

    let record = NewShipmentRecord {
        owner_id: current_user.user_id,
        tracking_number: generate_tracking_number(),
        origin_country: body.origin_country,
        destination_country: body.destination_country,
        description: body.description,
        declared_value: body.declared_value,
        weight_kg: body.weight_kg,
    };

    let shipment = state.shipment.create(&record).await?;

    state
        .tracking
        .append(
            &shipment.shipment_id,
            &ShipmentStatus::Pending,
            None,
            Some("Shipment registered"),
        )
        .await?;

    info!(
        "Shipment {} created with tracking number {}",
        shipment.shipment_id, shipment.tracking_number
    );
    Ok((StatusCode::CREATED, Json(ShipmentDTO::from(shipment))))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn list_shipments(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
) -> Result<Json<Vec<ShipmentDTO>>, AppError> {
    debug!("Listing shipments");
    // L'admin vede tutto, il customer solo le proprie
    let shipments = match current_user.role {
        UserRole::Admin => state.shipment.list_all().await?,
        UserRole::Customer => state.shipment.list_by_owner(&current_user.user_id).await?,
    };

    Ok(Json(shipments.into_iter().map(ShipmentDTO::from).collect()))
}

#[instrument(skip(shipment), fields(shipment_id = %shipment.shipment_id))]
pub async fn get_shipment(
    Extension(shipment): Extension<Shipment>, // ottenuto dal middleware di accesso
) -> Json<ShipmentDTO> {
    debug!("Fetching shipment");
    Json(ShipmentDTO::from(shipment))
}

#[instrument(skip(state, shipment, body), fields(shipment_id = %shipment.shipment_id))]
pub async fn update_shipment(
    State(state): State<Arc<AppState>>,
    Extension(shipment): Extension<Shipment>,
    Json(body): Json<UpdateShipmentDTO>, // JSON body
) -> Result<Json<ShipmentDTO>, AppError> {
    debug!("Updating shipment");
    // Una spedizione si modifica solo finche' e' PENDING: dopo, i dati
    // dichiarati sono quelli presentati in dogana
    body.validate()?;

    if shipment.status != ShipmentStatus::Pending {
        warn!(
            "Update rejected for shipment {} in status {:?}",
            shipment.shipment_id, shipment.status
        );
        return Err(AppError::conflict(
            "Only pending shipments can be modified",
        ));
    }

    let updated = state.shipment.update(&shipment.shipment_id, &body).await?;

    info!("Shipment {} updated", updated.shipment_id);
    Ok(Json(ShipmentDTO::from(updated)))
}

#[instrument(skip(state, current_user, shipment), fields(shipment_id = %shipment.shipment_id))]
pub async fn cancel_shipment(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Extension(shipment): Extension<Shipment>,
) -> Result<Json<ShipmentDTO>, AppError> {
    debug!("Cancelling shipment");
    // 1. Gia' cancellata: idempotente, si ritorna lo stato corrente
    // 2. Il customer puo' annullare solo spedizioni ancora PENDING;
    //    l'admin da qualunque stato non terminale
    // 3. Il cambio di stato lascia traccia nella storia di tracking

    if shipment.status == ShipmentStatus::Cancelled {
        return Ok(Json(ShipmentDTO::from(shipment)));
    }

    if shipment.status == ShipmentStatus::Delivered {
        warn!("Cancel rejected for delivered shipment {}", shipment.shipment_id);
        return Err(AppError::conflict("A delivered shipment cannot be cancelled"));
    }

    if current_user.role != UserRole::Admin && shipment.status != ShipmentStatus::Pending {
        warn!(
            "Cancel rejected for shipment {} in status {:?}",
            shipment.shipment_id, shipment.status
        );
        return Err(AppError::conflict(
            "Only pending shipments can be cancelled",
        ));
    }

    let updated = state
        .shipment
        .set_status(&shipment.shipment_id, &ShipmentStatus::Cancelled)
        .await?;

    state
        .tracking
        .append(
            &updated.shipment_id,
            &ShipmentStatus::Cancelled,
            None,
            Some("Shipment cancelled"),
        )
        .await?;

    info!("Shipment {} cancelled", updated.shipment_id);
    Ok(Json(ShipmentDTO::from(updated)))
}

#[instrument(skip(state, shipment), fields(shipment_id = %shipment.shipment_id))]
pub async fn list_tracking_events(
    State(state): State<Arc<AppState>>,
    Extension(shipment): Extension<Shipment>, // ottenuto dal middleware di accesso
) -> Result<Json<Vec<TrackingEventDTO>>, AppError> {
    debug!("Listing tracking events");
    let events = state.tracking.list_by_shipment(&shipment.shipment_id).await?;

    Ok(Json(events.into_iter().map(TrackingEventDTO::from).collect()))
}

#[instrument(skip(state, current_user, shipment, body), fields(shipment_id = %shipment.shipment_id))]
pub async fn add_tracking_event(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Extension(shipment): Extension<Shipment>,
    Json(body): Json<CreateTrackingEventDTO>, // JSON body
) -> Result<(StatusCode, Json<TrackingEventDTO>), AppError> {
    debug!("Adding tracking event");
    // 1. Solo l'admin muove le spedizioni
    // 2. Gli stati terminali chiudono la storia
    // 3. L'evento si appende E lo stato della spedizione si allinea

    require_admin(&current_user)?;
    body.validate()?;

    if matches!(
        shipment.status,
        ShipmentStatus::Delivered | ShipmentStatus::Cancelled
    ) {
        warn!(
            "Tracking event rejected for shipment {} in terminal status {:?}",
            shipment.shipment_id, shipment.status
        );
        return Err(AppError::conflict(
            "Shipment is in a terminal status",
        ));
    }

    let event = state
        .tracking
        .append(
            &shipment.shipment_id,
            &body.status,
            body.location.as_deref(),
            body.notes.as_deref(),
        )
        .await?;

    state
        .shipment
        .set_status(&shipment.shipment_id, &body.status)
        .await?;

    info!(
        "Tracking event {} appended to shipment {}",
        event.event_id, shipment.shipment_id
    );
    Ok((StatusCode::CREATED, Json(TrackingEventDTO::from(event))))
}

/// Endpoint pubblico: chiunque abbia il tracking number vede lo stato,
/// mai i dati del proprietario
#[instrument(skip(state))]
pub async fn track_by_number(
    State(state): State<Arc<AppState>>,
    Path(tracking_number): Path<String>, // estratto dal path della request
) -> Result<Json<TrackingInfoDTO>, AppError> {
    debug!("Public tracking lookup");
    let shipment = state
        .shipment
        .find_by_tracking_number(&tracking_number)
        .await?
        .ok_or_else(|| AppError::not_found("No shipment found for this tracking number"))?;

    let events = state.tracking.list_by_shipment(&shipment.shipment_id).await?;

    Ok(Json(TrackingInfoDTO {
        tracking_number: shipment.tracking_number,
        status: shipment.status,
        origin_country: shipment.origin_country,
        destination_country: shipment.destination_country,
        events: events.into_iter().map(TrackingEventDTO::from).collect(),
    }))
}
