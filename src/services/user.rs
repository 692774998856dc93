//! User services - Gestione del profilo utente

use crate::core::{AppError, AppState};
use crate::dtos::{UpdateProfileDTO, UpdateUserDTO, UserDTO};
use crate::entities::User;
use crate::repositories::{Delete, Update};
use axum::{
    Extension,
    extract::{Json, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(current_user), fields(user_id = %current_user.user_id))]
pub async fn get_my_profile(
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
) -> Json<UserDTO> {
    debug!("Fetching own profile");
    Json(UserDTO::from(current_user))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn update_my_profile(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<UpdateProfileDTO>, // JSON body
) -> Result<Json<UserDTO>, AppError> {
    debug!("Updating own profile");
    // 1. Validare il DTO (lunghezze, password nuova >= 8)
    // 2. Se c'e' una nuova password, pretendere e verificare quella corrente
    // 3. Aggiornare solo i campi forniti (COALESCE lato repository)
    // 4. Il cambio password revoca tutti i refresh token in circolazione
    // 5. Ritornare il profilo aggiornato

    body.validate()?;

    let mut update = UpdateUserDTO {
        first_name: body.first_name,
        last_name: body.last_name,
        password_hash: None,
    };

    if let Some(ref new_password) = body.new_password {
        let current_password = body.current_password.as_deref().ok_or_else(|| {
            warn!("Password change attempted without current password");
            AppError::bad_request("Current password is required to change password")
        })?;

        if !current_user.verify_password(current_password) {
            warn!("Password change attempted with wrong current password");
            return Err(AppError::unauthorized("Current password is not correct"));
        }

        update.password_hash = Some(User::hash_password(new_password)?);
    }

    let updated_user = state.user.update(&current_user.user_id, &update).await?;

    if update.password_hash.is_some() {
        // ogni sessione aperta deve ripassare dal login
        state
            .refresh_token
            .revoke_all_for_user(&current_user.user_id)
            .await?;
        info!("Password changed, all refresh tokens revoked");
    }

    info!("Profile updated");
    Ok(Json(UserDTO::from(updated_user)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn delete_my_account(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione tramite token jwt
) -> Result<StatusCode, AppError> {
    info!("User account deletion initiated");
    // 1. Soft delete: flag deleted + anonimizzazione del profilo, la riga resta
    // 2. Revocare tutti i refresh token: nessuna sessione sopravvive
    // 3. Ritornare 204

    state.user.delete(&current_user.user_id).await?;
    state
        .refresh_token
        .revoke_all_for_user(&current_user.user_id)
        .await?;

    info!("Account deleted successfully");
    Ok(StatusCode::NO_CONTENT)
}
