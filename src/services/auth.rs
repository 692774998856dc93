//! Auth services - Registrazione, login, refresh e logout
//!
//! Il refresh implementa l'unica vera macchina a stati del sistema:
//! `active -> revoked`, monotona e a senso unico. Un token consumato o
//! revocato non autorizza mai piu' un refresh.

use crate::core::auth::{TokenType, decode_token, issue_token_pair, mint_token_pair};
use crate::core::{AppError, AppState};
use crate::dtos::{CreateUserDTO, LoginDTO, RefreshRequestDTO, RegisterUserDTO, TokenPairDTO, UserDTO};
use crate::entities::{User, UserRole};
use crate::repositories::{Create, Read};
use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use lazy_static::lazy_static;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

lazy_static! {
    // hash fittizio: il confronto bcrypt gira anche quando l'email non
    // esiste, cosi' i due fallimenti del login costano uguale
    static ref DUMMY_PASSWORD_HASH: String =
        User::hash_password("not-a-real-password").expect("bcrypt hash of a static input");
}

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterUserDTO>, // JSON body
) -> Result<(StatusCode, Json<UserDTO>), AppError> {
    debug!("Registering new user");
    // 1. Validare il DTO con validator (formato email, lunghezza password)
    // 2. Controllare se esiste gia' un utente con la stessa email (anche soft-deleted)
    // 3. Se l'email e' occupata, ritornare errore CONFLICT
    // 4. Generare l'hash della password fornita
    // 5. Salvare il nuovo utente con ruolo CUSTOMER
    // 6. Ritornare 201 con il DTO pubblico (mai l'hash)

    body.validate()?;

    if state.user.find_by_email(&body.email).await?.is_some() {
        warn!("Registration attempted with an email already in use");
        return Err(AppError::conflict("Email already registered"));
    }

    let password_hash = User::hash_password(&body.password)?;

    let new_user = CreateUserDTO {
        email: body.email,
        password_hash,
        first_name: body.first_name,
        last_name: body.last_name,
        role: UserRole::Customer,
    };

    let created_user = state.user.create(&new_user).await?;

    info!("User {} registered", created_user.user_id);
    Ok((StatusCode::CREATED, Json(UserDTO::from(created_user))))
}

#[instrument(skip(state, body), fields(email = %body.email))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginDTO>, // JSON body
) -> Result<Json<TokenPairDTO>, AppError> {
    debug!("Login attempt");
    // 1. Cercare l'utente per email
    // 2. Email sconosciuta, utente cancellato o password errata: stessa
    //    risposta 401, il client non distingue i casi
    // 3. Su successo, coniare la coppia access+refresh e registrare il
    //    refresh nel ledger
    // 4. Ritornare la coppia nel body JSON

    let user = state.user.find_by_email(&body.email).await?;

    let user = match user {
        Some(user) if !user.deleted => user,
        _ => {
            // confronto a vuoto: il percorso "email sconosciuta" paga
            // comunque una verifica bcrypt
            let _ = bcrypt::verify(&body.password, &DUMMY_PASSWORD_HASH);
            warn!("Login failed: unknown or deleted user");
            return Err(AppError::unauthorized("Invalid email or password"));
        }
    };

    if !user.verify_password(&body.password) {
        warn!("Login failed: wrong password for user {}", user.user_id);
        return Err(AppError::unauthorized("Invalid email or password"));
    }

    let pair = issue_token_pair(&state, &user).await?;

    info!("User {} logged in", user.user_id);
    Ok(Json(pair))
}

#[instrument(skip(state, body))]
pub async fn refresh_tokens(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RefreshRequestDTO>, // JSON body
) -> Result<Json<TokenPairDTO>, AppError> {
    debug!("Refresh attempt");
    // 1. Cercare la riga del ledger: token sconosciuto o gia' revocato -> 401
    // 2. Verificare firma, scadenza e discriminatore `refresh`; se la verifica
    //    fallisce, revocare la riga (revoca difensiva) e ritornare 401
    // 3. Controllare la coerenza riga/claims (stesso utente, riga non scaduta)
    // 4. Coniare la nuova coppia e ruotare: revoca del vecchio + insert del
    //    nuovo nella stessa transazione
    // 5. Ritornare la nuova coppia

    let row = state
        .refresh_token
        .find_by_token(&body.refresh_token)
        .await?
        .ok_or_else(|| {
            warn!("Refresh with unknown token");
            AppError::unauthorized("Invalid or revoked token")
        })?;

    if row.revoked {
        warn!("Refresh with revoked token {}", row.token_id);
        return Err(AppError::unauthorized("Invalid or revoked token"));
    }

    let claims = match decode_token(
        &body.refresh_token,
        &state.auth.refresh_secret,
        TokenType::Refresh,
    ) {
        Ok(claims) => claims,
        Err(err) => {
            // revoca difensiva: firma invalida o token scaduto, la riga
            // non deve mai piu' autorizzare un refresh
            warn!("Refresh token {} failed verification, revoking", row.token_id);
            let _ = state.refresh_token.revoke(&row.token_id).await;
            return Err(err);
        }
    };

    if !row.is_active() || claims.sub != row.user_id {
        warn!("Refresh token {} inconsistent with ledger, revoking", row.token_id);
        let _ = state.refresh_token.revoke(&row.token_id).await;
        return Err(AppError::unauthorized("Invalid or revoked token"));
    }

    let user = match state.user.read(&row.user_id).await? {
        Some(user) if !user.deleted => user,
        _ => {
            warn!("Refresh for missing or deleted user {}", row.user_id);
            let _ = state.refresh_token.revoke(&row.token_id).await;
            return Err(AppError::unauthorized("Invalid or revoked token"));
        }
    };

    let (pair, refresh_expires_at) = mint_token_pair(&state.auth, &user)?;

    state
        .refresh_token
        .rotate(
            &row.token_id,
            &user.user_id,
            &pair.refresh_token,
            &refresh_expires_at,
        )
        .await
        .map_err(|err| match err {
            // un'altra richiesta ha consumato il token un istante prima
            sqlx::Error::RowNotFound => {
                warn!("Refresh token {} consumed concurrently", row.token_id);
                AppError::unauthorized("Invalid or revoked token")
            }
            other => AppError::from(other),
        })?;

    info!("Rotated refresh token for user {}", user.user_id);
    Ok(Json(pair))
}

#[instrument(skip(state, body))]
pub async fn logout_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RefreshRequestDTO>, // JSON body
) -> StatusCode {
    debug!("Logout");
    // Best-effort: revoca la riga se esiste e non e' gia' revocata.
    // Token sconosciuto, gia' revocato o errore DB: per il chiamante il
    // logout e' comunque riuscito (204).
    match state.refresh_token.find_by_token(&body.refresh_token).await {
        Ok(Some(row)) if !row.revoked => {
            if let Err(err) = state.refresh_token.revoke(&row.token_id).await {
                warn!("Logout revocation failed for token {}: {:?}", row.token_id, err);
            } else {
                info!("Refresh token {} revoked on logout", row.token_id);
            }
        }
        Ok(_) => debug!("Logout with unknown or already revoked token"),
        Err(err) => warn!("Logout lookup failed: {:?}", err),
    }

    StatusCode::NO_CONTENT
}
