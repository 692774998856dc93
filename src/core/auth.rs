//! Autenticazione - Emissione e verifica dei token JWT, middleware
//!
//! Due classi di token firmate con segreti distinti: access (vita breve,
//! autorizza le richieste) e refresh (vita lunga, persistito nel ledger e
//! ruotato ad ogni uso). Il discriminatore `token_type` dentro il payload
//! firmato impedisce di riusare l'uno al posto dell'altro.

use crate::core::{AppError, AppState};
use crate::dtos::TokenPairDTO;
use crate::entities::{Shipment, User, UserRole};
use crate::repositories::Read;
use axum::extract::State;
use axum::{body::Body, extract::Request, http, http::Response, middleware::Next};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Durata dell'access token: 15 minuti
pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;
/// Durata del refresh token: 7 giorni
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Chiavi di firma, iniettate in AppState alla costruzione (mai lette
/// dall'ambiente dentro questo modulo: i test passano segreti deterministici)
#[derive(Debug, Clone)]
pub struct AuthKeys {
    pub access_secret: String,
    pub refresh_secret: String,
}

impl AuthKeys {
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
        }
    }

    pub fn from_config(config: &crate::core::Config) -> Self {
        Self::new(
            config.access_token_secret.clone(),
            config.refresh_token_secret.clone(),
        )
    }
}

/// Discriminatore di classe del token, dentro il payload firmato
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

// struct che codifica il contenuto del token jwt
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub exp: usize, // Expiry time of the token
    pub iat: usize, // Issued at time of the token
    pub sub: i64,   // user_id
    // jti univoco: exp/iat hanno granularita' al secondo, senza un nonce due
    // token coniati nello stesso secondo per lo stesso utente sarebbero
    // byte-identici e collidere sul vincolo UNIQUE del ledger
    pub jti: String,
    pub email: String,
    pub role: UserRole,
    pub token_type: TokenType,
}

#[instrument(skip(secret, user), fields(user_id = %user.user_id, token_type = ?token_type))]
pub fn encode_token(
    user: &User,
    token_type: TokenType,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    debug!("Encoding JWT token for user");
    let now = Utc::now();
    let claims = Claims {
        exp: (now + Duration::seconds(ttl_secs)).timestamp() as usize,
        iat: now.timestamp() as usize,
        sub: user.user_id,
        jti: Uuid::new_v4().to_string(),
        email: user.email.clone(),
        role: user.role.clone(),
        token_type,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| {
        error!("Failed to encode JWT token: {:?}", e);
        AppError::internal_server_error("Internal server error")
    })
}

/// Verifica firma e scadenza e controlla il discriminatore di classe.
/// Ogni fallimento e' un 401 indistinto: il client non deve sapere perche'.
#[instrument(skip(token, secret))]
pub fn decode_token(
    token: &str,
    secret: &str,
    expected_type: TokenType,
) -> Result<Claims, AppError> {
    debug!("Decoding JWT token");
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|e| {
        warn!("Failed to decode JWT token: {:?}", e);
        AppError::unauthorized("Invalid or expired token")
    })?;

    if data.claims.token_type != expected_type {
        warn!(
            "Token type mismatch: expected {:?}, got {:?}",
            expected_type, data.claims.token_type
        );
        return Err(AppError::unauthorized("Invalid or expired token"));
    }

    Ok(data.claims)
}

/// Conia una coppia access+refresh per l'utente, senza persistere nulla.
/// Ritorna anche la scadenza del refresh, da scrivere nel ledger.
pub fn mint_token_pair(
    keys: &AuthKeys,
    user: &User,
) -> Result<(TokenPairDTO, DateTime<Utc>), AppError> {
    let access_token = encode_token(user, TokenType::Access, &keys.access_secret, ACCESS_TOKEN_TTL_SECS)?;
    let refresh_token = encode_token(
        user,
        TokenType::Refresh,
        &keys.refresh_secret,
        REFRESH_TOKEN_TTL_SECS,
    )?;
    let refresh_expires_at = Utc::now() + Duration::seconds(REFRESH_TOKEN_TTL_SECS);

    Ok((
        TokenPairDTO {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: ACCESS_TOKEN_TTL_SECS,
        },
        refresh_expires_at,
    ))
}

/// Token issuer: conia la coppia e registra il refresh nel ledger.
/// Usato al login; la rotazione passa invece da `RefreshTokenRepository::rotate`
/// per revocare il vecchio e inserire il nuovo nella stessa transazione.
#[instrument(skip(state, user), fields(user_id = %user.user_id))]
pub async fn issue_token_pair(state: &AppState, user: &User) -> Result<TokenPairDTO, AppError> {
    let (pair, refresh_expires_at) = mint_token_pair(&state.auth, user)?;
    state
        .refresh_token
        .insert(&user.user_id, &pair.refresh_token, &refresh_expires_at)
        .await?;
    info!("Issued token pair for user");
    Ok(pair)
}

#[instrument(skip(state, req, next))]
pub async fn authentication_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running authentication middleware");
    let auth_header = match req.headers().get(http::header::AUTHORIZATION) {
        Some(header) => header.to_str().map_err(|_| {
            warn!("Invalid authorization header format");
            AppError::unauthorized("Invalid authorization header")
        })?,
        None => {
            warn!("Missing authorization header");
            return Err(AppError::unauthorized(
                "Please add the JWT token to the header",
            ));
        }
    };

    let mut header = auth_header.split_whitespace();
    let (scheme, token) = (header.next(), header.next());
    let token = match (scheme, token) {
        (Some("Bearer"), Some(token)) => token,
        _ => {
            warn!("Malformed authorization header");
            return Err(AppError::unauthorized("Invalid authorization header"));
        }
    };

    let claims = decode_token(token, &state.auth.access_secret, TokenType::Access)?;

    // Fetch the user details from the database
    let current_user = match state.user.read(&claims.sub).await? {
        Some(user) if !user.deleted => {
            info!("User authenticated: {}", user.email);
            user
        }
        _ => {
            warn!("User {} not found or deleted", claims.sub);
            return Err(AppError::unauthorized("You are not an authorized user"));
        }
    };
    req.extensions_mut().insert(current_user);
    // volendo si puo' recuperare lo user da Extension negli handler
    Ok(next.run(req).await)
}

/// Middleware che verifica che l'utente corrente possa operare sulla
/// spedizione specificata (proprietario oppure admin).
/// Estrae shipment_id dal path, carica la spedizione e la inserisce nell'Extension.
#[instrument(skip(state, req, next))]
pub async fn shipment_access_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response<Body>, AppError> {
    debug!("Running shipment access middleware");
    // 1. Ottenere l'utente corrente dall'Extension (inserito dall'authentication_middleware)
    let current_user = req
        .extensions()
        .get::<User>()
        .ok_or_else(|| {
            warn!("User not found in request extensions");
            AppError::unauthorized("User not authenticated")
        })?
        .clone();

    // 2. Estrarre shipment_id dal path (primo segmento numerico)
    let shipment_id: i64 = req
        .uri()
        .path()
        .split('/')
        .find_map(|segment| segment.parse::<i64>().ok())
        .ok_or_else(|| {
            warn!("Shipment ID not found in path: {}", req.uri().path());
            AppError::bad_request("Shipment ID not found in path")
        })?;

    debug!(
        "Checking access for user {} on shipment {}",
        current_user.user_id, shipment_id
    );

    // 3. Caricare la spedizione e verificare proprietario o ruolo admin
    let shipment = state
        .shipment
        .read(&shipment_id)
        .await?
        .ok_or_else(|| {
            warn!("Shipment {} not found", shipment_id);
            AppError::not_found("Shipment not found")
        })?;

    if shipment.owner_id != current_user.user_id && current_user.role != UserRole::Admin {
        warn!(
            "User {} denied access to shipment {}",
            current_user.user_id, shipment_id
        );
        return Err(AppError::forbidden("You do not have access to this shipment"));
    }

    info!(
        "User {} granted access to shipment {}",
        current_user.user_id, shipment_id
    );

    // 4. Inserire la spedizione nell'Extension per uso successivo negli handler
    req.extensions_mut().insert(shipment);

    Ok(next.run(req).await)
}

/// Helper function per verificare che l'utente abbia il ruolo admin
///
/// # Returns
/// * `Ok(())` se l'utente e' admin
/// * `Err(AppError)` 403 altrimenti
#[instrument(skip(user), fields(user_id = %user.user_id))]
pub fn require_admin(user: &User) -> Result<(), AppError> {
    if user.role != UserRole::Admin {
        warn!("User {} lacks admin role", user.user_id);
        return Err(AppError::forbidden("This action requires the admin role"));
    }
    debug!("Admin role check passed");
    Ok(())
}
