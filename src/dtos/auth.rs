//! Auth DTOs - Data Transfer Objects per login, refresh e logout

use serde::{Deserialize, Serialize};

/// DTO per il login (solo email e password)
#[derive(Serialize, Deserialize, Debug)]
pub struct LoginDTO {
    pub email: String,
    pub password: String,
}

/// DTO per refresh e logout: il refresh token viaggia nel body
#[derive(Serialize, Deserialize, Debug)]
pub struct RefreshRequestDTO {
    pub refresh_token: String,
}

/// Coppia di token ritornata da login e refresh.
/// `expires_in` e' la vita dell'access token in secondi.
#[derive(Serialize, Deserialize, Debug)]
pub struct TokenPairDTO {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}
