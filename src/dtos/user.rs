//! User DTOs - Data Transfer Objects per utenti

use crate::entities::{User, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

// struct per gestire io col client
#[derive(Serialize, Deserialize, Debug)]
pub struct UserDTO {
    pub user_id: i64,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserDTO {
    fn from(value: User) -> Self {
        Self {
            user_id: value.user_id,
            email: value.email,
            first_name: value.first_name,
            last_name: value.last_name,
            role: value.role,
            created_at: value.created_at,
            // l'hash della password non esce mai verso il client
        }
    }
}

/// DTO per la registrazione di un nuovo utente
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct RegisterUserDTO {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
}

/// DTO interno per l'inserimento (la password e' gia' hashata qui)
#[derive(Debug, Clone)]
pub struct CreateUserDTO {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
}

/// DTO per l'aggiornamento del profilo; il cambio password richiede
/// la password corrente
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct UpdateProfileDTO {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    pub current_password: Option<String>,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub new_password: Option<String>,
}

/// DTO interno per l'UPDATE sul database (solo campi `Some` modificati)
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDTO {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password_hash: Option<String>,
}
