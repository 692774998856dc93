//! RefreshToken entity - Riga del ledger dei refresh token
//!
//! Una riga per token emesso. `revoked` e' monotono: una volta revocato un
//! token non torna mai attivo (la rotazione inserisce una riga nuova, non
//! riscrive la stringa del token).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub token_id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    /// Un token autorizza un refresh solo se non revocato e non scaduto
    pub fn is_active(&self) -> bool {
        !self.revoked && self.expires_at > Utc::now()
    }
}
