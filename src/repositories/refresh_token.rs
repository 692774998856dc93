//! RefreshTokenRepository - Ledger dei refresh token
//!
//! La revoca e' sempre un UPDATE `revoked = 1`: mai DELETE, mai ritorno a 0.
//! La rotazione (revoca del vecchio + inserimento del nuovo) avviene in una
//! singola transazione, cosi' un crash a meta' non lascia il client senza
//! nessun token valido registrato.

use crate::entities::RefreshToken;
use chrono::{DateTime, Utc};
use sqlx::{Error, SqlitePool};

const TOKEN_COLUMNS: &str = "token_id, user_id, token, expires_at, revoked, created_at";

// REFRESH TOKEN REPO
pub struct RefreshTokenRepository {
    connection_pool: SqlitePool,
}

impl RefreshTokenRepository {
    pub fn new(connection_pool: SqlitePool) -> RefreshTokenRepository {
        Self { connection_pool }
    }

    /// Registra un nuovo refresh token emesso per l'utente
    pub async fn insert(
        &self,
        user_id: &i64,
        token: &str,
        expires_at: &DateTime<Utc>,
    ) -> Result<RefreshToken, Error> {
        let result = sqlx::query(
            "INSERT INTO refresh_tokens (user_id, token, expires_at, revoked, created_at) \
             VALUES (?, ?, ?, 0, ?)",
        )
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();

        let row = sqlx::query_as::<_, RefreshToken>(&format!(
            "SELECT {TOKEN_COLUMNS} FROM refresh_tokens WHERE token_id = ?"
        ))
        .bind(new_id)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(row)
    }

    /// Cerca la riga del ledger per stringa token (la stringa e' univoca)
    pub async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, Error> {
        let row = sqlx::query_as::<_, RefreshToken>(&format!(
            "SELECT {TOKEN_COLUMNS} FROM refresh_tokens WHERE token = ?"
        ))
        .bind(token)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(row)
    }

    /// Revoca un singolo token. Idempotente: revocare un token gia' revocato
    /// non e' un errore.
    pub async fn revoke(&self, token_id: &i64) -> Result<(), Error> {
        sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE token_id = ?")
            .bind(token_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }

    /// Revoca tutti i token dell'utente (cambio password, cancellazione account)
    pub async fn revoke_all_for_user(&self, user_id: &i64) -> Result<(), Error> {
        sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }

    /// Rotazione atomica: revoca il vecchio token e registra il nuovo nella
    /// stessa transazione.
    ///
    /// L'UPDATE pretende `revoked = 0`: se un'altra richiesta ha gia' consumato
    /// il token, qui non viene toccata nessuna riga e la rotazione fallisce con
    /// `RowNotFound` invece di emettere una seconda coppia.
    pub async fn rotate(
        &self,
        old_token_id: &i64,
        user_id: &i64,
        new_token: &str,
        expires_at: &DateTime<Utc>,
    ) -> Result<RefreshToken, Error> {
        let mut tx = self.connection_pool.begin().await?;

        let revoked = sqlx::query(
            "UPDATE refresh_tokens SET revoked = 1 WHERE token_id = ? AND revoked = 0",
        )
        .bind(old_token_id)
        .execute(&mut *tx)
        .await?;

        if revoked.rows_affected() != 1 {
            return Err(Error::RowNotFound);
        }

        let inserted = sqlx::query(
            "INSERT INTO refresh_tokens (user_id, token, expires_at, revoked, created_at) \
             VALUES (?, ?, ?, 0, ?)",
        )
        .bind(user_id)
        .bind(new_token)
        .bind(expires_at)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        let new_id = inserted.last_insert_rowid();

        let row = sqlx::query_as::<_, RefreshToken>(&format!(
            "SELECT {TOKEN_COLUMNS} FROM refresh_tokens WHERE token_id = ?"
        ))
        .bind(new_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row)
    }
}
