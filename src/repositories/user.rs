//! UserRepository - Repository per la gestione degli utenti

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateUserDTO, UpdateUserDTO};
use crate::entities::User;
use chrono::Utc;
use sqlx::{Error, SqlitePool};

const USER_COLUMNS: &str =
    "user_id, email, password_hash, first_name, last_name, role, deleted, created_at, updated_at";

// USER REPO
pub struct UserRepository {
    connection_pool: SqlitePool,
}

impl UserRepository {
    pub fn new(connection_pool: SqlitePool) -> UserRepository {
        Self { connection_pool }
    }

    /// Considero l'email univoca (vincolo UNIQUE sulla tabella).
    /// Ritorna anche gli utenti soft-deleted: decide il chiamante cosa farne.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, first_name, last_name, role, deleted, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, 0, ?, ?)",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.role)
        .bind(now)
        .bind(now)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();

        self.read(&new_id).await?.ok_or(Error::RowNotFound)
    }
}

impl Read<User, i64> for UserRepository {
    async fn read(&self, id: &i64) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

impl Update<User, UpdateUserDTO, i64> for UserRepository {
    async fn update(&self, id: &i64, data: &UpdateUserDTO) -> Result<User, Error> {
        // COALESCE: i campi None lasciano il valore esistente
        sqlx::query(
            "UPDATE users SET \
                first_name = COALESCE(?, first_name), \
                last_name = COALESCE(?, last_name), \
                password_hash = COALESCE(?, password_hash), \
                updated_at = ? \
             WHERE user_id = ?",
        )
        .bind(&data.first_name)
        .bind(&data.last_name)
        .bind(&data.password_hash)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

impl Delete<i64> for UserRepository {
    /// Soft delete: alza il flag e anonimizza i campi del profilo.
    /// L'email resta occupata, la riga non viene mai rimossa.
    async fn delete(&self, user_id: &i64) -> Result<(), Error> {
        sqlx::query(
            "UPDATE users SET deleted = 1, first_name = NULL, last_name = NULL, updated_at = ? \
             WHERE user_id = ?",
        )
        .bind(Utc::now())
        .bind(user_id)
        .execute(&self.connection_pool)
        .await?;

        Ok(())
    }
}
