//! ChatMessageRepository - Storico della chat assistita

use crate::entities::{ChatMessage, ChatSender};
use chrono::Utc;
use sqlx::{Error, SqlitePool};

const MESSAGE_COLUMNS: &str = "message_id, user_id, sender, content, created_at";

// CHAT MESSAGE REPO
pub struct ChatMessageRepository {
    connection_pool: SqlitePool,
}

impl ChatMessageRepository {
    pub fn new(connection_pool: SqlitePool) -> ChatMessageRepository {
        Self { connection_pool }
    }

    /// Persiste un messaggio (dell'utente o dell'assistente)
    pub async fn insert(
        &self,
        user_id: &i64,
        sender: &ChatSender,
        content: &str,
    ) -> Result<ChatMessage, Error> {
        let result = sqlx::query(
            "INSERT INTO chat_messages (user_id, sender, content, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(sender)
        .bind(content)
        .bind(Utc::now())
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_rowid();

        let message = sqlx::query_as::<_, ChatMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM chat_messages WHERE message_id = ?"
        ))
        .bind(new_id)
        .fetch_one(&self.connection_pool)
        .await?;

        Ok(message)
    }

    /// Conversazione dell'utente dal piu' vecchio al piu' recente,
    /// limitata agli ultimi `limit` messaggi
    pub async fn list_by_user(&self, user_id: &i64, limit: i64) -> Result<Vec<ChatMessage>, Error> {
        // sotto-query per prendere la coda della conversazione mantenendo
        // l'ordine cronologico in uscita
        let messages = sqlx::query_as::<_, ChatMessage>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM ( \
                SELECT {MESSAGE_COLUMNS} FROM chat_messages WHERE user_id = ? \
                ORDER BY created_at DESC, message_id DESC LIMIT ? \
             ) ORDER BY created_at ASC, message_id ASC"
        ))
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(messages)
    }
}
