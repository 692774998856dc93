//! ChatMessage entity - Messaggio della chat assistita

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::ChatSender;

#[derive(Serialize, Deserialize, Debug, Clone, sqlx::FromRow)]
pub struct ChatMessage {
    pub message_id: i64,
    pub user_id: i64,
    pub sender: ChatSender,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
