//! Chat DTOs - Data Transfer Objects per la chat assistita

use crate::entities::{ChatMessage, ChatSender};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatMessageDTO {
    pub message_id: i64,
    pub sender: ChatSender,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageDTO {
    fn from(value: ChatMessage) -> Self {
        Self {
            message_id: value.message_id,
            sender: value.sender,
            content: value.content,
            created_at: value.created_at,
        }
    }
}

/// DTO per inviare un messaggio alla chat assistita
#[derive(Serialize, Deserialize, Debug, Clone, Validate)]
pub struct ChatRequestDTO {
    #[validate(length(min = 1, max = 1000, message = "message must not be blank"))]
    pub content: String,
}

/// Risposta: il messaggio dell'utente e la risposta dell'assistente
#[derive(Serialize, Deserialize, Debug)]
pub struct ChatExchangeDTO {
    pub message: ChatMessageDTO,
    pub reply: ChatMessageDTO,
}
