//! Chat services - Assistente doganale a regole
//!
//! L'assistente e' un matcher di parole chiave: nessun modello, nessuna
//! chiamata esterna. Ogni scambio (domanda + risposta) finisce nello
//! storico dell'utente.

use crate::core::{AppError, AppState};
use crate::dtos::{ChatExchangeDTO, ChatHistoryQuery, ChatMessageDTO, ChatRequestDTO};
use crate::entities::{ChatSender, User};
use axum::{
    Extension,
    extract::{Json, Query, State},
    http::StatusCode,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use validator::Validate;

/// Numero di messaggi ritornati in assenza del parametro `limit`
const DEFAULT_HISTORY_LIMIT: i64 = 50;
/// Tetto massimo per il parametro `limit`
const MAX_HISTORY_LIMIT: i64 = 100;

/// Tabella keyword -> risposta, in ordine di priorita': vince la prima
/// entry le cui keyword compaiono tutte nel messaggio
const KEYWORD_REPLIES: &[(&[&str], &str)] = &[
    (
        &["tracking"],
        "You can track any shipment from the tracking page using its tracking number \
         (it starts with CF-). The status updates every time customs or the carrier \
         records a new event.",
    ),
    (
        &["hs", "code"],
        "HS codes classify goods for customs. Use the HS code search to find the code \
         that matches your product description; the code determines the duty rate \
         applied at import.",
    ),
    (
        &["duty", "rate"],
        "The duty rate depends on the HS code of your goods. If you do not know the \
         code, the tariff calculator applies a default rate of 5%.",
    ),
    (
        &["tariff"],
        "The tariff calculator estimates import charges: duty on the customs value, \
         VAT on the value plus shipping, insurance and duty, and a fixed processing fee.",
    ),
    (
        &["vat"],
        "Import VAT is charged at 20% on the customs value plus shipping, insurance \
         and duty. The tariff calculator shows the full breakdown.",
    ),
    (
        &["document"],
        "Customs documents (invoices, packing lists, certificates of origin) can be \
         attached to each shipment from its documents section. Keep them under 5 MiB.",
    ),
    (
        &["customs", "clearance"],
        "Clearance time depends on the destination country and the completeness of \
         your documents. A shipment in the IN_CUSTOMS status is being processed; you \
         will see a CLEARED event once it is released.",
    ),
    (
        &["cancel"],
        "A shipment can be cancelled while it is still pending. Once it is in transit, \
         contact support to arrange a return.",
    ),
    (
        &["alert"],
        "Regulatory alerts announce changes in customs rules. Filter them by country \
         to see what applies to your trade lanes, global alerts are always included.",
    ),
    (
        &["hello"],
        "Hello! I can help with shipment tracking, HS codes, tariff estimates, customs \
         documents and regulatory alerts. What do you need?",
    ),
];

const FALLBACK_REPLY: &str =
    "I am not sure I can help with that. I can answer questions about shipment \
     tracking, HS codes, tariffs, customs documents and regulatory alerts.";

/// Risolve la risposta dell'assistente per il messaggio dell'utente.
/// Matching per pura sottostringa sull'input minuscolo: "trackings"
/// soddisfa "tracking".
fn keyword_reply(content: &str) -> &'static str {
    let normalized = content.to_lowercase();

    for (keywords, reply) in KEYWORD_REPLIES {
        if keywords.iter().all(|keyword| normalized.contains(keyword)) {
            return reply;
        }
    }

    FALLBACK_REPLY
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id))]
pub async fn send_chat_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Json(body): Json<ChatRequestDTO>, // JSON body
) -> Result<(StatusCode, Json<ChatExchangeDTO>), AppError> {
    debug!("Chat message received");
    // 1. Validare il messaggio (non vuoto, max 1000)
    // 2. Persistere il messaggio dell'utente
    // 3. Risolvere la risposta dalla tabella keyword e persistere anche quella
    // 4. Ritornare lo scambio completo

    body.validate()?;

    let message = state
        .chat
        .insert(&current_user.user_id, &ChatSender::User, &body.content)
        .await?;

    let reply_text = keyword_reply(&body.content);
    let reply = state
        .chat
        .insert(&current_user.user_id, &ChatSender::Assistant, reply_text)
        .await?;

    info!("Chat exchange stored for user {}", current_user.user_id);
    Ok((
        StatusCode::CREATED,
        Json(ChatExchangeDTO {
            message: ChatMessageDTO::from(message),
            reply: ChatMessageDTO::from(reply),
        }),
    ))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn get_chat_history(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Query(query): Query<ChatHistoryQuery>, // query parameters
) -> Result<Json<Vec<ChatMessageDTO>>, AppError> {
    debug!("Fetching chat history");
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    let messages = state.chat.list_by_user(&current_user.user_id, limit).await?;

    Ok(Json(messages.into_iter().map(ChatMessageDTO::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_single_keyword() {
        let reply = keyword_reply("How does Tracking work?");
        assert!(reply.contains("tracking number"));
    }

    #[test]
    fn multi_keyword_entries_need_all_words() {
        // "code" da solo non basta per la entry ["hs", "code"]
        let reply = keyword_reply("what is a code?");
        assert_eq!(reply, FALLBACK_REPLY);

        let reply = keyword_reply("where do I find the HS code for shoes?");
        assert!(reply.contains("HS codes classify goods"));
    }

    #[test]
    fn earlier_entries_win() {
        // contiene sia "tracking" che "tariff": vince la prima della tabella
        let reply = keyword_reply("tracking and tariff questions");
        assert!(reply.contains("tracking number"));
    }

    #[test]
    fn matching_ignores_case_and_punctuation() {
        let reply = keyword_reply("VAT?!");
        assert!(reply.contains("20%"));
    }

    #[test]
    fn matching_is_substring_based() {
        // la keyword puo' comparire dentro una parola piu' lunga
        let reply = keyword_reply("where are my trackings");
        assert!(reply.contains("tracking number"));

        let reply = keyword_reply("about the cancellation policy");
        assert!(reply.contains("still pending"));
    }

    #[test]
    fn unknown_topics_get_the_fallback() {
        assert_eq!(keyword_reply("what is the weather like"), FALLBACK_REPLY);
    }
}
