use axum_test::TestServer;
use customsflow::auth::{ACCESS_TOKEN_TTL_SECS, AuthKeys, TokenType, encode_token};
use customsflow::core::AppState;
use customsflow::entities::{User, UserRole};
use chrono::Utc;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Segreti deterministici per i test: i token si possono forgiare
pub const TEST_ACCESS_SECRET: &str = "test-access-secret";
pub const TEST_REFRESH_SECRET: &str = "test-refresh-secret";

/// Crea un AppState per i test con i segreti di test
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    let keys = AuthKeys::new(TEST_ACCESS_SECRET, TEST_REFRESH_SECRET);
    Arc::new(AppState::new(pool, keys))
}

/// Crea un TestServer per i test
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = customsflow::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Costruisce un utente in memoria per forgiare token coerenti con i fixture
fn fixture_user(user_id: i64, email: &str, role: UserRole) -> User {
    User {
        user_id,
        email: email.to_string(),
        password_hash: "$2b$12$not.a.real.hash".to_string(),
        first_name: None,
        last_name: None,
        role,
        deleted: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// Access token valido per l'utente indicato, firmato col secret di test
pub fn forge_access_token(user_id: i64, email: &str, role: UserRole) -> String {
    let user = fixture_user(user_id, email, role);
    encode_token(&user, TokenType::Access, TEST_ACCESS_SECRET, ACCESS_TOKEN_TTL_SECS)
        .expect("Failed to forge access token")
}

/// Access token gia' scaduto: deve essere rifiutato con 401
pub fn forge_expired_access_token(user_id: i64, email: &str, role: UserRole) -> String {
    let user = fixture_user(user_id, email, role);
    // oltre la leeway di default della validazione jwt
    encode_token(&user, TokenType::Access, TEST_ACCESS_SECRET, -120)
        .expect("Failed to forge expired access token")
}

/// Access token firmato con un secret diverso: firma invalida
pub fn forge_wrong_secret_token(user_id: i64, email: &str, role: UserRole) -> String {
    let user = fixture_user(user_id, email, role);
    encode_token(&user, TokenType::Access, "some-other-secret", ACCESS_TOKEN_TTL_SECS)
        .expect("Failed to forge wrong-secret token")
}

/// Registra un utente via API e fa login, ritornando (access, refresh)
pub async fn register_and_login(server: &TestServer, email: &str, password: &str) -> (String, String) {
    let register = server
        .post("/auth/register")
        .json(&json!({
            "email": email,
            "password": password,
            "first_name": "Test",
            "last_name": "User"
        }))
        .await;
    register.assert_status(axum::http::StatusCode::CREATED);

    let login = server
        .post("/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;
    login.assert_status_ok();

    let tokens: serde_json::Value = login.json();
    (
        tokens["access_token"].as_str().expect("access_token").to_string(),
        tokens["refresh_token"].as_str().expect("refresh_token").to_string(),
    )
}
