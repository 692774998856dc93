//! Integration tests per gli endpoints di autenticazione
//!
//! Test per:
//! - POST /auth/register
//! - POST /auth/login
//! - POST /auth/refresh
//! - POST /auth/logout
//!
//! Questi test usano `#[sqlx::test]` che:
//! - Crea automaticamente un database di test isolato
//! - Applica le migrations da `migrations/`
//! - Applica i fixtures specificati da `fixtures/`
//! - Pulisce il database al termine

mod common;

#[cfg(test)]
mod auth_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use serde_json::json;
    use sqlx::SqlitePool;

    // ============================================================
    // Test per POST /auth/register - register_user
    // ============================================================

    #[sqlx::test]
    async fn test_register_success(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let body = json!({
            "email": "new@customsflow.test",
            "password": "Password123",
            "first_name": "Nina",
            "last_name": "New"
        });

        let response = server.post("/auth/register").json(&body).await;

        response.assert_status(StatusCode::CREATED);
        let user: serde_json::Value = response.json();

        assert!(user.get("user_id").is_some(), "User should have an id");
        assert_eq!(user["email"], "new@customsflow.test");
        assert_eq!(user["role"], "CUSTOMER", "New users are customers");
        assert!(
            user.get("password_hash").is_none(),
            "Password hash must never leave the server"
        );

        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_register_duplicate_email(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let body = json!({
            "email": "carla@customsflow.test",
            "password": "Password123"
        });

        let response = server.post("/auth/register").json(&body).await;

        response.assert_status_conflict();
        Ok(())
    }

    #[sqlx::test]
    async fn test_register_invalid_email(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let body = json!({
            "email": "not-an-email",
            "password": "Password123"
        });

        let response = server.post("/auth/register").json(&body).await;

        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test]
    async fn test_register_password_too_short(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let body = json!({
            "email": "short@customsflow.test",
            "password": "Pass1"
        });

        let response = server.post("/auth/register").json(&body).await;

        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test]
    async fn test_register_missing_fields(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let response = server.post("/auth/register").json(&json!({})).await;

        // 422 Unprocessable Entity quando manca un campo obbligatorio
        response.assert_status_unprocessable_entity();
        Ok(())
    }

    // ============================================================
    // Test per POST /auth/login - login_user
    // ============================================================

    #[sqlx::test]
    async fn test_login_returns_token_pair(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (access, refresh) =
            register_and_login(&server, "pair@customsflow.test", "Password123").await;

        assert!(!access.is_empty());
        assert!(!refresh.is_empty());
        assert_ne!(access, refresh, "Access and refresh tokens are distinct");

        // l'access token autorizza le richieste protette
        let me = server
            .get("/users/me")
            .authorization_bearer(&access)
            .await;
        me.assert_status_ok();

        Ok(())
    }

    #[sqlx::test]
    async fn test_login_response_shape(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        register_and_login(&server, "shape@customsflow.test", "Password123").await;

        let response = server
            .post("/auth/login")
            .json(&json!({
                "email": "shape@customsflow.test",
                "password": "Password123"
            }))
            .await;

        response.assert_status_ok();
        let tokens: serde_json::Value = response.json();
        assert_eq!(tokens["token_type"], "Bearer");
        assert_eq!(tokens["expires_in"], 900, "Access tokens last 15 minutes");

        Ok(())
    }

    #[sqlx::test]
    async fn test_back_to_back_logins_mint_distinct_tokens(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        // due login nello stesso istante (stesso secondo di iat/exp): il jti
        // deve comunque rendere i token distinti, una sessione per device
        let (_, first_refresh) =
            register_and_login(&server, "twodevices@customsflow.test", "Password123").await;

        let second_login = server
            .post("/auth/login")
            .json(&json!({
                "email": "twodevices@customsflow.test",
                "password": "Password123"
            }))
            .await;
        second_login.assert_status_ok();
        let tokens: serde_json::Value = second_login.json();
        let second_refresh = tokens["refresh_token"].as_str().expect("refresh_token");
        assert_ne!(second_refresh, first_refresh);

        // entrambe le sessioni sono valide in parallelo
        for token in [first_refresh.as_str(), second_refresh] {
            let refreshed = server
                .post("/auth/refresh")
                .json(&json!({ "refresh_token": token }))
                .await;
            refreshed.assert_status_ok();
        }

        Ok(())
    }

    #[sqlx::test]
    async fn test_login_wrong_password(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        register_and_login(&server, "wrongpw@customsflow.test", "Password123").await;

        let response = server
            .post("/auth/login")
            .json(&json!({
                "email": "wrongpw@customsflow.test",
                "password": "NotThePassword1"
            }))
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }

    #[sqlx::test]
    async fn test_login_unknown_email(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let response = server
            .post("/auth/login")
            .json(&json!({
                "email": "ghost@customsflow.test",
                "password": "Password123"
            }))
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }

    #[sqlx::test]
    async fn test_login_deleted_user(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (access, _) =
            register_and_login(&server, "gone@customsflow.test", "Password123").await;

        // l'utente cancella il proprio account
        let delete = server
            .delete("/users/me")
            .authorization_bearer(&access)
            .await;
        delete.assert_status(StatusCode::NO_CONTENT);

        // il login deve fallire come per un utente inesistente
        let response = server
            .post("/auth/login")
            .json(&json!({
                "email": "gone@customsflow.test",
                "password": "Password123"
            }))
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }

    // ============================================================
    // Test per POST /auth/refresh - refresh_tokens
    // ============================================================

    #[sqlx::test]
    async fn test_refresh_rotates_tokens(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (_, refresh) =
            register_and_login(&server, "rotate@customsflow.test", "Password123").await;

        let response = server
            .post("/auth/refresh")
            .json(&json!({ "refresh_token": refresh }))
            .await;

        response.assert_status_ok();
        let tokens: serde_json::Value = response.json();
        let new_refresh = tokens["refresh_token"].as_str().expect("refresh_token");
        assert_ne!(new_refresh, refresh, "Refresh must rotate the token");

        // il nuovo access token funziona
        let access = tokens["access_token"].as_str().expect("access_token");
        let me = server.get("/users/me").authorization_bearer(access).await;
        me.assert_status_ok();

        Ok(())
    }

    #[sqlx::test]
    async fn test_refresh_token_is_single_use(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (_, refresh) =
            register_and_login(&server, "singleuse@customsflow.test", "Password123").await;

        let first = server
            .post("/auth/refresh")
            .json(&json!({ "refresh_token": refresh }))
            .await;
        first.assert_status_ok();

        // il vecchio refresh e' stato consumato dalla rotazione
        let second = server
            .post("/auth/refresh")
            .json(&json!({ "refresh_token": refresh }))
            .await;
        second.assert_status_unauthorized();

        // quello nuovo invece funziona
        let tokens: serde_json::Value = first.json();
        let third = server
            .post("/auth/refresh")
            .json(&json!({ "refresh_token": tokens["refresh_token"] }))
            .await;
        third.assert_status_ok();

        Ok(())
    }

    #[sqlx::test]
    async fn test_refresh_with_unknown_token(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let response = server
            .post("/auth/refresh")
            .json(&json!({ "refresh_token": "not-a-token" }))
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }

    #[sqlx::test]
    async fn test_refresh_rejects_access_token(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (access, _) =
            register_and_login(&server, "classes@customsflow.test", "Password123").await;

        // un access token non e' nel ledger e non ha il discriminatore refresh
        let response = server
            .post("/auth/refresh")
            .json(&json!({ "refresh_token": access }))
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }

    // ============================================================
    // Test per POST /auth/logout - logout_user
    // ============================================================

    #[sqlx::test]
    async fn test_logout_revokes_refresh_token(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (_, refresh) =
            register_and_login(&server, "logout@customsflow.test", "Password123").await;

        let logout = server
            .post("/auth/logout")
            .json(&json!({ "refresh_token": refresh }))
            .await;
        logout.assert_status(StatusCode::NO_CONTENT);

        // il token revocato non autorizza piu' un refresh
        let refresh_attempt = server
            .post("/auth/refresh")
            .json(&json!({ "refresh_token": refresh }))
            .await;
        refresh_attempt.assert_status_unauthorized();

        Ok(())
    }

    #[sqlx::test]
    async fn test_logout_is_idempotent(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (_, refresh) =
            register_and_login(&server, "relogout@customsflow.test", "Password123").await;

        for _ in 0..2 {
            let logout = server
                .post("/auth/logout")
                .json(&json!({ "refresh_token": &refresh }))
                .await;
            logout.assert_status(StatusCode::NO_CONTENT);
        }

        // anche con un token mai visto
        let logout = server
            .post("/auth/logout")
            .json(&json!({ "refresh_token": "never-seen" }))
            .await;
        logout.assert_status(StatusCode::NO_CONTENT);

        Ok(())
    }

    // ============================================================
    // Test del middleware di autenticazione
    // ============================================================

    #[sqlx::test]
    async fn test_protected_route_without_token(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let response = server.get("/users/me").await;

        response.assert_status_unauthorized();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_protected_route_with_wrong_secret(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let token = forge_wrong_secret_token(
            2,
            "carla@customsflow.test",
            customsflow::entities::UserRole::Customer,
        );

        let response = server.get("/users/me").authorization_bearer(&token).await;

        response.assert_status_unauthorized();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_protected_route_with_expired_token(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let token = forge_expired_access_token(
            2,
            "carla@customsflow.test",
            customsflow::entities::UserRole::Customer,
        );

        let response = server.get("/users/me").authorization_bearer(&token).await;

        response.assert_status_unauthorized();
        Ok(())
    }

    #[sqlx::test(fixtures(path = "../fixtures", scripts("users")))]
    async fn test_protected_route_with_malformed_header(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let response = server
            .get("/users/me")
            .add_header(
                axum::http::HeaderName::from_static("authorization"),
                "NotBearer abc",
            )
            .await;

        response.assert_status_unauthorized();
        Ok(())
    }

    // ============================================================
    // Scenario completo
    // ============================================================

    #[sqlx::test]
    async fn test_full_session_lifecycle(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        // register -> login -> refresh -> logout
        let (access, refresh) =
            register_and_login(&server, "lifecycle@customsflow.test", "Password123").await;

        let me = server.get("/users/me").authorization_bearer(&access).await;
        me.assert_status_ok();
        let profile: serde_json::Value = me.json();
        assert_eq!(profile["email"], "lifecycle@customsflow.test");

        let refreshed = server
            .post("/auth/refresh")
            .json(&json!({ "refresh_token": refresh }))
            .await;
        refreshed.assert_status_ok();
        let tokens: serde_json::Value = refreshed.json();

        let logout = server
            .post("/auth/logout")
            .json(&json!({ "refresh_token": tokens["refresh_token"] }))
            .await;
        logout.assert_status(StatusCode::NO_CONTENT);

        // dopo il logout nessuno dei refresh emessi e' piu' valido
        for token in [refresh.as_str(), tokens["refresh_token"].as_str().expect("refresh_token")] {
            let attempt = server
                .post("/auth/refresh")
                .json(&json!({ "refresh_token": token }))
                .await;
            attempt.assert_status_unauthorized();
        }

        Ok(())
    }
}
