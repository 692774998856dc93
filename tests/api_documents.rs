//! Integration tests per gli endpoints dei documenti doganali
//!
//! Test per:
//! - POST /shipments/{shipment_id}/documents
//! - GET /shipments/{shipment_id}/documents
//! - GET/DELETE /shipments/{shipment_id}/documents/{document_id}

mod common;

#[cfg(test)]
mod document_tests {
    use super::common::*;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD as BASE64;
    use serde_json::json;
    use sqlx::SqlitePool;

    async fn create_test_shipment(server: &TestServer, access: &str) -> i64 {
        let response = server
            .post("/shipments")
            .authorization_bearer(access)
            .json(&json!({
                "origin_country": "CN",
                "destination_country": "IT",
                "description": "Laptop computers",
                "declared_value": 12000.0,
                "weight_kg": 85.5
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let shipment: serde_json::Value = response.json();
        shipment["shipment_id"].as_i64().expect("shipment_id")
    }

    #[sqlx::test]
    async fn test_upload_and_download_document(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (access, _) =
            register_and_login(&server, "docs@customsflow.test", "Password123").await;
        let shipment_id = create_test_shipment(&server, &access).await;

        let content = b"commercial invoice PDF bytes";
        let response = server
            .post(&format!("/shipments/{}/documents", shipment_id))
            .authorization_bearer(&access)
            .json(&json!({
                "file_name": "invoice.pdf",
                "content_type": "application/pdf",
                "data": BASE64.encode(content)
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let document: serde_json::Value = response.json();
        assert_eq!(document["file_name"], "invoice.pdf");
        let document_id = document["document_id"].as_i64().expect("document_id");

        // il download restituisce il contenuto in base64, intatto
        let response = server
            .get(&format!("/shipments/{}/documents/{}", shipment_id, document_id))
            .authorization_bearer(&access)
            .await;
        response.assert_status_ok();
        let downloaded: serde_json::Value = response.json();
        let data = downloaded["data"].as_str().expect("data");
        assert_eq!(BASE64.decode(data).expect("valid base64"), content);

        Ok(())
    }

    #[sqlx::test]
    async fn test_document_list_has_no_content(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (access, _) =
            register_and_login(&server, "doclist@customsflow.test", "Password123").await;
        let shipment_id = create_test_shipment(&server, &access).await;

        let upload = server
            .post(&format!("/shipments/{}/documents", shipment_id))
            .authorization_bearer(&access)
            .json(&json!({
                "file_name": "packing-list.pdf",
                "content_type": "application/pdf",
                "data": BASE64.encode(b"packing list bytes")
            }))
            .await;
        upload.assert_status(StatusCode::CREATED);

        let response = server
            .get(&format!("/shipments/{}/documents", shipment_id))
            .authorization_bearer(&access)
            .await;
        response.assert_status_ok();
        let documents: Vec<serde_json::Value> = response.json();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0]["file_name"], "packing-list.pdf");
        // le liste portano solo metadati
        assert!(documents[0].get("data").is_none());

        Ok(())
    }

    #[sqlx::test]
    async fn test_upload_rejects_malformed_base64(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (access, _) =
            register_and_login(&server, "badb64@customsflow.test", "Password123").await;
        let shipment_id = create_test_shipment(&server, &access).await;

        let response = server
            .post(&format!("/shipments/{}/documents", shipment_id))
            .authorization_bearer(&access)
            .json(&json!({
                "file_name": "invoice.pdf",
                "content_type": "application/pdf",
                "data": "%%% not base64 %%%"
            }))
            .await;

        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test]
    async fn test_upload_rejects_oversized_document(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (access, _) =
            register_and_login(&server, "huge@customsflow.test", "Password123").await;
        let shipment_id = create_test_shipment(&server, &access).await;

        // un byte oltre il limite di 5 MiB
        let oversized = vec![0u8; 5 * 1024 * 1024 + 1];
        let response = server
            .post(&format!("/shipments/{}/documents", shipment_id))
            .authorization_bearer(&access)
            .json(&json!({
                "file_name": "scan.tiff",
                "content_type": "image/tiff",
                "data": BASE64.encode(&oversized)
            }))
            .await;

        response.assert_status_bad_request();
        Ok(())
    }

    #[sqlx::test]
    async fn test_document_not_reachable_from_other_shipment(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (access, _) =
            register_and_login(&server, "crossdoc@customsflow.test", "Password123").await;
        let first = create_test_shipment(&server, &access).await;
        let second = create_test_shipment(&server, &access).await;

        let upload = server
            .post(&format!("/shipments/{}/documents", first))
            .authorization_bearer(&access)
            .json(&json!({
                "file_name": "invoice.pdf",
                "content_type": "application/pdf",
                "data": BASE64.encode(b"bytes")
            }))
            .await;
        upload.assert_status(StatusCode::CREATED);
        let document: serde_json::Value = upload.json();
        let document_id = document["document_id"].as_i64().expect("document_id");

        // lo stesso documento, cercato sotto un'altra spedizione, non esiste
        let response = server
            .get(&format!("/shipments/{}/documents/{}", second, document_id))
            .authorization_bearer(&access)
            .await;
        response.assert_status_not_found();

        Ok(())
    }

    #[sqlx::test]
    async fn test_delete_document(pool: SqlitePool) -> sqlx::Result<()> {
        let state = create_test_state(pool);
        let server = create_test_server(state.clone());

        let (access, _) =
            register_and_login(&server, "deldoc@customsflow.test", "Password123").await;
        let shipment_id = create_test_shipment(&server, &access).await;

        let upload = server
            .post(&format!("/shipments/{}/documents", shipment_id))
            .authorization_bearer(&access)
            .json(&json!({
                "file_name": "draft.pdf",
                "content_type": "application/pdf",
                "data": BASE64.encode(b"draft bytes")
            }))
            .await;
        upload.assert_status(StatusCode::CREATED);
        let document: serde_json::Value = upload.json();
        let url = format!(
            "/shipments/{}/documents/{}",
            shipment_id,
            document["document_id"]
        );

        let response = server.delete(&url).authorization_bearer(&access).await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = server.get(&url).authorization_bearer(&access).await;
        response.assert_status_not_found();

        Ok(())
    }
}
