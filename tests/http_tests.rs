//! HTTP-level tests for the form and JSON API
//!
//! Requests go through the full router built by `ServerBuilder`:
//! request → handler → IntakeService → RecordStore → rendered response.

use axum::http::StatusCode;
use axum_test::TestServer;
use parcel_intake::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

fn form_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("sender_name", "Jan Novák"),
        ("sender_address", "Hlavní 12"),
        ("sender_zip", "10000"),
        ("recipient_name", "Eva"),
        ("recipient_address", "Vedlejší 3"),
        ("recipient_zip", "20000"),
        ("weight", "2.5"),
        ("shipment_type", "balik"),
        ("note", ""),
    ]
}

fn make_server(store: InMemoryRecordStore) -> TestServer {
    let router = ServerBuilder::new().with_store(store).build().unwrap();
    TestServer::new(router)
}

// =============================================================================
// HTML form
// =============================================================================

mod form_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_form() {
        let server = make_server(InMemoryRecordStore::new());

        let response = server.get("/").await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("<form method=\"post\""));
        assert!(html.contains("name=\"sender_zip\""));
    }

    #[tokio::test]
    async fn test_valid_submission_renders_success_and_persists() {
        let store = InMemoryRecordStore::new();
        let server = make_server(store.clone());

        let mut fields = form_fields();
        fields.push(("insurance", "on"));
        let response = server.post("/").form(&fields).await;

        response.assert_status_ok();
        assert!(response.text().contains("úspěšně"));

        let records = store.load().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sender_name, "Jan Novák");
        assert_eq!(records[0].weight, 2.5);
        assert!(records[0].insurance);
    }

    #[tokio::test]
    async fn test_invalid_submission_echoes_form_with_errors() {
        let store = InMemoryRecordStore::new();
        let server = make_server(store.clone());

        let fields: Vec<(&str, &str)> = form_fields()
            .into_iter()
            .map(|(k, v)| if k == "sender_zip" { (k, "1000") } else { (k, v) })
            .collect();
        let response = server.post("/").form(&fields).await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains("PSČ odesílatele musí mít přesně 5 číslic."));
        assert!(html.contains("value=\"1000\""));
        assert!(html.contains("value=\"Jan Novák\""));
        assert!(!html.contains("PSČ příjemce musí mít"));

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_post_reports_errors() {
        let server = make_server(InMemoryRecordStore::new());

        let response = server
            .post("/")
            .form(&Vec::<(&str, &str)>::new())
            .await;

        response.assert_status_ok();
        assert!(response.text().contains("Neplatný typ zásilky."));
    }

    #[tokio::test]
    async fn test_success_page() {
        let server = make_server(InMemoryRecordStore::new());

        let response = server.get("/success").await;

        response.assert_status_ok();
        assert!(response.text().contains("úspěšně"));
    }

    #[tokio::test]
    async fn test_store_failure_renders_error_page() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let config = AppConfig::for_data_file(blocker.join("parcel_data.json"));
        let router = ServerBuilder::new().with_config(config).build().unwrap();
        let server = TestServer::new(router);

        let response = server.post("/").form(&form_fields()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.text().contains("STORE_CREATE_DIR_FAILED"));
    }

    #[tokio::test]
    async fn test_configured_data_file_is_used() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shipments.json");
        let router = ServerBuilder::new()
            .with_config(AppConfig::for_data_file(&path))
            .build()
            .unwrap();
        let server = TestServer::new(router);

        server.post("/").form(&form_fields()).await.assert_status_ok();
        server.post("/").form(&form_fields()).await.assert_status_ok();

        let records = JsonFileStore::new(&path).load().await.unwrap();
        assert_eq!(records.len(), 2);
    }
}

// =============================================================================
// JSON API
// =============================================================================

mod api_tests {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let server = make_server(InMemoryRecordStore::new());

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "parcel-intake");
    }

    #[tokio::test]
    async fn test_create_shipment() {
        let store = InMemoryRecordStore::new();
        let server = make_server(store.clone());

        let response = server
            .post("/api/shipments")
            .json(&json!({
                "sender_name": "Jan Novák",
                "sender_address": "Hlavní 12",
                "sender_zip": "10000",
                "recipient_name": "Eva",
                "recipient_address": "Vedlejší 3",
                "recipient_zip": "20000",
                "weight": 2.5,
                "shipment_type": "cenny",
                "insurance": true
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["sender_name"], "Jan Novák");
        assert_eq!(body["weight"], 2.5);
        assert_eq!(body["shipment_type"], "cenny");
        assert_eq!(body["insurance"], true);
        assert_eq!(body["note"], "");
        assert!(body["created_at"].as_str().is_some());

        assert_eq!(store.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_shipment_validation_failure() {
        let store = InMemoryRecordStore::new();
        let server = make_server(store.clone());

        let response = server
            .post("/api/shipments")
            .json(&json!({ "sender_name": "Jan", "weight": "abc" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["errors"]["weight"], "Hmotnost musí být kladné číslo.");
        assert!(body["errors"].get("sender_name").is_none());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_shipment_rejects_non_object() {
        let server = make_server(InMemoryRecordStore::new());

        let response = server.post("/api/shipments").json(&json!([1, 2, 3])).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_create_shipment_rejects_malformed_json() {
        let server = make_server(InMemoryRecordStore::new());

        let response = server
            .post("/api/shipments")
            .text("{\"sender_name\": ")
            .content_type("application/json")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_BODY");
    }

    #[tokio::test]
    async fn test_english_locale_messages() {
        let config = AppConfig {
            locale: Locale::En,
            ..AppConfig::default()
        };
        let router = ServerBuilder::new()
            .with_config(config)
            .with_store(InMemoryRecordStore::new())
            .build()
            .unwrap();
        let server = TestServer::new(router);

        let response = server
            .post("/api/shipments")
            .json(&json!({ "shipment_type": "letter" }))
            .await;

        let body: Value = response.json();
        assert_eq!(body["errors"]["shipment_type"], "invalid shipment type");
        assert_eq!(body["errors"]["sender_zip"], "zip must be exactly 5 digits");
    }

    #[tokio::test]
    async fn test_custom_routes_are_merged() {
        let extra = axum::Router::new().route("/version", axum::routing::get(|| async { "0.1.0" }));
        let router = ServerBuilder::new()
            .with_store(InMemoryRecordStore::new())
            .with_custom_routes(extra)
            .build()
            .unwrap();
        let server = TestServer::new(router);

        let response = server.get("/version").await;

        response.assert_status_ok();
        assert_eq!(response.text(), "0.1.0");
        server.get("/healthz").await.assert_status_ok();
    }
}
