//! Integration tests for the Gupshup WhatsApp sender against a mock HTTP server

use sc_core::services::otp::{NotificationSender, OtpMessage};
use sc_infra::GupshupWhatsAppSender;
use sc_shared::config::GupshupConfig;
use wiremock::{
    matchers::{body_string_contains, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

const TEMPLATE_PATH: &str = "/wa/api/v1/template/msg";

fn sender_for(server: &MockServer) -> GupshupWhatsAppSender {
    let config = GupshupConfig {
        api_url: format!("{}{}", server.uri(), TEMPLATE_PATH),
        api_key: "test-api-key".to_string(),
        template_id: "otp-template".to_string(),
        ..GupshupConfig::default()
    };
    GupshupWhatsAppSender::new(config).unwrap()
}

#[tokio::test]
async fn test_submitted_message_returns_provider_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEMPLATE_PATH))
        .and(header("apikey", "test-api-key"))
        .and(header("Cache-Control", "no-cache"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("channel=whatsapp"))
        .and(body_string_contains("destination=919876543210"))
        .and(body_string_contains("source=918484958580"))
        .and(body_string_contains("src.name=selfcruzlogin"))
        .and(body_string_contains("otp-template"))
        .and(body_string_contains("482913"))
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
            "status": "submitted",
            "messageId": "ee4a68a0-1203-4c85-8dc3-49d0b3226a35"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sender = sender_for(&server);
    let message_id = sender
        .send("919876543210", &OtpMessage::new("482913", 5))
        .await
        .unwrap();

    assert_eq!(message_id, "ee4a68a0-1203-4c85-8dc3-49d0b3226a35");
}

#[tokio::test]
async fn test_success_status_without_message_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEMPLATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let sender = sender_for(&server);
    let message_id = sender
        .send("919876543210", &OtpMessage::new("482913", 5))
        .await
        .unwrap();

    assert!(message_id.starts_with("gupshup_"));
}

#[tokio::test]
async fn test_rejection_surfaces_provider_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEMPLATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "status": "error",
            "message": "Template Not Found"
        })))
        .mount(&server)
        .await;

    let sender = sender_for(&server);
    let err = sender
        .send("919876543210", &OtpMessage::new("482913", 5))
        .await
        .unwrap_err();

    assert!(err.contains("Template Not Found"), "unexpected error: {}", err);
}

#[tokio::test]
async fn test_server_error_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEMPLATE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let sender = sender_for(&server);
    let err = sender
        .send("919876543210", &OtpMessage::new("482913", 5))
        .await
        .unwrap_err();

    assert!(err.contains("HTTP 503"), "unexpected error: {}", err);
}
