//! Integration tests for the OTP endpoints

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};

use sc_api::routes::{self, otp::AppState};
use sc_core::repositories::InMemoryOtpStore;
use sc_core::services::otp::{NotificationSender, OtpMessage, OtpService, OtpServiceConfig};
use sc_infra::ConsoleNotificationSender;

const PHONE: &str = "9876543210";
const CANONICAL: &str = "919876543210";

/// Sender remembering the last code per destination
#[derive(Default)]
struct RecordingSender {
    inbox: Mutex<HashMap<String, String>>,
}

impl RecordingSender {
    fn last_code(&self, destination: &str) -> String {
        self.inbox
            .lock()
            .unwrap()
            .get(destination)
            .cloned()
            .expect("no code sent")
    }
}

#[async_trait]
impl NotificationSender for RecordingSender {
    async fn send(&self, destination: &str, message: &OtpMessage) -> Result<String, String> {
        self.inbox
            .lock()
            .unwrap()
            .insert(destination.to_string(), message.code.clone());
        Ok("recorded".to_string())
    }

    fn provider_name(&self) -> &str {
        "recording"
    }
}

fn state_with(sender: Arc<dyn NotificationSender>) -> web::Data<AppState> {
    let service = OtpService::new(
        sender,
        Arc::new(InMemoryOtpStore::new()),
        OtpServiceConfig::default(),
    );
    web::Data::new(AppState::new(Arc::new(service)))
}

fn recording_state() -> (web::Data<AppState>, Arc<RecordingSender>) {
    let sender = Arc::new(RecordingSender::default());
    (state_with(sender.clone()), sender)
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(routes::configure),
        )
        .await
    };
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

#[actix_web::test]
async fn test_health_check() {
    let (state, _sender) = recording_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_send_otp_success_does_not_echo_code() {
    let (state, sender) = recording_state();
    let app = init_app!(state);

    let (status, body) = post_json!(app, "/api/user/send-otp", &json!({ "phone": PHONE }));

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "OTP sent successfully via WhatsApp");
    assert_eq!(body["data"]["expires_in"], 300);
    assert!(body["data"]["expires_at"].is_string());

    // Delivered out of band only
    let code = sender.last_code(CANONICAL);
    assert_eq!(code.len(), 6);
    let data = body["data"].as_object().unwrap();
    assert_eq!(data.len(), 2);
    assert!(!data.values().any(|value| value == &json!(code)));
}

#[actix_web::test]
async fn test_send_otp_requires_phone() {
    let (state, _sender) = recording_state();
    let app = init_app!(state);

    for payload in [json!({}), json!({ "phone": "" })] {
        let (status, body) = post_json!(app, "/api/user/send-otp", &payload);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Phone number is required");
    }
}

#[actix_web::test]
async fn test_send_otp_rejects_invalid_phone() {
    let (state, _sender) = recording_state();
    let app = init_app!(state);

    for phone in ["12345", "5876543210", "+919876543210"] {
        let (status, body) = post_json!(app, "/api/user/send-otp", &json!({ "phone": phone }));
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", phone);
        assert_eq!(body["message"], "Please enter a valid 10-digit phone number");
    }
}

#[actix_web::test]
async fn test_send_otp_transport_failure() {
    let state = state_with(Arc::new(ConsoleNotificationSender::with_options(false, true)));
    let app = init_app!(state);

    let (status, body) = post_json!(app, "/api/user/send-otp", &json!({ "phone": PHONE }));

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "TRANSPORT_FAILURE");

    // The failed code was rolled back
    let (status, body) = post_json!(
        app,
        "/api/user/verify-otp",
        &json!({ "phone": PHONE, "otp": "123456" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OTP_NOT_FOUND");
}

#[actix_web::test]
async fn test_verify_otp_requires_phone_and_otp() {
    let (state, _sender) = recording_state();
    let app = init_app!(state);

    for payload in [
        json!({ "phone": PHONE }),
        json!({ "otp": "123456" }),
        json!({ "phone": "", "otp": "" }),
    ] {
        let (status, body) = post_json!(app, "/api/user/verify-otp", &payload);
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Phone and OTP are required");
    }
}

#[actix_web::test]
async fn test_login_flow() {
    let (state, sender) = recording_state();
    let app = init_app!(state);

    let (status, _) = post_json!(app, "/api/user/send-otp", &json!({ "phone": PHONE }));
    assert_eq!(status, StatusCode::OK);
    let code = sender.last_code(CANONICAL);
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let (status, body) = post_json!(
        app,
        "/api/user/verify-otp",
        &json!({ "phone": PHONE, "otp": wrong })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_OTP");
    assert_eq!(body["message"], "Invalid OTP. Please try again.");
    assert_eq!(body["data"]["remaining_attempts"], 2);

    // Any accepted format reaches the same record
    let (status, body) = post_json!(
        app,
        "/api/user/verify-otp",
        &json!({ "phone": "+91 98765 43210", "otp": code })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OTP verified successfully");
    assert_eq!(body["data"]["phone"], CANONICAL);

    let (status, body) = post_json!(
        app,
        "/api/user/verify-otp",
        &json!({ "phone": PHONE, "otp": code })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OTP_NOT_FOUND");
    assert_eq!(body["message"], "OTP not found. Please request a new OTP.");
}

#[actix_web::test]
async fn test_too_many_attempts() {
    let (state, sender) = recording_state();
    let app = init_app!(state);

    post_json!(app, "/api/user/send-otp", &json!({ "phone": PHONE }));
    let code = sender.last_code(CANONICAL);
    let wrong = if code == "000000" { "111111" } else { "000000" };

    for _ in 0..3 {
        let (status, body) = post_json!(
            app,
            "/api/user/verify-otp",
            &json!({ "phone": PHONE, "otp": wrong })
        );
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "INVALID_OTP");
    }

    let (status, body) = post_json!(
        app,
        "/api/user/verify-otp",
        &json!({ "phone": PHONE, "otp": code })
    );
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], "TOO_MANY_ATTEMPTS");
    assert_eq!(
        body["message"],
        "Too many failed attempts. Please request a new OTP."
    );
}

#[actix_web::test]
async fn test_malformed_json() {
    let (state, _sender) = recording_state();
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/user/send-otp")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"phone\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn test_unknown_route() {
    let (state, _sender) = recording_state();
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/user/unknown").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
