//! Gemini client behaviour against a mock server.

use green_doctor::diagnosis::{FailureKind, API_KEY_ERROR_MESSAGE, QUOTA_ERROR_MESSAGE, SYSTEM_PROMPT};
use green_doctor::{Config, Credential, Diagnosis, Doctor, Examination};
use image::DynamicImage;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENDPOINT: &str = "/v1beta/models/gemini-2.0-flash:generateContent";
const API_KEY: &str = "AIzaTestKey";

/// Run a full examination on a blocking thread against `server`.
async fn examine(server: &MockServer, photo: DynamicImage) -> Examination {
    let config = Config {
        base_url: format!("{}/v1beta", server.uri()),
        ..Config::default()
    };

    tokio::task::spawn_blocking(move || {
        let doctor = Doctor::new(config, Credential::new(API_KEY).unwrap()).unwrap();
        doctor.examine(photo)
    })
    .await
    .unwrap()
}

fn error_body(code: u16, message: &str, status: &str, reason: Option<&str>) -> serde_json::Value {
    let details = reason
        .map(|reason| vec![json!({ "@type": "type.googleapis.com/google.rpc.ErrorInfo", "reason": reason })])
        .unwrap_or_default();
    json!({ "error": { "code": code, "message": message, "status": status, "details": details } })
}

#[tokio::test]
async fn test_successful_diagnosis() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", API_KEY))
        .and(body_partial_json(json!({
            "generationConfig": { "temperature": 0.3, "maxOutputTokens": 1024 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "## 🔍 Classification\n🟡 Potentially Diseased" }]
                },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let examination = examine(&server, DynamicImage::new_rgba8(1200, 900)).await;

    assert_eq!(
        examination.diagnosis,
        Diagnosis::Report("## 🔍 Classification\n🟡 Potentially Diseased".to_string())
    );
    let normalized = examination.normalized.unwrap();
    assert_eq!((normalized.width(), normalized.height()), (800, 600));
}

#[tokio::test]
async fn test_request_carries_prompt_and_image() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "ok" }] } }]
        })))
        .mount(&server)
        .await;

    let examination = examine(&server, DynamicImage::new_rgb8(16, 16)).await;
    assert!(examination.diagnosis.is_report());

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let parts = &body["contents"][0]["parts"];
    assert_eq!(parts[0]["text"], SYSTEM_PROMPT);
    assert_eq!(parts[1]["inlineData"]["mimeType"], "image/jpeg");
    assert_eq!(
        parts[1]["inlineData"]["data"],
        examination.normalized.unwrap().to_base64()
    );
}

#[tokio::test]
async fn test_invalid_key_is_credential_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_body(
            400,
            "API key not valid. Please pass a valid API key.",
            "INVALID_ARGUMENT",
            Some("API_KEY_INVALID"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let examination = examine(&server, DynamicImage::new_rgb8(8, 8)).await;

    assert_eq!(
        examination.diagnosis,
        Diagnosis::Failed {
            kind: FailureKind::Credential,
            message: API_KEY_ERROR_MESSAGE.to_string(),
        }
    );
}

#[tokio::test]
async fn test_exhausted_quota_is_quota_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_json(error_body(
            429,
            "Resource has been exhausted (e.g. check quota).",
            "RESOURCE_EXHAUSTED",
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let examination = examine(&server, DynamicImage::new_rgb8(8, 8)).await;

    assert_eq!(examination.diagnosis.text(), QUOTA_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_server_error_is_unclassified_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend on fire"))
        .expect(1)
        .mount(&server)
        .await;

    let examination = examine(&server, DynamicImage::new_rgb8(8, 8)).await;

    match examination.diagnosis {
        Diagnosis::Failed { kind, message } => {
            assert_eq!(kind, FailureKind::Unclassified);
            assert_eq!(
                message,
                "❌ **Error**: An unexpected error occurred: inference service returned 500: backend on fire"
            );
        }
        Diagnosis::Report(text) => panic!("unexpected report: {text}"),
    }
}

#[tokio::test]
async fn test_blocked_prompt_is_unclassified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let examination = examine(&server, DynamicImage::new_rgb8(8, 8)).await;

    assert!(matches!(
        examination.diagnosis,
        Diagnosis::Failed { kind: FailureKind::Unclassified, ref message } if message.contains("SAFETY")
    ));
}
