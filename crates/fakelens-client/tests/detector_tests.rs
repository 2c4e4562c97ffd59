//! Integration tests against a mocked detection service.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fakelens_client::{DetectorClient, DetectorConfig, DetectorError};
use fakelens_models::{AnalysisMode, DetectionResult, FilePayload};

fn payload() -> FilePayload {
    FilePayload {
        bytes: vec![0xff, 0xd8, 0xff, 0xe0],
        filename: "cropped.jpg".to_string(),
        mime_type: "image/jpeg".to_string(),
    }
}

async fn client_for(server: &MockServer) -> DetectorClient {
    DetectorClient::new(DetectorConfig {
        base_url: server.uri(),
        augmented_base_url: None,
        timeout: Duration::from_secs(5),
    })
    .unwrap()
}

#[tokio::test]
async fn simple_detection_parses_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/detect/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"prediction": "FAKE", "confidence": 0.87})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let detection = client.detect(&payload()).await.unwrap();
    assert_eq!(detection.prediction, "FAKE");
    assert_eq!(detection.confidence, 0.87);
}

#[tokio::test]
async fn augmented_detection_parses_consensus() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/detect/augmented"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "consensus_prediction": "REAL",
            "average_confidence": 0.55,
            "original_prediction": {"prediction": "REAL", "confidence": 0.6},
            "augmented_predictions": [
                {"augmentation_type": "horizontal_flip", "prediction": "real", "confidence": 0.5},
                {"augmentation_type": "rotation_90", "prediction": "fake", "confidence": 0.45},
                {"augmentation_type": "gaussian_blur", "prediction": "real", "confidence": 0.7}
            ],
            "processing_time": 0.412,
            "debug_info": {
                "input_size": [160, 160, 3],
                "predictions_below_threshold": 2,
                "total_predictions": 4,
                "threshold": 0.7
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let detection = client.detect_augmented(&payload()).await.unwrap();
    assert_eq!(detection.consensus_prediction, "REAL");
    assert_eq!(detection.augmented_predictions.len(), 3);
    assert_eq!(detection.debug_info.total_predictions, 4);
}

#[tokio::test]
async fn submit_dispatches_by_mode() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/detect/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"prediction": "REAL", "confidence": 0.51})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let result = client
        .submit(AnalysisMode::Simple, &payload())
        .await
        .unwrap();
    match result {
        DetectionResult::Simple(simple) => assert_eq!(simple.prediction, "REAL"),
        other => panic!("unexpected shape: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_surfaced_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/detect/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1) // single-shot: exactly one request, no retry
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.detect(&payload()).await.unwrap_err();
    match err {
        DetectorError::RequestFailed { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "boom");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/detect/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.detect(&payload()).await.unwrap_err();
    assert!(err.is_parse_failure());
}

#[tokio::test]
async fn missing_fields_are_a_parse_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/detect/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"prediction": "FAKE"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.detect(&payload()).await.unwrap_err();
    assert!(err.is_parse_failure());
}

#[tokio::test]
async fn augmented_endpoint_honors_separate_base_url() {
    let simple_server = MockServer::start().await;
    let augmented_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/detect/augmented"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "consensus_prediction": "FAKE",
            "average_confidence": 0.9,
            "original_prediction": {"prediction": "FAKE", "confidence": 0.9},
            "augmented_predictions": [],
            "processing_time": 0.1,
            "debug_info": {
                "input_size": [160, 160, 3],
                "predictions_below_threshold": 0,
                "total_predictions": 1,
                "threshold": 0.7
            }
        })))
        .expect(1)
        .mount(&augmented_server)
        .await;

    let client = DetectorClient::new(DetectorConfig {
        base_url: simple_server.uri(),
        augmented_base_url: Some(augmented_server.uri()),
        timeout: Duration::from_secs(5),
    })
    .unwrap();

    let detection = client.detect_augmented(&payload()).await.unwrap();
    assert_eq!(detection.consensus_prediction, "FAKE");
}
