//! Detection service HTTP client.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{DetectorError, DetectorResult};
use fakelens_models::{
    AnalysisMode, AugmentedDetection, DetectionResult, FilePayload, SimpleDetection, UPLOAD_FIELD,
};

/// Configuration for the detector client.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Base URL of the detection service
    pub base_url: String,
    /// Optional separate base URL for the augmented endpoint; the observed
    /// deployments sometimes point the two modes at different instances
    pub augmented_base_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            augmented_base_url: None,
            timeout: Duration::from_secs(60),
        }
    }
}

impl DetectorConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("DETECT_SERVICE_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            augmented_base_url: std::env::var("DETECT_SERVICE_URL_AUGMENTED").ok(),
            timeout: Duration::from_secs(
                std::env::var("DETECT_SERVICE_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(60),
            ),
        }
    }

    /// Full endpoint URL for a mode.
    pub fn endpoint(&self, mode: AnalysisMode) -> String {
        let base = match mode {
            AnalysisMode::Augmented => self
                .augmented_base_url
                .as_deref()
                .unwrap_or(&self.base_url),
            AnalysisMode::Simple => &self.base_url,
        };
        format!("{}{}", base.trim_end_matches('/'), mode.endpoint_path())
    }
}

/// Client for the deepfake detection service.
pub struct DetectorClient {
    http: Client,
    config: DetectorConfig,
}

impl DetectorClient {
    /// Create a new detector client.
    pub fn new(config: DetectorConfig) -> DetectorResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DetectorError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> DetectorResult<Self> {
        Self::new(DetectorConfig::from_env())
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Submit a payload in the given mode.
    pub async fn submit(
        &self,
        mode: AnalysisMode,
        payload: &FilePayload,
    ) -> DetectorResult<DetectionResult> {
        match mode {
            AnalysisMode::Simple => self.detect(payload).await.map(DetectionResult::Simple),
            AnalysisMode::Augmented => self
                .detect_augmented(payload)
                .await
                .map(DetectionResult::Augmented),
        }
    }

    /// Single-pass detection of an uploaded image.
    pub async fn detect(&self, payload: &FilePayload) -> DetectorResult<SimpleDetection> {
        let body = self.post_file(AnalysisMode::Simple, payload).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Augmented consensus detection of an uploaded image.
    pub async fn detect_augmented(
        &self,
        payload: &FilePayload,
    ) -> DetectorResult<AugmentedDetection> {
        let body = self.post_file(AnalysisMode::Augmented, payload).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// POST the payload as a single-field multipart form.
    ///
    /// Single-shot by contract: any non-success status is a failure with no
    /// retry or backoff.
    async fn post_file(&self, mode: AnalysisMode, payload: &FilePayload) -> DetectorResult<String> {
        let url = self.config.endpoint(mode);
        debug!(%url, bytes = payload.bytes.len(), "Submitting image for analysis");

        let part = Part::bytes(payload.bytes.clone())
            .file_name(payload.filename.clone())
            .mime_str(&payload.mime_type)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%url, %status, "Detection request failed");
            return Err(DetectorError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}
