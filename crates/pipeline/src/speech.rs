use async_trait::async_trait;
use meetspace_config::SpeechSettings;
use reqwest::multipart;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::PipelineError;

/// Seam for the speech-to-text step.
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    async fn transcribe(&self, audio: &[u8], filename: &str) -> Result<String, PipelineError>;
}

/// Client for a third-party speech-to-text HTTP service.
///
/// One multipart upload per call; no chunking, no streaming, no retries.
#[derive(Debug, Clone)]
pub struct SpeechClient {
    client: reqwest::Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl SpeechClient {
    pub fn new(settings: &SpeechSettings) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: settings.api_key.clone(),
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl SpeechToText for SpeechClient {
    async fn transcribe(&self, audio: &[u8], filename: &str) -> Result<String, PipelineError> {
        // Configuration problems are surfaced before any network call.
        if audio.is_empty() {
            return Err(PipelineError::TranscriptionUnavailable(
                "empty audio buffer".to_string(),
            ));
        }
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            PipelineError::TranscriptionUnavailable("speech API key not configured".to_string())
        })?;

        debug!(bytes = audio.len(), %filename, "Uploading audio for transcription");

        let part = multipart::Part::bytes(audio.to_vec())
            .file_name(filename.to_string())
            .mime_str("audio/mpeg")
            .map_err(|e| PipelineError::TranscriptionFailed(e.to_string()))?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone());

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| PipelineError::TranscriptionFailed(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PipelineError::TranscriptionFailed(format!(
                "service returned {status}: {body}"
            )));
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|_| PipelineError::TranscriptionFailed("invalid response format".to_string()))?;

        info!(chars = body.text.len(), "Transcription received");
        Ok(body.text)
    }
}
