//! HTTP client for the inference sidecar.
//!
//! The sidecar hosts the face-encoding, voice-embedding and landmark models;
//! this client only moves tensors over JSON.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use secrecy::{ExposeSecret, Secret};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::time::Duration;

use biogate_core::{
    traits::{FaceFeatureExtractor, LipLandmarkExtractor, VoiceFeatureExtractor},
    types::{FaceImage, FeatureVector, LandmarkTrack, Waveform},
    Error, Result,
};

use crate::wire::{
    FaceEncodeRequest, FaceEncodeResponse, LandmarkRequest, LandmarkResponse, VoiceEmbedRequest,
    VoiceEmbedResponse, FACE_ENCODE_PATH, LIP_LANDMARKS_PATH, VOICE_EMBED_PATH,
};

/// Extractor backed by a remote inference sidecar.
#[derive(Clone)]
pub struct HttpExtractorClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<Secret<String>>,
}

impl HttpExtractorClient {
    /// Create a client for `base_url` with a per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::gateway(format!("Failed to build extractor client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: None,
        })
    }

    /// Send `key` as a bearer token on every request.
    pub fn with_api_key(mut self, key: Secret<String>) -> Self {
        self.api_key = Some(key);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<Req, Resp>(&self, endpoint: &str, body: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut request = self.client.post(&url).json(body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let started = std::time::Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| Error::extractor(format!("Request to {} failed: {}", endpoint, e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(endpoint, status = status.as_u16(), "Extractor sidecar rejected request");
            return Err(Error::extractor(format!(
                "{} returned {}: {}",
                endpoint, status, detail
            )));
        }

        let parsed = response
            .json::<Resp>()
            .await
            .map_err(|e| Error::extractor(format!("Invalid response from {}: {}", endpoint, e)))?;

        tracing::debug!(
            endpoint,
            latency_ms = started.elapsed().as_millis() as u64,
            "Extractor call completed"
        );
        Ok(parsed)
    }
}

#[async_trait]
impl FaceFeatureExtractor for HttpExtractorClient {
    async fn encode(&self, image: &FaceImage) -> Result<Vec<FeatureVector>> {
        let body = FaceEncodeRequest {
            width: image.width,
            height: image.height,
            rgb: STANDARD.encode(&image.rgb),
        };
        let response: FaceEncodeResponse = self.post(FACE_ENCODE_PATH, &body).await?;
        response.into_vectors()
    }
}

#[async_trait]
impl VoiceFeatureExtractor for HttpExtractorClient {
    async fn embed(&self, waveform: &Waveform) -> Result<FeatureVector> {
        let body = VoiceEmbedRequest {
            sample_rate: waveform.sample_rate,
            samples: waveform.samples.clone(),
        };
        let response: VoiceEmbedResponse = self.post(VOICE_EMBED_PATH, &body).await?;
        response.into_vector()
    }
}

#[async_trait]
impl LipLandmarkExtractor for HttpExtractorClient {
    async fn track(&self, video: &Path) -> Result<LandmarkTrack> {
        let bytes = tokio::fs::read(video)
            .await
            .map_err(|e| Error::extractor(format!("Failed to read staged video: {}", e)))?;

        let body = LandmarkRequest {
            video: STANDARD.encode(&bytes),
        };
        let response: LandmarkResponse = self.post(LIP_LANDMARKS_PATH, &body).await?;
        response.into_track()
    }
}
