//! Axum-based HTTP server for the biometric API.

use axum::{
    extract::{DefaultBodyLimit, MatchedPath, Multipart, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use biogate_controller::{
    AuthOrchestrator, AuthRequest, FaceIdentification, LipSyncChecker, VoiceIdentificationReport,
};
use biogate_core::{
    config::{GatewayConfig, ServerConfig},
    types::AuthMode,
    Error, Result,
};

use crate::{
    audio::decode_wav,
    error::ApiError,
    forms::FormFields,
    responses::{
        round_to, AuthenticateResponse, FaceRecognitionResponse, HealthResponse, LipSyncResponse,
        MatchPayload, ProfilesResponse, RootResponse, VoiceRecognitionResponse,
    },
    video::decode_base64_video,
    vision::decode_base64_image,
};

/// Shared application state.
pub struct AppState {
    pub orchestrator: AuthOrchestrator,
    pub lip_sync: LipSyncChecker,
    /// Profiles offered to clients; empty lists the whole gallery.
    pub listed_profiles: Vec<String>,
}

impl AppState {
    pub fn new(orchestrator: AuthOrchestrator, lip_sync: LipSyncChecker) -> Self {
        Self {
            orchestrator,
            lip_sync,
            listed_profiles: Vec::new(),
        }
    }

    pub fn with_listed_profiles(mut self, profiles: Vec<String>) -> Self {
        self.listed_profiles = profiles;
        self
    }
}

/// Gateway server.
pub struct GatewayServer {
    server: ServerConfig,
    config: GatewayConfig,
    state: Arc<AppState>,
    metrics_handle: Option<PrometheusHandle>,
}

impl GatewayServer {
    /// Create a new gateway server.
    pub fn new(server: ServerConfig, config: GatewayConfig, state: AppState) -> Self {
        Self {
            server,
            config,
            state: Arc::new(state),
            metrics_handle: None,
        }
    }

    /// Set metrics handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics_handle = Some(handle);
        self
    }

    /// Build the Axum router.
    pub fn build_router(&self) -> Router {
        let mut router = Router::new()
            .route("/", get(root_handler))
            .route("/api/health", get(health_handler))
            .route("/api/profiles", get(profiles_handler))
            .route("/api/face-recognition", post(face_recognition_handler))
            .route("/api/voice-recognition", post(voice_recognition_handler))
            .route("/api/authenticate", post(authenticate_handler))
            .route("/api/lip-sync-check", post(lip_sync_handler))
            .route_layer(middleware::from_fn(track_metrics))
            .with_state(self.state.clone());

        if let Some(handle) = &self.metrics_handle {
            let handle = handle.clone();
            router = router.route("/metrics", get(move || async move { handle.render() }));
        }

        router = router
            .layer(DefaultBodyLimit::max(self.config.max_upload_bytes))
            .layer(self.cors_layer());

        if self.config.enable_tracing {
            router = router.layer(TraceLayer::new_for_http());
        }

        router
    }

    fn cors_layer(&self) -> CorsLayer {
        let origins = &self.config.allowed_origins;
        let allow_origin = if origins.is_empty() || origins.iter().any(|o| o == "*") {
            AllowOrigin::from(Any)
        } else {
            let parsed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match o.parse::<HeaderValue>() {
                    Ok(v) => Some(v),
                    Err(_) => {
                        tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            AllowOrigin::list(parsed)
        };

        CorsLayer::new()
            .allow_origin(allow_origin)
            .allow_methods(Any)
            .allow_headers(Any)
    }

    /// Run the server.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::gateway(format!("Failed to bind: {}", e)))?;

        tracing::info!(addr = %addr, "Gateway server starting");

        axum::serve(listener, self.build_router())
            .await
            .map_err(|e| Error::gateway(format!("Server error: {}", e)))?;

        Ok(())
    }
}

/// Record request count and latency per matched route.
async fn track_metrics(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().to_string();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    biogate_governance::track_request(
        &method,
        &path,
        response.status().as_u16(),
        started.elapsed().as_secs_f64(),
    );
    response
}

// =============================================================================
// Handlers
// =============================================================================

async fn root_handler() -> impl IntoResponse {
    Json(RootResponse {
        message: "Biometric Authentication API".to_string(),
        status: "running".to_string(),
    })
}

async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse::for_gallery(state.orchestrator.gallery()))
}

async fn profiles_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ProfilesResponse::build(
        state.orchestrator.gallery(),
        &state.listed_profiles,
    ))
}

/// Identify every face in a base64 image.
async fn face_recognition_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> std::result::Result<Json<FaceRecognitionResponse>, ApiError> {
    let trace_id = Uuid::new_v4().to_string();
    let form = FormFields::from_multipart(multipart).await?;
    let image_data = form.require_text("image_data")?;
    let user_id = form.require_text("user_id")?;

    tracing::info!(trace_id = %trace_id, user_id = %user_id, "Processing face recognition");

    let image = decode_base64_image(image_data)?;
    let result = state
        .orchestrator
        .identify_face(&image)
        .await
        .map_err(|e| ApiError::failure("Face recognition", e))?;

    let response = match result {
        FaceIdentification::NoFaceDetected => FaceRecognitionResponse {
            success: false,
            message: "No face detected in the image".to_string(),
            matches: Vec::new(),
        },
        FaceIdentification::Processed { faces, matches } => FaceRecognitionResponse {
            success: true,
            message: format!("Processed {} face(s)", faces),
            matches: matches.iter().map(MatchPayload::from).collect(),
        },
    };

    Ok(Json(response))
}

/// Identify the speaker of a WAV upload.
async fn voice_recognition_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> std::result::Result<Json<VoiceRecognitionResponse>, ApiError> {
    let trace_id = Uuid::new_v4().to_string();
    let form = FormFields::from_multipart(multipart).await?;
    let audio = form.require_file("audio_file")?;
    let user_id = form.require_text("user_id")?;

    tracing::info!(
        trace_id = %trace_id,
        user_id = %user_id,
        audio_bytes = audio.len(),
        "Processing voice recognition"
    );

    let waveform = decode_wav(audio)?;
    let report = state
        .orchestrator
        .identify_voice(&waveform)
        .await
        .map_err(|e| ApiError::failure("Voice recognition", e))?;

    let response = match report {
        VoiceIdentificationReport::InputTooShort => VoiceRecognitionResponse {
            success: false,
            message: "Audio too short or unclear".to_string(),
            matches: Vec::new(),
            best_similarity: None,
        },
        VoiceIdentificationReport::Processed(result) => VoiceRecognitionResponse {
            success: true,
            message: "Voice processed successfully".to_string(),
            matches: result.matched.iter().map(MatchPayload::from).collect(),
            best_similarity: Some(round_to(result.best_score(), 2)),
        },
    };

    Ok(Json(response))
}

/// Verify a claimed profile by face, voice or both.
async fn authenticate_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> std::result::Result<Json<AuthenticateResponse>, ApiError> {
    let trace_id = Uuid::new_v4().to_string();
    let form = FormFields::from_multipart(multipart).await?;
    let mode: AuthMode = form.require_text("mode")?.parse()?;
    let profile = form.require_text("profile")?;
    let user_id = form.require_text("user_id")?;

    tracing::info!(
        trace_id = %trace_id,
        user_id = %user_id,
        mode = %mode,
        profile = %profile,
        "Processing authentication"
    );

    // Inputs for modalities the mode ignores are never decoded.
    let image = match form.text("image_data")? {
        Some(data) if mode.uses_face() => Some(decode_base64_image(data)?),
        _ => None,
    };
    let audio = match form.file("audio_file") {
        Some(bytes) if mode.uses_voice() => Some(decode_wav(bytes)?),
        _ => None,
    };

    let decision = state
        .orchestrator
        .authenticate(AuthRequest {
            mode,
            profile: profile.into(),
            image,
            audio,
        })
        .await;

    Ok(Json(AuthenticateResponse {
        success: decision.passed,
        message: decision.message(),
        face_match: decision.face_outcome().map(MatchPayload::from),
        voice_match: decision.voice_outcome().map(MatchPayload::from),
        authentication_passed: decision.passed,
    }))
}

/// Check lip movement in a video against the presence of audio.
///
/// Analysis failures are always answered with a structured envelope.
async fn lip_sync_handler(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> std::result::Result<(StatusCode, Json<LipSyncResponse>), ApiError> {
    let trace_id = Uuid::new_v4().to_string();
    let form = FormFields::from_multipart(multipart).await?;
    let video_data = form.require_text("video_data")?;
    let audio_bytes = form.require_file("audio_data")?.len();
    let duration = match form.text("duration")? {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| ApiError::bad_request(format!("Invalid duration: {}", raw)))?,
        None => 4,
    };

    tracing::info!(
        trace_id = %trace_id,
        audio_bytes,
        requested_duration = duration,
        "Processing lip sync check"
    );

    let result = match decode_base64_video(video_data) {
        Ok(video) => state.lip_sync.check(&video, audio_bytes).await,
        Err(e) => Err(e),
    };

    let (status, body) = match result {
        Ok(analysis) => (StatusCode::OK, LipSyncResponse::from_analysis(&analysis)),
        Err(e @ Error::InsufficientVideoData { .. }) => {
            tracing::warn!(trace_id = %trace_id, error = %e, "Lip sync check inconclusive");
            (StatusCode::OK, LipSyncResponse::failure(&e.to_string()))
        }
        Err(e) if e.is_client_error() => {
            tracing::warn!(trace_id = %trace_id, error = %e, "Lip sync input rejected");
            (StatusCode::BAD_REQUEST, LipSyncResponse::failure(&e.to_string()))
        }
        Err(e) => {
            tracing::error!(trace_id = %trace_id, error = %e, "Lip sync check error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                LipSyncResponse::failure(&e.to_string()),
            )
        }
    };

    Ok((status, Json(body)))
}
