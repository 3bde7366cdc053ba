//! # meetnote-api
//!
//! HTTP surface for meetnote: meeting CRUD, note enhancement, health and
//! OpenAPI documentation.
//!
//! The binary in `main.rs` loads configuration, picks a storage backend and
//! serves [`app`]. Integration tests build the same router over the
//! in-memory repository.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use governor::{Quota, RateLimiter};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use meetnote_core::defaults;
use meetnote_core::MeetingRepository;
use meetnote_inference::EnhancementPipeline;

pub mod config;
pub mod error;
pub mod handlers;

pub use config::{ServerConfig, StorageBackend};
pub use error::ApiError;

use handlers::enhance::{apply_enhancement, enhance_meeting};
use handlers::meetings::{
    create_meeting, delete_meeting, get_meeting, list_meetings, update_meeting,
};

/// Global rate limiter type (direct quota, no per-client buckets).
pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub meetings: Arc<dyn MeetingRepository>,
    pub pipeline: Arc<EnhancementPipeline>,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

impl AppState {
    /// State with the bundled enhancement pipeline and no rate limit.
    pub fn new(meetings: Arc<dyn MeetingRepository>) -> Self {
        Self {
            meetings,
            pipeline: Arc::new(EnhancementPipeline::new()),
            rate_limiter: None,
        }
    }

    pub fn with_pipeline(mut self, pipeline: EnhancementPipeline) -> Self {
        self.pipeline = Arc::new(pipeline);
        self
    }

    pub fn with_rate_limiter(mut self, limiter: Option<Arc<GlobalRateLimiter>>) -> Self {
        self.rate_limiter = limiter;
        self
    }
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// OpenAPI document served at `/api-docs/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "meetnote API",
        description = "Meeting notes with rule-based note enhancement"
    ),
    paths(
        health_check,
        rate_limit_status,
        handlers::meetings::list_meetings,
        handlers::meetings::create_meeting,
        handlers::meetings::get_meeting,
        handlers::meetings::update_meeting,
        handlers::meetings::delete_meeting,
        handlers::enhance::enhance_meeting,
        handlers::enhance::apply_enhancement,
    ),
    components(schemas(
        meetnote_core::Meeting,
        meetnote_core::CreateMeetingRequest,
        meetnote_core::UpdateMeetingRequest,
        meetnote_core::EnhanceType,
        meetnote_core::EnhancementResult,
        handlers::meetings::DeleteMeetingResponse,
        handlers::enhance::EnhanceBody,
        handlers::enhance::ApplyEnhancementResponse,
        HealthResponse,
        RateLimitStatus,
    )),
    tags(
        (name = "Meetings", description = "Meeting CRUD operations"),
        (name = "Enhancement", description = "Note enhancement"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

/// Parse a comma-separated origin list, dropping entries that are not valid
/// header values. An empty list falls back to the default origins.
pub fn parse_allowed_origins(raw: &str) -> Vec<HeaderValue> {
    let raw = if raw.trim().is_empty() {
        defaults::ALLOWED_ORIGINS
    } else {
        raw
    };

    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Build the global limiter: `requests` per `period_secs`, bursting up to
/// `requests`. Returns `None`, with a warning, when the quota is unusable.
pub fn build_rate_limiter(requests: u32, period_secs: u64) -> Option<Arc<GlobalRateLimiter>> {
    let Some(burst) = NonZeroU32::new(requests) else {
        tracing::warn!(
            subsystem = "api",
            component = "rate_limit",
            requests,
            period_secs,
            "Rate limit of zero requests; rate limiting disabled"
        );
        return None;
    };
    let replenish = Duration::from_secs(period_secs) / burst.get();
    let Some(quota) = Quota::with_period(replenish) else {
        tracing::warn!(
            subsystem = "api",
            component = "rate_limit",
            requests,
            period_secs,
            "Replenish interval rounds to zero; rate limiting disabled"
        );
        return None;
    };
    Some(Arc::new(RateLimiter::direct(quota.allow_burst(burst))))
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    if let Some(limiter) = &state.rate_limiter {
        if limiter.check().is_err() {
            tracing::warn!(subsystem = "api", component = "rate_limit", "Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "error_description": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RateLimitStatus {
    pub enabled: bool,
    pub message: String,
}

/// Get rate limiting status.
#[utoipa::path(get, path = "/api/v1/rate-limit/status", tag = "System",
    responses((status = 200, description = "Limiter status", body = RateLimitStatus))
)]
async fn rate_limit_status(State(state): State<AppState>) -> Json<RateLimitStatus> {
    let enabled = state.rate_limiter.is_some();
    Json(RateLimitStatus {
        enabled,
        message: if enabled {
            "Rate limiting is active".to_string()
        } else {
            "Rate limiting is disabled".to_string()
        },
    })
}

// =============================================================================
// HEALTH CHECK
// =============================================================================

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the full application router.
pub fn app(state: AppState, allowed_origins: Vec<HeaderValue>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Meetings CRUD
        .route("/api/v1/meetings", get(list_meetings).post(create_meeting))
        .route(
            "/api/v1/meetings/:id",
            get(get_meeting)
                .patch(update_meeting)
                .delete(delete_meeting),
        )
        // Enhancement
        .route("/api/v1/enhance", post(enhance_meeting))
        .route("/api/v1/enhance/apply", post(apply_enhancement))
        .route("/api/v1/rate-limit/status", get(rate_limit_status))
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(Duration::from_secs(3600)),
        )
        .layer(RequestBodyLimitLayer::new(defaults::REQUEST_BODY_LIMIT))
        .with_state(state)
}
