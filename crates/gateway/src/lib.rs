//! HTTP API gateway for Ninety.
//!
//! Exposes the coaching endpoint and a liveness probe:
//!
//! - `GET  /coach`  — health check, no auth, no side effects
//! - `OPTIONS /coach` — CORS, 204 for bare probes (the CORS layer answers
//!   real browser preflights)
//! - `POST /coach`  — run a coaching request through the pipeline
//! - `GET  /health` — process liveness with version
//!
//! Every response carries permissive cross-origin headers; every failure is
//! converted to the stable envelope at this boundary — nothing propagates
//! to the transport layer uncaught.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use ninety_coach::CoachPipeline;
use ninety_core::envelope::{CoachReply, ReplyMode};
use ninety_core::provider::CompletionProvider;
use ninety_core::request::CoachRequest;
use ninety_providers::OpenAiProvider;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub pipeline: CoachPipeline,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - Permissive CORS (any origin may call the coaching endpoint)
/// - Request body size limit (1 MB)
/// - HTTP trace logging
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/coach",
            get(alive_handler)
                .post(coach_handler)
                .options(preflight_handler),
        )
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
///
/// The provider is built ONCE from configuration and injected into the
/// pipeline as read-only state. A missing API key is not fatal — the
/// service starts in degraded stub mode.
pub async fn start(config: ninety_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let provider: Option<Arc<dyn CompletionProvider>> = config
        .api_key
        .as_ref()
        .map(|key| Arc::new(OpenAiProvider::openai(key.clone())) as Arc<dyn CompletionProvider>);

    if provider.is_none() {
        warn!("No API key configured — serving stub replies until one is set");
    }

    let pipeline = CoachPipeline::new(
        provider,
        &config.model,
        config.temperature,
        config.max_tokens,
    );

    let app = build_router(Arc::new(GatewayState { pipeline }));

    info!(addr = %addr, degraded = config.api_key.is_none(), "Gateway starting");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// --- Handlers ---

#[derive(Serialize)]
struct AliveResponse {
    ok: bool,
    message: &'static str,
}

/// `GET /coach` — the endpoint-level health check used by curl sanity tests.
async fn alive_handler() -> Json<AliveResponse> {
    Json(AliveResponse {
        ok: true,
        message: "Ninety coach API is alive",
    })
}

/// `OPTIONS /coach` — 204 for non-preflight OPTIONS requests.
///
/// Real browser preflights (OPTIONS carrying `Origin` plus
/// `Access-Control-Request-Method`) never reach this handler:
/// `CorsLayer::permissive()` intercepts them and answers `200 OK` with the
/// allow-* headers. Browsers accept any 2xx preflight status, so the two
/// paths are interchangeable to them; this route exists so a bare
/// `curl -X OPTIONS` probe still gets a well-defined 204.
async fn preflight_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `POST /coach` — the main coaching endpoint.
///
/// Validation failures map to 400, degraded and live replies to 200, and
/// upstream failures to 500, always with the envelope body.
async fn coach_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> (StatusCode, Json<CoachReply>) {
    let request = match CoachRequest::parse(&body) {
        Ok(request) => request,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(CoachReply::failure(e.to_string())));
        }
    };

    info!(
        prompt_len = request.prompt.len(),
        has_profile = request.profile.name.is_some() || request.profile.day90_outcomes.is_some(),
        meta_keys = request.meta.len(),
        "Coaching request received"
    );

    let reply = state.pipeline.respond(&request).await;

    let status = match reply.mode {
        ReplyMode::Error => StatusCode::INTERNAL_SERVER_ERROR,
        ReplyMode::Openai | ReplyMode::Stub => StatusCode::OK,
    };

    (status, Json(reply))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use ninety_core::error::ProviderError;
    use ninety_core::message::Message;
    use ninety_core::provider::{CompletionRequest, CompletionResponse};
    use tower::ServiceExt;

    fn stub_state() -> SharedState {
        Arc::new(GatewayState {
            pipeline: CoachPipeline::new(None, "gpt-4.1-mini", 0.5, 500),
        })
    }

    fn state_with(provider: Arc<dyn CompletionProvider>) -> SharedState {
        Arc::new(GatewayState {
            pipeline: CoachPipeline::new(Some(provider), "gpt-4.1-mini", 0.5, 500),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_coach(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/coach")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn get_coach_is_alive() {
        let app = build_router(stub_state());
        let response = app
            .oneshot(Request::builder().uri("/coach").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
        assert!(json["message"].as_str().unwrap().contains("alive"));
    }

    #[tokio::test]
    async fn options_coach_returns_204() {
        let app = build_router(stub_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/coach")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn browser_preflight_is_answered_by_cors_layer() {
        let app = build_router(stub_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/coach")
                    .header("Origin", "https://learner.example")
                    .header("Access-Control-Request-Method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // The CORS layer short-circuits true preflights with a 2xx and the
        // allow-* headers; the 204 route only serves bare OPTIONS.
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
        assert!(response
            .headers()
            .contains_key("access-control-allow-methods"));
    }

    #[tokio::test]
    async fn cors_headers_emitted_for_cross_origin_calls() {
        let app = build_router(stub_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/coach")
                    .header("Origin", "https://learner.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn health_reports_version() {
        let app = build_router(stub_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn post_without_key_returns_stub_envelope() {
        let app = build_router(stub_state());
        let response = app
            .oneshot(post_coach(
                r#"{"prompt":"How should I approach week one?","profile":{"day90_outcomes":"ship a working pilot"}}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
        assert_eq!(json["mode"], "stub");
        assert!(json["reply"].as_str().unwrap().len() > 0);
        assert!(json.get("error").is_none());
    }

    #[tokio::test]
    async fn post_with_empty_prompt_is_client_error() {
        let app = build_router(stub_state());
        let response = app
            .oneshot(post_coach(r#"{"prompt":"","profile":{}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["ok"], false);
        assert!(json["error"].as_str().unwrap().contains("prompt"));
    }

    #[tokio::test]
    async fn post_with_malformed_body_is_client_error() {
        let app = build_router(stub_state());
        let response = app.oneshot(post_coach("this is not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["ok"], false);
        assert!(json["error"].as_str().unwrap().contains("Invalid JSON"));
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, ProviderError> {
            Err(ProviderError::Network("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn upstream_failure_maps_to_server_error() {
        let app = build_router(state_with(Arc::new(FailingProvider)));
        let response = app
            .oneshot(post_coach(r#"{"prompt":"plan my week"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["ok"], false);
        assert_eq!(json["mode"], "error");
        // Upstream detail never reaches the caller.
        assert!(!json["error"].as_str().unwrap().contains("connection refused"));
    }

    struct EchoProvider;

    #[async_trait]
    impl CompletionProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> Result<CompletionResponse, ProviderError> {
            Ok(CompletionResponse {
                message: Message::assistant("• Map your stakeholders."),
                usage: None,
                model: "gpt-4.1-mini".into(),
            })
        }
    }

    #[tokio::test]
    async fn live_reply_uses_openai_mode() {
        let app = build_router(state_with(Arc::new(EchoProvider)));
        let response = app
            .oneshot(post_coach(r#"{"prompt":"plan my week"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["mode"], "openai");
        assert_eq!(json["reply"], "• Map your stakeholders.");
    }
}
