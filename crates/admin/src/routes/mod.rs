//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (database)
//!
//! # Install
//! GET  /auth                      - Start OAuth install
//! GET  /auth/callback             - Finish OAuth install
//!
//! # Embedded app
//! GET  /app                       - Add-section page
//! POST /app/sections              - Add the section to the active theme
//!
//! # Webhooks
//! POST /webhooks/app-uninstalled  - Drop the stored access token
//! ```

use axum::Router;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::{SessionManagerLayer, SessionStore};
use tracing::Span;

use crate::middleware::frame_ancestors_layer;
use crate::state::AppState;

pub mod auth;
pub mod health;
pub mod sections;
pub mod webhooks;

pub use sections::SectionResponse;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(sections::router())
        .merge(webhooks::router())
}

/// Build the full application with its per-request layers.
///
/// Sentry layers are added by the binary on top of this.
pub fn app<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    let csp = frame_ancestors_layer(state.shopify().store());

    routes()
        .layer(session_layer)
        .layer(csp)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri().path(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
