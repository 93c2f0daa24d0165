//! API Routes
//!
//! Configures the Axum router with all render service endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    clear_handler, debug_handler, health_handler, prune_handler, render_handler, stats_handler,
    AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/render", post(render_handler))
        .route("/stats", get(stats_handler))
        .route("/cache", delete(clear_handler))
        .route("/cache/debug", get(debug_handler))
        .route("/cache/prune", post(prune_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{RenderCache, RenderOutput};
    use crate::error::Result;
    use crate::models::RenderRequest;
    use crate::renderer::Renderer;
    use crate::service::RenderService;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    struct StaticRenderer;

    #[async_trait]
    impl Renderer for StaticRenderer {
        async fn render(&self, _request: &RenderRequest) -> Result<RenderOutput> {
            Ok(RenderOutput::new(b"<svg/>".to_vec(), "image/svg+xml"))
        }
    }

    fn create_test_app(cached: bool) -> Router {
        let cache = cached.then(|| RenderCache::new(100, 1024 * 1024).unwrap());
        let service = RenderService::new(cache, Arc::new(StaticRenderer), 60_000);
        create_router(AppState::new(service))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_render_endpoint() {
        let app = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/render")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"source_code":"A-->B","diagram_format":"mermaid","output_format":"svg"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_render_endpoint_bad_request() {
        let app = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/render")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"source_code":"","diagram_format":"mermaid","output_format":"svg"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_debug_endpoint_conflict_when_disabled() {
        let app = create_test_app(false);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cache/debug")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
