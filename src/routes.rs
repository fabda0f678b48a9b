// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::CorsPolicy,
    handlers::{docs, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Mounts the quiz endpoints and the OpenAPI document.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store and config).
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    Router::new()
        .route("/exam", get(quiz::get_exam))
        .route("/submit", post(quiz::submit))
        .route("/results", get(quiz::list_results))
        .route("/api-docs/openapi.json", get(docs::openapi_json))
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

fn cors_layer(policy: &CorsPolicy) -> CorsLayer {
    let origin = match policy {
        CorsPolicy::Any => AllowOrigin::from(Any),
        CorsPolicy::Origins(origins) => {
            let values: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(value) => Some(value),
                    Err(e) => {
                        tracing::warn!("Skipping CORS origin {}: {}", o, e);
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, store::MemoryStore};
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    fn test_config(cors: CorsPolicy) -> Config {
        Config {
            database_url: "postgres://unused".to_string(),
            rust_log: "error".to_string(),
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            db_max_connections: 1,
            log_dir: "logs".to_string(),
            cors,
        }
    }

    #[tokio::test]
    async fn test_allowed_origin_is_echoed() {
        let app = create_router(AppState::new(
            MemoryStore::new(),
            test_config(CorsPolicy::Origins(vec!["http://localhost:5500".to_string()])),
        ));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/results")
                    .header(header::ORIGIN, "http://localhost:5500")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:5500"
        );
    }

    #[tokio::test]
    async fn test_foreign_origin_gets_no_cors_header() {
        let app = create_router(AppState::new(
            MemoryStore::new(),
            test_config(CorsPolicy::Origins(vec!["http://localhost:5500".to_string()])),
        ));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/results")
                    .header(header::ORIGIN, "https://evil.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_wildcard_policy() {
        let app = create_router(AppState::new(
            MemoryStore::new(),
            test_config(CorsPolicy::Any),
        ));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/results")
                    .header(header::ORIGIN, "https://anywhere.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[tokio::test]
    async fn test_openapi_document_lists_paths() {
        let app = create_router(AppState::new(
            MemoryStore::new(),
            test_config(CorsPolicy::Any),
        ));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api-docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        for path in ["/exam", "/submit", "/results"] {
            assert!(doc["paths"].get(path).is_some(), "missing {}", path);
        }
    }
}
