//! Health check endpoint

use axum::Json;

use crate::error::ApiError;
use crate::schemas::HealthResponse;

/// GET /health
///
/// Fixed liveness payload. Never consults the completion provider.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::running())
}

/// Fallback for unknown routes, so callers still get a JSON body
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use crate::config::Settings;
    use crate::server::{routes::create_router, state::AppState};
    use crate::services::tutor::testing::{Scripted, StubProvider};
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_fixed_payload() {
        let provider = StubProvider::new(vec![Scripted::Fail(500, "down")]);
        let app = create_router(AppState::with_provider(Settings::default(), provider.clone()));

        // A failed /ask beforehand must not change the health answer
        let _ = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/ask")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"question": "1/2 + 1/4"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        let response = app.oneshot(get("/health")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({"status": "running", "message": "GCSE Maths Agent is live!"})
        );
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let app = create_router(AppState::with_provider(Settings::default(), StubProvider::new(vec![])));

        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"error": "Not found"}));
    }
}
