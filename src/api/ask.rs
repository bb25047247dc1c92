//! Question answering endpoint
//!
//! POST /ask: validate the question, relay it to the completion provider
//! with the tutor prompt, and return the answer text.

use axum::{extract::rejection::JsonRejection, extract::State, Extension, Json};

use crate::error::ApiError;
use crate::middleware::TraceId;
use crate::schemas::{AskRequest, AskResponse};
use crate::server::state::AppState;
use crate::services::Question;

/// POST /ask
///
/// Body decoding failures are taken as a `Result` so they surface as the
/// tutor's own 500 payload instead of axum's plain-text rejection.
pub async fn ask_question(
    State(state): State<AppState>,
    Extension(trace_id): Extension<TraceId>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(trace_id = %trace_id, error = %rejection.body_text(), "Unreadable /ask body");
        rejection
    })?;

    let question = Question::parse(request.question.as_deref())?;

    tracing::debug!(
        trace_id = %trace_id,
        question_chars = question.char_count(),
        "Answering question"
    );

    let answer = state.tutor.answer(&question).await?;

    Ok(Json(AskResponse { answer }))
}

#[cfg(test)]
mod tests {
    use crate::config::Settings;
    use crate::server::{routes::create_router, state::AppState};
    use crate::services::tutor::testing::{Scripted, StubProvider};
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        Router,
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(provider: Arc<StubProvider>) -> Router {
        create_router(AppState::with_provider(Settings::default(), provider))
    }

    fn ask(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/ask")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_valid_question_returns_answer() {
        let provider = StubProvider::new(vec![Scripted::Answer("15% of 200 is 30. Keep it up!")]);
        let app = app(provider.clone());

        let (status, body) = send(&app, ask(r#"{"question": "What is 15% of 200?"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"answer": "15% of 200 is 30. Keep it up!"}));
        assert_eq!(provider.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_null_or_blank_question_is_rejected() {
        let provider = StubProvider::new(vec![]);
        let app = app(provider.clone());

        for body in [r#"{}"#, r#"{"question": null}"#, r#"{"question": ""}"#, r#"{"question": "   "}"#] {
            let (status, payload) = send(&app, ask(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
            assert_eq!(payload, json!({"error": "No question provided"}));
        }

        assert!(provider.requests().is_empty(), "provider must not be called");
    }

    #[tokio::test]
    async fn test_invalid_json_is_server_error() {
        let app = app(StubProvider::new(vec![]));

        let (status, body) = send(&app, ask("{not json")).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_body_is_server_error() {
        let app = app(StubProvider::new(vec![]));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/ask")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_array_body_is_server_error() {
        let provider = StubProvider::new(vec![Scripted::Answer("thirty")]);
        let app = app(provider.clone());

        for body in [r#"["What is 15% of 200?"]"#, "[]"] {
            let (status, payload) = send(&app, ask(body)).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "body: {}", body);
            assert!(!payload["error"].as_str().unwrap().is_empty());
        }

        assert!(provider.requests().is_empty(), "provider must not be called");
    }

    #[tokio::test]
    async fn test_caller_trace_id_is_returned() {
        let app = app(StubProvider::new(vec![Scripted::Answer("1/2 + 1/4 = 3/4")]));
        let request = Request::builder()
            .method(Method::POST)
            .uri("/ask")
            .header("content-type", "application/json")
            .header("x-trace-id", "lesson-42")
            .body(Body::from(r#"{"question": "1/2 + 1/4"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get("x-trace-id").unwrap(), "lesson-42");
    }

    #[tokio::test]
    async fn test_non_string_question_is_server_error() {
        let provider = StubProvider::new(vec![]);
        let app = app(provider.clone());

        let (status, _) = send(&app, ask(r#"{"question": 42}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(provider.requests().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_does_not_poison_later_requests() {
        let provider = StubProvider::new(vec![
            Scripted::Fail(503, "Service Unavailable"),
            Scripted::Answer("Ratio 2:3 means..."),
        ]);
        let app = app(provider.clone());

        let (status, body) = send(&app, ask(r#"{"question": "Share £50 in 2:3"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "API error: 503 - Service Unavailable"}));

        let (status, body) = send(&app, ask(r#"{"question": "Share £50 in 2:3"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"answer": "Ratio 2:3 means..."}));
    }

    #[tokio::test]
    async fn test_repeated_question_is_answered_independently() {
        let provider = StubProvider::new(vec![
            Scripted::Answer("First phrasing"),
            Scripted::Answer("Second phrasing"),
        ]);
        let app = app(provider.clone());

        let (first_status, first) = send(&app, ask(r#"{"question": "Area of a 3m by 4m room?"}"#)).await;
        let (second_status, second) = send(&app, ask(r#"{"question": "Area of a 3m by 4m room?"}"#)).await;

        assert_eq!(first_status, StatusCode::OK);
        assert_eq!(second_status, StatusCode::OK);
        assert!(first["answer"].is_string());
        assert!(second["answer"].is_string());
        assert_eq!(provider.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_completion_is_server_error() {
        let app = app(StubProvider::new(vec![Scripted::NoChoices]));

        let (status, body) = send(&app, ask(r#"{"question": "2 + 2"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "completion provider returned no answer"}));
    }
}
