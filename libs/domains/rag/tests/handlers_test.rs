//! Handler tests for the chat endpoints
//!
//! The pipeline runs against in-memory fakes so these tests cover request
//! validation, error mapping and path aliases without any network.

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_helpers::{ErrorCode, ErrorResponse};
use common::{FakeModel, FakeRetriever};
use domain_rag::handlers::CHAT_PATHS;
use domain_rag::{ChatResponse, Document, NO_MESSAGE, RagPipeline, router};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

fn app(retriever: Arc<FakeRetriever>, model: Arc<FakeModel>) -> Router {
    router(RagPipeline::new(retriever, model))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_chat_returns_model_answer() {
    let retriever = FakeRetriever::with_documents(vec![Document::new(
        "1",
        "Milk is in aisle 4.",
        0.9,
    )]);
    let model = FakeModel::answering("You can find milk in aisle 4.");

    let response = app(retriever.clone(), model.clone())
        .oneshot(post_json("/api/chat", r#"{"message": "Where is the milk?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: ChatResponse = json_body(response).await;
    assert_eq!(body.response, "You can find milk in aisle 4.");
    assert_eq!(retriever.calls(), 1);
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_all_paths_share_one_handler() {
    let retriever = FakeRetriever::with_documents(vec![]);
    let model = FakeModel::answering("Same answer");

    let mut answers = Vec::new();
    for path in CHAT_PATHS {
        let response = app(retriever.clone(), model.clone())
            .oneshot(post_json(path, r#"{"message": "Hours?"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "POST {}", path);
        let body: ChatResponse = json_body(response).await;
        answers.push(body.response);
    }

    assert!(answers.iter().all(|a| a == "Same answer"));
    assert_eq!(model.calls(), 3);
}

#[tokio::test]
async fn test_missing_null_or_empty_message_is_rejected_on_every_path() {
    for path in CHAT_PATHS {
        for body in [r#"{}"#, r#"{"message": null}"#, r#"{"message": ""}"#] {
            let retriever = FakeRetriever::with_documents(vec![]);
            let model = FakeModel::answering("unused");

            let response = app(retriever.clone(), model.clone())
                .oneshot(post_json(path, body))
                .await
                .unwrap();

            assert_eq!(
                response.status(),
                StatusCode::BAD_REQUEST,
                "POST {} {}",
                path,
                body
            );
            let error: ErrorResponse = json_body(response).await;
            assert_eq!(error.error, NO_MESSAGE, "POST {} {}", path, body);
            assert_eq!(error.code, ErrorCode::ValidationError);
            assert_eq!(retriever.calls(), 0);
            assert_eq!(model.calls(), 0);
        }
    }
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let retriever = FakeRetriever::with_documents(vec![]);
    let model = FakeModel::answering("unused");

    let response = app(retriever.clone(), model.clone())
        .oneshot(post_json("/ask", "{not json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.code, ErrorCode::InvalidJson);
    assert_eq!(model.calls(), 0);
}

#[tokio::test]
async fn test_missing_body_is_rejected() {
    let retriever = FakeRetriever::with_documents(vec![]);
    let model = FakeModel::answering("unused");

    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .body(Body::empty())
        .unwrap();
    let response = app(retriever.clone(), model.clone())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(retriever.calls(), 0);
}

#[tokio::test]
async fn test_pipeline_failure_returns_generic_500() {
    let retriever = FakeRetriever::with_documents(vec![]);
    let model = FakeModel::failing();

    let response = app(retriever, model.clone())
        .oneshot(post_json("/api/chat", r#"{"message": "Where is the milk?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: ErrorResponse = json_body(response).await;
    assert_eq!(error.error, "An error occurred while processing your request");
    assert!(!error.error.contains("secret-123"));
    assert_eq!(error.code, ErrorCode::UpstreamError);
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn test_each_request_invokes_pipeline() {
    let retriever = FakeRetriever::with_documents(vec![]);
    let model = FakeModel::answering("ok");
    let app = app(retriever.clone(), model.clone());

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(post_json("/chat", r#"{"message": "Same question"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(retriever.calls(), 2);
    assert_eq!(model.calls(), 2);
}
