//! HTTP handlers for the chatbot

use axum::{Json, Router, extract::State, routing::post};
use axum_helpers::{ErrorResponse, ValidatedJson};
use std::sync::Arc;
use tracing::info;
use utoipa::OpenApi;

use crate::error::RagResult;
use crate::models::{ChatRequest, ChatResponse};
use crate::pipeline::RagPipeline;

/// Paths the chat handler answers on
pub const CHAT_PATHS: [&str; 3] = ["/api/chat", "/chat", "/ask"];

/// OpenAPI documentation for the chat API
#[derive(OpenApi)]
#[openapi(
    paths(chat),
    components(schemas(ChatRequest, ChatResponse, ErrorResponse)),
    tags(
        (name = "chat", description = "Retrieval-augmented question answering")
    )
)]
pub struct ChatApiDoc;

/// Answer a question from the indexed documents
///
/// Also served at `/chat` and `/ask`.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "chat",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Generated answer", body = ChatResponse),
        (status = 400, description = "Missing or invalid message", body = ErrorResponse),
        (status = 500, description = "Retrieval or generation failed", body = ErrorResponse)
    )
)]
pub async fn chat(
    State(pipeline): State<Arc<RagPipeline>>,
    ValidatedJson(request): ValidatedJson<ChatRequest>,
) -> RagResult<Json<ChatResponse>> {
    info!(question = %request.message, "Received question");

    let answer = pipeline.answer(&request.message).await?;
    info!(
        answer = %answer.answer,
        documents = answer.context.len(),
        "Generated answer"
    );

    Ok(Json(ChatResponse {
        response: answer.answer,
    }))
}

/// Create the chat router, one handler bound to every path in [`CHAT_PATHS`]
pub fn router(pipeline: RagPipeline) -> Router {
    let shared_pipeline = Arc::new(pipeline);

    CHAT_PATHS
        .iter()
        .fold(Router::new(), |router, path| router.route(path, post(chat)))
        .with_state(shared_pipeline)
}
