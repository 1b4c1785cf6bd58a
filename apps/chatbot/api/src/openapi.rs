use axum_helpers::{ErrorCode, HealthResponse};
use domain_rag::ChatApiDoc;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Grocery Chatbot API",
        description = "Retrieval-augmented answers to shoppers' questions"
    ),
    paths(axum_helpers::server::health::health_handler),
    components(schemas(HealthResponse, ErrorCode)),
    tags(
        (name = "Health", description = "Liveness")
    )
)]
struct BaseApiDoc;

/// Health plus chat endpoints
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseApiDoc::openapi();
        doc.merge(ChatApiDoc::openapi());
        doc
    }
}
