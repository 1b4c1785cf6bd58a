//! Grocery chatbot HTTP service
//!
//! Answers shoppers' questions from the store's indexed documents.
//!
//! ## Architecture
//!
//! ```text
//! Browser (React frontend)
//!   ↓ POST /api/chat {message}
//! chat handler (domain_rag::handlers)
//!   ↓
//! RagPipeline
//!   ↓ embed → Pinecone top-k → Gemini
//! {response}
//! ```
//!
//! ## Modules
//!
//! - `config`: environment configuration
//! - `openapi`: combined OpenAPI document
//! - `server`: startup and router assembly

pub mod config;
pub mod openapi;
pub mod server;

pub use server::{build_router, run};
