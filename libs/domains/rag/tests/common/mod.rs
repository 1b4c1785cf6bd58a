//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use domain_rag::{ChatModel, Document, Prompt, RagError, RagResult, Retriever};

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_fake_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Retriever returning fixed documents and counting calls
#[derive(Default)]
pub struct FakeRetriever {
    pub documents: Vec<Document>,
    pub calls: AtomicUsize,
}

impl FakeRetriever {
    pub fn with_documents(documents: Vec<Document>) -> Arc<Self> {
        Arc::new(Self {
            documents,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Retriever for FakeRetriever {
    async fn retrieve(&self, _query: &str) -> RagResult<Vec<Document>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.documents.clone())
    }
}

/// Chat model answering with a fixed reply, or failing, and counting calls
pub struct FakeModel {
    pub reply: Option<String>,
    pub calls: AtomicUsize,
}

impl FakeModel {
    pub fn answering(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChatModel for FakeModel {
    async fn generate(&self, _prompt: &Prompt) -> RagResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply
            .clone()
            .ok_or_else(|| RagError::Generation("API key not valid. key=secret-123".to_string()))
    }
}
