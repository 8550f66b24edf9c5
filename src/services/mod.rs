// src/services/mod.rs

//! Pipeline stages and the external service seams they call through.
//!
//! - `event_reader`: Select image uploads from a notification batch
//! - `labels`: Fetch labels for one image
//! - `article`: Turn a label batch into prose

pub mod article;
pub mod event_reader;
pub mod labels;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Label, UploadRecord};

pub use article::{ArticleGenerator, build_prompt};
pub use event_reader::EventReader;
pub use labels::LabelFetcher;

/// Parameters for one label detection request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelQuery {
    pub max_labels: usize,
    pub min_confidence: f32,
}

/// Parameters for one chat completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Image labeling backend.
#[async_trait]
pub trait LabelDetector: Send + Sync {
    /// Detect labels for an uploaded object, in the order the service reports them.
    async fn fetch_labels(&self, record: &UploadRecord, query: LabelQuery) -> Result<Vec<Label>>;
}

/// Text generation backend.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Return the raw completion text for a single-message prompt.
    async fn generate_completion(&self, request: &CompletionRequest) -> Result<String>;
}
