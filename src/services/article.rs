// src/services/article.rs

//! Article generation from detected labels.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Article, GenerationConfig, LabelBatch};

use super::{CompletionClient, CompletionRequest};

/// Build the single user prompt for a set of label names.
pub fn build_prompt(names: &[&str]) -> String {
    format!(
        "Write an engaging and informative article based on the following labels: {}. \
         Include a creative description and potential context of the scene.",
        names.join(", ")
    )
}

/// Turns a label batch into prose through a completion backend.
pub struct ArticleGenerator {
    client: Arc<dyn CompletionClient>,
    temperature: f32,
    max_tokens: u32,
}

impl ArticleGenerator {
    pub fn new(client: Arc<dyn CompletionClient>, config: &GenerationConfig) -> Self {
        Self {
            client,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    /// Generate one article for the whole batch.
    ///
    /// An empty batch short-circuits to [`Article::NoContent`] without a
    /// service call. Service failures are returned to the caller.
    pub async fn generate(&self, batch: &LabelBatch) -> Result<Article> {
        if batch.is_empty() {
            return Ok(Article::NoContent);
        }

        let request = CompletionRequest {
            prompt: build_prompt(&batch.distinct_names()),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let text = self.client.generate_completion(&request).await?;
        Ok(Article::Generated(text.trim().to_string()))
    }
}
