//! Generated article text and its fixed fallbacks.

use std::fmt;

/// Shown when no image in the batch yielded a label.
pub const NO_CONTENT_MESSAGE: &str = "No recognizable content detected in the images.";

/// Shown when the text generation service could not produce an article.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate article.";

/// The article returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Article {
    /// Prose produced by the text generation service
    Generated(String),
    /// The batch had no labels, so generation was not attempted
    NoContent,
    /// Generation was attempted and failed
    Failed,
}

impl Article {
    /// User-visible text of the article.
    pub fn as_str(&self) -> &str {
        match self {
            Article::Generated(text) => text,
            Article::NoContent => NO_CONTENT_MESSAGE,
            Article::Failed => GENERATION_FAILED_MESSAGE,
        }
    }

    /// Whether this is one of the fallback texts.
    pub fn is_fallback(&self) -> bool {
        !matches!(self, Article::Generated(_))
    }
}

impl fmt::Display for Article {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Article> for String {
    fn from(article: Article) -> Self {
        match article {
            Article::Generated(text) => text,
            other => other.as_str().to_string(),
        }
    }
}
