//! Invocation response payload.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Article;

/// Fixed completion message carried in every response body.
pub const COMPLETION_MESSAGE: &str = "Label detection and article generation complete";

/// Value returned from one invocation.
///
/// `body` is a JSON string, not a nested object, matching what API-style
/// Lambda integrations expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

/// Decoded form of [`ResponseEnvelope::body`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseBody {
    pub message: String,
    pub article: String,
}

impl ResponseEnvelope {
    /// Build the 200 response for a finished invocation.
    pub fn completed(article: &Article) -> Self {
        let body = serde_json::json!({
            "message": COMPLETION_MESSAGE,
            "article": article.as_str(),
        });
        Self {
            status_code: 200,
            body: body.to_string(),
        }
    }

    /// Decode the JSON body.
    pub fn parse_body(&self) -> Result<ResponseBody> {
        Ok(serde_json::from_str(&self.body)?)
    }
}
