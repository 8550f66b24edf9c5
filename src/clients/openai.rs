// src/clients/openai.rs

//! Chat completion client for OpenAI-compatible endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{ApiKey, GenerationConfig};
use crate::services::{CompletionClient, CompletionRequest};
use crate::utils::{http, preview};

/// Longest error body kept in a [`AppError::Generation`].
const ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Sends single-turn chat completion requests.
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: ApiKey,
}

impl OpenAiClient {
    /// Create a client with its own HTTP connection pool.
    pub fn new(config: &GenerationConfig, api_key: ApiKey) -> Result<Self> {
        let client = http::create_async_client(config)?;
        Ok(Self::with_client(client, config, api_key))
    }

    /// Create a client around an existing HTTP client.
    pub fn with_client(client: Client, config: &GenerationConfig, api_key: ApiKey) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
        }
    }

    fn request_body<'a>(&'a self, request: &'a CompletionRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

/// Extract `choices[0].message.content` from a response body.
fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AppError::malformed(format!("invalid completion JSON: {e}")))?;

    response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AppError::malformed("response has no choices"))?
        .message
        .content
        .ok_or_else(|| AppError::malformed("first choice has no content"))
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn generate_completion(&self, request: &CompletionRequest) -> Result<String> {
        let mut builder = self
            .client
            .post(&self.endpoint)
            .json(&self.request_body(request));
        if let Some(key) = self.api_key.expose() {
            builder = builder.bearer_auth(key);
        }

        log::debug!("POST {} (model={})", self.endpoint, self.model);
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AppError::generation(
                status.as_u16(),
                preview(&body, ERROR_BODY_CHARS),
            ));
        }

        parse_completion(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use mockito::{Matcher, Server, ServerGuard};

    use crate::models::{Config, GENERATION_FAILED_MESSAGE, Label, UploadEvent};
    use crate::pipeline::NotificationProcessor;
    use crate::services::testing::FakeDetector;

    const CHAT_PATH: &str = "/v1/chat/completions";

    fn client_for(server: &ServerGuard, api_key: ApiKey) -> OpenAiClient {
        let config = GenerationConfig {
            endpoint: format!("{}{}", server.url(), CHAT_PATH),
            timeout_secs: 5,
            ..GenerationConfig::default()
        };
        OpenAiClient::new(&config, api_key).unwrap()
    }

    fn cat_request() -> CompletionRequest {
        CompletionRequest {
            prompt: "Write about Cat.".to_string(),
            temperature: 0.7,
            max_tokens: 800,
        }
    }

    #[tokio::test]
    async fn test_completion_success_over_http() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", CHAT_PATH)
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4",
                "max_tokens": 800,
                "messages": [{"role": "user", "content": "Write about Cat."}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"choices": [{"index": 0, "message": {"role": "assistant", "content": "A cat enjoys the outdoors."}}]}"#,
            )
            .create_async()
            .await;

        let client = client_for(&server, ApiKey::new("sk-test"));
        let text = client.generate_completion(&cat_request()).await.unwrap();

        assert_eq!(text, "A cat enjoys the outdoors.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_key_sends_no_authorization() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", CHAT_PATH)
            .match_header("authorization", Matcher::Missing)
            .with_status(401)
            .with_body(r#"{"error": {"message": "No API key provided"}}"#)
            .create_async()
            .await;

        let client = client_for(&server, ApiKey::default());
        let result = client.generate_completion(&cat_request()).await;

        assert!(matches!(result, Err(AppError::Generation { status: 401, .. })));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_keeps_truncated_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", CHAT_PATH)
            .match_header("authorization", "Bearer sk-test")
            .with_status(503)
            .with_body("x".repeat(ERROR_BODY_CHARS + 100))
            .create_async()
            .await;

        let client = client_for(&server, ApiKey::new("sk-test"));
        match client.generate_completion(&cat_request()).await {
            Err(AppError::Generation { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body.len(), ERROR_BODY_CHARS + 3);
                assert!(body.ends_with("..."));
            }
            other => panic!("Expected Generation error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_becomes_failed_article() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", CHAT_PATH)
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let detector =
            Arc::new(FakeDetector::new().with_labels("cat.png", vec![Label::new("Cat", 95.0)]));
        let completion = Arc::new(client_for(&server, ApiKey::new("sk-test")));
        let processor = NotificationProcessor::new(&Config::default(), detector, completion);

        let envelope = processor
            .process(&UploadEvent::from_objects([("b", "cat.png")]))
            .await;

        assert_eq!(envelope.status_code, 200);
        assert_eq!(
            envelope.parse_body().unwrap().article,
            GENERATION_FAILED_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_success_status_with_bad_body_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", CHAT_PATH)
            .with_status(200)
            .with_body(r#"{"choices": []}"#)
            .create_async()
            .await;

        let client = client_for(&server, ApiKey::new("sk-test"));
        let result = client.generate_completion(&cat_request()).await;

        assert!(matches!(result, Err(AppError::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_completion_first_choice() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "A cat enjoys the outdoors."}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }"#;
        assert_eq!(parse_completion(body).unwrap(), "A cat enjoys the outdoors.");
    }

    #[test]
    fn test_parse_completion_rejects_missing_parts() {
        assert!(matches!(
            parse_completion(r#"{"choices": []}"#),
            Err(AppError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_completion(r#"{"choices": [{"message": {"role": "assistant"}}]}"#),
            Err(AppError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_completion("<html>bad gateway</html>"),
            Err(AppError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let client = OpenAiClient::new(&GenerationConfig::default(), ApiKey::new("sk-test")).unwrap();
        let request = CompletionRequest {
            prompt: "Write about Cat.".to_string(),
            temperature: 0.7,
            max_tokens: 800,
        };
        let value = serde_json::to_value(client.request_body(&request)).unwrap();

        assert_eq!(value["model"], "gpt-4");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "Write about Cat.");
        assert_eq!(value["max_tokens"], 800);
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_http_error() {
        let config = GenerationConfig {
            endpoint: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            timeout_secs: 5,
            ..GenerationConfig::default()
        };
        let client = OpenAiClient::new(&config, ApiKey::default()).unwrap();
        let request = CompletionRequest {
            prompt: "Write about Cat.".to_string(),
            temperature: 0.7,
            max_tokens: 800,
        };
        let result = client.generate_completion(&request).await;
        assert!(matches!(result, Err(AppError::Http(_))));
    }
}
