// src/lambda/mod.rs

//! AWS Lambda handler for upload notifications.
//!
//! Wiring happens once per cold start in [`build_processor`]; each
//! invocation then only runs the pipeline.
//!
//! ## Environment Variables
//!
//! - `OPENAI_API_KEY`: Bearer credential for the chat completion endpoint
//! - `CONFIG_PATH`: Optional TOML config bundled with the function
//! - `MAX_LABELS`, `MIN_CONFIDENCE`: Label request limits
//! - `OPENAI_MODEL`, `OPENAI_ENDPOINT`, `GENERATION_TIMEOUT_SECS`: Generation settings
//! - `RUST_LOG`: Log level (e.g., `info`, `debug`)

use std::sync::Arc;

use lambda_runtime::{Error as LambdaError, LambdaEvent};
use tracing::{info, instrument};

use crate::clients::{OpenAiClient, RekognitionDetector};
use crate::error::Result;
use crate::models::{ApiKey, Config, ResponseEnvelope, UploadEvent};
use crate::pipeline::NotificationProcessor;

/// Main Lambda handler function.
#[instrument(skip(event, processor), fields(request_id = %event.context.request_id))]
pub async fn handler(
    event: LambdaEvent<UploadEvent>,
    processor: &NotificationProcessor,
) -> std::result::Result<ResponseEnvelope, LambdaError> {
    let (upload, _context) = event.into_parts();
    info!("Received {} upload records", upload.records.len());

    Ok(processor.process(&upload).await)
}

/// Load configuration suitable for Lambda environment.
pub fn load_lambda_config() -> Result<Config> {
    let mut config = match std::env::var("CONFIG_PATH") {
        Ok(path) => Config::load_or_default(path),
        Err(_) => Config::default(),
    };
    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

/// Build the processor with production service clients.
pub async fn build_processor() -> Result<NotificationProcessor> {
    let config = load_lambda_config()?;
    let api_key = ApiKey::from_env();

    let detector = RekognitionDetector::from_env().await;
    let completion = OpenAiClient::new(&config.generation, api_key)?;

    info!(
        "Processor ready: model={}, max_labels={}, min_confidence={}",
        config.generation.model, config.vision.max_labels, config.vision.min_confidence
    );

    Ok(NotificationProcessor::new(
        &config,
        Arc::new(detector),
        Arc::new(completion),
    ))
}
