//! AWS Rekognition label detection.
//!
//! Images are referenced in place by bucket and key; no bytes pass through
//! the function.

use async_trait::async_trait;
use aws_sdk_rekognition::Client;
use aws_sdk_rekognition::error::DisplayErrorContext;
use aws_sdk_rekognition::types::{Image, S3Object};

use crate::error::{AppError, Result};
use crate::models::{Label, UploadRecord};
use crate::services::{LabelDetector, LabelQuery};

/// Rekognition-backed [`LabelDetector`].
#[derive(Clone)]
pub struct RekognitionDetector {
    client: Client,
}

impl RekognitionDetector {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a detector from the ambient AWS configuration.
    pub async fn from_env() -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl LabelDetector for RekognitionDetector {
    async fn fetch_labels(&self, record: &UploadRecord, query: LabelQuery) -> Result<Vec<Label>> {
        let image = Image::builder()
            .s3_object(
                S3Object::builder()
                    .bucket(&record.container)
                    .name(&record.object_path)
                    .build(),
            )
            .build();

        let output = self
            .client
            .detect_labels()
            .image(image)
            .max_labels(i32::try_from(query.max_labels).unwrap_or(i32::MAX))
            .min_confidence(query.min_confidence)
            .send()
            .await
            .map_err(|e| AppError::vision(record.to_string(), DisplayErrorContext(&e)))?;

        let labels = output
            .labels()
            .iter()
            .filter_map(|label| {
                let name = label.name()?;
                Some(Label::new(name, label.confidence().unwrap_or_default()))
            })
            .collect();

        Ok(labels)
    }
}
