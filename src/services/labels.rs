// src/services/labels.rs

//! Label fetching for single images.

use std::sync::Arc;

use crate::error::Result;
use crate::models::{Label, UploadRecord, VisionConfig};

use super::{LabelDetector, LabelQuery};

/// Requests labels for one image at a time.
pub struct LabelFetcher {
    detector: Arc<dyn LabelDetector>,
    query: LabelQuery,
}

impl LabelFetcher {
    pub fn new(detector: Arc<dyn LabelDetector>, config: &VisionConfig) -> Self {
        Self {
            detector,
            query: LabelQuery {
                max_labels: config.max_labels,
                min_confidence: config.min_confidence,
            },
        }
    }

    pub fn query(&self) -> LabelQuery {
        self.query
    }

    /// Labels for one image, in service order.
    ///
    /// The confidence floor and count cap are re-applied here so a backend
    /// that ignores them still honors the per-call limits.
    pub async fn fetch(&self, record: &UploadRecord) -> Result<Vec<Label>> {
        let labels = self.detector.fetch_labels(record, self.query).await?;
        let labels: Vec<Label> = labels
            .into_iter()
            .filter(|label| label.confidence >= self.query.min_confidence)
            .take(self.query.max_labels)
            .collect();

        log::debug!("{} labels kept for {}", labels.len(), record);
        Ok(labels)
    }
}
