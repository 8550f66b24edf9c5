// src/pipeline/process.rs

//! Upload notification processing.
//!
//! Runs the stages in order for one invocation:
//! 1. Select image records from the event
//! 2. Fetch labels per image, sequentially, appending to one batch
//! 3. Generate a single article from the whole batch
//!
//! Service failures never escape: a failed label call contributes no labels
//! and a failed generation becomes [`Article::Failed`]. The caller always
//! gets a 200 envelope.

use std::sync::Arc;
use std::time::Instant;

use crate::models::{Article, Config, Label, LabelBatch, ResponseEnvelope, UploadEvent};
use crate::services::{
    ArticleGenerator, CompletionClient, EventReader, LabelDetector, LabelFetcher,
};

/// Summary of one processed notification batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessOutcome {
    pub images: usize,
    pub label_failures: usize,
    pub labels: LabelBatch,
    pub article: Article,
}

impl ProcessOutcome {
    pub fn envelope(&self) -> ResponseEnvelope {
        ResponseEnvelope::completed(&self.article)
    }
}

/// Render labels as `[Cat (95.2%), Outdoor (81.0%)]` for the per-image log line.
fn format_labels(labels: &[Label]) -> String {
    let names: Vec<String> = labels.iter().map(ToString::to_string).collect();
    format!("[{}]", names.join(", "))
}

/// Orchestrates event reading, label fetching and article generation.
pub struct NotificationProcessor {
    reader: EventReader,
    fetcher: LabelFetcher,
    generator: ArticleGenerator,
}

impl NotificationProcessor {
    pub fn new(
        config: &Config,
        detector: Arc<dyn LabelDetector>,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            reader: EventReader::new(&config.events),
            fetcher: LabelFetcher::new(detector, &config.vision),
            generator: ArticleGenerator::new(completion, &config.generation),
        }
    }

    /// Process an event and build the invocation response.
    pub async fn process(&self, event: &UploadEvent) -> ResponseEnvelope {
        self.run(event).await.envelope()
    }

    /// Process an event and keep the intermediate results.
    pub async fn run(&self, event: &UploadEvent) -> ProcessOutcome {
        let start = Instant::now();
        let records = self.reader.image_records(event);

        let mut labels = LabelBatch::new();
        let mut label_failures = 0;
        for record in &records {
            let found = match self.fetcher.fetch(record).await {
                Ok(found) => found,
                Err(e) => {
                    log::error!("Label detection failed: {}", e);
                    label_failures += 1;
                    Vec::new()
                }
            };
            log::info!(
                "Detected labels for {}: {}",
                record.object_path,
                format_labels(&found)
            );
            labels.extend(found);
        }

        let article = match self.generator.generate(&labels).await {
            Ok(article) => article,
            Err(e) => {
                log::error!("Article generation failed: {}", e);
                Article::Failed
            }
        };
        log::info!("Generated article:\n{}", article);

        log::info!(
            "Processed {} images ({} failed), {} labels in {}ms",
            records.len(),
            label_failures,
            labels.len(),
            start.elapsed().as_millis()
        );

        ProcessOutcome {
            images: records.len(),
            label_failures,
            labels,
            article,
        }
    }
}
