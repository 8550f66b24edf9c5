//! Scripted service fakes shared by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{Label, UploadRecord};

use super::{CompletionClient, CompletionRequest, LabelDetector, LabelQuery};

/// Returns labels keyed by object path; unknown keys yield no labels.
#[derive(Default)]
pub struct FakeDetector {
    labels: HashMap<String, Vec<Label>>,
    failing: HashSet<String>,
    calls: Mutex<Vec<(UploadRecord, LabelQuery)>>,
}

impl FakeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_labels(mut self, key: &str, labels: Vec<Label>) -> Self {
        self.labels.insert(key.to_string(), labels);
        self
    }

    pub fn failing_on(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(UploadRecord, LabelQuery)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LabelDetector for FakeDetector {
    async fn fetch_labels(&self, record: &UploadRecord, query: LabelQuery) -> Result<Vec<Label>> {
        self.calls.lock().unwrap().push((record.clone(), query));
        if self.failing.contains(&record.object_path) {
            return Err(AppError::vision(record.to_string(), "access denied"));
        }
        Ok(self
            .labels
            .get(&record.object_path)
            .cloned()
            .unwrap_or_default())
    }
}

/// Replies with a fixed completion, or fails every call.
pub struct FakeCompletion {
    reply: Option<String>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl FakeCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for FakeCompletion {
    async fn generate_completion(&self, request: &CompletionRequest) -> Result<String> {
        self.calls.lock().unwrap().push(request.clone());
        self.reply
            .clone()
            .ok_or_else(|| AppError::generation(500, "upstream unavailable"))
    }
}
